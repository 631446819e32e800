//! Wire records for the Zoho Mail accounts, attachments and messages endpoints.

use serde::{Deserialize, Serialize};

/// Reference to a file previously uploaded with
/// [`Client::upload_attachment`](crate::Client::upload_attachment).
///
/// The three fields are opaque and are sent back to Zoho unchanged. The type
/// is serializable so callers can keep references around and attach the same
/// upload to several messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub store_name: String,
    pub attachment_path: String,
    pub attachment_name: String,
}

/// `GET /api/accounts` response.
///
/// Entries are optional so a `null` entry reads as an account with no fields.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountsResponse {
    pub data: Option<Vec<Option<AccountInfo>>>,
}

/// One account entry; only the fields the client needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountInfo {
    pub account_id: Option<String>,
    pub primary_email_address: Option<String>,
}

/// Attachment upload response.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub status: Option<ResponseStatus>,
    pub data: Option<Attachment>,
}

/// Status block Zoho embeds in JSON responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseStatus {
    pub code: i64,
    #[serde(default)]
    pub description: String,
}

/// Send-mail request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendMailRequest<'a> {
    pub from_address: &'a str,
    pub to_address: &'a str,
    pub subject: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "no_attachments")]
    pub attachments: &'a [Attachment],
}

fn no_attachments(attachments: &&[Attachment]) -> bool {
    attachments.is_empty()
}
