//! Zoho Mail async client implementation.

use crate::models::{AccountsResponse, SendMailRequest, UploadResponse};
use crate::{Attachment, Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Async client for sending mail through the Zoho Mail REST API.
///
/// Building a client resolves the account id and primary address that the
/// token belongs to; both are cached for the lifetime of the client and never
/// change afterwards, so a `Client` can be shared freely between tasks.
pub struct Client {
    http: reqwest::Client,
    token: String,
    auth_scheme: String,
    base_url: String,
    proxy: Option<String>,
    account_id: String,
    mail_address: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    /// Create a new Zoho Mail client with default settings.
    ///
    /// Looks up the account behind `token` before returning.
    ///
    /// # Examples
    /// ```no_run
    /// # use zohomail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zohomail_client::Error> {
    /// let client = Client::new("1000.xxxxxxxx").await?;
    /// println!("sending as {}", client.mail_address());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(token).build().await
    }

    /// Create a client from the environment.
    ///
    /// Reads the token from `ZOHO_AUTH_TOKEN` and, when set, the API root
    /// from `ZOHO_MAIL_BASE_URL`.
    pub async fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok()).await
    }

    /// Same as [`Client::from_env`], reading variables through `lookup`.
    async fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_ENV)
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingConfig(TOKEN_ENV))?;

        let mut builder = ClientBuilder::new(token);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|url| !url.is_empty()) {
            builder = builder.base_url(base_url);
        }
        builder.build().await
    }

    /// The account id resolved at construction.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// The primary address of the account, used as the sender of every mail.
    pub fn mail_address(&self) -> &str {
        &self.mail_address
    }

    /// The API root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Upload a file so it can be attached to later messages.
    ///
    /// # Arguments
    /// * `file_name` - Name the attachment will carry
    /// * `content` - Raw file bytes, may be empty
    ///
    /// # Returns
    /// The reference Zoho assigned to the upload. Pass it to
    /// [`Client::send_mail_with_attachments`] as many times as needed.
    ///
    /// # Errors
    /// [`Error::Status`] when the HTTP status is not 200, and also when the
    /// HTTP status is 200 but the status embedded in the body is not. In the
    /// second case the error carries the HTTP code (200), not the embedded one.
    ///
    /// # Examples
    /// ```no_run
    /// # use zohomail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zohomail_client::Error> {
    /// let client = Client::new("1000.xxxxxxxx").await?;
    /// let report = client.upload_attachment("report.txt", b"quarterly numbers".to_vec()).await?;
    /// client
    ///     .send_mail_with_attachments("boss@example.com", "Report", "See attached.", &[report])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_attachment(
        &self,
        file_name: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<Attachment> {
        let url = format!(
            "{}/api/accounts/{}/messages/attachments",
            self.base_url, self.account_id
        );
        let content = content.into();
        debug!(file_name, bytes = content.len(), "Zoho: uploading attachment");

        let response = self
            .authorized(self.http.post(&url))
            .query(&[("fileName", file_name)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await?;

        let http_status = response.status();
        if http_status != StatusCode::OK {
            return Err(Error::Status(http_status.as_u16()));
        }

        let body = response.bytes().await?;
        let upload: UploadResponse = serde_json::from_slice(&body)?;

        match upload.status {
            Some(status) if status.code == 200 => {}
            embedded => {
                // The failure is reported with the HTTP status, not the embedded one.
                warn!(
                    embedded_code = ?embedded.as_ref().map(|s| s.code),
                    description = ?embedded.as_ref().map(|s| s.description.as_str()),
                    "Zoho: attachment upload rejected"
                );
                return Err(Error::Status(http_status.as_u16()));
            }
        }

        let attachment = upload.data.ok_or(Error::FieldNotFound("data"))?;
        debug!(
            store = %attachment.store_name,
            path = %attachment.attachment_path,
            "Zoho: attachment uploaded"
        );
        Ok(attachment)
    }

    /// Send a plain message from the account's primary address.
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `subject` - Subject line
    /// * `content` - Message body
    ///
    /// Success only means Zoho accepted the message; no message id is
    /// returned. Calls are not idempotent: repeating one sends the mail again.
    ///
    /// # Examples
    /// ```no_run
    /// # use zohomail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zohomail_client::Error> {
    /// let client = Client::new("1000.xxxxxxxx").await?;
    /// client.send_mail("example@mail.com", "Test subject", "This is a test!!").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_mail(&self, to: &str, subject: &str, content: &str) -> Result<()> {
        self.send_mail_with_attachments(to, subject, content, &[])
            .await
    }

    /// Send a message with previously uploaded attachments.
    ///
    /// An empty `attachments` slice behaves exactly like [`Client::send_mail`].
    pub async fn send_mail_with_attachments(
        &self,
        to: &str,
        subject: &str,
        content: &str,
        attachments: &[Attachment],
    ) -> Result<()> {
        let url = format!("{}/api/accounts/{}/messages", self.base_url, self.account_id);
        debug!(
            to,
            attachments = attachments.len(),
            "Zoho: sending mail"
        );

        let request = SendMailRequest {
            from_address: &self.mail_address,
            to_address: to,
            subject,
            content,
            attachments,
        };
        let body = serde_json::to_vec(&request)?;

        let response = self
            .authorized(self.http.post(&url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        // The body carries nothing we use; draining it releases the connection.
        response.bytes().await.ok();
        if status != StatusCode::OK {
            return Err(Error::Status(status.as_u16()));
        }

        debug!(to, "Zoho: mail accepted");
        Ok(())
    }

    /// Attach the token to a request.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        authorize(request, &self.auth_scheme, &self.token)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("account_id", &self.account_id)
            .field("mail_address", &self.mail_address)
            .finish()
    }
}

fn authorize(request: RequestBuilder, scheme: &str, token: &str) -> RequestBuilder {
    // An invalid header value surfaces from `send` as a request error.
    request.header(AUTHORIZATION, format!("{scheme} {token}"))
}

const BASE_URL: &str = "https://mail.zoho.com";
const AUTH_SCHEME: &str = "Zoho-authtoken";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const TOKEN_ENV: &str = "ZOHO_AUTH_TOKEN";
const BASE_URL_ENV: &str = "ZOHO_MAIL_BASE_URL";

/// Builder for configuring a Zoho Mail client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    token: String,
    auth_scheme: String,
    base_url: String,
    timeout: Duration,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - `https://mail.zoho.com` as API root
    /// - `Zoho-authtoken` authorization scheme
    /// - 10 second timeout on every request
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            auth_scheme: AUTH_SCHEME.to_string(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Override the API root (scheme and host, no trailing path).
    ///
    /// Useful for testing or for accounts hosted in another Zoho region,
    /// e.g. `https://mail.zoho.eu`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the scheme placed before the token in `Authorization`,
    /// e.g. `Zoho-oauthtoken` for OAuth access tokens.
    pub fn auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    /// Set the timeout applied to each request (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client and resolve the account behind the token.
    ///
    /// This performs one request to `/api/accounts` and keeps the first
    /// account it lists.
    ///
    /// # Errors
    /// - [`Error::Request`] if Zoho cannot be reached or the request times out
    /// - [`Error::Status`] if the lookup is answered with a status other than 200
    /// - [`Error::Json`] if the body is not a valid accounts response
    /// - [`Error::FieldNotFound`] if `data`, `accountId` or
    ///   `primaryEmailAddress` is missing or empty
    ///
    /// # Examples
    /// ```no_run
    /// # use std::time::Duration;
    /// # use zohomail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zohomail_client::Error> {
    /// let client = Client::builder("1000.xxxxxxxx")
    ///     .base_url("https://mail.zoho.eu")
    ///     .timeout(Duration::from_secs(5))
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        let url = format!("{}/api/accounts", self.base_url);
        debug!(url = %url, "Zoho: resolving account");
        let response = authorize(http.get(&url), &self.auth_scheme, &self.token)
            .send()
            .await?;
        let (account_id, mail_address) = parse_account(response).await?;
        debug!(account_id = %account_id, "Zoho: account resolved");

        Ok(Client {
            http,
            token: self.token,
            auth_scheme: self.auth_scheme,
            base_url: self.base_url,
            proxy: self.proxy,
            account_id,
            mail_address,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("token", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Pull the first account's id and primary address out of an accounts response.
async fn parse_account(response: Response) -> Result<(String, String)> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    let accounts: AccountsResponse = serde_json::from_slice(&body)?;

    let first = accounts
        .data
        .ok_or(Error::FieldNotFound("data"))?
        .into_iter()
        .next()
        .ok_or(Error::FieldNotFound("data"))?
        .ok_or(Error::FieldNotFound("accountId"))?;

    let account_id = first
        .account_id
        .filter(|id| !id.is_empty())
        .ok_or(Error::FieldNotFound("accountId"))?;
    let mail_address = first
        .primary_email_address
        .filter(|address| !address.is_empty())
        .ok_or(Error::FieldNotFound("primaryEmailAddress"))?;

    Ok((account_id, mail_address))
}
