//! # Zoho Mail Client
//! Asynchronous wrapper around the Zoho Mail REST API for sending mail from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For services and scripts that need to send notifications, reports or alerts from an existing Zoho mailbox without talking SMTP: build a [`Client`] from an auth token, optionally upload files ([`Attachment`]), then send messages from the account's primary address.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. The crate emits `tracing` events but installs no subscriber.
//!
//! ## Credentials
//! Tokens are never validated locally. Generate one from the Zoho console and inject it at runtime, either directly or through `ZOHO_AUTH_TOKEN` with [`Client::from_env`].
//!
//! ## Out of scope
//! No retries, rate limiting, MIME composition, chunked uploads or local storage. A failed call is reported once and left to the caller.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`], non-200 answers as [`Error::Status`], malformed bodies as [`Error::Json`] and responses missing a required field as [`Error::FieldNotFound`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use zohomail_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zohomail_client::Error> {
//!     let client = Client::from_env().await?;
//!     println!("Sending as {}", client.mail_address());
//!
//!     let notes = client.upload_attachment("notes.txt", b"hello".to_vec()).await?;
//!     client.send_mail("example@mail.com", "Test subject", "This is a test!!").await?;
//!     client
//!         .send_mail_with_attachments("example@mail.com", "With notes", "Attached.", &[notes])
//!         .await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::Attachment;

/// Result type alias for Zoho Mail operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
