//! Upload a file and send it as an attachment.
//!
//! ```sh
//! ZOHO_AUTH_TOKEN=... cargo run --example attachment -- you@example.com Cargo.toml
//! ```

use std::path::Path;
use tracing_subscriber::EnvFilter;
use zohomail_client::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let to = args.next().unwrap_or_else(|| "example@mail.com".to_string());
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());

    let file_name = Path::new(&path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("attachment")
        .to_string();
    let content = tokio::fs::read(&path).await?;

    let client = Client::from_env().await?;
    let attachment = client.upload_attachment(&file_name, content).await?;
    println!(
        "Uploaded {} to {}",
        attachment.attachment_name, attachment.attachment_path
    );

    client
        .send_mail_with_attachments(&to, "Test subject", "This is a test!!", &[attachment])
        .await?;

    println!("Mail to {to} accepted");
    Ok(())
}
