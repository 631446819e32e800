//! Send a plain message from the account behind `ZOHO_AUTH_TOKEN`.
//!
//! To get a token, log in to Zoho Mail and create one at
//! <https://accounts.zoho.com/apiauthtoken/create?SCOPE=ZohoMail/ZohoMailAPI>.
//!
//! ```sh
//! ZOHO_AUTH_TOKEN=... RUST_LOG=zohomail_client=debug cargo run --example send -- you@example.com
//! ```

use tracing_subscriber::EnvFilter;
use zohomail_client::Client;

#[tokio::main]
async fn main() -> Result<(), zohomail_client::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let to = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example@mail.com".to_string());

    let client = match Client::from_env().await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating Zoho mail client: {e}");
            return Err(e);
        }
    };
    println!("Sending as {} (account {})", client.mail_address(), client.account_id());

    if let Err(e) = client.send_mail(&to, "Test subject", "This is a test!!").await {
        eprintln!("Error sending mail: {e}");
        return Err(e);
    }

    println!("Mail to {to} accepted");
    Ok(())
}
