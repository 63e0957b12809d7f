use std::io;

use httpsms::{Credentials, HttpSmsClient, SendSms};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = required_env("HTTPSMS_USERNAME")?;
    let password = required_env("HTTPSMS_PASSWORD")?;
    let destinations = required_env("HTTPSMS_DESTINATIONS")?;
    let client_type = std::env::var("HTTPSMS_CLIENT_TYPE").unwrap_or_else(|_| "H".to_owned());
    let source = std::env::var("HTTPSMS_SOURCE").unwrap_or_else(|_| "Cbf".to_owned());
    let message = std::env::var("HTTPSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the httpsms demo.".to_owned());

    let client = HttpSmsClient::new(Credentials::init(username, password, &client_type)?);
    let request = SendSms::parse(&source, &destinations, message, [("dr", "1")])?;

    let reply = client.send_sms(&request).await?;
    for (destination, code) in request.destinations().iter().zip(reply.iter()) {
        println!("{}: {code}", destination.as_str());
    }

    Ok(())
}
