//! Refund a transaction through the direct API.
//!
//! ```sh
//! PAYLIO_SITE_ID=1000 PAYLIO_SECRET=your_secret cargo run --example refund
//! ```

use paylio::{ApiClient, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paylio=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let client = ApiClient::new(config);

    let result = client.refund(10000, 100, "EUR").await?;

    match result.response {
        Some(response) if response.code == 200 => {
            println!("Success: {}", response.message.unwrap_or_default());
        }
        Some(response) => {
            println!(
                "Failure ({}): {}",
                response.code,
                response.message.unwrap_or_default()
            );
        }
        None => println!("Gateway returned no response status"),
    }

    Ok(())
}
