//! Hosted-checkout demo: renders the auto-posting redirect form and
//! verifies the gateway callback.
//!
//! ```sh
//! PAYLIO_SITE_ID=1000 PAYLIO_SECRET=your_secret PAYLIO_ENV=demo \
//!     cargo run --example gateway_checkout
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use paylio::{Config, Environment, Gateway};
use rand::Rng;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = Config::from_env()
        .unwrap_or_else(|_| Config::new(1000, "your_secret").with_environment(Environment::Demo));
    let gateway = Arc::new(Gateway::new(&config));

    let app = Router::new()
        .route("/", get(checkout))
        .route("/callback", post(callback))
        .with_state(gateway);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("checkout demo listening on http://0.0.0.0:3000");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn checkout(State(gateway): State<Arc<Gateway>>) -> Html<String> {
    let reference = format!("Transaction{}", rand::thread_rng().gen_range(10000..=99999));
    let amount: u64 = rand::thread_rng().gen_range(10000..=29999);

    let fields: BTreeMap<String, String> = [
        ("reference", reference),
        ("currency", "EUR".to_string()),
        ("amount", amount.to_string()),
        ("return_url_ok", "http://www.your-site.com/success/".to_string()),
        ("return_url_cancel", "http://www.your-site.com/failed/".to_string()),
        ("first_name", "John".to_string()),
        ("last_name", "Doe".to_string()),
        ("address", "Business Center".to_string()),
        ("postal_code", "SLM000".to_string()),
        ("city", "Landville".to_string()),
        ("country_iso", "US".to_string()),
        ("email", "demo@email.com".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let form = match gateway.redirect(fields) {
        Ok(form) => form,
        Err(e) => return Html(format!("checkout error: {e}")),
    };

    Html(format!(
        "<html><body onload=\"document.forms[0].submit()\">\
         <form action=\"{}\" method=\"post\">{}</form>\
         </body></html>",
        form.url(),
        form.render()
    ))
}

async fn callback(
    State(gateway): State<Arc<Gateway>>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> String {
    match gateway.verify_callback(&fields) {
        Ok(true) => {
            let status: i64 = fields
                .get("status")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default();
            if status == 200 {
                tracing::info!(reference = ?fields.get("reference"), "transaction successful");
            } else if status >= 400 {
                tracing::warn!(reference = ?fields.get("reference"), status, "transaction failed");
            }
            format!(
                "{}.{}",
                fields.get("transaction_id").cloned().unwrap_or_default(),
                fields.get("status").cloned().unwrap_or_default()
            )
        }
        Ok(false) => "checksum mismatch".to_string(),
        Err(e) => format!("unable to verify callback: {e}"),
    }
}
