//! End-to-end hosted-checkout flow: build a redirect form, then verify a
//! callback carrying the same transaction fields.

use std::collections::BTreeMap;

use paylio::{signing, Config, Environment, Gateway};

fn demo_config() -> Config {
    Config::new(1000, "your_secret").with_environment(Environment::Demo)
}

fn checkout_fields(reference: &str, amount: u64) -> BTreeMap<String, String> {
    [
        ("reference", reference.to_string()),
        ("currency", "EUR".to_string()),
        ("amount", amount.to_string()),
        ("first_name", "John".to_string()),
        ("last_name", "Doe".to_string()),
        ("email", "demo@email.com".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[test]
fn test_checkout_then_callback_roundtrip() {
    let config = demo_config();
    let gateway = Gateway::new(&config);

    // Checkout: the redirect builder computes the form checksum.
    let form = gateway
        .redirect(checkout_fields("Transaction77001", 14999))
        .unwrap();
    assert!(form.fields().contains_key("checksum"));
    assert_eq!(form.url(), "https://gateway.paylio.com/demo/");

    // Callback: the gateway reports the outcome for the same transaction,
    // signed with the callback field list.
    let mut callback: BTreeMap<String, String> = [
        ("reference", "Transaction77001"),
        ("transaction_id", "990001"),
        ("status", "200"),
        ("currency", "EUR"),
        ("amount", "14999"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let checksum = signing::callback_checksum(
        config.environment.as_str(),
        &callback,
        &config.secret,
    )
    .unwrap();
    callback.insert("checksum".to_string(), checksum);

    assert!(gateway.verify_callback(&callback).unwrap());

    // A tampered amount must fail verification.
    callback.insert("amount".to_string(), "1".to_string());
    assert!(!gateway.verify_callback(&callback).unwrap());
}

#[test]
fn test_rendered_form_carries_every_field() {
    let gateway = Gateway::new(&demo_config());
    let form = gateway
        .redirect(checkout_fields("Transaction77002", 10000))
        .unwrap();

    let html = form.render();
    for name in form.fields().keys() {
        assert!(
            html.contains(&format!("name=\"{name}\"")),
            "rendered form is missing `{name}`"
        );
    }
    assert_eq!(html.matches("<input type=\"hidden\"").count(), form.fields().len());
}
