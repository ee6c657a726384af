//! Hosted-payment-page redirect builder and callback verifier.
//!
//! This flow is independent of the direct API client: nothing here goes
//! through the request engine. The gateway component only computes and
//! verifies checksums and exposes a renderable field set for the form post
//! to the hosted page.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::Config;
use crate::signing;
use crate::{Error, Result};

/// Hosted checkout component bound to a [`Config`].
#[derive(Clone)]
pub struct Gateway {
    site_id: i64,
    secret: String,
    env: String,
    gateway_base: String,
}

impl Gateway {
    pub fn new(config: &Config) -> Self {
        Self {
            site_id: config.site_id,
            secret: config.secret.clone(),
            env: config.environment.as_str().to_string(),
            gateway_base: config.gateway_base.clone(),
        }
    }

    /// Build the redirect form for a checkout payload.
    ///
    /// `site_id` is filled in when absent. `checksum` is computed over the
    /// required fields when absent; a pre-supplied checksum is kept as-is.
    /// The payload is never mutated after checksum injection.
    pub fn redirect(&self, mut fields: BTreeMap<String, String>) -> Result<RedirectForm> {
        if !fields.contains_key("site_id") {
            fields.insert("site_id".to_string(), self.site_id.to_string());
        }
        if !fields.contains_key("checksum") {
            let checksum =
                signing::gateway_checksum(&self.env, self.site_id, &fields, &self.secret)?;
            fields.insert("checksum".to_string(), checksum);
        }

        Ok(RedirectForm {
            url: format!("{}/{}/", self.gateway_base, self.env),
            fields,
        })
    }

    /// Verify the checksum of an inbound callback payload.
    ///
    /// Pure comparison, case-sensitive on the lowercase hex digest; the
    /// payload is not mutated. Fails with [`Error::MissingField`] when a
    /// signed field or the `checksum` itself is absent.
    pub fn verify_callback(&self, fields: &BTreeMap<String, String>) -> Result<bool> {
        let supplied = fields.get("checksum").ok_or_else(|| Error::MissingField {
            field: "checksum".to_string(),
        })?;
        let expected = signing::callback_checksum(&self.env, fields, &self.secret)?;
        Ok(supplied == &expected)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("site_id", &self.site_id)
            .field("secret", &"[REDACTED]")
            .field("env", &self.env)
            .field("gateway_base", &self.gateway_base)
            .finish()
    }
}

/// A checkout form ready to render and auto-post to the hosted page.
#[derive(Debug, Clone)]
pub struct RedirectForm {
    url: String,
    fields: BTreeMap<String, String>,
}

impl RedirectForm {
    /// Target URL of the form post: `{gateway_base}/{env}/`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The final field mapping, checksum included.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Serialize every field into an HTML hidden input.
    pub fn render(&self) -> String {
        let mut html = String::new();
        for (name, value) in &self.fields {
            html.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape_attribute(name),
                escape_attribute(value)
            ));
        }
        html
    }
}

/// Escape a value for use inside a double-quoted HTML attribute.
fn escape_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
