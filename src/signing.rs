//! Checksum computation for API requests, gateway redirects and callbacks.
//!
//! Every digest is a lowercase-hex SHA-1 over an ordered, `&`-joined field
//! list. The field order and the delimiter are part of the wire contract
//! with the gateway and must not change. Values containing a literal `&`
//! are joined as-is; the gateway applies the same rule, so escaping here
//! would break verification.

use std::collections::BTreeMap;

use sha1::{Digest, Sha1};

use crate::{Error, Result};

fn sha1_hex(fields: &[&str]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(fields.join("&").as_bytes());
    hex::encode(hasher.finalize())
}

fn require<'a>(fields: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::MissingField {
            field: key.to_string(),
        })
}

/// Checksum for a direct API request.
///
/// Signs `site_id & transaction_id & command & output_type & secret`.
pub fn sign_request(
    site_id: i64,
    transaction_id: &str,
    command: &str,
    output_type: &str,
    secret: &str,
) -> String {
    let site_id = site_id.to_string();
    sha1_hex(&[
        site_id.as_str(),
        transaction_id,
        command,
        output_type,
        secret,
    ])
}

/// Checksum for a hosted-payment-page redirect payload.
///
/// Signs `env & site_id & reference & currency & amount & first_name &
/// last_name & secret`, reading the five payload values from `fields`.
/// Fails with [`Error::MissingField`] when a required key is absent.
pub fn gateway_checksum(
    env: &str,
    site_id: i64,
    fields: &BTreeMap<String, String>,
    secret: &str,
) -> Result<String> {
    let site_id = site_id.to_string();
    Ok(sha1_hex(&[
        env,
        site_id.as_str(),
        require(fields, "reference")?,
        require(fields, "currency")?,
        require(fields, "amount")?,
        require(fields, "first_name")?,
        require(fields, "last_name")?,
        secret,
    ]))
}

/// Expected checksum for an inbound gateway callback.
///
/// Signs `env & reference & transaction_id & status & currency & amount &
/// secret`. Fails with [`Error::MissingField`] when a required key is
/// absent.
pub fn callback_checksum(
    env: &str,
    fields: &BTreeMap<String, String>,
    secret: &str,
) -> Result<String> {
    Ok(sha1_hex(&[
        env,
        require(fields, "reference")?,
        require(fields, "transaction_id")?,
        require(fields, "status")?,
        require(fields, "currency")?,
        require(fields, "amount")?,
        secret,
    ]))
}
