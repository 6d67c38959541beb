//! PEM armor handling
//!
//! Only the two labels the decoder deals with are supported: `CERTIFICATE`
//! on the way in and `PUBLIC KEY` on the way out.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CertError, Result};

const CERTIFICATE_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const CERTIFICATE_END: &str = "-----END CERTIFICATE-----";
const PUBLIC_KEY_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";
const PUBLIC_KEY_END: &str = "-----END PUBLIC KEY-----";
const LINE_WIDTH: usize = 64;

/// Strip the certificate armor and all whitespace, then Base64-decode the body.
///
/// The BEGIN/END lines are optional, so a bare Base64 body is accepted too.
pub fn certificate_der_from_pem(text: &str) -> Result<Vec<u8>> {
    let body: String = text
        .replace(CERTIFICATE_BEGIN, "")
        .replace(CERTIFICATE_END, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if body.is_empty() {
        return Err(CertError::InvalidPem(
            "no certificate body found".to_string(),
        ));
    }

    Ok(STANDARD.decode(body)?)
}

/// Wrap DER bytes as a `PUBLIC KEY` PEM block with 64-column body lines.
#[must_use]
pub fn public_key_pem(der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 64);

    pem.push_str(PUBLIC_KEY_BEGIN);
    pem.push('\n');
    // base64 output is ASCII, so every index is a char boundary
    for start in (0..encoded.len()).step_by(LINE_WIDTH) {
        let end = (start + LINE_WIDTH).min(encoded.len());
        pem.push_str(&encoded[start..end]);
        pem.push('\n');
    }
    pem.push_str(PUBLIC_KEY_END);
    pem
}
