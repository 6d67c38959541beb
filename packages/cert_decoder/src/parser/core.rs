//! Certificate assembly
//!
//! Walks the TBSCertificate in schema order and builds a [`CertificateRecord`].
//! Every step up to and including the SubjectPublicKeyInfo is mandatory and
//! aborts the decode on failure. Only the extension scan degrades, to an
//! empty SAN list.

use chrono::{DateTime, Utc};

use crate::config::DecoderConfig;
use crate::der::{DerCursor, TAG_NULL, TAG_VERSION};
use crate::error::{CertError, Result};
use crate::pem::{certificate_der_from_pem, public_key_pem};
use crate::types::CertificateRecord;

use super::extension_extraction::subject_alt_names_or_empty;
use super::key_extraction::extract_public_key_info;
use super::name_extraction::extract_name;
use super::time_extraction::extract_validity;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Decodes DER or PEM certificates into [`CertificateRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct CertificateDecoder {
    config: DecoderConfig,
}

impl CertificateDecoder {
    /// Decoder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder with explicit settings
    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode DER bytes, deriving validity against the current clock.
    pub fn decode(&self, der: &[u8]) -> Result<CertificateRecord> {
        self.decode_at(der, Utc::now())
    }

    /// Decode PEM text, deriving validity against the current clock.
    pub fn decode_pem(&self, text: &str) -> Result<CertificateRecord> {
        let der = certificate_der_from_pem(text)?;
        self.decode(&der)
    }

    /// Decode DER bytes, deriving validity against `now`.
    pub fn decode_at(&self, der: &[u8], now: DateTime<Utc>) -> Result<CertificateRecord> {
        tracing::debug!(len = der.len(), "decoding certificate");
        let mut cursor = DerCursor::new(der);

        // Certificate, then TBSCertificate
        cursor.read_header()?;
        cursor.read_header()?;

        if cursor.next_is(TAG_VERSION) {
            let version = cursor.read_header()?;
            cursor.skip(version.length)?;
        }

        let (_, serial) = cursor.read_tlv_value()?;
        let serial_number = render_serial(serial);

        // signature AlgorithmIdentifier; parameters other than NULL (RSASSA-PSS) are stepped over
        let signature = cursor.read_header()?;
        let signature_end = cursor.position() + signature.length;
        cursor.read_tlv_value()?;
        if cursor.next_is(TAG_NULL) {
            cursor.read_tlv_value()?;
        }
        if cursor.position() > signature_end {
            return Err(CertError::malformed(
                "signature",
                "AlgorithmIdentifier contents run past its declared length",
            ));
        }
        cursor.seek(signature_end)?;

        let issuer = extract_name(&mut cursor)?;
        let (not_before, not_after) = extract_validity(&mut cursor)?;
        let subject = extract_name(&mut cursor)?;
        let public_key = extract_public_key_info(&mut cursor)?;

        let subject_alternative_names =
            subject_alt_names_or_empty(&mut cursor, self.config.extension_scan_margin);

        let days_until_expiry = (not_after - now)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY);

        let record = CertificateRecord {
            serial_number,
            subject: subject.to_string(),
            issuer: issuer.to_string(),
            not_before,
            not_after,
            days_until_expiry,
            is_expired: now > not_after,
            is_not_yet_valid: now < not_before,
            public_key_algorithm: public_key.algorithm,
            public_key_pem: public_key_pem(&public_key.raw),
            public_key_curve: public_key.named_curve,
            subject_alternative_names,
        };

        tracing::debug!(
            serial = %record.serial_number,
            sans = record.subject_alternative_names.len(),
            "decoded certificate"
        );
        Ok(record)
    }
}

/// Decode DER bytes with default settings against the current clock.
pub fn decode_certificate(der: &[u8]) -> Result<CertificateRecord> {
    CertificateDecoder::new().decode(der)
}

/// Colon-separated uppercase hex, one group per octet.
fn render_serial(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect::<Vec<_>>()
        .join(":")
}
