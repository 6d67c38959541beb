//! Decoded certificate record and its component types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Public-key algorithm named by the SubjectPublicKeyInfo algorithm OID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PublicKeyAlgorithm {
    /// rsaEncryption
    #[serde(rename = "RSA")]
    Rsa,
    /// id-ecPublicKey
    #[serde(rename = "EC")]
    Ec,
    /// Any other algorithm OID
    Unknown,
}

impl PublicKeyAlgorithm {
    /// Display label used in the decoded record.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Ec => "EC",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Subject Alternative Name entry that was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum GeneralName {
    /// `dNSName`
    #[serde(rename = "DNS")]
    Dns(String),
    /// `iPAddress`, rendered as text
    #[serde(rename = "IP")]
    Ip(String),
}

impl GeneralName {
    /// `"DNS"` or `"IP"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dns(_) => "DNS",
            Self::Ip(_) => "IP",
        }
    }

    /// The rendered value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Dns(value) | Self::Ip(value) => value,
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.value())
    }
}

/// Algorithm identification plus the verbatim SubjectPublicKeyInfo bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyInfo {
    /// Algorithm from the AlgorithmIdentifier OID
    pub algorithm: PublicKeyAlgorithm,
    /// Dotted OID of the named curve, for EC keys that carry one
    pub named_curve: Option<String>,
    /// The whole SPKI TLV, header included, exactly as encoded
    pub raw: Vec<u8>,
}

/// Coarse validity classification of a decoded certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidityStatus {
    /// `now` is past notAfter
    Expired,
    /// `now` is before notBefore
    NotYetValid,
    /// Valid, but fewer days remain than the warning threshold
    ExpiringSoon {
        /// Whole days until notAfter
        days: i64,
    },
    /// Valid
    Valid {
        /// Whole days until notAfter
        days: i64,
    },
}

impl fmt::Display for ValidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "Certificate Expired"),
            Self::NotYetValid => write!(f, "Not Yet Valid"),
            Self::ExpiringSoon { days } => write!(f, "Expiring Soon (expires in {days} days)"),
            Self::Valid { days } => write!(f, "Certificate Valid (expires in {days} days)"),
        }
    }
}

/// The human-usable result of decoding one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// Serial number as colon-separated uppercase hex octets
    pub serial_number: String,
    /// Rendered subject DN
    pub subject: String,
    /// Rendered issuer DN
    pub issuer: String,
    /// Start of the validity window
    #[serde(serialize_with = "serialize_rfc1123")]
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    #[serde(serialize_with = "serialize_rfc1123")]
    pub not_after: DateTime<Utc>,
    /// `floor((notAfter - now) / 1 day)`, negative once expired
    pub days_until_expiry: i64,
    /// `now > notAfter`
    pub is_expired: bool,
    /// `now < notBefore`
    pub is_not_yet_valid: bool,
    /// Key algorithm
    pub public_key_algorithm: PublicKeyAlgorithm,
    /// Dotted named-curve OID for EC keys that carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_curve: Option<String>,
    /// SubjectPublicKeyInfo re-exported as a PEM public key
    pub public_key_pem: String,
    /// Subject Alternative Names in encoding order, empty when absent or unreadable
    pub subject_alternative_names: Vec<GeneralName>,
}

impl CertificateRecord {
    /// Classify the record's validity using `warning_days` as the "expiring soon" threshold.
    #[must_use]
    pub fn status(&self, warning_days: i64) -> ValidityStatus {
        if self.is_expired {
            ValidityStatus::Expired
        } else if self.is_not_yet_valid {
            ValidityStatus::NotYetValid
        } else if self.days_until_expiry < warning_days {
            ValidityStatus::ExpiringSoon {
                days: self.days_until_expiry,
            }
        } else {
            ValidityStatus::Valid {
                days: self.days_until_expiry,
            }
        }
    }
}

/// Render a timestamp RFC-1123 style, e.g. `Sat, 01 Jan 2022 12:00:00 GMT`.
#[must_use]
pub fn rfc1123(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn serialize_rfc1123<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&rfc1123(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(days_until_expiry: i64, is_expired: bool, is_not_yet_valid: bool) -> CertificateRecord {
        let not_before = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
        CertificateRecord {
            serial_number: "01".to_string(),
            subject: "CN=example.com".to_string(),
            issuer: "CN=Example CA".to_string(),
            not_before,
            not_after: not_before,
            days_until_expiry,
            is_expired,
            is_not_yet_valid,
            public_key_algorithm: PublicKeyAlgorithm::Ec,
            public_key_curve: Some("1.2.840.10045.3.1.7".to_string()),
            public_key_pem: String::new(),
            subject_alternative_names: vec![
                GeneralName::Dns("example.com".to_string()),
                GeneralName::Ip("10.0.0.1".to_string()),
            ],
        }
    }

    #[test]
    fn test_rfc1123() {
        let ts = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(rfc1123(&ts), "Sat, 01 Jan 2022 12:00:00 GMT");
    }

    #[test]
    fn test_status_precedence() {
        assert_eq!(record(-3, true, false).status(30), ValidityStatus::Expired);
        assert_eq!(record(400, false, true).status(30), ValidityStatus::NotYetValid);
        assert_eq!(
            record(12, false, false).status(30),
            ValidityStatus::ExpiringSoon { days: 12 }
        );
        assert_eq!(
            record(30, false, false).status(30),
            ValidityStatus::Valid { days: 30 }
        );
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record(10, false, false)).unwrap();
        assert_eq!(json["serialNumber"], "01");
        assert_eq!(json["notBefore"], "Sat, 01 Jan 2022 12:00:00 GMT");
        assert_eq!(json["publicKeyAlgorithm"], "EC");
        assert_eq!(json["publicKeyCurve"], "1.2.840.10045.3.1.7");
        assert_eq!(json["isNotYetValid"], false);
        assert_eq!(
            json["subjectAlternativeNames"],
            serde_json::json!([
                {"type": "DNS", "value": "example.com"},
                {"type": "IP", "value": "10.0.0.1"}
            ])
        );
    }

    #[test]
    fn test_absent_curve_is_omitted_from_json() {
        let mut rsa = record(10, false, false);
        rsa.public_key_algorithm = PublicKeyAlgorithm::Rsa;
        rsa.public_key_curve = None;
        let json = serde_json::to_value(rsa).unwrap();
        assert!(json.get("publicKeyCurve").is_none());
    }

    #[test]
    fn test_general_name_display() {
        assert_eq!(GeneralName::Dns("a.test".into()).to_string(), "DNS:a.test");
        assert_eq!(PublicKeyAlgorithm::Unknown.to_string(), "Unknown");
    }
}
