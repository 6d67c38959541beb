//! Object identifier decoding and the process-wide OID lookup tables

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::PublicKeyAlgorithm;

/// rsaEncryption
pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
/// id-ecPublicKey
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
/// id-ce-subjectAltName
pub const OID_SUBJECT_ALT_NAME: &str = "2.5.29.17";

/// Attribute type OID to short name, restricted to the names a rendered DN keeps.
static ATTRIBUTE_SHORT_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("2.5.4.3", "CN"),
        ("2.5.4.10", "O"),
        ("2.5.4.11", "OU"),
        ("2.5.4.6", "C"),
        ("2.5.4.7", "L"),
        ("2.5.4.8", "ST"),
    ])
});

static KEY_ALGORITHMS: Lazy<HashMap<&'static str, PublicKeyAlgorithm>> = Lazy::new(|| {
    HashMap::from([
        (OID_RSA_ENCRYPTION, PublicKeyAlgorithm::Rsa),
        (OID_EC_PUBLIC_KEY, PublicKeyAlgorithm::Ec),
    ])
});

/// Decode an OID value into its dotted-decimal form.
///
/// The first octet carries the first two arcs as `40 * a + b`. Every later arc
/// is base-128 with `0x80` as the continuation bit. An arc whose continuation
/// bit never clears is dropped, and an empty value decodes to an empty string.
#[must_use]
pub fn decode_oid(bytes: &[u8]) -> String {
    let Some((&first, rest)) = bytes.split_first() else {
        return String::new();
    };

    let mut arcs: Vec<u64> = vec![u64::from(first / 40), u64::from(first % 40)];
    let mut value: u64 = 0;
    for &octet in rest {
        value = (value << 7) | u64::from(octet & 0x7F);
        if octet & 0x80 == 0 {
            arcs.push(value);
            value = 0;
        }
    }

    arcs.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Short name (`CN`, `O`, ...) for a DN attribute OID, if it is one we keep.
#[must_use]
pub fn attribute_short_name(oid: &str) -> Option<&'static str> {
    ATTRIBUTE_SHORT_NAMES.get(oid).copied()
}

/// Public-key algorithm for an SPKI algorithm OID.
#[must_use]
pub fn key_algorithm(oid: &str) -> PublicKeyAlgorithm {
    KEY_ALGORITHMS
        .get(oid)
        .copied()
        .unwrap_or(PublicKeyAlgorithm::Unknown)
}
