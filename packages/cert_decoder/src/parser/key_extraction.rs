//! SubjectPublicKeyInfo extraction
//!
//! Identifies the key algorithm and captures the byte range of the whole SPKI
//! TLV so it can be re-exported as a PEM public key. The key payload itself is
//! consumed but not interpreted.

use crate::der::oid::key_algorithm;
use crate::der::{decode_oid, DerCursor, TAG_NULL, TAG_OID};
use crate::error::{CertError, Result};
use crate::types::{PublicKeyAlgorithm, PublicKeyInfo};

/// Read a SubjectPublicKeyInfo and leave the cursor just past it.
///
/// ```text
/// SubjectPublicKeyInfo ::= SEQUENCE {
///     algorithm         AlgorithmIdentifier,
///     subjectPublicKey  BIT STRING
/// }
/// ```
pub fn extract_public_key_info(cursor: &mut DerCursor<'_>) -> Result<PublicKeyInfo> {
    let start = cursor.position();
    let spki = cursor.read_header()?;
    let end = cursor.position() + spki.length;
    let raw = cursor.data()[start..end].to_vec();

    let algorithm_id = cursor.read_header()?;
    let algorithm_end = cursor.position() + algorithm_id.length;
    let (_, oid_bytes) = cursor.read_tlv_value()?;
    let oid = decode_oid(oid_bytes);
    let algorithm = key_algorithm(&oid);

    let mut named_curve = None;
    if cursor.next_is(TAG_NULL) {
        cursor.read_tlv_value()?;
    }
    if cursor.next_is(TAG_OID) {
        let (_, curve) = cursor.read_tlv_value()?;
        if algorithm == PublicKeyAlgorithm::Ec {
            named_curve = Some(decode_oid(curve));
        }
    }
    // Parameters we do not model (e.g. RSASSA-PSS) are stepped over
    if cursor.position() < algorithm_end {
        cursor.seek(algorithm_end)?;
    }

    // subjectPublicKey BIT STRING: one unused-bits octet, then the key bytes
    let bit_string = cursor.read_header()?;
    if bit_string.length == 0 {
        return Err(CertError::malformed(
            "subjectPublicKey",
            "BIT STRING has no unused-bits octet",
        ));
    }
    cursor.skip(1)?;
    cursor.skip(bit_string.length - 1)?;

    if cursor.position() > end {
        return Err(CertError::malformed(
            "subjectPublicKeyInfo",
            "contents run past the declared length",
        ));
    }
    cursor.seek(end)?;

    tracing::trace!(%algorithm, spki_len = raw.len(), "extracted public key info");

    Ok(PublicKeyInfo {
        algorithm,
        named_curve,
        raw,
    })
}
