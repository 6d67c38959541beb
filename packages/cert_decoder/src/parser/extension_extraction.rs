//! Subject Alternative Name scanning
//!
//! The scan is best effort. [`scan_subject_alt_names`] reports its failures
//! like every other extractor, and [`subject_alt_names_or_empty`] is the one
//! place where those failures are turned into an empty list.
//!
//! Scanning halts once fewer than `margin` bytes remain after the position.
//! That guard keeps a corrupt length from driving the walk into the signature.
//! It can also stop the scan before a SAN extension that sits very close to
//! the end of the buffer, so a certificate may report no SANs it actually has.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::der::oid::OID_SUBJECT_ALT_NAME;
use crate::der::{decode_oid, DerCursor, TAG_BOOLEAN, TAG_EXTENSIONS, TAG_SAN_DNS, TAG_SAN_IP};
use crate::error::Result;
use crate::types::GeneralName;

/// Find the SAN extension after the SubjectPublicKeyInfo and decode its entries.
///
/// Returns an empty list when there is no extensions block or no SAN
/// extension within it. Scanning stops at the first SAN extension.
pub fn scan_subject_alt_names(
    cursor: &mut DerCursor<'_>,
    margin: usize,
) -> Result<Vec<GeneralName>> {
    let within_margin =
        |cursor: &DerCursor<'_>| cursor.position().saturating_add(margin) < cursor.len();

    // issuerUniqueID / subjectUniqueID, if any
    while within_margin(cursor) && !cursor.next_is(TAG_EXTENSIONS) {
        cursor.read_tlv_value()?;
    }
    if !cursor.next_is(TAG_EXTENSIONS) {
        tracing::trace!(position = cursor.position(), "no extensions block");
        return Ok(Vec::new());
    }

    cursor.read_header()?;
    let extensions = cursor.read_header()?;
    let extensions_end = cursor.position() + extensions.length;

    while within_margin(cursor) && cursor.position() < extensions_end {
        let extension = cursor.read_header()?;
        let end = cursor.position() + extension.length;

        let (_, oid_bytes) = cursor.read_tlv_value()?;
        let oid = decode_oid(oid_bytes);
        if cursor.next_is(TAG_BOOLEAN) {
            cursor.read_tlv_value()?;
        }
        let value = cursor.read_header()?;

        if oid == OID_SUBJECT_ALT_NAME {
            return read_general_names(cursor, end);
        }

        tracing::trace!(oid = %oid, "skipping extension");
        cursor.skip(value.length)?;
        cursor.seek(end)?;
    }

    Ok(Vec::new())
}

/// Infallible form of [`scan_subject_alt_names`]: any failure yields an empty list.
pub fn subject_alt_names_or_empty(cursor: &mut DerCursor<'_>, margin: usize) -> Vec<GeneralName> {
    match scan_subject_alt_names(cursor, margin) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!(error = %e, "extension scan failed, reporting no subject alternative names");
            Vec::new()
        }
    }
}

fn read_general_names(cursor: &mut DerCursor<'_>, end: usize) -> Result<Vec<GeneralName>> {
    let mut names = Vec::new();
    cursor.read_header()?;

    while cursor.position() < end {
        let (header, value) = cursor.read_tlv_value()?;
        match header.tag {
            TAG_SAN_DNS => names.push(GeneralName::Dns(String::from_utf8_lossy(value).into_owned())),
            TAG_SAN_IP => match render_ip(value) {
                Some(ip) => names.push(GeneralName::Ip(ip)),
                None => tracing::trace!(len = value.len(), "skipping iPAddress of unexpected length"),
            },
            tag => tracing::trace!(tag, "skipping unsupported GeneralName"),
        }
    }

    Ok(names)
}

fn render_ip(octets: &[u8]) -> Option<String> {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        return Some(Ipv4Addr::from(v4).to_string());
    }
    <[u8; 16]>::try_from(octets)
        .ok()
        .map(|v6| Ipv6Addr::from(v6).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // signatureAlgorithm sha256WithRSAEncryption, standing in for what follows
    // the extensions in a real certificate
    const TRAILER: [u8; 15] = hex!("30 0D 06 09 2A 86 48 86 F7 0D 01 01 0B 05 00");

    fn tlv(tag: u8, value: &[u8]) -> Vec<u8> {
        let mut out = vec![tag, value.len() as u8];
        out.extend_from_slice(value);
        out
    }

    fn extension(oid: &[u8], critical: bool, value: &[u8]) -> Vec<u8> {
        let mut body = tlv(0x06, oid);
        if critical {
            body.extend(hex!("01 01 FF"));
        }
        body.extend(tlv(0x04, value));
        tlv(0x30, &body)
    }

    fn extensions_block(entries: &[Vec<u8>]) -> Vec<u8> {
        let mut out = tlv(0xA3, &tlv(0x30, &entries.concat()));
        out.extend_from_slice(&TRAILER);
        out
    }

    const SAN: [u8; 3] = hex!("55 1D 11");
    const BASIC_CONSTRAINTS: [u8; 3] = hex!("55 1D 13");

    fn san_value() -> Vec<u8> {
        let mut names = tlv(0x82, b"example.com");
        names.extend(tlv(0x87, &hex!("0A 00 00 01")));
        tlv(0x30, &names)
    }

    #[test]
    fn test_dns_and_ip_entries() {
        let der = extensions_block(&[extension(&SAN, false, &san_value())]);
        let names = scan_subject_alt_names(&mut DerCursor::new(&der), 10).unwrap();
        assert_eq!(
            names,
            vec![
                GeneralName::Dns("example.com".into()),
                GeneralName::Ip("10.0.0.1".into()),
            ]
        );
    }

    #[test]
    fn test_critical_extension_skipped_before_san() {
        let der = extensions_block(&[
            extension(&BASIC_CONSTRAINTS, true, &hex!("30 00")),
            extension(&SAN, false, &san_value()),
        ]);
        let names = scan_subject_alt_names(&mut DerCursor::new(&der), 10).unwrap();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_scan_stops_after_san() {
        let der = extensions_block(&[
            extension(&SAN, false, &san_value()),
            extension(&BASIC_CONSTRAINTS, true, &hex!("30 00")),
        ]);
        let mut cursor = DerCursor::new(&der);
        scan_subject_alt_names(&mut cursor, 10).unwrap();
        // left at the end of the SAN extension, not past basicConstraints
        assert_eq!(cursor.position(), 4 + extension(&SAN, false, &san_value()).len());
    }

    #[test]
    fn test_unique_ids_before_extensions_are_skipped() {
        let mut der = tlv(0x81, &hex!("00 AA"));
        der.extend(tlv(0x82, &hex!("00 BB")));
        der.extend(extensions_block(&[extension(&SAN, false, &san_value())]));
        let names = scan_subject_alt_names(&mut DerCursor::new(&der), 10).unwrap();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_no_extensions_block() {
        let der = TRAILER;
        let names = scan_subject_alt_names(&mut DerCursor::new(&der), 10).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_unsupported_names_and_ipv6() {
        let mut names = tlv(0x86, b"https://example.com/");
        names.extend(tlv(0x87, &hex!("20 01 0D B8 00 00 00 00 00 00 00 00 00 00 00 01")));
        names.extend(tlv(0x87, &hex!("0A 00"))); // neither v4 nor v6
        let der = extensions_block(&[extension(&SAN, false, &tlv(0x30, &names))]);

        let names = scan_subject_alt_names(&mut DerCursor::new(&der), 10).unwrap();
        assert_eq!(names, vec![GeneralName::Ip("2001:db8::1".into())]);
    }

    #[test]
    fn test_bogus_length_yields_empty_list() {
        let mut der = extensions_block(&[extension(&SAN, false, &san_value())]);
        // extension SEQUENCE claims far more than the buffer holds
        der[4] = 0x30;
        der[5] = 0x7F;
        assert!(scan_subject_alt_names(&mut DerCursor::new(&der), 10).is_err());
        assert!(subject_alt_names_or_empty(&mut DerCursor::new(&der), 10).is_empty());
    }

    #[test]
    fn test_margin_can_hide_san() {
        let mut der = tlv(0xA3, &tlv(0x30, &extension(&SAN, false, &san_value())));
        der.extend_from_slice(&hex!("00 00"));
        assert_eq!(subject_alt_names_or_empty(&mut DerCursor::new(&der), 0).len(), 2);
        assert!(subject_alt_names_or_empty(&mut DerCursor::new(&der), der.len()).is_empty());
    }
}
