//! Shared DER builders for the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

/// Encode one TLV, using the long length form when needed.
pub fn der_tlv(tag: u8, value: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = value.len();
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes: Vec<u8> = len
            .to_be_bytes()
            .into_iter()
            .skip_while(|b| *b == 0)
            .collect();
        out.push(0x80 | bytes.len() as u8);
        out.extend(bytes);
    }
    out.extend_from_slice(value);
    out
}

/// SEQUENCE of already-encoded parts.
pub fn der_seq(parts: &[Vec<u8>]) -> Vec<u8> {
    der_tlv(0x30, &parts.concat())
}

/// Name with one single-valued RDN per `(oid, value)` pair.
pub fn der_name(attributes: &[(&[u8], &str)]) -> Vec<u8> {
    let rdns: Vec<Vec<u8>> = attributes
        .iter()
        .map(|(oid, value)| {
            let atv = der_seq(&[der_tlv(0x06, oid), der_tlv(0x0C, value.as_bytes())]);
            der_tlv(0x31, &atv)
        })
        .collect();
    der_seq(&rdns)
}

pub const OID_CN: &[u8] = &[0x55, 0x04, 0x03];
pub const OID_O: &[u8] = &[0x55, 0x04, 0x0A];
pub const OID_SHA256_RSA: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0B];
pub const OID_ED25519: &[u8] = &[0x2B, 0x65, 0x70];
pub const OID_RSASSA_PSS: &[u8] = &[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0A];

/// Parts of a synthetic certificate; `tbs` assembles them in schema order.
pub struct CertParts {
    pub version: Option<Vec<u8>>,
    pub serial: Vec<u8>,
    pub signature_algorithm: Vec<u8>,
    pub issuer: Vec<u8>,
    pub validity: Vec<u8>,
    pub subject: Vec<u8>,
    pub spki: Vec<u8>,
    pub extensions: Option<Vec<u8>>,
}

impl Default for CertParts {
    fn default() -> Self {
        let name = der_name(&[(OID_O, "Test Org"), (OID_CN, "test.example")]);
        Self {
            version: Some(der_tlv(0xA0, &der_tlv(0x02, &[0x02]))),
            serial: vec![0x00, 0xFF, 0x10],
            signature_algorithm: der_seq(&[der_tlv(0x06, OID_SHA256_RSA), vec![0x05, 0x00]]),
            issuer: name.clone(),
            validity: der_seq(&[
                der_tlv(0x17, b"250101000000Z"),
                der_tlv(0x18, b"20351231235959Z"),
            ]),
            subject: name,
            spki: der_seq(&[
                der_seq(&[der_tlv(0x06, OID_ED25519)]),
                der_tlv(0x03, &[0x00; 33]),
            ]),
            extensions: None,
        }
    }
}

impl CertParts {
    /// Full Certificate: TBSCertificate, signatureAlgorithm, signature.
    pub fn build(&self) -> Vec<u8> {
        let signature_algorithm = self.signature_algorithm.clone();

        let mut tbs = Vec::new();
        if let Some(version) = &self.version {
            tbs.push(version.clone());
        }
        tbs.push(der_tlv(0x02, &self.serial));
        tbs.push(signature_algorithm.clone());
        tbs.push(self.issuer.clone());
        tbs.push(self.validity.clone());
        tbs.push(self.subject.clone());
        tbs.push(self.spki.clone());
        if let Some(extensions) = &self.extensions {
            tbs.push(extensions.clone());
        }

        der_seq(&[der_seq(&tbs), signature_algorithm, der_tlv(0x03, &[0x00; 65])])
    }
}

/// `[3] { SEQUENCE OF Extension }` from `(oid, value)` pairs.
pub fn der_extensions(extensions: &[(&[u8], Vec<u8>)]) -> Vec<u8> {
    let entries: Vec<Vec<u8>> = extensions
        .iter()
        .map(|(oid, value)| der_seq(&[der_tlv(0x06, oid), der_tlv(0x04, value)]))
        .collect();
    der_tlv(0xA3, &der_seq(&entries))
}

/// Fixed clock for validity assertions.
pub fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
}
