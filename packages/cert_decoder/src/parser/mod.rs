//! Certificate walk, split by field group
//!
//! - `core`: the fixed-order walk that assembles a record
//! - `name_extraction`: issuer and subject distinguished names
//! - `time_extraction`: UTCTime / GeneralizedTime and the validity window
//! - `key_extraction`: SubjectPublicKeyInfo algorithm and raw bytes
//! - `extension_extraction`: best-effort Subject Alternative Name scan

pub mod core;
pub mod extension_extraction;
pub mod key_extraction;
pub mod name_extraction;
pub mod time_extraction;

pub use core::{decode_certificate, CertificateDecoder};
pub use name_extraction::DistinguishedName;
