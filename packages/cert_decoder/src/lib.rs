//! DER X.509 v3 certificate decoding into a flat, human-usable record
//!
//! ```no_run
//! use cert_decoder::CertificateDecoder;
//!
//! let pem = std::fs::read_to_string("server.pem")?;
//! let record = CertificateDecoder::new().decode_pem(&pem)?;
//! println!("{} expires {}", record.subject, cert_decoder::rfc1123(&record.not_after));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding never verifies signatures or chains. It reads the TBSCertificate
//! in schema order, and only the Subject Alternative Name scan is allowed to
//! fail softly.

#![forbid(unsafe_code)]

pub mod config;
pub mod der;
pub mod error;
pub mod logging;
pub mod parser;
pub mod pem;
pub mod types;

pub use config::DecoderConfig;
pub use error::{CertError, Result};
pub use logging::LoggingTransformer;
pub use parser::{decode_certificate, CertificateDecoder, DistinguishedName};
pub use types::{
    rfc1123, CertificateRecord, GeneralName, PublicKeyAlgorithm, PublicKeyInfo, ValidityStatus,
};
