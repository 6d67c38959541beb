//! Minimal DER primitives used by the certificate walk
//!
//! - `reader`: byte cursor and tag/length header decoding
//! - `oid`: object identifier decoding and lookup tables

pub mod oid;
pub mod reader;

pub use oid::decode_oid;
pub use reader::{DerCursor, TlvHeader};

/// BOOLEAN
pub const TAG_BOOLEAN: u8 = 0x01;
/// NULL
pub const TAG_NULL: u8 = 0x05;
/// OBJECT IDENTIFIER
pub const TAG_OID: u8 = 0x06;
/// `[0] EXPLICIT` version wrapper
pub const TAG_VERSION: u8 = 0xA0;
/// `[3] EXPLICIT` extensions wrapper
pub const TAG_EXTENSIONS: u8 = 0xA3;
/// GeneralName `dNSName [2]`
pub const TAG_SAN_DNS: u8 = 0x82;
/// GeneralName `iPAddress [7]`
pub const TAG_SAN_IP: u8 = 0x87;
