//! Distinguished name extraction
//!
//! Walks an RDNSequence and keeps only the attribute types that have a short
//! name (CN, O, OU, C, L, ST). Values are collected with map semantics: a
//! repeated attribute type overwrites the earlier value but keeps the position
//! where that type was first seen.

use std::fmt;

use crate::der::oid::attribute_short_name;
use crate::der::{decode_oid, DerCursor};
use crate::error::Result;

/// Recognised DN attributes in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    entries: Vec<(&'static str, String)>,
}

impl DistinguishedName {
    /// Set `name` to `value`, replacing any earlier value in place.
    pub fn insert(&mut self, name: &'static str, value: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value recorded for a short name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether no recognised attribute was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Read one `Name` from the cursor.
///
/// ```text
/// Name ::= SEQUENCE OF SET OF SEQUENCE { type OBJECT IDENTIFIER, value ANY }
/// ```
pub fn extract_name(cursor: &mut DerCursor<'_>) -> Result<DistinguishedName> {
    let mut name = DistinguishedName::default();

    let sequence = cursor.read_header()?;
    let end = cursor.position() + sequence.length;

    while cursor.position() < end {
        let set = cursor.read_header()?;
        let set_end = cursor.position() + set.length;

        // Multi-valued RDNs hold more than one AttributeTypeAndValue
        loop {
            cursor.read_header()?;
            let (_, oid_bytes) = cursor.read_tlv_value()?;
            let (_, value) = cursor.read_tlv_value()?;

            let oid = decode_oid(oid_bytes);
            match attribute_short_name(&oid) {
                Some(short) => name.insert(short, String::from_utf8_lossy(value).into_owned()),
                None => tracing::trace!(oid = %oid, "dropping unrecognised DN attribute"),
            }

            if cursor.position() >= set_end {
                break;
            }
        }
    }

    Ok(name)
}
