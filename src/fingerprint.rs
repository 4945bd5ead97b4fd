//! Content fingerprints for scheduler documents.
//!
//! A fingerprint is the BLAKE3 digest of a document's compact JSON form.
//! Maps serialize in key order and unset fields are omitted, so equal
//! documents always produce equal fingerprints.

use std::fmt;

use blake3::Hasher;

use crate::error::SchedulerError;
use crate::spec::SchedulerSpec;

/// A 32-byte document digest, displayed as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 12 hex digits, enough to tell documents apart in logs.
    #[must_use]
    pub fn short(&self) -> String {
        let mut hex = self.to_string();
        hex.truncate(12);
        hex
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Computes the fingerprint of a document.
///
/// # Errors
///
/// Returns an internal error if the document cannot be serialized.
pub fn fingerprint(spec: &SchedulerSpec) -> Result<Fingerprint, SchedulerError> {
    let mut hasher = Hasher::new();
    serde_json::to_writer(&mut hasher, spec)
        .map_err(|e| SchedulerError::internal(format!("serialize spec for fingerprint: {e}")))?;
    Ok(Fingerprint(*hasher.finalize().as_bytes()))
}
