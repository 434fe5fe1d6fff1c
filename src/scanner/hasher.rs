//! BLAKE3 content fingerprinting.
//!
//! # Overview
//!
//! A fingerprint is the BLAKE3 digest of a file's canonicalized content.
//! Two files with equal fingerprints are treated as exact duplicates and
//! never enter the pairwise-comparison pipeline.

/// A 32-byte BLAKE3 content fingerprint.
pub type Fingerprint = [u8; 32];

/// Compute the fingerprint of (canonicalized) SVG content.
///
/// # Example
///
/// ```
/// use svgdupe::scanner::fingerprint;
///
/// let a = fingerprint("<svg></svg>");
/// let b = fingerprint("<svg></svg>");
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn fingerprint(content: &str) -> Fingerprint {
    *blake3::hash(content.as_bytes()).as_bytes()
}

/// Convert a fingerprint to its lowercase hexadecimal representation.
#[must_use]
pub fn fingerprint_to_hex(fp: &Fingerprint) -> String {
    fp.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(fingerprint("<svg/>"), fingerprint("<svg/>"));
    }

    #[test]
    fn test_fingerprint_differs_on_content() {
        assert_ne!(fingerprint("<svg/>"), fingerprint("<svg></svg>"));
    }

    #[test]
    fn test_fingerprint_to_hex() {
        let hex = fingerprint_to_hex(&fingerprint("x"));
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
