//! ECDSA signature codec
//!
//! Signatures travel as `SEQUENCE { r INTEGER, s INTEGER }`. Both integers
//! are kept as minimal big-endian unsigned bytes so the same value type can
//! carry a signature for either curve.

use der::{asn1::UintRef, Decode, Encode, Sequence};

use crate::error::{Error, Result};

#[derive(Sequence)]
struct EcdsaSigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

/// ECDSA signature as the (r, s) integer pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl EcdsaSignature {
    /// Create from big-endian unsigned integers; leading zeros are dropped
    pub fn new(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: strip_leading_zeros(r).to_vec(),
            s: strip_leading_zeros(s).to_vec(),
        }
    }

    /// Minimal big-endian r
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// Minimal big-endian s
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Encode as a DER `SEQUENCE` of two `INTEGER`s
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let value = EcdsaSigValue {
            r: UintRef::new(&self.r).map_err(|e| Error::Signing(e.to_string()))?,
            s: UintRef::new(&self.s).map_err(|e| Error::Signing(e.to_string()))?,
        };
        value
            .to_der()
            .map_err(|e| Error::Signing(format!("Failed to encode signature: {}", e)))
    }

    /// Decode a DER `SEQUENCE` of two `INTEGER`s
    ///
    /// Every length prefix is checked against the input, so truncated or
    /// overlong encodings are rejected instead of misparsed.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let value = EcdsaSigValue::from_der(bytes)
            .map_err(|e| Error::MalformedToken(format!("Invalid signature DER: {}", e)))?;
        Ok(Self::new(value.r.as_bytes(), value.s.as_bytes()))
    }

    /// r and s left-padded to `width` bytes, or `None` if either is wider
    pub fn to_fixed_width(&self, width: usize) -> Option<(Vec<u8>, Vec<u8>)> {
        Some((left_pad(&self.r, width)?, left_pad(&self.s, width)?))
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len().saturating_sub(1));
    &bytes[start..]
}

/// Big-endian integer left-padded with zeros to `width` bytes
pub(crate) fn left_pad(bytes: &[u8], width: usize) -> Option<Vec<u8>> {
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(bytes);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_small_values() {
        let sig = EcdsaSignature::new(&[0x01], &[0x7f]);
        assert_eq!(
            sig.to_der().unwrap(),
            vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x7f]
        );
    }

    #[test]
    fn test_encode_adds_sign_byte() {
        // High bit set: DER needs a 0x00 prefix to stay positive
        let sig = EcdsaSignature::new(&[0x80, 0x01], &[0x00, 0x00, 0x05]);
        let der = sig.to_der().unwrap();
        assert_eq!(
            der,
            vec![0x30, 0x08, 0x02, 0x03, 0x00, 0x80, 0x01, 0x02, 0x01, 0x05]
        );

        let decoded = EcdsaSignature::from_der(&der).unwrap();
        assert_eq!(decoded.r(), &[0x80, 0x01]);
        assert_eq!(decoded.s(), &[0x05]);
    }

    #[test]
    fn test_full_width_roundtrip() {
        let r = [0xffu8; 32];
        let s = [0x11u8; 32];
        let sig = EcdsaSignature::new(&r, &s);
        let der = sig.to_der().unwrap();

        // 0x30 len | 0x02 0x21 0x00 r | 0x02 0x20 s
        assert_eq!(der.len(), 2 + 35 + 34);
        assert_eq!(EcdsaSignature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_rejects_truncated() {
        let der = EcdsaSignature::new(&[0x42; 32], &[0x24; 32])
            .to_der()
            .unwrap();
        for len in 0..der.len() {
            assert!(
                EcdsaSignature::from_der(&der[..len]).is_err(),
                "prefix of length {} decoded",
                len
            );
        }
    }

    #[test]
    fn test_rejects_length_past_buffer() {
        // r claims 0x20 bytes but only 1 follows
        let bad = [0x30, 0x06, 0x02, 0x20, 0x01, 0x02, 0x01, 0x01];
        assert!(matches!(
            EcdsaSignature::from_der(&bad),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut der = EcdsaSignature::new(&[0x01], &[0x02]).to_der().unwrap();
        der.push(0x00);
        assert!(EcdsaSignature::from_der(&der).is_err());
    }

    #[test]
    fn test_rejects_negative_integer() {
        let bad = [0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01];
        assert!(EcdsaSignature::from_der(&bad).is_err());
    }

    #[test]
    fn test_fixed_width() {
        let sig = EcdsaSignature::new(&[0x01, 0x02], &[0x03]);
        let (r, s) = sig.to_fixed_width(4).unwrap();
        assert_eq!(r, vec![0, 0, 1, 2]);
        assert_eq!(s, vec![0, 0, 0, 3]);

        let wide = EcdsaSignature::new(&[0x01; 33], &[0x01]);
        assert!(wide.to_fixed_width(32).is_none());
    }
}
