//! Curve registry for the two supported ECDSA curves
//!
//! P-256 is fully described by the `p256` crate's catalog. secp256k1 keys are
//! decoded outside the standard PKCS#8 / SPKI path, so its domain parameters
//! are carried here and the base point used for key derivation comes from them.

use std::fmt;

use der::asn1::ObjectIdentifier;

use crate::error::{Error, Result};

/// id-ecPublicKey algorithm identifier (RFC 5480)
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// prime256v1 / NIST P-256
pub const OID_P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// secp256k1 (SEC 2)
pub const OID_SECP256K1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// Short Weierstrass domain parameters, big-endian hex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainParameters {
    /// Prime field modulus
    pub p: &'static str,
    /// Curve coefficient a
    pub a: &'static str,
    /// Curve coefficient b
    pub b: &'static str,
    /// Base point x coordinate
    pub gx: &'static str,
    /// Base point y coordinate
    pub gy: &'static str,
    /// Order of the base point
    pub n: &'static str,
    /// Cofactor
    pub h: u32,
}

/// secp256k1 parameters from SEC 2, section 2.4.1
pub const SECP256K1_PARAMETERS: DomainParameters = DomainParameters {
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: "0000000000000000000000000000000000000000000000000000000000000000",
    b: "0000000000000000000000000000000000000000000000000000000000000007",
    gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    h: 1,
};

impl DomainParameters {
    /// Uncompressed SEC1 encoding of the base point (0x04 || Gx || Gy)
    pub fn generator_sec1(&self) -> Result<Vec<u8>> {
        let mut point = vec![0x04];
        point.extend(decode_constant(self.gx)?);
        point.extend(decode_constant(self.gy)?);
        Ok(point)
    }

    /// Group order as big-endian bytes
    pub fn order(&self) -> Result<Vec<u8>> {
        decode_constant(self.n)
    }
}

fn decode_constant(hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str).map_err(|e| Error::KeyDecode(format!("Invalid curve constant: {}", e)))
}

/// Elliptic curves a UserSig key may be declared on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (prime256v1)
    P256,
    /// secp256k1
    Secp256k1,
}

impl Curve {
    /// Resolve a named-curve OID
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        if *oid == OID_P256 {
            Some(Curve::P256)
        } else if *oid == OID_SECP256K1 {
            Some(Curve::Secp256k1)
        } else {
            None
        }
    }

    /// Resolve a named-curve OID, failing with `UnsupportedCurve`
    pub fn resolve(oid: &ObjectIdentifier) -> Result<Self> {
        Self::from_oid(oid).ok_or_else(|| Error::UnsupportedCurve(oid.to_string()))
    }

    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Curve::P256 => OID_P256,
            Curve::Secp256k1 => OID_SECP256K1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Curve::P256 => "prime256v1",
            Curve::Secp256k1 => "secp256k1",
        }
    }

    /// Width of a field element / scalar in bytes
    pub fn field_size(&self) -> usize {
        32
    }

    /// Explicit domain parameters for curves missing from the standard catalog
    pub fn explicit_parameters(&self) -> Option<&'static DomainParameters> {
        match self {
            Curve::P256 => None,
            Curve::Secp256k1 => Some(&SECP256K1_PARAMETERS),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
