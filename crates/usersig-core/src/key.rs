//! Key decoding, signing and verification for both supported curves
//!
//! PEM input is decoded to DER, then the algorithm identifier is inspected
//! before any curve-specific parsing:
//!
//! - P-256 keys go through the standard PKCS#8 / SPKI decoders of `p256`.
//! - secp256k1 keys are decoded manually: the SEC1 `ECPrivateKey` is read out
//!   of the PKCS#8 wrapper and the public point is derived from the registry's
//!   base point, or the SPKI bit string is decoded as an uncompressed point.
//!
//! Keys are tagged by curve and every operation dispatches on the tag.

use k256::elliptic_curve::group::Curve as _;
use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use pkcs8::PrivateKeyInfo;
use rand::rngs::OsRng;
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use zeroize::Zeroizing;

use crate::curve::{Curve, ID_EC_PUBLIC_KEY};
use crate::error::{Error, Result};
use crate::signature::{left_pad, EcdsaSignature};

/// PEM label of a PKCS#8 private key
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// PEM label of a SubjectPublicKeyInfo public key
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// ECDSA private key on one of the supported curves
#[derive(Debug, Clone)]
pub enum PrivateKey {
    P256(p256::SecretKey),
    Secp256k1(k256::SecretKey),
}

/// ECDSA public key on one of the supported curves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    P256(p256::PublicKey),
    Secp256k1(k256::PublicKey),
}

impl PrivateKey {
    /// Decode a PEM `PRIVATE KEY` (PKCS#8) block
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let der = Zeroizing::new(decode_pem(pem, PRIVATE_KEY_LABEL)?);
        Self::from_pkcs8_der(&der)
    }

    /// Decode PKCS#8 DER
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)?;
        let curve = ec_curve(&info.algorithm)?;

        match curve {
            Curve::P256 => {
                tracing::debug!("Decoding {} private key with the PKCS#8 parser", curve);
                Ok(PrivateKey::P256(p256::SecretKey::from_pkcs8_der(der)?))
            }
            Curve::Secp256k1 => {
                tracing::debug!("Decoding {} private key from explicit parameters", curve);
                decode_secp256k1_private_key(info.private_key).map(PrivateKey::Secp256k1)
            }
        }
    }

    pub fn curve(&self) -> Curve {
        match self {
            PrivateKey::P256(_) => Curve::P256,
            PrivateKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }

    /// Matching public key
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::P256(secret) => PublicKey::P256(secret.public_key()),
            PrivateKey::Secp256k1(secret) => PublicKey::Secp256k1(secret.public_key()),
        }
    }

    /// Sign a 32-byte message digest with a fresh random nonce
    pub fn sign_prehash(&self, prehash: &[u8; 32]) -> Result<EcdsaSignature> {
        let (r, s) = match self {
            PrivateKey::P256(secret) => {
                let signing_key = p256::ecdsa::SigningKey::from(secret);
                let signature: p256::ecdsa::Signature = signing_key
                    .sign_prehash_with_rng(&mut OsRng, prehash)
                    .map_err(|e| Error::Signing(e.to_string()))?;
                signature.split_bytes()
            }
            PrivateKey::Secp256k1(secret) => {
                let signing_key = k256::ecdsa::SigningKey::from(secret);
                let signature: k256::ecdsa::Signature = signing_key
                    .sign_prehash_with_rng(&mut OsRng, prehash)
                    .map_err(|e| Error::Signing(e.to_string()))?;
                signature.split_bytes()
            }
        };
        Ok(EcdsaSignature::new(&r, &s))
    }
}

impl PublicKey {
    /// Decode a PEM `PUBLIC KEY` (SubjectPublicKeyInfo) block
    pub fn from_public_key_pem(pem: &str) -> Result<Self> {
        let der = decode_pem(pem, PUBLIC_KEY_LABEL)?;
        Self::from_public_key_der(&der)
    }

    /// Decode SubjectPublicKeyInfo DER
    pub fn from_public_key_der(der: &[u8]) -> Result<Self> {
        let info = SubjectPublicKeyInfoRef::try_from(der)?;
        let curve = ec_curve(&info.algorithm)?;

        match curve {
            Curve::P256 => {
                tracing::debug!("Decoding {} public key with the SPKI parser", curve);
                Ok(PublicKey::P256(p256::PublicKey::from_public_key_der(der)?))
            }
            Curve::Secp256k1 => {
                tracing::debug!("Decoding {} public key from explicit parameters", curve);
                let point = info.subject_public_key.as_bytes().ok_or_else(|| {
                    Error::KeyDecode("Public key bit string is not octet aligned".to_string())
                })?;
                decode_secp256k1_point(point).map(PublicKey::Secp256k1)
            }
        }
    }

    pub fn curve(&self) -> Curve {
        match self {
            PublicKey::P256(_) => Curve::P256,
            PublicKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }

    /// Uncompressed SEC1 point (0x04 || X || Y)
    pub fn to_uncompressed_point(&self) -> Vec<u8> {
        match self {
            PublicKey::P256(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            PublicKey::Secp256k1(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Check a signature over a 32-byte message digest
    ///
    /// Integers wider than the field or outside `[1, n)` simply fail to
    /// verify. High-S signatures are normalized first.
    pub fn verify_prehash(&self, prehash: &[u8; 32], signature: &EcdsaSignature) -> bool {
        let Some((r, s)) = signature.to_fixed_width(self.curve().field_size()) else {
            return false;
        };

        match self {
            PublicKey::P256(pk) => {
                let Ok(sig) = p256::ecdsa::Signature::from_scalars(
                    p256::FieldBytes::clone_from_slice(&r),
                    p256::FieldBytes::clone_from_slice(&s),
                ) else {
                    return false;
                };
                let sig = sig.normalize_s().unwrap_or(sig);
                p256::ecdsa::VerifyingKey::from(pk)
                    .verify_prehash(prehash, &sig)
                    .is_ok()
            }
            PublicKey::Secp256k1(pk) => {
                let Ok(sig) = k256::ecdsa::Signature::from_scalars(
                    k256::FieldBytes::clone_from_slice(&r),
                    k256::FieldBytes::clone_from_slice(&s),
                ) else {
                    return false;
                };
                let sig = sig.normalize_s().unwrap_or(sig);
                k256::ecdsa::VerifyingKey::from(pk)
                    .verify_prehash(prehash, &sig)
                    .is_ok()
            }
        }
    }
}

fn decode_pem(pem: &str, expected_label: &str) -> Result<Vec<u8>> {
    let (label, der) = pem_rfc7468::decode_vec(pem.trim().as_bytes())?;
    if label != expected_label {
        return Err(Error::KeyDecode(format!(
            "Expected PEM label {:?}, found {:?}",
            expected_label, label
        )));
    }
    Ok(der)
}

/// Resolve the named curve of an id-ecPublicKey algorithm identifier
fn ec_curve(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<Curve> {
    if algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(Error::KeyDecode(format!(
            "Not an elliptic curve key: algorithm {}",
            algorithm.oid
        )));
    }
    let curve_oid = algorithm.parameters_oid()?;
    Curve::resolve(&curve_oid)
}

/// Decode the SEC1 `ECPrivateKey` held inside a secp256k1 PKCS#8 key
fn decode_secp256k1_private_key(inner: &[u8]) -> Result<k256::SecretKey> {
    let curve = Curve::Secp256k1;
    let params = curve
        .explicit_parameters()
        .ok_or_else(|| Error::UnsupportedCurve(curve.oid().to_string()))?;

    let ec_key = sec1::EcPrivateKey::try_from(inner)?;
    if let Some(named) = ec_key.parameters.and_then(|p| p.named_curve()) {
        if named != curve.oid() {
            return Err(Error::KeyDecode(format!(
                "Inner key names curve {}, outer names {}",
                named,
                curve.oid()
            )));
        }
    }

    let scalar = Zeroizing::new(left_pad(ec_key.private_key, curve.field_size()).ok_or_else(
        || Error::KeyDecode("Private scalar is wider than the curve order".to_string()),
    )?);
    let secret = k256::SecretKey::from_bytes(k256::FieldBytes::from_slice(&scalar))
        .map_err(|_| Error::KeyDecode("Private scalar is zero or not below n".to_string()))?;

    // D·G with the registry's base point
    let generator = k256::PublicKey::from_sec1_bytes(&params.generator_sec1()?)
        .map_err(|e| Error::KeyDecode(format!("Invalid base point: {}", e)))?;
    let point = (generator.to_projective() * *secret.to_nonzero_scalar()).to_affine();
    let derived = k256::PublicKey::from_affine(point)
        .map_err(|e| Error::KeyDecode(format!("Derived point is invalid: {}", e)))?;

    if let Some(embedded) = ec_key.public_key {
        let embedded = k256::PublicKey::from_sec1_bytes(embedded)
            .map_err(|e| Error::KeyDecode(format!("Embedded public key is invalid: {}", e)))?;
        if embedded != derived {
            tracing::warn!("Embedded public key does not match the private scalar");
            return Err(Error::KeyDecode(
                "Embedded public key does not match the private scalar".to_string(),
            ));
        }
    }

    tracing::debug!(
        "Derived {} public key {}",
        curve,
        hex::encode(derived.to_encoded_point(false).as_bytes())
    );
    Ok(secret)
}

/// Decode an uncompressed secp256k1 point and check it lies on the curve
fn decode_secp256k1_point(point: &[u8]) -> Result<k256::PublicKey> {
    let width = Curve::Secp256k1.field_size();
    if point.len() != 1 + 2 * width || point[0] != 0x04 {
        return Err(Error::KeyDecode(format!(
            "Expected a {}-byte uncompressed point, got {} bytes",
            1 + 2 * width,
            point.len()
        )));
    }
    k256::PublicKey::from_sec1_bytes(point)
        .map_err(|_| Error::KeyDecode("Point is not on secp256k1".to_string()))
}
