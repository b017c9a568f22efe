//! Error types for UserSig issuance and verification

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while issuing or verifying a UserSig
///
/// A signature that simply fails to verify is not an error; verification
/// reports it as a `false` validity flag.
#[derive(Error, Debug)]
pub enum Error {
    /// PEM container, PKCS#8 / SPKI structure or inner key was malformed
    #[error("Key decode error: {0}")]
    KeyDecode(String),

    /// Key declares a curve other than P-256 or secp256k1
    #[error("Unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),

    /// Signature primitive or payload encoding failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Token failed base64, zlib, JSON or signature decoding
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// A caller-supplied field was rejected before signing
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

impl Error {
    /// True for any key decoding failure, including unsupported curves
    pub fn is_key_error(&self) -> bool {
        matches!(self, Error::KeyDecode(_) | Error::UnsupportedCurve(_))
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(e: pem_rfc7468::Error) -> Self {
        Error::KeyDecode(format!("Invalid PEM: {}", e))
    }
}

impl From<der::Error> for Error {
    fn from(e: der::Error) -> Self {
        Error::KeyDecode(format!("Invalid DER: {}", e))
    }
}

impl From<spki::Error> for Error {
    fn from(e: spki::Error) -> Self {
        Error::KeyDecode(format!("Invalid SubjectPublicKeyInfo: {}", e))
    }
}

impl From<pkcs8::Error> for Error {
    fn from(e: pkcs8::Error) -> Self {
        Error::KeyDecode(format!("Invalid PKCS#8: {}", e))
    }
}

impl From<sec1::Error> for Error {
    fn from(e: sec1::Error) -> Self {
        Error::KeyDecode(format!("Invalid SEC1 private key: {}", e))
    }
}
