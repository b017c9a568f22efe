//! UserSig Core - Signed, compressed user authentication tokens
//!
//! This crate issues and verifies UserSig tokens: an ECDSA signature over a
//! canonical rendering of the token fields, packed as JSON, zlib-compressed
//! and encoded with a URL-tolerant base64 alphabet.
//!
//! Two curves are supported:
//! - **P-256** (prime256v1), decoded through the standard PKCS#8 / SPKI parsers
//! - **secp256k1**, decoded manually from the SEC1 structures using the
//!   domain parameters held in [`curve`]
//!
//! ```text
//! fields ──► canonical content ──► SHA-256 ──► ECDSA ──► DER ──► base64
//!   └──────────────────────────── JSON ◄─────────────────────────┘
//!                                  │
//!                         zlib ──► base64 (+ → *, / → -, = → _) ──► token
//! ```

pub mod content;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod fields;
pub mod key;
pub mod signature;
pub mod usersig;

pub use curve::{Curve, DomainParameters};
pub use error::{Error, Result};
pub use fields::UserSigFields;
pub use key::{PrivateKey, PublicKey};
pub use signature::EcdsaSignature;
pub use usersig::{
    decode_user_sig, gen_user_sig, verify_user_sig, verify_user_sig_with_key, SignedUserSig,
};

/// Account type written into every token
pub const ACCOUNT_TYPE: &str = "0";

/// Third-party application id written into every token
pub const APPID_AT_3RD: &str = "0";

/// Token format version
pub const VERSION: &str = "201512300000";

/// Default validity window in seconds (180 days)
pub const DEFAULT_EXPIRE_SECS: u64 = 3600 * 24 * 180;
