//! UserSig token fields and their JSON mapping

use serde::{Deserialize, Serialize};

use crate::{ACCOUNT_TYPE, APPID_AT_3RD, DEFAULT_EXPIRE_SECS, VERSION};

/// Fields carried inside a UserSig token
///
/// Everything except `sig` is covered by the signature (see
/// [`crate::content`]); `version` travels alongside but is not signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSigFields {
    #[serde(rename = "TLS.account_type")]
    pub account_type: String,

    #[serde(rename = "TLS.identifier")]
    pub(crate) identifier: String,

    #[serde(rename = "TLS.appid_at_3rd")]
    pub appid_at_3rd: String,

    #[serde(rename = "TLS.sdk_appid")]
    pub(crate) sdk_appid: String,

    /// Validity window in seconds, counted from `time`
    #[serde(rename = "TLS.expire_after", with = "decimal_u64")]
    pub expire_after: u64,

    #[serde(rename = "TLS.version")]
    pub version: String,

    #[serde(rename = "TLS.time", with = "decimal_u64")]
    pub(crate) time: u64,

    #[serde(rename = "TLS.sig", default, skip_serializing_if = "Option::is_none")]
    pub(crate) sig: Option<String>,
}

impl UserSigFields {
    /// Fields for `identifier` in `sdk_appid`, issued now
    pub fn new(sdk_appid: impl Into<String>, identifier: impl Into<String>) -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        Self::new_at(sdk_appid, identifier, now)
    }

    /// Fields with an explicit issuance time
    pub fn new_at(
        sdk_appid: impl Into<String>,
        identifier: impl Into<String>,
        issued_at: u64,
    ) -> Self {
        Self {
            account_type: ACCOUNT_TYPE.to_string(),
            identifier: identifier.into(),
            appid_at_3rd: APPID_AT_3RD.to_string(),
            sdk_appid: sdk_appid.into(),
            expire_after: DEFAULT_EXPIRE_SECS,
            version: VERSION.to_string(),
            time: issued_at,
            sig: None,
        }
    }

    /// User identifier the token is issued for
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Application the token is valid for
    pub fn sdk_appid(&self) -> &str {
        &self.sdk_appid
    }

    /// Issuance time, Unix seconds
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Override the validity window
    pub fn with_expire(mut self, expire_in_seconds: u64) -> Self {
        self.expire_after = expire_in_seconds;
        self
    }

    /// Base64 DER signature, present once the fields have been signed
    pub fn signature(&self) -> Option<&str> {
        self.sig.as_deref()
    }

    /// Unix time after which the token should no longer be honored
    pub fn expires_at(&self) -> u64 {
        self.time.saturating_add(self.expire_after)
    }

    /// Check whether the validity window has passed at `current_time`
    pub fn is_expired_at(&self, current_time: u64) -> bool {
        current_time >= self.expires_at()
    }

    /// Seconds left before expiry (0 once expired)
    pub fn seconds_until_expiry(&self, current_time: u64) -> u64 {
        self.expires_at().saturating_sub(current_time)
    }
}

/// Serde helper for integers written as decimal strings
///
/// Accepts JSON numbers too when decoding. Strings must be canonical: ASCII
/// digits only, no sign and no leading zeros, so a decoded value renders back
/// to exactly the text that was signed.
pub mod decimal_u64 {
    use std::fmt;

    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> de::Visitor<'de> for DecimalVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            if !is_canonical_decimal(v) {
                return Err(E::invalid_value(de::Unexpected::Str(v), &self));
            }
            v.parse().map_err(E::custom)
        }
    }

    fn is_canonical_decimal(v: &str) -> bool {
        match v.as_bytes() {
            [] => false,
            [b'0'] => true,
            [b'0', ..] => false,
            digits => digits.iter().all(u8::is_ascii_digit),
        }
    }
}
