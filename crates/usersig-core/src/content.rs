//! Canonical signing content
//!
//! The exact bytes hashed and signed: six `label:value\n` lines in a fixed
//! order. Values are not escaped.

use sha2::{Digest, Sha256};

use crate::fields::UserSigFields;

pub const LABEL_APPID_AT_3RD: &str = "TLS.appid_at_3rd";
pub const LABEL_ACCOUNT_TYPE: &str = "TLS.account_type";
pub const LABEL_IDENTIFIER: &str = "TLS.identifier";
pub const LABEL_SDK_APPID: &str = "TLS.sdk_appid";
pub const LABEL_TIME: &str = "TLS.time";
pub const LABEL_EXPIRE_AFTER: &str = "TLS.expire_after";

/// Render the fields covered by the signature
///
/// `TLS.version` and `TLS.sig` are not part of the signed content.
pub fn build_signing_content(fields: &UserSigFields) -> String {
    let time = fields.time.to_string();
    let expire_after = fields.expire_after.to_string();
    let lines: [(&str, &str); 6] = [
        (LABEL_APPID_AT_3RD, &fields.appid_at_3rd),
        (LABEL_ACCOUNT_TYPE, &fields.account_type),
        (LABEL_IDENTIFIER, &fields.identifier),
        (LABEL_SDK_APPID, &fields.sdk_appid),
        (LABEL_TIME, &time),
        (LABEL_EXPIRE_AFTER, &expire_after),
    ];

    let mut content = String::new();
    for (label, value) in lines {
        if value.contains('\n') {
            tracing::warn!("{} contains a newline; signed content is ambiguous", label);
        }
        content.push_str(label);
        content.push(':');
        content.push_str(value);
        content.push('\n');
    }
    content
}

/// SHA-256 of the canonical content
pub fn signing_hash(fields: &UserSigFields) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(build_signing_content(fields).as_bytes());
    hasher.finalize().into()
}
