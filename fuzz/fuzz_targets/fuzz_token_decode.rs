#![no_main]

use libfuzzer_sys::fuzz_target;
use usersig_core::encoding::{decode_envelope, encode_envelope};
use usersig_core::decode_user_sig;

fuzz_target!(|data: &[u8]| {
    if let Ok(token) = std::str::from_utf8(data) {
        // Arbitrary tokens must be rejected, never panic
        let _ = decode_user_sig(token);

        if let Ok(payload) = decode_envelope(token) {
            // Anything that decodes must survive re-encoding
            if let Ok(reencoded) = encode_envelope(&payload) {
                assert_eq!(decode_envelope(&reencoded).ok(), Some(payload));
            }
        }
    }
});
