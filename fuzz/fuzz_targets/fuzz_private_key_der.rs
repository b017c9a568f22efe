#![no_main]

use libfuzzer_sys::fuzz_target;
use usersig_core::PrivateKey;

fuzz_target!(|data: &[u8]| {
    // Try to parse - should not panic
    if let Ok(key) = PrivateKey::from_pkcs8_der(data) {
        // Any accepted key must produce a public key on the same curve
        assert_eq!(key.public_key().curve(), key.curve());
    }
});
