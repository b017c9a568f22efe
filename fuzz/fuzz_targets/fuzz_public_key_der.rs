#![no_main]

use libfuzzer_sys::fuzz_target;
use usersig_core::PublicKey;

fuzz_target!(|data: &[u8]| {
    // Try to parse - should not panic
    if let Ok(key) = PublicKey::from_public_key_der(data) {
        let point = key.to_uncompressed_point();
        assert_eq!(point.len(), 65);
        assert_eq!(point[0], 0x04);
    }
});
