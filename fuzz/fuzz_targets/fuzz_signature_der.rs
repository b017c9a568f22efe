#![no_main]

use libfuzzer_sys::fuzz_target;
use usersig_core::EcdsaSignature;

fuzz_target!(|data: &[u8]| {
    // Parse signature - should not panic
    if let Ok(sig) = EcdsaSignature::from_der(data) {
        let reserialized = sig.to_der().expect("decoded signature re-encodes");
        let sig2 = EcdsaSignature::from_der(&reserialized).expect("re-encoded signature decodes");

        assert_eq!(sig.r(), sig2.r());
        assert_eq!(sig.s(), sig2.s());

        // Fixed-width form only exists when both halves fit
        if let Some((r, s)) = sig.to_fixed_width(32) {
            assert_eq!(r.len(), 32);
            assert_eq!(s.len(), 32);
        }
    }
});
