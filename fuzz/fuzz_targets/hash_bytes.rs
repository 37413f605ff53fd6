#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match ctph::hash_bytes(data) {
        Ok(digest) => {
            assert!(data.len() >= 4097);
            let mut parts = digest.split(':');
            let bs: u64 = parts.next().unwrap().parse().unwrap();
            assert!((bs / 3).is_power_of_two() && bs % 3 == 0);
            assert!(parts.next().unwrap().len() <= 64);
            assert!(parts.next().unwrap().len() <= 32);
            assert!(parts.next().is_none());

            // Chunked streaming must agree with the one-shot digest.
            let mut hasher = ctph::Hasher::new();
            for chunk in data.chunks(1021) {
                hasher.update(chunk);
            }
            assert_eq!(hasher.digest().unwrap(), digest);
        }
        Err(_) => assert!(data.len() < 4097),
    }
});
