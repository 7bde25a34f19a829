use serde::Serialize;
use std::hash::Hasher;
use translation_core_api::{TranslationError, TranslationResult};
use twox_hash::XxHash64;

/// Stable fingerprint of serializable data: CBOR encoding hashed with
/// XxHash64 (seed 0), so equal definitions hash equally across runs.
pub fn fingerprint<T: Serialize>(data: &T) -> TranslationResult<i64> {
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor).map_err(|e| {
        TranslationError::Configuration(format!("Failed to encode definition for fingerprinting: {e}"))
    })?;
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint(&("post_localized", "owner_id", vec!["title"])).unwrap();
        let b = fingerprint(&("post_localized", "owner_id", vec!["title"])).unwrap();
        let c = fingerprint(&("post_localized", "post_id", vec!["title"])).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
