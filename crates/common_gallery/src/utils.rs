use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

/// Generate an opaque session token from 32 random bytes, URL-safe encoded.
#[must_use]
pub fn session_token() -> String {
    let mut raw_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut raw_bytes);
    URL_SAFE_NO_PAD.encode(raw_bytes)
}

/// Generate the external id a photo's stored files are named after.
#[must_use]
pub fn new_file_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_tokens_are_unique_and_url_safe() {
        let a = session_token();
        let b = session_token();
        assert_ne!(a, b);
        // 32 bytes of unpadded base64.
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn file_ids_are_unique() {
        assert_ne!(new_file_id(), new_file_id());
    }
}
