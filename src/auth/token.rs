use rand::{rngs::OsRng, RngCore};

const TOKEN_BYTES: usize = 32;

/// Opaque bearer credential: 32 random bytes, hex-encoded. Valid until the
/// next successful login replaces it.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_lowercase_hex_chars() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn consecutive_tokens_differ() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}
