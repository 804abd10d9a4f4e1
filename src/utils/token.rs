use rand::RngCore;
use subtle::ConstantTimeEq;

/// Opaque token: 40 random bytes, hex-encoded (80 chars).
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; 40];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Constant-time comparison for verification tokens.
pub fn tokens_match(provided: &str, stored: &str) -> bool {
    provided.as_bytes().ct_eq(stored.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_hex() {
        let a = generate_token_value();
        let b = generate_token_value();
        assert_eq!(a.len(), 80);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn token_comparison() {
        let token = generate_token_value();
        assert!(tokens_match(&token, &token));
        assert!(!tokens_match(&token, &generate_token_value()));
        assert!(!tokens_match("short", &token));
    }
}
