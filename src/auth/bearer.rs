const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the credential out of an `Authorization` header value.
///
/// The `Bearer ` prefix is matched case-sensitively with exactly one space.
/// `"Bearer "` alone yields `Some("")`; validation rejects the empty credential.
pub fn extract_bearer_credential(header_value: &str) -> Option<&str> {
    if header_value.trim().is_empty() {
        return None;
    }
    header_value.strip_prefix(BEARER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bearer_prefix() {
        assert_eq!(extract_bearer_credential("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn absent_without_prefix() {
        assert_eq!(extract_bearer_credential("abc123"), None);
        assert_eq!(extract_bearer_credential("bearer abc123"), None);
        assert_eq!(extract_bearer_credential("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_bearer_credential("Bearerabc123"), None);
    }

    #[test]
    fn absent_when_blank() {
        assert_eq!(extract_bearer_credential(""), None);
        assert_eq!(extract_bearer_credential("   "), None);
    }

    #[test]
    fn bare_prefix_is_empty_credential() {
        assert_eq!(extract_bearer_credential("Bearer "), Some(""));
    }

    #[test]
    fn keeps_extra_spaces_in_credential() {
        assert_eq!(extract_bearer_credential("Bearer  abc"), Some(" abc"));
    }
}
