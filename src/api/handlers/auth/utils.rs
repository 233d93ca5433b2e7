//! Small helpers for credential validation.

use regex::Regex;

/// Username sanity check: 3-32 chars, letters/digits plus `._-`, must start
/// alphanumeric. Usernames are case-sensitive and immutable after sign-up.
pub(super) fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{2,31}$").is_ok_and(|regex| regex.is_match(username))
}

/// Password length bounds only; no composition rules.
pub(super) fn valid_password(password: &str) -> bool {
    let length = password.chars().count();
    (8..=128).contains(&length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_username_accepts_basic_names() {
        assert!(valid_username("alice"));
        assert!(valid_username("alice.b-c_d"));
        assert!(valid_username("a2c"));
    }

    #[test]
    fn valid_username_rejects_bad_shapes() {
        assert!(!valid_username("ab"));
        assert!(!valid_username(".alice"));
        assert!(!valid_username("alice with spaces"));
        assert!(!valid_username(&"a".repeat(33)));
        assert!(!valid_username(""));
    }

    #[test]
    fn valid_password_checks_length_only() {
        assert!(valid_password("12345678"));
        assert!(valid_password(&"x".repeat(128)));
        assert!(!valid_password("1234567"));
        assert!(!valid_password(&"x".repeat(129)));
    }
}
