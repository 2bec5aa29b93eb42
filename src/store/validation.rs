/**
 * Credential Input Rules
 *
 * # Usernames
 *
 * - 3-32 characters
 * - Only `A-Z`, `a-z`, `0-9`, `_` and `-`
 * - Case-sensitive; no trimming or normalisation happens here
 *
 * # Passwords at registration
 *
 * - 8-128 characters (Unicode scalar values, not bytes)
 * - No character-class requirements
 *
 * # Passwords presented for verification
 *
 * Presented passwords are looser: anything whose trimmed form is non-empty
 * and at most 256 characters is worth a hash comparison. Everything else is
 * rejected as invalid credentials before the database is touched.
 */

/// Minimum username length
pub const USERNAME_MIN_LEN: usize = 3;

/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 32;

/// Minimum password length at registration
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum password length at registration
pub const PASSWORD_MAX_LEN: usize = 128;

/// Maximum length of a password presented for verification
pub const PRESENTED_PASSWORD_MAX_LEN: usize = 256;

/// Validate username format
///
/// Returns `true` for 3-32 characters drawn from `[A-Za-z0-9_-]`.
pub fn is_valid_username(username: &str) -> bool {
    // ASCII-only charset, so byte length equals character length
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username.len())
        && username
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Validate a password chosen at registration
pub fn is_valid_password(password: &str) -> bool {
    (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.chars().count())
}

/// Whether a presented password is worth comparing against a stored hash
pub fn is_plausible_presented_password(password: &str) -> bool {
    let trimmed = password.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= PRESENTED_PASSWORD_MAX_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(!is_valid_username("ab"));
        assert!(is_valid_username("abc"));
        assert!(is_valid_username(&"a".repeat(32)));
        assert!(!is_valid_username(&"a".repeat(33)));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn test_username_charset() {
        assert!(is_valid_username("Alice_the-2nd"));
        assert!(is_valid_username("---"));
        assert!(!is_valid_username("alice smith"));
        assert!(!is_valid_username("alice@example"));
        assert!(!is_valid_username("al/ice"));
        assert!(!is_valid_username(".."));
        assert!(!is_valid_username("ålice"));
        assert!(!is_valid_username(" alice"));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(!is_valid_password("short"));
        assert!(!is_valid_password("1234567"));
        assert!(is_valid_password("12345678"));
        assert!(is_valid_password(&"p".repeat(128)));
        assert!(!is_valid_password(&"p".repeat(129)));
    }

    #[test]
    fn test_password_length_counts_characters() {
        // 8 characters, 17 bytes
        assert!(is_valid_password("ééééééé€"));
        // 128 characters, 256 bytes
        assert!(is_valid_password(&"é".repeat(128)));
    }

    #[test]
    fn test_password_has_no_class_rules() {
        assert!(is_valid_password("aaaaaaaa"));
        assert!(is_valid_password("        "));
    }

    #[test]
    fn test_presented_password() {
        assert!(is_plausible_presented_password("x"));
        assert!(is_plausible_presented_password("  padded  "));
        assert!(!is_plausible_presented_password(""));
        assert!(!is_plausible_presented_password(" \t\n "));
        assert!(is_plausible_presented_password(&"p".repeat(256)));
        assert!(!is_plausible_presented_password(&"p".repeat(257)));
    }
}
