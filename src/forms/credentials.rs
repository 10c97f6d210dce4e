//! Format checks for the bot token and the group identifiers

/// Whether `token` looks like `<digits>:<letters, digits, '_' or '-'>`
pub fn validate_telegram_token(token: &str) -> bool {
    let Some((bot_id, secret)) = token.split_once(':') else {
        return false;
    };
    !bot_id.is_empty()
        && bot_id.bytes().all(|b| b.is_ascii_digit())
        && !secret.is_empty()
        && secret
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Whether `group_id` is a negative integer such as `-1001234567890`
pub fn validate_group_id(group_id: &str) -> bool {
    match group_id.strip_prefix('-') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Normalise user input into a group identifier.
///
/// Everything except digits and hyphens is dropped, then a hyphen is
/// prepended when the result does not already start with one. Repeated
/// leading hyphens are kept as typed.
pub fn format_group_id(input: &str) -> String {
    let mut value: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if !value.is_empty() && !value.starts_with('-') {
        value.insert(0, '-');
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_token() {
        assert!(validate_telegram_token("123456789:ABC-defGHI_123"));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(!validate_telegram_token("123456789-ABCdef"));
        assert!(!validate_telegram_token("abc:123"));
        assert!(!validate_telegram_token(":abc"));
        assert!(!validate_telegram_token("123:"));
        assert!(!validate_telegram_token("123:abc:def"));
        assert!(!validate_telegram_token("123:abc def"));
        assert!(!validate_telegram_token(""));
    }

    #[test]
    fn test_group_id_must_be_negative_integer() {
        assert!(validate_group_id("-1001234567890"));
        assert!(!validate_group_id("1001234567890"));
        assert!(!validate_group_id("-"));
        assert!(!validate_group_id("-100abc"));
        assert!(!validate_group_id(""));
    }

    #[test]
    fn test_format_group_id_prepends_hyphen() {
        assert_eq!(format_group_id("1001234567890"), "-1001234567890");
    }

    #[test]
    fn test_format_group_id_strips_other_characters() {
        assert_eq!(format_group_id("-100abc123"), "-100123");
        assert_eq!(format_group_id(" 12 34 "), "-1234");
    }

    #[test]
    fn test_format_group_id_keeps_repeated_hyphens() {
        assert_eq!(format_group_id("--5"), "--5");
    }

    #[test]
    fn test_format_group_id_empty_stays_empty() {
        assert_eq!(format_group_id(""), "");
        assert_eq!(format_group_id("abc"), "");
    }
}
