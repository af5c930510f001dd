/// Canonical form used for every name comparison.
///
/// Trims, lowercases (Unicode-aware) and strips every remaining whitespace
/// character, so `"  Pathum  Wan "` and `"pathumwan"` compare equal. Thai script
/// has no case, so for Thai input this only removes spacing.
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Normalizes an optional argument, treating blank input as absent.
pub(crate) fn normalize_optional(text: Option<&str>) -> Option<String> {
    text.map(normalize_text).filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("  Ab  C ", "abc")]
    #[case("กรุงเทพ มหานคร", "กรุงเทพมหานคร")]
    #[case("\tPathum\u{00A0}Wan\n", "pathumwan")]
    #[case("", "")]
    #[case("   ", "")]
    fn test_normalize_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_text(input), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["  Ab  C ", "เชียง ใหม่", "MUEANG Chiang Mai"] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_normalize_optional_drops_blank() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some(" \t ")), None);
        assert_eq!(normalize_optional(Some(" ภูเก็ต ")), Some("ภูเก็ต".to_string()));
    }
}
