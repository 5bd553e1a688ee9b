//! Number-prefix parsing for directory and file names.
//!
//! Content authors order directories with an ordinal prefix (`01-Intro`,
//! `2-API`, `10_reference`). The prefix controls filesystem sort order only;
//! generated category labels drop it:
//!
//! - `2-API` → "API"
//! - `010_Getting Started` → "Getting Started"
//! - `3. Guides` → "Guides"
//!
//! A name is only treated as prefixed when a separator (`-`, `_` or `.`)
//! follows the digits and something meaningful remains after it. `2024`,
//! `1-` and `42-_` are returned unchanged.

/// Result of parsing a name like `2-API`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Ordinal prefix if present (e.g. `2` from `2-API`).
    pub number: Option<u32>,
    /// Name with the prefix and its separator removed. For names without a
    /// prefix this is the full input.
    pub name: String,
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.')
}

/// Parse a name following the `<digits><sep><name>` convention.
///
/// - `"2-API"` → number=Some(2), name="API"
/// - `"01 - Intro"` → number=Some(1), name="Intro"
/// - `"api"` → number=None, name="api"
/// - `"2024"` → number=None, name="2024"
pub fn parse_entry_name(name: &str) -> ParsedName {
    let unprefixed = || ParsedName {
        number: None,
        name: name.to_string(),
    };

    let digits_end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(name.len());
    if digits_end == 0 {
        return unprefixed();
    }
    let Ok(number) = name[..digits_end].parse::<u32>() else {
        return unprefixed();
    };

    let rest = name[digits_end..].trim_start();
    let without_sep = rest.trim_start_matches(is_separator);
    if without_sep.len() == rest.len() {
        // Digits followed by something that isn't a separator ("3d-models").
        return unprefixed();
    }
    let suffix = without_sep.trim_start();
    match suffix.chars().next() {
        Some(c) if !is_separator(c) => ParsedName {
            number: Some(number),
            name: suffix.to_string(),
        },
        _ => unprefixed(),
    }
}

/// Shortcut for [`parse_entry_name`] when only the label matters.
pub fn strip_number_prefix(name: &str) -> String {
    parse_entry_name(name).name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_prefix() {
        let p = parse_entry_name("2-API");
        assert_eq!(p.number, Some(2));
        assert_eq!(p.name, "API");
    }

    #[test]
    fn zero_padded_prefix() {
        let p = parse_entry_name("010-Landscapes");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.name, "Landscapes");
    }

    #[test]
    fn underscore_and_dot_prefixes() {
        assert_eq!(strip_number_prefix("10_reference"), "reference");
        assert_eq!(strip_number_prefix("3. Guides"), "Guides");
    }

    #[test]
    fn spaced_separator() {
        let p = parse_entry_name("01 - Intro");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "Intro");
    }

    #[test]
    fn inner_dashes_are_kept() {
        assert_eq!(strip_number_prefix("0-getting-started"), "getting-started");
    }

    #[test]
    fn unprefixed_name_unchanged() {
        let p = parse_entry_name("api");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "api");
    }

    #[test]
    fn number_only_unchanged() {
        let p = parse_entry_name("2024");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "2024");
    }

    #[test]
    fn trailing_separator_only_unchanged() {
        assert_eq!(strip_number_prefix("1-"), "1-");
        assert_eq!(strip_number_prefix("42-_"), "42-_");
    }

    #[test]
    fn digits_glued_to_word_unchanged() {
        assert_eq!(strip_number_prefix("3d-models"), "3d-models");
    }

    #[test]
    fn huge_number_unchanged() {
        assert_eq!(
            strip_number_prefix("99999999999-Overflow"),
            "99999999999-Overflow"
        );
    }
}
