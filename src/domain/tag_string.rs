// src/domain/tag_string.rs
//! Textual encoding of a tag list, e.g. `"rust,Databases,cli"`.
//!
//! Parsing is normalizing and lossy: surrounding whitespace and empty entries
//! are dropped and the names are ordered case-insensitively. Building joins
//! names as given. `build_tag_string(&parse_tag_string(s))` therefore does not
//! reproduce `s` in general. Neither direction escapes the delimiter.
use itertools::Itertools;

pub const DEFAULT_TAG_DELIMITER: char = ',';

/// Parse a tag string using the default `,` delimiter.
pub fn parse_tag_string<S: AsRef<str>>(tag_string: S) -> Vec<String> {
    parse_tag_string_with(tag_string, DEFAULT_TAG_DELIMITER)
}

/// Parse a tag string into names sorted case-insensitively.
///
/// The sort is stable and keyed on the lowercase form, so names that only
/// differ in case keep their input order. Duplicates are kept.
pub fn parse_tag_string_with<S: AsRef<str>>(tag_string: S, delimiter: char) -> Vec<String> {
    let tag_string = tag_string.as_ref().trim();
    if tag_string.is_empty() {
        return Vec::new();
    }

    let mut names: Vec<String> = tag_string
        .split(delimiter)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect();
    names.sort_by_cached_key(|name| name.to_lowercase());
    names
}

/// Parse an optional tag string; `None` yields no names.
pub fn parse_tag_option<S: AsRef<str>>(tag_string: Option<S>) -> Vec<String> {
    tag_string.map(parse_tag_string).unwrap_or_default()
}

/// Join names with the default `,` delimiter.
pub fn build_tag_string<S: AsRef<str>>(names: &[S]) -> String {
    build_tag_string_with(names, DEFAULT_TAG_DELIMITER)
}

/// Join names with `delimiter`, keeping their order.
pub fn build_tag_string_with<S: AsRef<str>>(names: &[S], delimiter: char) -> String {
    names.iter().map(AsRef::as_ref).join(&delimiter.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("b,a,C", vec!["a", "b", "C"])]
    #[case("", vec![])]
    #[case("   ", vec![])]
    #[case(" a , ,b ", vec!["a", "b"])]
    #[case(",,rust,,", vec!["rust"])]
    #[case("zeta,Alpha", vec!["Alpha", "zeta"])]
    #[case("single", vec!["single"])]
    fn given_tag_string_when_parse_then_returns_sorted_names(
        #[case] input: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(parse_tag_string(input), expected);
    }

    #[test]
    fn given_names_differing_in_case_when_parse_then_keeps_input_order() {
        assert_eq!(parse_tag_string("b,B,a"), vec!["a", "b", "B"]);
        assert_eq!(parse_tag_string("B,b,a"), vec!["a", "B", "b"]);
    }

    #[test]
    fn given_duplicate_names_when_parse_then_keeps_duplicates() {
        assert_eq!(parse_tag_string("dup,x,dup"), vec!["dup", "dup", "x"]);
    }

    #[test]
    fn given_custom_delimiter_when_parse_then_splits_on_it() {
        assert_eq!(
            parse_tag_string_with("web; Rust ;api", ';'),
            vec!["api", "Rust", "web"]
        );
        // the default delimiter is not special when another one is used
        assert_eq!(parse_tag_string_with("a,b c", ' '), vec!["a,b", "c"]);
    }

    #[test]
    fn given_none_when_parse_tag_option_then_returns_empty() {
        assert!(parse_tag_option(None::<&str>).is_empty());
        assert_eq!(parse_tag_option(Some("y,x")), vec!["x", "y"]);
    }

    #[test]
    fn given_names_when_build_then_joins_without_sorting() {
        assert_eq!(build_tag_string(&["a", "b"]), "a,b");
        assert_eq!(build_tag_string(&["b", "a"]), "b,a");
        assert_eq!(build_tag_string::<&str>(&[]), "");
        assert_eq!(build_tag_string_with(&["x", "y"], '|'), "x|y");
    }

    #[test]
    fn given_unnormalized_string_when_parse_then_build_differs_from_input() {
        let input = " Zeta , alpha ";
        let rebuilt = build_tag_string(&parse_tag_string(input));
        assert_eq!(rebuilt, "alpha,Zeta");
        assert_ne!(rebuilt, input);
    }
}
