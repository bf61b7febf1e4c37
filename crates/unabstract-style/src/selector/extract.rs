//! Class name extraction from selector paths.

use std::sync::OnceLock;

use regex::Regex;

use crate::selector::SelectorPath;
use crate::{Error, Result};

fn class_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.([\w-]+)").expect("class name pattern is valid"))
}

/// Extract the bare class name that follows the first class marker.
///
/// The path is rendered to text and the first run of word characters or
/// hyphens after a `.` is returned, so `.btn.primary` yields `btn` and
/// `.card:hover` yields `card`.
///
/// # Errors
///
/// Returns [`Error::NotAClassSelector`] when no class name follows any `.`.
pub fn extract_class_name(path: &SelectorPath) -> Result<String> {
    let text = path.to_string();
    class_name_pattern()
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::not_a_class_selector(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::PathToken;

    #[test]
    fn extracts_simple_class() {
        let path = SelectorPath::class("card");
        assert_eq!(extract_class_name(&path).unwrap(), "card");
    }

    #[test]
    fn takes_first_class_of_compound() {
        let path = SelectorPath::new(vec![
            PathToken::Name("a".into()),
            PathToken::ClassMarker,
            PathToken::Name("btn_primary".into()),
            PathToken::ClassMarker,
            PathToken::Name("active".into()),
        ]);
        assert_eq!(extract_class_name(&path).unwrap(), "btn_primary");
    }

    #[test]
    fn stops_at_pseudo_class() {
        let path = SelectorPath::new(vec![
            PathToken::ClassMarker,
            PathToken::Name("link".into()),
            PathToken::Punct(':'),
            PathToken::Name("hover".into()),
        ]);
        assert_eq!(extract_class_name(&path).unwrap(), "link");
    }

    #[test]
    fn marker_without_name_is_an_error() {
        let path = SelectorPath::new(vec![PathToken::ClassMarker, PathToken::Punct('&')]);
        let err = extract_class_name(&path).unwrap_err();
        assert!(matches!(err, Error::NotAClassSelector { ref selector } if selector == ".&"));
    }
}
