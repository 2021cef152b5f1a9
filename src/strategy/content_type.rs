//! JSON media type check.

use std::sync::LazyLock;

use regex::Regex;

// MIME types compare case-insensitively; only UTF charsets are accepted.
static JSON_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^application/json(\s*;\s*charset=utf-[0-9]+)?\s*$")
        .expect("content type pattern is valid")
});

/// Returns whether `value` names JSON, optionally with a UTF charset.
pub fn is_json(value: &str) -> bool {
    JSON_CONTENT_TYPE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json  "));
    }

    #[test]
    fn utf_charsets() {
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("application/json;charset=utf-16"));
        assert!(is_json("application/json ; charset=utf-8"));
    }

    #[test]
    fn case_insensitive() {
        assert!(is_json("APPLICATION/JSON; CHARSET=UTF-8"));
        assert!(is_json("Application/Json"));
    }

    #[test]
    fn rejects_other_types() {
        assert!(!is_json(""));
        assert!(!is_json("application/x-www-form-urlencoded"));
        assert!(!is_json("text/json"));
        assert!(!is_json("application/jsonp"));
        assert!(!is_json(" application/json"));
    }

    #[test]
    fn rejects_non_utf_charsets() {
        assert!(!is_json("application/json; charset=iso-8859-1"));
        assert!(!is_json("application/json; charset=utf-"));
        assert!(!is_json("application/json; boundary=x"));
        // Only ASCII digits name a UTF charset.
        assert!(!is_json("application/json; charset=utf-\u{0668}"));
        assert!(!is_json("application/json; charset=utf-\u{FF18}"));
    }
}
