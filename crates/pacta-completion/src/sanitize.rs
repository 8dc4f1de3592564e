//! Post-processing of the assembled completion text.
//!
//! The endpoint serializes its reply as a JSON-ish string, so the assembled
//! text can arrive wrapped in one pair of double quotes and with literal
//! `\n` escape sequences instead of newlines.

/// Strip wrapping-quote artifacts and unescape literal `\n` sequences.
///
/// Exactly one leading and one trailing `"` are removed when present;
/// quotes inside the text are untouched.
pub fn sanitize_completion(raw: &str) -> String {
    let text = raw.strip_prefix('"').unwrap_or(raw);
    let text = text.strip_suffix('"').unwrap_or(text);
    let text = text.replace("\\n", "\n");
    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_wrapping_quotes() {
        assert_eq!(sanitize_completion("\"CONTRACT\""), "CONTRACT");
    }

    #[test]
    fn test_strips_at_most_one_quote_pair() {
        assert_eq!(sanitize_completion("\"\"quoted\"\""), "\"quoted\"");
    }

    #[test]
    fn test_inner_quotes_untouched() {
        assert_eq!(
            sanitize_completion("the \"Licensee\" shall"),
            "the \"Licensee\" shall"
        );
    }

    #[test]
    fn test_unescapes_literal_newlines() {
        assert_eq!(
            sanitize_completion("\"Clause 1\\nClause 2\""),
            "Clause 1\nClause 2"
        );
    }

    #[test]
    fn test_trims_trailing_whitespace_only() {
        assert_eq!(sanitize_completion("  text  \n"), "  text");
    }
}
