/// Lines starting with this (ignoring case and indentation) are dropped
/// when co-author stripping is enabled.
pub const COAUTHOR_MARKER: &str = "co-authored-by:";

/// Environment flag enabling [`strip_coauthors`]
pub const STRIP_COAUTHORS_VAR: &str = "ZAGI_STRIP_COAUTHORS";

/// Remove co-author trailers from a commit message.
///
/// All other lines keep their order and blank lines survive. A message
/// without trailers comes back untouched.
pub fn strip_coauthors(message: &str) -> String {
    let is_trailer = |line: &str| {
        line.trim_start()
            .to_lowercase()
            .starts_with(COAUTHOR_MARKER)
    };

    if !message.lines().any(is_trailer) {
        return message.to_string();
    }

    let kept: Vec<&str> = message.lines().filter(|line| !is_trailer(line)).collect();
    kept.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailers() {
        let message = "Fix login\n\nHandle expired tokens.\n\nCo-Authored-By: Bot <bot@example.com>\n";
        assert_eq!(strip_coauthors(message), "Fix login\n\nHandle expired tokens.");
    }

    #[test]
    fn test_strips_case_insensitive_and_indented() {
        let message = "Subject\n  co-authored-by: a <a@x>\nBody line\n\tCO-AUTHORED-BY: b <b@x>\n\nTail\n";
        assert_eq!(strip_coauthors(message), "Subject\nBody line\n\nTail");
    }

    #[test]
    fn test_untouched_without_trailers() {
        let message = "Subject\n\nBody\n\n";
        assert_eq!(strip_coauthors(message), message);
    }

    #[test]
    fn test_marker_must_start_the_line() {
        let message = "Mention co-authored-by: in prose";
        assert_eq!(strip_coauthors(message), message);
    }

    #[test]
    fn test_only_trailers_leaves_empty_message() {
        assert_eq!(strip_coauthors("Co-authored-by: x <x@y>\n"), "");
    }
}
