//! File system utilities.

/// Make a team or opponent name safe to use as one path component.
///
/// Path separators become `_` and leading dots are dropped, so a name can
/// never step outside its parent directory. Everything else is kept as is.
pub fn path_segment(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    let cleaned = replaced.trim_start_matches('.');
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_ordinary_names() {
        assert_eq!(path_segment("North Carolina"), "North Carolina");
        assert_eq!(path_segment("St. John's (NY)"), "St. John's (NY)");
    }

    #[test]
    fn test_neutralizes_traversal() {
        assert_eq!(path_segment("../etc"), "_etc");
        assert_eq!(path_segment("a/b\\c"), "a_b_c");
        assert_eq!(path_segment(".."), "_");
        assert_eq!(path_segment(""), "_");
    }
}
