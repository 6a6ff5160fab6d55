/// Splits a command line into tokens.
///
/// Tokens are separated by spaces. A `"` toggles quoted mode, in which spaces
/// are kept inside the current token; the quote characters themselves are
/// dropped. An unbalanced quote keeps quoted mode on until the end of the
/// line. There is no escape character.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_argument() {
        assert_eq!(tokenize("echo \"a b\" c"), vec!["echo", "a b", "c"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\"\" \"\"").is_empty());
    }

    #[test]
    fn test_repeated_spaces_collapse() {
        assert_eq!(tokenize("  ls    -la   /tmp "), vec!["ls", "-la", "/tmp"]);
    }

    #[test]
    fn test_unbalanced_quote_runs_to_end() {
        assert_eq!(tokenize("write f \"hello  world"), vec!["write", "f", "hello  world"]);
    }

    #[test]
    fn test_quotes_inside_word_join() {
        assert_eq!(tokenize("ab\"c d\"e"), vec!["abc de"]);
    }

    #[test]
    fn test_tab_is_not_a_separator() {
        assert_eq!(tokenize("a\tb c"), vec!["a\tb", "c"]);
    }

    #[test]
    fn test_no_empty_tokens_or_quotes() {
        let inputs = [
            "\"",
            "\" \"",
            "a \"\" b",
            "\"\"\"x\"",
            " \" a \" \"b",
            "echo \"one\"two\" three\"",
        ];
        for input in inputs {
            for token in tokenize(input) {
                assert!(!token.is_empty(), "empty token from {input:?}");
                assert!(!token.contains('"'), "quote in token from {input:?}");
            }
        }
    }
}
