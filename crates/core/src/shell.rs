//! Shell-safe quoting for rendering delegated command lines.
//!
//! The engine is always spawned with an argument vector; these helpers exist
//! as a compatibility shim for surfaces that need a single command string
//! (log lines, copy-pasteable diagnostics, tools that only accept one).

/// Characters that never need quoting in a POSIX shell word.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | ':' | '=' | '@' | '-')
}

/// Quote a single argument for a POSIX shell.
///
/// Arguments consisting solely of safe characters pass through unmodified.
/// Everything else (including the empty string) is wrapped in single quotes,
/// with embedded single quotes escaped as `'\''`.
#[must_use]
pub fn quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_safe) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

/// Join a program and its arguments into one shell-safe command line.
#[must_use]
pub fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(quote)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_argument_passes_through() {
        assert_eq!(quote("foo"), "foo");
        assert_eq!(quote("--processors=8"), "--processors=8");
        assert_eq!(quote("a/b.c:d@e-f_g"), "a/b.c:d@e-f_g");
    }

    #[test]
    fn test_empty_argument_is_quoted() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_whitespace_is_quoted() {
        assert_eq!(quote("a b"), "'a b'");
        assert_eq!(quote("a\tb"), "'a\tb'");
    }

    #[test]
    fn test_embedded_single_quote_is_escaped() {
        assert_eq!(quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_shell_metacharacters_are_quoted() {
        assert_eq!(quote("$(rm -rf /)"), "'$(rm -rf /)'");
        assert_eq!(quote("a;b"), "'a;b'");
        assert_eq!(quote("a|b"), "'a|b'");
        assert_eq!(quote("*"), "'*'");
    }

    #[test]
    fn test_join() {
        assert_eq!(
            join(["/opt/relay/relay-engine", "run", "a b"]),
            "/opt/relay/relay-engine run 'a b'"
        );
        assert_eq!(join(std::iter::empty::<&str>()), "");
    }
}
