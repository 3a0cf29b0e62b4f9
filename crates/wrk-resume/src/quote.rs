/// Quote `s` as a single POSIX shell word.
///
/// The result always evaluates back to exactly `s`: inside single quotes no
/// character is special except `'` itself, which is written as `'\''`.
pub fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str(r"'\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Render `s` as a shell word, leaving it bare when every character is in
/// `[A-Za-z0-9_.:/@%+=-]` and single-quoting it otherwise.
pub fn shell_word(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_.:/@%+=-".contains(c));
    if bare {
        s.to_string()
    } else {
        shell_quote(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_word_left_bare() {
        assert_eq!(shell_word("sess-12345678"), "sess-12345678");
        assert_eq!(shell_word("ses_01HX:a/b@c%d+e=f.g"), "ses_01HX:a/b@c%d+e=f.g");
    }

    #[test]
    fn unsafe_word_quoted() {
        assert_eq!(shell_word("sess 1234 5678"), "'sess 1234 5678'");
        assert_eq!(shell_word("a;rm -rf ~"), "'a;rm -rf ~'");
        assert_eq!(shell_word("$(id)xxxx"), "'$(id)xxxx'");
        assert_eq!(shell_word(""), "''");
        assert_eq!(shell_word("ünïcödé"), "'ünïcödé'");
    }

    #[test]
    fn empty_string() {
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn plain_text() {
        assert_eq!(shell_quote("hello world"), "'hello world'");
    }

    #[test]
    fn single_quote_is_closed_escaped_reopened() {
        assert_eq!(shell_quote("it's a test"), r"'it'\''s a test'");
        assert_eq!(shell_quote("'"), r"''\'''");
    }

    #[test]
    fn metacharacters_pass_through() {
        assert_eq!(
            shell_quote("`rm -rf /`; $(whoami) && echo $HOME"),
            "'`rm -rf /`; $(whoami) && echo $HOME'"
        );
    }

    #[test]
    fn newlines_pass_through() {
        assert_eq!(shell_quote("line1\nline2"), "'line1\nline2'");
    }

    /// Round-trip through a real shell: `printf %s <quoted>` must print the input.
    #[cfg(unix)]
    #[test]
    fn shell_evaluates_back_to_input() {
        let sh = std::path::Path::new("/bin/sh");
        if !sh.exists() {
            return;
        }
        let inputs = [
            "",
            "it's a test",
            "`id`; $(echo pwned) | cat > /dev/null & $HOME",
            "multi\nline\n\n  text",
            "'''",
            "\\n \\' \" \"'\"",
            "ünïcödé ✓",
        ];
        for input in inputs {
            let script = format!("printf %s {}", shell_quote(input));
            let out = std::process::Command::new(sh)
                .arg("-c")
                .arg(&script)
                .output()
                .unwrap();
            assert!(out.status.success(), "shell failed for {input:?}");
            assert_eq!(String::from_utf8(out.stdout).unwrap(), input);
        }
    }
}
