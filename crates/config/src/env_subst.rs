/// Replace `${ENV_VAR}` placeholders in raw config text.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

/// Same as [`substitute_env`] with a caller-provided lookup.
pub fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' || chars.peek() != Some(&'{') {
            result.push(ch);
            continue;
        }
        chars.next(); // consume '{'

        let mut var_name = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            var_name.push(c);
        }

        match (closed, lookup(&var_name)) {
            (true, Some(val)) if !var_name.is_empty() => result.push_str(&val),
            (true, _) => {
                result.push_str("${");
                result.push_str(&var_name);
                result.push('}');
            },
            // Unterminated placeholder: emit literally.
            (false, _) => {
                result.push_str("${");
                result.push_str(&var_name);
            },
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        (name == "GH_BASE").then(|| "http://localhost:9000".to_string())
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_with("base_url = \"${GH_BASE}\"", lookup),
            "base_url = \"http://localhost:9000\""
        );
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_with("${PLUGIN_DOWNLOADER_NONEXISTENT}", lookup),
            "${PLUGIN_DOWNLOADER_NONEXISTENT}"
        );
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(substitute_with("a ${GH_BASE", lookup), "a ${GH_BASE");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain $text"), "plain $text");
    }

    #[test]
    fn reads_process_environment() {
        let expected = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
        if !expected.is_empty() {
            assert_eq!(substitute_env("${CARGO_MANIFEST_DIR}"), expected);
        }
    }
}
