/// Expand `${ENV_VAR}` placeholders in raw config text.
///
/// Placeholders naming unset variables are kept verbatim.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// [`substitute_env`] with an injectable lookup, so tests don't touch the
/// process environment.
pub(crate) fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            },
            // `${}` or an unterminated placeholder: emit literally.
            _ => {
                out.push_str("${");
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "SLACK_CHANNEL_ID" => Some("C0VILLAGE".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn expands_known_variable() {
        assert_eq!(
            substitute_env_with("channel_id = \"${SLACK_CHANNEL_ID}\"", lookup),
            "channel_id = \"C0VILLAGE\""
        );
    }

    #[test]
    fn keeps_unknown_variable() {
        assert_eq!(
            substitute_env_with("${VILLAGE_NOPE_XYZ}/x", lookup),
            "${VILLAGE_NOPE_XYZ}/x"
        );
    }

    #[test]
    fn expands_to_empty_value() {
        assert_eq!(substitute_env_with("a${EMPTY}b", lookup), "ab");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(substitute_env_with("x ${SLACK", lookup), "x ${SLACK");
        assert_eq!(substitute_env_with("${}", lookup), "${}");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(substitute_env("port = 3001"), "port = 3001");
    }
}
