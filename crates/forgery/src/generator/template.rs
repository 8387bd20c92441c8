//! `{{ token }}` template substitution.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::GenerationError;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_RE.get_or_init(|| {
        let pattern = r"\{\{\s?(\w+|[\w\\]+->\w+?)\s?\}\}";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("template token regex failed to compile: {error}"))
    })
}

/// Replaces each `{{ name }}` token in `template` with `produce(name)`.
///
/// Tokens are produced strictly left to right and the first failure aborts
/// the whole render. Text outside tokens, including malformed tokens, is
/// copied verbatim.
pub(crate) fn render<F>(template: &str, mut produce: F) -> Result<String, GenerationError>
where
    F: FnMut(&str) -> Result<String, GenerationError>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;
    for captures in token_regex().captures_iter(template) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        rendered.push_str(template.get(last..whole.start()).unwrap_or_default());
        rendered.push_str(&produce(name.as_str())?);
        last = whole.end();
    }
    rendered.push_str(template.get(last..).unwrap_or_default());
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn echo(template: &str) -> String {
        render(template, |name| Ok(format!("<{name}>"))).expect("render succeeds")
    }

    #[rstest]
    #[case("{{a}} {{b}}", "<a> <b>")]
    #[case("{{ name }}!", "<name>!")]
    #[case("{{Acme\\Thing->make}}", "<Acme\\Thing->make>")]
    #[case("no tokens", "no tokens")]
    #[case("{{  padded  }}", "{{  padded  }}")]
    #[case("{{ broken", "{{ broken")]
    #[case("", "")]
    fn substitutes_tokens(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(echo(template), expected);
    }

    #[test]
    fn produces_tokens_left_to_right() {
        let mut seen = Vec::new();
        let rendered = render("{{x}}-{{y}}-{{x}}", |name| {
            seen.push(name.to_owned());
            Ok(seen.len().to_string())
        })
        .expect("render succeeds");
        assert_eq!(rendered, "1-2-3");
        assert_eq!(seen, ["x", "y", "x"]);
    }

    #[test]
    fn stops_at_first_failure() {
        let mut calls = 0;
        let result = render("{{ok}} {{bad}} {{never}}", |name| {
            calls += 1;
            if name == "bad" {
                Err(GenerationError::unknown_format(name))
            } else {
                Ok(String::new())
            }
        });
        assert_eq!(result, Err(GenerationError::unknown_format("bad")));
        assert_eq!(calls, 2);
    }
}
