//! Route pattern compilation and matching.
//!
//! # Token Grammar
//! | Token      | Matches                                   |
//! |------------|-------------------------------------------|
//! | `(:num)`   | one or more digits                        |
//! | `(:any)`   | one or more of `a-z A-Z 0-9 . - _ % =`    |
//! | `(:all)`   | anything, possibly empty                  |
//! | `/(:num?)` | optional `/` + digits                     |
//! | `/(:any?)` | optional `/` + any-charset segment        |
//! | `/(:all?)` | optional `/` + anything                   |
//!
//! # Design Decisions
//! - Each token is one capture group; capture order is the parameter order
//! - Matchers are anchored on both ends (whole-path match)
//! - Text between tokens is escaped, so it only ever matches literally
//! - Token-free patterns never touch the regex engine

use regex::Regex;
use thiserror::Error;

use crate::context::normalize_path;

const SEGMENT: &str = r"[a-zA-Z0-9.\-_%=]+";

/// Errors raised while compiling a route pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The expanded expression was rejected by the regex engine.
    #[error("invalid route pattern `{pattern}`: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Num,
    Any,
    All,
    OptionalNum,
    OptionalAny,
    OptionalAll,
}

// Optional forms come first so `/(:num?)` is never read as `/` + `(:num)`.
const TOKENS: [(&str, Token); 6] = [
    ("/(:num?)", Token::OptionalNum),
    ("/(:any?)", Token::OptionalAny),
    ("/(:all?)", Token::OptionalAll),
    ("(:num)", Token::Num),
    ("(:any)", Token::Any),
    ("(:all)", Token::All),
];

impl Token {
    fn expand(self, expression: &mut String) {
        match self {
            Token::Num => expression.push_str("([0-9]+)"),
            Token::Any => {
                expression.push('(');
                expression.push_str(SEGMENT);
                expression.push(')');
            }
            Token::All => expression.push_str("(.*)"),
            Token::OptionalNum => expression.push_str("(?:/([0-9]+))?"),
            Token::OptionalAny => {
                expression.push_str("(?:/(");
                expression.push_str(SEGMENT);
                expression.push_str("))?");
            }
            Token::OptionalAll => expression.push_str("(?:/(.*))?"),
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Literal,
    Compiled { regex: Regex, groups: usize },
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    /// Normalize and compile a route pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let source = normalize_path(pattern);

        let mut expression = String::from("^");
        let mut literal = String::new();
        let mut groups = 0;
        let mut rest = source.as_str();

        while !rest.is_empty() {
            if let Some((text, token)) = TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
                expression.push_str(&regex::escape(&literal));
                literal.clear();
                token.expand(&mut expression);
                groups += 1;
                rest = &rest[text.len()..];
                continue;
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                literal.push(ch);
            }
            rest = chars.as_str();
        }

        if groups == 0 {
            return Ok(Self {
                source,
                matcher: Matcher::Literal,
            });
        }

        expression.push_str(&regex::escape(&literal));
        expression.push('$');

        let regex = Regex::new(&expression).map_err(|source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source,
            matcher: Matcher::Compiled { regex, groups },
        })
    }

    /// The normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the pattern contains no placeholder tokens.
    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Matcher::Literal)
    }

    /// Number of placeholder tokens (capture groups).
    pub fn group_count(&self) -> usize {
        match &self.matcher {
            Matcher::Literal => 0,
            Matcher::Compiled { groups, .. } => *groups,
        }
    }

    /// Match a normalized URI, returning the captured parameters.
    ///
    /// Parameters run up to the last group that participated in the match. Earlier groups that
    /// did not participate are returned as empty strings; trailing ones are dropped.
    pub fn captures(&self, uri: &str) -> Option<Vec<String>> {
        if self.source == uri {
            return Some(Vec::new());
        }

        let Matcher::Compiled { regex, groups } = &self.matcher else {
            return None;
        };

        let caps = regex.captures(uri)?;
        let last = (1..=*groups)
            .rev()
            .find(|&i| caps.get(i).is_some())
            .unwrap_or(0);

        Some(
            (1..=last)
                .map(|i| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pattern: &str, uri: &str) -> Option<Vec<String>> {
        Pattern::compile(pattern).unwrap().captures(uri)
    }

    #[test]
    fn test_literal_pattern() {
        let pattern = Pattern::compile("/about/team/").unwrap();
        assert!(pattern.is_literal());
        assert_eq!(pattern.as_str(), "about/team");
        assert_eq!(pattern.captures("about/team"), Some(vec![]));
        assert_eq!(pattern.captures("about/team/x"), None);
        assert_eq!(pattern.captures("about"), None);
    }

    #[test]
    fn test_root_pattern() {
        assert_eq!(params("/", "/"), Some(vec![]));
        assert_eq!(params("", "/"), Some(vec![]));
        assert_eq!(params("/", "home"), None);
    }

    #[test]
    fn test_num_token() {
        assert_eq!(params("/users/(:num)", "users/42"), Some(vec!["42".into()]));
        assert_eq!(params("/users/(:num)", "users/abc"), None);
        assert_eq!(params("/users/(:num)", "users/"), None);
        assert_eq!(params("/users/(:num)", "users/42/edit"), None);
    }

    #[test]
    fn test_any_token_charset() {
        assert_eq!(
            params("files/(:any)", "files/report-2024_v1.0%20=x"),
            Some(vec!["report-2024_v1.0%20=x".into()])
        );
        assert_eq!(params("files/(:any)", "files/a/b"), None);
        assert_eq!(params("files/(:any)", "files/a+b"), None);
    }

    #[test]
    fn test_all_token() {
        assert_eq!(params("docs/(:all)", "docs/a/b/c"), Some(vec!["a/b/c".into()]));
        assert_eq!(params("docs/(:all)", "docs/"), Some(vec!["".into()]));
    }

    #[test]
    fn test_optional_tokens() {
        assert_eq!(params("/users/(:num?)", "users"), Some(vec![]));
        assert_eq!(params("/users/(:num?)", "users/7"), Some(vec!["7".into()]));
        assert_eq!(params("/users/(:num?)", "users/x"), None);
        assert_eq!(params("blog/(:any?)", "blog/hello"), Some(vec!["hello".into()]));
        assert_eq!(params("wiki/(:all?)", "wiki/a/b"), Some(vec!["a/b".into()]));
        assert_eq!(params("wiki/(:all?)", "wiki"), Some(vec![]));
    }

    #[test]
    fn test_parameter_count_follows_participating_groups() {
        let pattern = Pattern::compile("a/(:any?)/(:any?)/(:any?)").unwrap();
        assert_eq!(pattern.group_count(), 3);
        assert_eq!(pattern.captures("a"), Some(vec![]));
        assert_eq!(pattern.captures("a/x"), Some(vec!["x".into()]));
        assert_eq!(pattern.captures("a/x/y"), Some(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn test_skipped_group_before_match_is_empty() {
        // The optional numeric group cannot take `x`, so the next group does
        assert_eq!(
            params("a/(:num?)/(:any?)", "a/x"),
            Some(vec!["".into(), "x".into()])
        );
    }

    #[test]
    fn test_literal_text_is_escaped() {
        assert_eq!(params("v1.0/(:num)", "v1.0/3"), Some(vec!["3".into()]));
        assert_eq!(params("v1.0/(:num)", "v1x0/3"), None);
        // Token-free patterns with metacharacters only match themselves
        assert_eq!(params("a.b", "a.b"), Some(vec![]));
        assert_eq!(params("a.b", "axb"), None);
    }

    #[test]
    fn test_literal_fast_path_precedes_tokens() {
        assert_eq!(params("users/(:num)", "users/(:num)"), Some(vec![]));
    }

    #[test]
    fn test_multiple_required_tokens() {
        assert_eq!(
            params("(:any)/(:num)/(:all)", "posts/12/comments/3"),
            Some(vec!["posts".into(), "12".into(), "comments/3".into()])
        );
    }
}
