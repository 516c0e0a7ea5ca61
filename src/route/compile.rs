use super::{Requirement, DEFAULT_PARAM_PATTERN};
use crate::error::ConfigurationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// `{identifier}` placeholder inside a path template
#[allow(clippy::expect_used)]
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder regex should be valid"));

/// Compiled form of a path template
#[derive(Debug)]
pub(super) struct CompiledPath {
    pub regex: Regex,
    pub placeholders: Vec<Arc<str>>,
}

/// Capture group name for the placeholder at `index`.
///
/// Groups are named by position rather than by placeholder so that any
/// identifier (including ones starting with a digit) is accepted.
pub(super) fn slot_name(index: usize) -> String {
    format!("p{index}")
}

/// Placeholder names in template order (duplicates kept)
pub(super) fn placeholder_names(path: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(path)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Compile an anchored pattern of the form `^...$`, mapping failures to
/// [`ConfigurationError::InvalidPattern`].
pub(super) fn anchored(pattern: &str) -> Result<Regex, ConfigurationError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Convert a path template into a regex and its ordered placeholder names.
///
/// Transforms `/users/{id}/posts/{post}` into
/// `^/users/(?P<p0>[^/]+)/posts/(?P<p1>[^/]+)$`, substituting the wrapped
/// requirement pattern for placeholders that have one.
pub(super) fn compile_path(
    path: &str,
    requirements: &[Requirement],
) -> Result<CompiledPath, ConfigurationError> {
    let mut pattern = String::with_capacity(path.len() * 2 + 2);
    pattern.push('^');
    let mut placeholders: Vec<Arc<str>> = Vec::with_capacity(path.matches('{').count());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(path) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let name = name.as_str();
        if placeholders.iter().any(|p| p.as_ref() == name) {
            return Err(ConfigurationError::DuplicatePlaceholder {
                name: name.to_string(),
                path: path.to_string(),
            });
        }

        pattern.push_str(&regex::escape(&path[last..whole.start()]));
        let group = match requirements.iter().find(|r| r.name() == name) {
            Some(req) => req.wrapped(),
            None => DEFAULT_PARAM_PATTERN.to_string(),
        };
        pattern.push_str("(?P<");
        pattern.push_str(&slot_name(placeholders.len()));
        pattern.push('>');
        pattern.push_str(&group);
        pattern.push(')');

        placeholders.push(Arc::from(name));
        last = whole.end();
    }

    pattern.push_str(&regex::escape(&path[last..]));
    pattern.push('$');

    let regex = Regex::new(&pattern).map_err(|e| ConfigurationError::InvalidPattern {
        pattern,
        reason: e.to_string(),
    })?;

    Ok(CompiledPath {
        regex,
        placeholders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let compiled = compile_path("/", &[]).unwrap();
        assert!(compiled.regex.is_match("/"));
        assert!(!compiled.regex.is_match("/x"));
        assert!(compiled.placeholders.is_empty());
    }

    #[test]
    fn test_parameterized_path() {
        let compiled = compile_path("/items/{id}", &[]).unwrap();
        assert_eq!(compiled.regex.as_str(), r"^/items/(?P<p0>[^/]+)$");
        assert!(compiled.regex.is_match("/items/123"));
        assert!(!compiled.regex.is_match("/items/1/2"));
        assert_eq!(compiled.placeholders, vec![Arc::<str>::from("id")]);
    }

    #[test]
    fn test_requirement_substituted() {
        let reqs = [Requirement::new("id", r"\d+")];
        let compiled = compile_path("/items/{id}", &reqs).unwrap();
        assert_eq!(compiled.regex.as_str(), r"^/items/(?P<p0>(?:\d+))$");
        assert!(compiled.regex.is_match("/items/42"));
        assert!(!compiled.regex.is_match("/items/abc"));
    }

    #[test]
    fn test_requirement_alternation_stays_grouped() {
        let reqs = [Requirement::new("fmt", "json|xml")];
        let compiled = compile_path("/feed.{fmt}", &reqs).unwrap();
        assert!(compiled.regex.is_match("/feed.json"));
        assert!(compiled.regex.is_match("/feed.xml"));
        assert!(!compiled.regex.is_match("json"));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let compiled = compile_path("/v1.0/{name}", &[]).unwrap();
        assert!(compiled.regex.is_match("/v1.0/x"));
        assert!(!compiled.regex.is_match("/v1x0/x"));
    }

    #[test]
    fn test_placeholder_within_segment() {
        let compiled = compile_path("/files/{name}.{ext}", &[]).unwrap();
        let caps = compiled.regex.captures("/files/report.pdf").unwrap();
        assert_eq!(&caps["p0"], "report");
        assert_eq!(&caps["p1"], "pdf");
    }

    #[test]
    fn test_duplicate_placeholder_rejected() {
        let err = compile_path("/a/{id}/b/{id}", &[]).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicatePlaceholder { .. }));
    }

    #[test]
    fn test_placeholder_names() {
        assert_eq!(
            placeholder_names("hello/{name}/{city}/{phone}/world"),
            vec!["name", "city", "phone"]
        );
        assert!(placeholder_names("/static/path").is_empty());
    }
}
