//! Regex-based scrubber.

use regex::Regex;

use super::Sanitizer;

/// Sanitizer that applies a series of regex find-and-replace rules.
///
/// Rules are applied in order; each rule operates on the output of the
/// previous one. Use an inline `(?i)` flag for case-insensitive rules.
///
/// # Example
///
/// ```
/// use xss_guard::{RegexSanitizer, Sanitizer};
///
/// let sanitizer = RegexSanitizer::new(vec![
///     (r"(?i)style\s*=\s*'[^']*'", ""),
/// ]);
/// assert_eq!(sanitizer.sanitize("<b STYLE='x'>"), "<b >");
/// ```
#[derive(Clone, Debug)]
pub struct RegexSanitizer {
    rules: Vec<(Regex, String)>,
}

impl RegexSanitizer {
    /// Create a new `RegexSanitizer` from a list of `(pattern, replacement)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if any regex pattern is invalid. Use [`try_new`](Self::try_new)
    /// for a fallible alternative.
    pub fn new(rules: Vec<(&str, &str)>) -> Self {
        Self::try_new(rules).expect("invalid regex pattern")
    }

    /// Fallible constructor that returns a [`regex::Error`] for invalid patterns.
    pub fn try_new(rules: Vec<(&str, &str)>) -> Result<Self, regex::Error> {
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, replacement.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Build a rule set that deletes every match of each pattern.
    pub fn removing<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|pattern| Ok((Regex::new(pattern.as_ref())?, String::new())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Returns `true` if any rule would match `input`.
    pub fn is_match(&self, input: &str) -> bool {
        self.rules.iter().any(|(re, _)| re.is_match(input))
    }
}

impl Sanitizer for RegexSanitizer {
    fn sanitize(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, replacement.as_str()).into_owned()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_inline_style_attributes() {
        let sanitizer = RegexSanitizer::new(vec![(r#"(?i)\s*style\s*=\s*"[^"]*""#, "")]);
        let html = r#"<p STYLE="background:url(x)">a</p><p style="color:red">b</p>"#;
        assert_eq!(sanitizer.sanitize(html), "<p>a</p><p>b</p>");
    }

    #[test]
    fn multiple_rules_applied_in_order() {
        let sanitizer = RegexSanitizer::new(vec![
            (r"(?i)<iframe", "[FRAME]"),
            (r"\[FRAME\]", "&lt;iframe"),
        ]);
        let result = sanitizer.sanitize("<IFRAME src=x>");
        assert_eq!(result, "&lt;iframe src=x>");
    }

    #[test]
    fn removing_deletes_every_match() {
        let sanitizer = RegexSanitizer::removing([r"expression\(", r"-moz-binding"]).unwrap();
        let css = "width: expression(alert(1)); -moz-binding: url(x)";
        assert_eq!(sanitizer.sanitize(css), "width: alert(1)); : url(x)");
    }

    #[test]
    fn is_match_reports_any_rule() {
        let sanitizer = RegexSanitizer::new(vec![(r"(?i)srcdoc", "")]);
        assert!(sanitizer.is_match("<iframe SRCDOC=x>"));
        assert!(!sanitizer.is_match("<img src=x>"));
    }

    #[test]
    fn no_rules_returns_original() {
        let sanitizer = RegexSanitizer::new(vec![]);
        let html = "<p>unchanged</p>";
        assert_eq!(sanitizer.sanitize(html), html);
    }

    #[test]
    fn try_new_invalid_pattern() {
        let result = RegexSanitizer::try_new(vec![("[invalid", "x")]);
        assert!(result.is_err());
    }

    #[test]
    fn try_new_valid_pattern() {
        let sanitizer = RegexSanitizer::try_new(vec![(r"(?i)vbscript:", "")]).unwrap();
        assert_eq!(sanitizer.sanitize("VBScript:msgbox"), "msgbox");
    }
}
