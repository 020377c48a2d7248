//! URL sanitizer: canonicalize, then reject denied schemes.

use super::Sanitizer;
use crate::config;
use crate::error::{Result, SanitizeError};
use crate::guards;

/// Sanitizer that returns a canonical absolute URL or nothing.
///
/// Relative, malformed and deny-listed URLs all produce an empty string.
/// Use [`try_sanitize`](Self::try_sanitize) to tell those cases apart.
///
/// ```
/// use xss_guard::{Sanitizer, UrlSanitizer};
///
/// let urls = UrlSanitizer::new();
/// assert_eq!(urls.sanitize("HTTPS://Example.com/a?b=1"), "https://example.com/a?b=1");
/// assert_eq!(urls.sanitize("javascript:alert(1)"), "");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlSanitizer;

impl UrlSanitizer {
    /// Create a URL sanitizer.
    pub fn new() -> Self {
        Self
    }

    /// Canonicalize `url` and check it against the scheme deny-list.
    pub fn try_sanitize(&self, url: &str) -> Result<String> {
        let canonical = guards::try_canonicalize_url(url)?;
        if let Some(prefix) = config::denied_scheme_prefix(&canonical) {
            return Err(SanitizeError::DisallowedScheme(prefix.to_string()));
        }
        Ok(canonical)
    }
}

impl Sanitizer for UrlSanitizer {
    fn sanitize(&self, url: &str) -> String {
        self.try_sanitize(url).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Dropping URL");
            String::new()
        })
    }
}
