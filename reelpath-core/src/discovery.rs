//! Player domain discovery.
//!
//! The player front-end moves between domains without notice and publishes
//! the current one as a JavaScript assignment on its landing page. Extraction
//! tries an ordered list of strategies, then the configured fallback domain.

use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector as CssSelector};
use tracing::{debug, warn};

use crate::errors::DiscoveryError;

/// Identifier the landing page assigns the player domain to.
pub const DOMAIN_MARKER: &str = "AwsIndStreamDomain";

/// A pure extraction strategy over raw page source.
pub type Strategy = fn(&str) -> Option<String>;

/// Extraction strategies in the order they are tried.
pub const STRATEGIES: [(&str, Strategy); 2] = [
    ("inline-assignment", inline_assignment),
    ("script-scan", script_scan),
];

/// Extracts the player domain from landing page HTML.
#[derive(Debug, Clone, Default)]
pub struct DomainDiscovery {
    fallback: Option<String>,
}

impl DomainDiscovery {
    /// Creates a discovery with an optional static fallback domain.
    ///
    /// A blank fallback counts as no fallback.
    pub fn new(fallback: Option<String>) -> Self {
        Self {
            fallback: fallback.filter(|domain| !domain.trim().is_empty()),
        }
    }

    /// Runs every strategy against `html`, then the fallback.
    ///
    /// # Errors
    /// - `DiscoveryError::DomainNotFound` - No strategy matched and no fallback is set
    pub fn discover(&self, html: &str) -> Result<String, DiscoveryError> {
        for (name, strategy) in STRATEGIES {
            if let Some(domain) = strategy(html) {
                debug!(strategy = name, domain = %domain, "Player domain discovered");
                return Ok(strip_trailing_separator(domain));
            }
        }

        warn!("Player domain not present in page");
        self.fallback_domain()
    }

    /// Returns the configured fallback domain.
    ///
    /// # Errors
    /// - `DiscoveryError::DomainNotFound` - No fallback is configured
    pub fn fallback_domain(&self) -> Result<String, DiscoveryError> {
        match &self.fallback {
            Some(domain) => {
                debug!(domain = %domain, "Using fallback player domain");
                Ok(strip_trailing_separator(domain.clone()))
            }
            None => Err(DiscoveryError::DomainNotFound),
        }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// `const <marker> = '<url>'` anywhere in the page text.
pub fn inline_assignment(html: &str) -> Option<String> {
    let pattern = assignment_pattern(r"const\s+")?;
    capture_url(&pattern, html)
}

/// `<marker> = '<url>'` inside any `<script>` element, first match wins.
///
/// Does not require a declaration keyword, so it also catches `var`, `let`
/// and property assignments the inline pattern rejects.
pub fn script_scan(html: &str) -> Option<String> {
    let pattern = assignment_pattern("")?;
    let scripts = CssSelector::parse("script").ok()?;
    let document = Html::parse_document(html);

    document
        .select(&scripts)
        .map(|script| script.text().collect::<String>())
        .find_map(|source| capture_url(&pattern, &source))
}

fn assignment_pattern(prefix: &str) -> Option<Regex> {
    let source = format!(
        r#"{prefix}{marker}\s*=\s*['"]([^'"]+)['"]"#,
        marker = regex::escape(DOMAIN_MARKER)
    );
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .ok()
}

fn capture_url(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|url| url.as_str().to_string())
}

fn strip_trailing_separator(domain: String) -> String {
    match domain.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => domain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT_PAGE: &str = r#"<html><head>
        <script>const AwsIndStreamDomain = 'https://vista335lopq.com/';</script>
        </head><body></body></html>"#;

    const SCRIPT_ONLY_PAGE: &str = r#"<html><head>
        <script src="/static/app.js"></script>
        <script>
            window.config = {};
            var   AwsIndStreamDomain
                =   "https://player.example.net/" ;
        </script>
        <script>window.AwsIndStreamDomain = 'https://second.example.net';</script>
        </head></html>"#;

    #[test]
    fn test_inline_assignment_strips_trailing_slash() {
        let discovery = DomainDiscovery::default();
        assert_eq!(
            discovery.discover(FLAT_PAGE).unwrap(),
            "https://vista335lopq.com"
        );
    }

    #[test]
    fn test_only_one_trailing_slash_is_stripped() {
        let page = r#"const AwsIndStreamDomain = "https://a.example//";"#;
        assert_eq!(
            DomainDiscovery::default().discover(page).unwrap(),
            "https://a.example/"
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let page = "CONST awsindstreamdomain='https://upper.example'";
        assert_eq!(inline_assignment(page).as_deref(), Some("https://upper.example"));
    }

    #[test]
    fn test_script_scan_catches_what_inline_rejects() {
        assert_eq!(inline_assignment(SCRIPT_ONLY_PAGE), None);
        assert_eq!(
            script_scan(SCRIPT_ONLY_PAGE).as_deref(),
            Some("https://player.example.net/")
        );
        assert_eq!(
            DomainDiscovery::default().discover(SCRIPT_ONLY_PAGE).unwrap(),
            "https://player.example.net"
        );
    }

    #[test]
    fn test_script_scan_ignores_text_outside_scripts() {
        let page = "<html><body><p>AwsIndStreamDomain = 'https://body.example'</p></body></html>";
        assert_eq!(script_scan(page), None);
    }

    #[test]
    fn test_fallback_domain_used_when_page_has_no_marker() {
        let discovery = DomainDiscovery::new(Some("https://fallback.example/".to_string()));
        assert_eq!(
            discovery.discover("<html></html>").unwrap(),
            "https://fallback.example"
        );
    }

    #[test]
    fn test_page_match_beats_fallback() {
        let discovery = DomainDiscovery::new(Some("https://fallback.example".to_string()));
        assert_eq!(
            discovery.discover(FLAT_PAGE).unwrap(),
            "https://vista335lopq.com"
        );
    }

    #[test]
    fn test_exhausted_strategies_fail() {
        let discovery = DomainDiscovery::new(Some("   ".to_string()));
        assert!(!discovery.has_fallback());
        assert_eq!(
            discovery.discover("<html><script>var x = 1;</script></html>"),
            Err(DiscoveryError::DomainNotFound)
        );
    }

    #[test]
    fn test_discovery_is_repeatable() {
        let discovery = DomainDiscovery::default();
        let first = discovery.discover(FLAT_PAGE).unwrap();
        let second = discovery.discover(FLAT_PAGE).unwrap();
        assert_eq!(first, second);
    }
}
