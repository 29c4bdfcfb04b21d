//! HTML minification.
//!
//! Thin wrapper over `minify_html` with automatic enable/disable based on
//! `SiteConfig`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered page if `[build].minify` is set.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.build.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using `minify_html` crate.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    #[test]
    fn test_minify_html_basic() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let result = minify_html(html, &config_with_minify(true));
        let result_str = String::from_utf8_lossy(&result);

        assert!(!result_str.contains("\n  "));
        assert!(result_str.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_minify_html_keeps_section_ids() {
        let html = br#"<section id="projects" class="fade-in-section">  <h2>Projects</h2>  </section>"#;
        let result = minify_html(html, &config_with_minify(true));
        let result_str = String::from_utf8_lossy(&result);

        assert!(result_str.contains("projects"));
        assert!(result_str.contains("fade-in-section"));
        assert!(result_str.contains("<h2>Projects</h2>"));
    }

    #[test]
    fn test_minify_html_disabled() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify_html(html, &config_with_minify(false));

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);
    }
}
