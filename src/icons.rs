//! Icon placeholder materialization.
//!
//! Renderers emit `<i data-lucide="name"></i>` placeholders. After each
//! container is committed, an [`IconRenderer`] turns them into glyphs:
//!
//! - [`InlineIcons`] swaps known placeholders for embedded SVG at build time.
//! - [`ScriptIcons`] leaves them alone and loads the lucide script, which
//!   replaces them in the browser.

use crate::config::IconMode;
use regex::{Captures, Regex};
use std::{borrow::Cow, sync::LazyLock};

/// Matches a placeholder and its optional class attribute.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<i data-lucide="([a-z0-9-]+)"(?: class="([^"]*)")?></i>"#).expect("valid regex")
});

/// Script that materializes placeholders in the browser.
const LUCIDE_SCRIPT: &str = r#"<script src="https://unpkg.com/lucide@latest"></script>"#;

/// Turns icon placeholders into something a browser can draw.
pub trait IconRenderer: Send + Sync {
    /// Materialize the placeholders in one committed fragment.
    fn materialize<'a>(&self, markup: &'a str) -> Cow<'a, str>;

    /// Extra `<head>` markup the renderer depends on.
    fn head(&self) -> Option<&'static str> {
        None
    }
}

pub fn icon_renderer(mode: IconMode) -> Box<dyn IconRenderer> {
    match mode {
        IconMode::Inline => Box::new(InlineIcons),
        IconMode::Script => Box::new(ScriptIcons),
    }
}

/// Icon names referenced by placeholders in `markup`, in order of appearance.
pub fn placeholder_names(markup: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

// ============================================================================
// Inline SVG
// ============================================================================

/// Embedded SVG for the icons a portfolio typically needs.
///
/// Unknown names are left as placeholders.
pub struct InlineIcons;

impl IconRenderer for InlineIcons {
    fn materialize<'a>(&self, markup: &'a str) -> Cow<'a, str> {
        PLACEHOLDER.replace_all(markup, |caps: &Captures<'_>| {
            let name = &caps[1];
            match svg_body(name) {
                Some(body) => {
                    let class = caps.get(2).map_or("", |m| m.as_str());
                    format!(
                        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="lucide lucide-{name} {class}" aria-hidden="true">{body}</svg>"#
                    )
                }
                None => caps[0].to_string(),
            }
        })
    }
}

fn svg_body(name: &str) -> Option<&'static str> {
    let body = match name {
        "arrow-up-right" => r#"<path d="M7 7h10v10"/><path d="M7 17 17 7"/>"#,
        "mail" => {
            r#"<rect width="20" height="16" x="2" y="4" rx="2"/><path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/>"#
        }
        "globe" => {
            r#"<circle cx="12" cy="12" r="10"/><path d="M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20"/><path d="M2 12h20"/>"#
        }
        "link" => {
            r#"<path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"/><path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"/>"#
        }
        "github" => {
            r#"<path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.08-1.25-.27-2.48-1-3.5.28-1.15.28-2.35 0-3.5 0 0-1 0-3 1.5-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.403 5.403 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.39.49-.68 1.05-.85 1.65-.17.6-.22 1.23-.15 1.85v4"/><path d="M9 18c-4.51 2-5-2-7-2"/>"#
        }
        "linkedin" => {
            r#"<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"/><rect width="4" height="12" x="2" y="9"/><circle cx="4" cy="4" r="2"/>"#
        }
        "twitter" => {
            r#"<path d="M22 4s-.7 2.1-2 3.4c1.6 10-9.4 17.3-18 11.6 2.2.1 4.4-.6 6-2C3 15.5.5 9.6 3 5c2.2 2.6 5.6 4.1 9 4-.9-4.2 4-6.6 7-3.8 1.1 0 3-1.2 3-1.2z"/>"#
        }
        "file-text" => {
            r#"<path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"/><path d="M14 2v4a2 2 0 0 0 2 2h4"/><path d="M10 9H8"/><path d="M16 13H8"/><path d="M16 17H8"/>"#
        }
        _ => return None,
    };
    Some(body)
}

// ============================================================================
// Browser script
// ============================================================================

/// Leaves placeholders for the lucide script loaded in `<head>`.
pub struct ScriptIcons;

impl IconRenderer for ScriptIcons {
    fn materialize<'a>(&self, markup: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(markup)
    }

    fn head(&self) -> Option<&'static str> {
        Some(LUCIDE_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_replaces_known_icon() {
        let html = r#"<a href="x"><i data-lucide="mail" class="icon"></i></a>"#;
        let out = InlineIcons.materialize(html);

        assert!(out.contains("<svg"));
        assert!(out.contains("lucide-mail icon"));
        assert!(!out.contains("data-lucide"));
        assert!(out.starts_with(r#"<a href="x">"#));
    }

    #[test]
    fn test_inline_keeps_unknown_icon() {
        let html = r#"<i data-lucide="mastodon" class="icon"></i>"#;
        assert_eq!(InlineIcons.materialize(html), html);
        assert!(svg_body("mastodon").is_none());
    }

    #[test]
    fn test_inline_without_placeholders_borrows() {
        assert!(matches!(InlineIcons.materialize("<p>hi</p>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_script_mode_is_identity_with_head() {
        let html = r#"<i data-lucide="mail"></i>"#;
        assert_eq!(ScriptIcons.materialize(html), html);
        assert!(ScriptIcons.head().unwrap().contains("lucide"));
        assert!(InlineIcons.head().is_none());
    }

    #[test]
    fn test_placeholder_names() {
        let html = r#"<i data-lucide="github" class="icon"></i><i data-lucide="arrow-up-right"></i>"#;
        assert_eq!(placeholder_names(html), vec!["github", "arrow-up-right"]);
    }

    #[test]
    fn test_icon_renderer_factory() {
        let html = r#"<i data-lucide="link"></i>"#;
        assert!(icon_renderer(IconMode::Inline).materialize(html).contains("<svg"));
        assert_eq!(icon_renderer(IconMode::Script).materialize(html), html);
    }
}
