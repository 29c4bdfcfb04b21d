//! Footer: contact call-to-action, social links and copyright line.

use super::{Markup, escape};
use crate::data::{Profile, Social};
use std::borrow::Cow;

/// Platform label that marks the primary contact entry (exact match).
const EMAIL_PLATFORM: &str = "Email";
/// Call-to-action label when no email entry exists.
const FALLBACK_LABEL: &str = "Email Me";
/// Non-navigating link used with [`FALLBACK_LABEL`].
const FALLBACK_HREF: &str = "#";

/// Primary contact link as `(href, label)`.
///
/// Uses the first social whose platform is exactly `Email`, even when its URL
/// is empty. The label is the URL with its first `mailto:` removed. An empty
/// href falls back to `#` and an empty label to `Email Me`.
pub fn primary_contact(socials: &[Social]) -> (&str, Cow<'_, str>) {
    let url = socials
        .iter()
        .find(|s| s.platform == EMAIL_PLATFORM)
        .map_or("", |s| s.url.as_str());

    let href = if url.is_empty() { FALLBACK_HREF } else { url };
    let label = if url.contains("mailto:") {
        Cow::Owned(url.replacen("mailto:", "", 1))
    } else {
        Cow::Borrowed(url)
    };
    let label = if label.is_empty() {
        Cow::Borrowed(FALLBACK_LABEL)
    } else {
        label
    };

    (href, label)
}

pub fn render_footer(
    profile: Option<&Profile>,
    socials: &[Social],
    year: i32,
    credit: Option<&str>,
) -> Option<Markup> {
    let profile = profile?;
    let (href, label) = primary_contact(socials);

    let links: String = socials
        .iter()
        .map(|social| {
            let platform = escape(&social.platform);
            format!(
                r#"<a href="{}" class="social" target="_blank" rel="noopener" aria-label="{platform}"><i data-lucide="{}" class="icon"></i><span>{platform}</span></a>"#,
                escape(&social.url),
                escape(&social.icon),
            )
        })
        .collect();

    let credit = credit
        .map(|c| format!("<span>{}</span>", escape(c)))
        .unwrap_or_default();

    Some(Markup::new(format!(
        r#"<div class="footer-top"><div><h2 class="footer-title">Get in touch</h2><a href="{}" class="contact">{}</a></div><div class="socials">{links}</div></div><div class="footer-bottom"><span>&copy; {year} {}</span>{credit}</div>"#,
        escape(href),
        escape(&label),
        escape(&profile.name),
    )))
}
