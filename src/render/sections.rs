//! Content sections: hero, about, projects, publications, misc and redirects.
//!
//! Every renderer returns `None` when its slice is absent or empty, which
//! leaves the container untouched. Lists are rendered in input order.

use super::{Markup, escape};
use crate::data::{About, MiscCategory, Profile, Project, Publication, RedirectLink};
use std::borrow::Cow;

/// Element id the typewriter writes into.
pub const TYPEWRITER_TARGET: &str = "typewriter-text";

/// Sticky label column plus content column shared by the list sections.
fn section_frame(label: &str, body_class: &str, body: &str) -> Markup {
    Markup::new(format!(
        r#"<div class="section-label">{label}</div><div class="section-body {body_class}">{body}</div>"#
    ))
}

pub fn render_hero(profile: Option<&Profile>) -> Option<Markup> {
    let profile = profile?;
    let name = escape(&profile.name);

    // The name is also the no-script fallback; the typewriter clears it on start.
    let text = format!(
        r#"<div class="hero-text"><h1 class="hero-title"><span class="accent">Hi, I'm</span><br><span id="{TYPEWRITER_TARGET}" class="typewriter" data-text="{name}">{name}</span></h1><p class="hero-lead">{}<br><span class="tagline">{}</span></p></div>"#,
        escape(&profile.title),
        escape(&profile.tagline),
    );

    let portrait = if profile.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="hero-portrait"><img src="{}" alt="{name}"></div>"#,
            escape(&profile.image)
        )
    };

    Some(Markup::new(format!(r#"<div class="hero-grid">{text}{portrait}</div>"#)))
}

/// Render the about section.
///
/// `content` is an HTML fragment written by the site owner. With
/// `trust_html` unset it is escaped and shown as text instead.
pub fn render_about(about: Option<&About>, trust_html: bool) -> Option<Markup> {
    let about = about?;
    let title = about
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("About");
    let content = if trust_html {
        Cow::Borrowed(about.content.as_str())
    } else {
        escape(&about.content)
    };

    Some(section_frame(
        "01 / About",
        "",
        &format!(
            r#"<h2 class="section-title">{}</h2><div class="prose">{content}</div>"#,
            escape(title)
        ),
    ))
}

pub fn render_projects(projects: &[Project]) -> Option<Markup> {
    if projects.is_empty() {
        return None;
    }

    let items: String = projects
        .iter()
        .map(|project| {
            let tags: String = project
                .tags
                .iter()
                .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape(tag)))
                .collect();
            format!(
                r#"<article class="project"><div class="project-head"><h3><a href="{}" target="_blank" rel="noopener">{}</a></h3><div class="tags">{tags}</div></div><p class="project-desc">{}</p><div class="project-more">View Project &rarr;</div></article>"#,
                escape(&project.link),
                escape(&project.title),
                escape(&project.description),
            )
        })
        .collect();

    Some(section_frame("02 / Projects", "stack", &items))
}

pub fn render_publications(publications: &[Publication]) -> Option<Markup> {
    if publications.is_empty() {
        return None;
    }

    let items: String = publications
        .iter()
        .map(|publication| {
            format!(
                r#"<div class="publication"><div><h4>{}</h4><div class="publication-meta"><span class="accent">{}</span><span class="dot">&bull;</span><span>{}</span></div></div><a href="{}" class="pdf-link">PDF</a></div>"#,
                escape(&publication.title),
                escape(&publication.venue),
                escape(&publication.year),
                escape(&publication.link),
            )
        })
        .collect();

    Some(section_frame("03 / Publications", "stack", &items))
}

pub fn render_misc(misc: &[MiscCategory]) -> Option<Markup> {
    if misc.is_empty() {
        return None;
    }

    let groups: String = misc
        .iter()
        .map(|group| {
            let items: String = group
                .items
                .iter()
                .map(|item| format!(r#"<li><span class="bullet"></span><span>{}</span></li>"#, escape(item)))
                .collect();
            format!(
                r#"<div class="misc-group"><h3>{}</h3><ul>{items}</ul></div>"#,
                escape(&group.category)
            )
        })
        .collect();

    Some(section_frame("04 / Misc", "grid-2", &groups))
}

pub fn render_redirects(redirects: &[RedirectLink]) -> Option<Markup> {
    if redirects.is_empty() {
        return None;
    }

    let links: String = redirects
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}" class="redirect"><span>{}</span><i data-lucide="arrow-up-right"></i></a>"#,
                escape(&link.url),
                escape(&link.label),
            )
        })
        .collect();

    Some(section_frame("Resources", "grid-2", &links))
}
