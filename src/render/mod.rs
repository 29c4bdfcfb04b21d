//! Section rendering.
//!
//! Each renderer is a pure function from one slice of the [`Portfolio`] to
//! [`Markup`]. `None` means the slice was missing or empty and the target
//! container must be left as it is. Committing markup into a page is the
//! job of [`crate::page::Page`].
//!
//! # Render order
//!
//! ```text
//! navbar → hero → about → projects → publications → misc → redirects → footer
//! ```

mod footer;
mod markup;
mod nav;
mod sections;

pub use footer::render_footer;
pub use markup::{Markup, escape};
pub use nav::render_nav;
pub use sections::{
    TYPEWRITER_TARGET, render_about, render_hero, render_misc, render_projects,
    render_publications, render_redirects,
};

use crate::{config::SiteConfig, data::Portfolio};

/// Page containers, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Navbar,
    Hero,
    About,
    Projects,
    Publications,
    Misc,
    Redirects,
    Footer,
}

impl SectionId {
    pub const ALL: [Self; 8] = [
        Self::Navbar,
        Self::Hero,
        Self::About,
        Self::Projects,
        Self::Publications,
        Self::Misc,
        Self::Redirects,
        Self::Footer,
    ];

    /// Element id of the container.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Publications => "publications",
            Self::Misc => "misc",
            Self::Redirects => "redirects",
            Self::Footer => "footer",
        }
    }

    /// Containers that fade in when scrolled into view.
    pub const fn is_observed(self) -> bool {
        matches!(
            self,
            Self::About | Self::Projects | Self::Publications | Self::Misc | Self::Redirects
        )
    }
}

/// Inputs to rendering that do not come from the document.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Copyright year in the footer.
    pub year: i32,
    pub trust_about_html: bool,
    /// Navbar brand fallback when the document has no profile.
    pub site_title: &'a str,
    pub credit: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, year: i32) -> Self {
        Self {
            year,
            trust_about_html: config.build.trust_about_html,
            site_title: &config.base.title,
            credit: config.base.credit.as_deref(),
        }
    }
}

/// Render one container.
pub fn render_section(id: SectionId, doc: &Portfolio, ctx: &RenderContext<'_>) -> Option<Markup> {
    match id {
        SectionId::Navbar => Some(render_nav(doc, ctx.site_title)),
        SectionId::Hero => render_hero(doc.profile.as_ref()),
        SectionId::About => render_about(doc.about.as_ref(), ctx.trust_about_html),
        SectionId::Projects => render_projects(&doc.projects),
        SectionId::Publications => render_publications(&doc.publications),
        SectionId::Misc => render_misc(&doc.misc),
        SectionId::Redirects => render_redirects(&doc.redirects),
        SectionId::Footer => render_footer(doc.profile.as_ref(), &doc.socials, ctx.year, ctx.credit),
    }
}

/// Render every container in page order.
pub fn render_sections(doc: &Portfolio, ctx: &RenderContext<'_>) -> Vec<(SectionId, Option<Markup>)> {
    SectionId::ALL
        .into_iter()
        .map(|id| (id, render_section(id, doc, ctx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Profile;

    fn ctx(config: &SiteConfig) -> RenderContext<'_> {
        RenderContext::new(config, 2025)
    }

    #[test]
    fn test_render_order_is_fixed() {
        let config = SiteConfig::default();
        let ids: Vec<_> = render_sections(&Portfolio::default(), &ctx(&config))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, SectionId::ALL.to_vec());
    }

    #[test]
    fn test_empty_document_renders_only_navbar() {
        let config = SiteConfig::default();
        let rendered: Vec<_> = render_sections(&Portfolio::default(), &ctx(&config))
            .into_iter()
            .filter(|(_, markup)| markup.is_some())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(rendered, vec![SectionId::Navbar]);
    }

    #[test]
    fn test_profile_enables_hero_and_footer() {
        let config = SiteConfig::default();
        let doc = Portfolio {
            profile: Some(Profile {
                name: "Ada".into(),
                ..Profile::default()
            }),
            ..Portfolio::default()
        };
        assert!(render_section(SectionId::Hero, &doc, &ctx(&config)).is_some());
        assert!(render_section(SectionId::Footer, &doc, &ctx(&config)).is_some());
        assert!(render_section(SectionId::About, &doc, &ctx(&config)).is_none());
    }

    #[test]
    fn test_section_ids() {
        let ids: Vec<_> = SectionId::ALL.iter().map(|id| id.as_str()).collect();
        assert_eq!(
            ids,
            ["navbar", "hero", "about", "projects", "publications", "misc", "redirects", "footer"]
        );
        assert!(!SectionId::Navbar.is_observed());
        assert!(SectionId::Redirects.is_observed());
    }
}
