//! Navigation bar.
//!
//! The link set is derived from which sections have data, so the bar never
//! points at a section that renders nothing.

use super::{Markup, SectionId, escape};
use crate::data::Portfolio;

/// Sections that get a navbar link, in display order.
pub fn nav_links(doc: &Portfolio) -> Vec<(SectionId, &'static str)> {
    [
        (SectionId::About, "About", doc.about.is_some()),
        (SectionId::Projects, "Projects", !doc.projects.is_empty()),
        (SectionId::Publications, "Publications", !doc.publications.is_empty()),
        (SectionId::Misc, "Misc", !doc.misc.is_empty()),
    ]
    .into_iter()
    .filter(|(_, _, present)| *present)
    .map(|(id, label, _)| (id, label))
    .collect()
}

/// Render the navbar. Always produces markup: the brand is shown even for
/// an otherwise empty document.
///
/// The brand is the first word of the profile name, or `site_title` when
/// the document has no profile.
pub fn render_nav(doc: &Portfolio, site_title: &str) -> Markup {
    let brand = doc.profile.as_ref().map_or(site_title, |p| p.first_name());

    let links: String = nav_links(doc)
        .into_iter()
        .map(|(id, label)| {
            format!(
                r##"<li><a href="#{}" class="nav-link">{label}</a></li>"##,
                id.as_str()
            )
        })
        .collect();

    Markup::new(format!(
        r##"<div class="nav-inner"><a href="#" class="brand">{}<span class="accent">.</span></a><ul class="nav-links">{links}</ul></div>"##,
        escape(brand)
    ))
}
