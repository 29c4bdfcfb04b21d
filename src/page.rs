//! The page: fixed containers that rendered sections are committed into.
//!
//! A [`Page`] starts with every container empty. [`Page::commit`] replaces a
//! container's contents and materializes its icon placeholders, so icon
//! handling happens once per replacement. [`Page::fail`] switches the whole
//! body to the load error message.
//!
//! # Layout
//!
//! ```text
//! <nav id="navbar">
//! <header id="hero">
//! <main>
//!   <section id="about" class="fade-in-section"> ... <section id="redirects" ...>
//! </main>
//! <footer id="footer">
//! ```

use crate::{
    config::SiteConfig,
    data::ERROR_MESSAGE,
    effects::{observer::ClassList, runtime::runtime_script},
    icons::IconRenderer,
    render::{Markup, SectionId, escape},
};

/// Page shell template (embedded at compile time)
const PAGE_TEMPLATE: &str = include_str!("embed/page.html");

/// Page stylesheet template (embedded at compile time)
const PAGE_STYLE: &str = include_str!("embed/page.css");

#[derive(Debug, Clone)]
struct Container {
    id: SectionId,
    classes: Vec<String>,
    content: Option<String>,
}

impl Container {
    fn open_tag(&self) -> String {
        let tag = container_tag(self.id);
        if self.classes.is_empty() {
            format!(r#"<{tag} id="{}">"#, self.id.as_str())
        } else {
            format!(
                r#"<{tag} id="{}" class="{}">"#,
                self.id.as_str(),
                self.classes.join(" ")
            )
        }
    }

    fn to_html(&self) -> String {
        format!(
            "{}{}</{}>",
            self.open_tag(),
            self.content.as_deref().unwrap_or_default(),
            container_tag(self.id)
        )
    }
}

const fn container_tag(id: SectionId) -> &'static str {
    match id {
        SectionId::Navbar => "nav",
        SectionId::Hero => "header",
        SectionId::Footer => "footer",
        _ => "section",
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    containers: Vec<Container>,
    failed: bool,
}

impl Page {
    /// Empty page. Observed containers carry `marker_class`.
    pub fn new(marker_class: &str) -> Self {
        let containers = SectionId::ALL
            .into_iter()
            .map(|id| Container {
                id,
                classes: if id.is_observed() {
                    vec![marker_class.to_string()]
                } else {
                    Vec::new()
                },
                content: None,
            })
            .collect();

        Self {
            containers,
            failed: false,
        }
    }

    fn container(&self, id: SectionId) -> &Container {
        &self.containers[id as usize]
    }

    fn container_mut(&mut self, id: SectionId) -> &mut Container {
        &mut self.containers[id as usize]
    }

    /// Replace the contents of `id`, then materialize its icons.
    pub fn commit(&mut self, id: SectionId, markup: Markup, icons: &dyn IconRenderer) {
        let html = icons.materialize(markup.as_str()).into_owned();
        self.container_mut(id).content = Some(html);
    }

    /// Replace the whole body with the load error message.
    pub fn fail(&mut self) {
        self.failed = true;
    }

    /// Committed contents of `id`, `None` while untouched.
    pub fn markup(&self, id: SectionId) -> Option<&str> {
        self.container(id).content.as_deref()
    }

    /// Containers holding committed markup, in page order.
    pub fn committed(&self) -> Vec<SectionId> {
        self.containers
            .iter()
            .filter(|c| c.content.is_some())
            .map(|c| c.id)
            .collect()
    }

    pub fn has_class(&self, id: SectionId, class: &str) -> bool {
        self.container(id).classes.iter().any(|c| c == class)
    }

    /// Containers carrying `class`, in page order.
    pub fn with_class(&self, class: &str) -> Vec<SectionId> {
        self.containers
            .iter()
            .filter(|c| c.classes.iter().any(|x| x == class))
            .map(|c| c.id)
            .collect()
    }

    fn body(&self) -> String {
        if self.failed {
            return format!(r#"<div class="load-error">{ERROR_MESSAGE}</div>"#);
        }

        let part = |id: SectionId| self.container(id).to_html();
        let sections: String = SectionId::ALL
            .into_iter()
            .filter(|id| id.is_observed())
            .map(part)
            .collect();

        format!(
            "{}\n{}\n<main>{sections}</main>\n{}",
            part(SectionId::Navbar),
            part(SectionId::Hero),
            part(SectionId::Footer),
        )
    }

    /// Full HTML document.
    ///
    /// A failed page carries no effects script: nothing is left to animate.
    #[allow(clippy::literal_string_with_formatting_args)]
    // These are template placeholders, not format args
    pub fn to_html(&self, config: &SiteConfig, icons: &dyn IconRenderer) -> String {
        let observer = &config.effects.observer;
        let style = PAGE_STYLE
            .replace("{marker_class}", &observer.marker_class)
            .replace("{visible_class}", &observer.visible_class);

        let (head, script) = if self.failed {
            (String::new(), String::new())
        } else {
            (
                icons.head().unwrap_or_default().to_string(),
                format!("<script>{}</script>", runtime_script(&config.effects)),
            )
        };

        PAGE_TEMPLATE
            .replace("{lang}", &escape(&config.base.language))
            .replace("{title}", &escape(&config.base.title))
            .replace("{head}", &head)
            .replace("{style}", &style)
            .replace("{script}", &script)
            .replace("{body}", &self.body())
    }
}

impl ClassList<SectionId> for Page {
    fn add_class(&mut self, target: &SectionId, class: &str) {
        let classes = &mut self.container_mut(*target).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
}
