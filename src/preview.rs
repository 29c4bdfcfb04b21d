//! Terminal preview of the page effects.
//!
//! Renders the document exactly like `build`, then plays it in the terminal:
//! the hero name is typed out by the [`Typewriter`], and the page is scrolled
//! one step at a time past a viewport the height of the terminal, with the
//! [`VisibilityObserver`] revealing each section as it comes into view.
//!
//! ```text
//! load ─▶ render_page ─▶ typewriter(hero) ─▶ scroll ─▶ footer
//!                                              │
//!                                              └─ on_intersections → reveal
//! ```

use crate::{
    build::render_page,
    config::SiteConfig,
    data::{ERROR_MESSAGE, load_document},
    effects::{
        observer::{Bounds, IntersectionEntry, VisibilityObserver},
        typewriter::{TextTarget, Typewriter, TypewriterState},
    },
    icons::ScriptIcons,
    log,
    logger::DocumentEvent,
    page::Page,
    render::SectionId,
};
use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use regex::Regex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    time::Duration,
};

/// Pause between scroll steps.
const SCROLL_STEP: Duration = Duration::from_millis(250);
/// Viewport height used when the terminal size is unknown.
const FALLBACK_ROWS: u16 = 24;

static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:div|p|li|h[1-6]|article|a|ul)>").expect("valid regex")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Play the page in the terminal.
pub fn preview_site(config: &SiteConfig) -> Result<()> {
    let doc = match load_document(&config.build.data) {
        Ok(doc) => doc,
        Err(error) => {
            DocumentEvent::LoadFailed { error: &error }.log();
            log!("preview"; "{ERROR_MESSAGE}");
            return Err(anyhow!("Preview failed"));
        }
    };

    let year = chrono::Local::now().year();
    let mut page = render_page(&doc, config, &ScriptIcons, year);
    let name = doc.profile.as_ref().map(|p| p.name.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start preview runtime")?;

    runtime.block_on(play(&mut page, name.as_deref(), config))
}

async fn play(page: &mut Page, name: Option<&str>, config: &SiteConfig) -> Result<()> {
    if let Some(text) = page.markup(SectionId::Navbar).map(markup_to_text) {
        log!("preview"; "{}", text.replace('\n', "  "));
    }

    if let Some(name) = name {
        let mut typewriter = Typewriter::from_config(&config.effects.typewriter);
        let target = TerminalLine::new("Hi, I'm ");
        target.show(name);

        let state = typewriter
            .start(name, target)
            .await
            .context("Typewriter task failed")?;
        println!();
        if state != TypewriterState::Done {
            log!("warn"; "typewriter stopped early");
        }
    }

    let viewport_height = f64::from(
        crossterm::terminal::size()
            .map(|(_, rows)| rows)
            .unwrap_or(FALLBACK_ROWS),
    );
    scroll(page, config, viewport_height).await;

    if let Some(text) = page.markup(SectionId::Footer).map(markup_to_text) {
        log!("preview"; "#footer\n{text}");
    }

    Ok(())
}

/// Scroll from the top to the end of the page, revealing sections.
async fn scroll(page: &mut Page, config: &SiteConfig, viewport_height: f64) {
    let observer_config = &config.effects.observer;
    let mut observer = VisibilityObserver::from_config(observer_config);
    for id in page.with_class(&observer_config.marker_class) {
        observer.observe(id);
    }

    let layout = layout(page);
    let page_height = layout.last().map_or(0.0, |(_, b)| b.bottom());

    let mut top = 0.0;
    loop {
        let viewport = Bounds::new(top, viewport_height);
        for id in reveal(&mut observer, page, &layout, viewport) {
            if let Some(text) = page.markup(id).map(markup_to_text) {
                log!("preview"; "#{}\n{text}", id.as_str());
            }
        }

        if viewport.bottom() >= page_height {
            break;
        }
        top += (viewport_height / 2.0).max(1.0);
        tokio::time::sleep(SCROLL_STEP).await;
    }
}

/// One observer callback for the given viewport.
fn reveal(
    observer: &mut VisibilityObserver<SectionId>,
    page: &mut Page,
    layout: &[(SectionId, Bounds)],
    viewport: Bounds,
) -> Vec<SectionId> {
    let margin = observer.options().root_margin;
    let entries: Vec<_> = layout
        .iter()
        .filter(|(id, _)| observer.observed().contains(id))
        .map(|(id, bounds)| IntersectionEntry::measure(*id, *bounds, viewport, margin))
        .collect();
    observer.on_intersections(&entries, page)
}

/// Vertical layout in terminal rows: navbar, hero, sections, footer.
///
/// Empty containers are not displayed and take no space, so they never
/// intersect the viewport.
fn layout(page: &Page) -> Vec<(SectionId, Bounds)> {
    let mut top = 0.0;
    let mut out = Vec::new();
    for id in SectionId::ALL {
        let Some(html) = page.markup(id) else {
            continue;
        };
        #[allow(clippy::cast_precision_loss)]
        let height = markup_to_text(html).lines().count().max(1) as f64;
        out.push((id, Bounds::new(top, height)));
        top += height;
    }
    out
}

/// Plain text for the terminal: one line per block element, entities decoded.
fn markup_to_text(html: &str) -> String {
    let text = BLOCK_END.replace_all(html, "\n");
    let text = TAG.replace_all(&text, "");

    text.lines()
        .map(|line| decode_entities(line.trim()))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rarr;", "→")
        .replace("&bull;", "•")
        .replace("&copy;", "©")
        .replace("&amp;", "&")
}

// ============================================================================
// Terminal target
// ============================================================================

/// A single terminal line the typewriter writes into, after a fixed prefix.
struct TerminalLine {
    prefix: String,
}

impl TerminalLine {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Show `text` in the line, without a trailing newline.
    fn show(&self, text: &str) {
        let mut out = stdout().lock();
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        write!(out, "{}{text}", self.prefix).ok();
        out.flush().ok();
    }
}

impl TextTarget for TerminalLine {
    fn clear(&mut self) {
        self.show("");
    }

    fn append(&mut self, ch: char) {
        let mut out = stdout().lock();
        write!(out, "{ch}").ok();
        out.flush().ok();
    }
}
