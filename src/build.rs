//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_document() ──► Err ──► error page ──► bail
//!     │
//!     ├── render_page()
//!     │       │
//!     │       └── navbar → hero → about → ... → footer, committed into Page
//!     │           (icons materialized per commit)
//!     │
//!     └── rayon::join
//!             ├── write_page() ──► public/index.html
//!             └── copy_assets() ──► public/assets/
//! ```

use crate::{
    config::{IconMode, SiteConfig},
    data::{Portfolio, load_document},
    icons::{IconRenderer, icon_renderer, placeholder_names},
    log,
    logger::DocumentEvent,
    page::Page,
    render::{RenderContext, SectionId, render_sections},
    utils::{assets::copy_assets, minify::minify_html},
};
use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use std::{fs, path::PathBuf};

/// Name of the generated page inside the output directory.
const INDEX_FILE: &str = "index.html";

/// Build the page and copy assets.
///
/// When the document cannot be loaded, the error page is still written so a
/// running server shows it, and the build fails.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let icons = icon_renderer(config.build.icons);
    let year = chrono::Local::now().year();

    let doc = match load_document(&config.build.data) {
        Ok(doc) => doc,
        Err(error) => {
            DocumentEvent::LoadFailed { error: &error }.log();
            let mut page = Page::new(&config.effects.observer.marker_class);
            page.fail();
            write_page(&page, config, icons.as_ref())?;
            return Err(anyhow!("Build failed"));
        }
    };

    let page = render_page(&doc, config, icons.as_ref(), year);
    DocumentEvent::Rendered {
        path: &config.build.data,
        sections: &page.committed(),
    }
    .log();
    if config.build.icons == IconMode::Inline {
        warn_unknown_icons(&page);
    }

    let (page_result, assets_result) = rayon::join(
        || write_page(&page, config, icons.as_ref()),
        || copy_assets(&config.build.assets, output),
    );
    let index = page_result?;
    let copied = assets_result?;

    log!("build"; "wrote {}", index.display());
    if copied > 0 {
        log!("build"; "copied {copied} assets");
    }

    Ok(())
}

/// Render every section in page order and commit the ones that produced
/// markup. Sections without data leave their container empty.
pub fn render_page(doc: &Portfolio, config: &SiteConfig, icons: &dyn IconRenderer, year: i32) -> Page {
    let ctx = RenderContext::new(config, year);
    let mut page = Page::new(&config.effects.observer.marker_class);

    for (id, markup) in render_sections(doc, &ctx) {
        if let Some(markup) = markup {
            page.commit(id, markup, icons);
        }
    }

    page
}

/// Write the page to `<output>/index.html`, minified if enabled.
fn write_page(page: &Page, config: &SiteConfig, icons: &dyn IconRenderer) -> Result<PathBuf> {
    let html = page.to_html(config, icons);
    let html = minify_html(html.as_bytes(), config);

    let path = config.build.output.join(INDEX_FILE);
    fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Inline mode only knows a fixed icon set; anything else stays a placeholder.
fn warn_unknown_icons(page: &Page) {
    for id in SectionId::ALL {
        let Some(html) = page.markup(id) else {
            continue;
        };
        for name in placeholder_names(html) {
            DocumentEvent::UnknownIcon { section: id, name }.log();
        }
    }
}
