//! `[build]` section configuration.
//!
//! Contains build settings: paths, minification, icon handling and the
//! trust level of the about section's rich content.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// How `data-lucide` icon placeholders are materialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    /// Replace known placeholders with embedded SVG at build time (default).
    #[default]
    Inline,
    /// Leave placeholders and load the lucide script in the page.
    Script,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in folio.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// data = "data.json"       # Portfolio document
/// output = "public"        # Output directory
/// minify = true            # Minify HTML
/// icons = "inline"
/// trust_about_html = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Portfolio document read on every build.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Output directory for the generated page.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets copied verbatim (profile image, stylesheets).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Minify the generated HTML.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Icon placeholder handling.
    #[serde(default = "defaults::build::icons")]
    #[educe(Default = defaults::build::icons())]
    pub icons: IconMode,

    /// Inject `about.content` as raw HTML.
    ///
    /// Only safe while the data document is written by the site owner.
    /// Set to `false` to render it as escaped text.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub trust_about_html: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.root, None);
        assert_eq!(config.build.data, PathBuf::from("data.json"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.assets, PathBuf::from("assets"));
        assert!(config.build.minify);
        assert_eq!(config.build.icons, IconMode::Inline);
        assert!(config.build.trust_about_html);
    }

    #[test]
    fn test_build_config_custom() {
        let config = r#"
            [build]
            data = "me.json"
            output = "dist"
            minify = false
            icons = "script"
            trust_about_html = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.data, PathBuf::from("me.json"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.build.minify);
        assert_eq!(config.build.icons, IconMode::Script);
        assert!(!config.build.trust_about_html);
    }

    #[test]
    fn test_icon_mode_rejects_unknown() {
        let config = r#"
            [build]
            icons = "svg"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }

    #[test]
    fn test_unknown_field_rejection_in_build() {
        let config = r#"
            [build]
            content = "content"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
