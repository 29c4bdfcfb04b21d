//! Browser runtime for the page effects.
//!
//! The script template lives in `embed/effects.js`; its placeholders are
//! filled from `[effects]` so the browser and `folio preview` share timings
//! and class names.

use crate::{config::EffectsConfig, render::TYPEWRITER_TARGET};

/// Effects script template (embedded at compile time)
const EFFECTS_TEMPLATE: &str = include_str!("../embed/effects.js");

/// Render the effects script for `<script>` inclusion.
#[allow(clippy::literal_string_with_formatting_args)]
// These are template placeholders, not format args
pub fn runtime_script(effects: &EffectsConfig) -> String {
    let typewriter = &effects.typewriter;
    let observer = &effects.observer;

    EFFECTS_TEMPLATE
        .replace("{delay_ms}", &typewriter.delay_ms.to_string())
        .replace("{interval_ms}", &typewriter.interval_ms.to_string())
        .replace("{threshold}", &observer.threshold.to_string())
        .replace("{root_margin}", &js_string(&observer.root_margin))
        .replace("{marker_class}", &js_string(&observer.marker_class))
        .replace("{visible_class}", &js_string(&observer.visible_class))
        .replace("{typewriter_target}", TYPEWRITER_TARGET)
}

/// Make a value safe inside a single-quoted JS string.
fn js_string(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .flat_map(|c| match c {
            '\\' | '\'' => vec!['\\', c],
            '<' => "\\x3c".chars().collect(),
            _ => vec![c],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_script_defaults() {
        let script = runtime_script(&EffectsConfig::default());

        assert!(script.contains("const DELAY_MS = 500;"));
        assert!(script.contains("const INTERVAL_MS = 100;"));
        assert!(script.contains("threshold: 0.1"));
        assert!(script.contains("rootMargin: '0px'"));
        assert!(script.contains("querySelectorAll('.fade-in-section')"));
        assert!(script.contains("classList.add('is-visible')"));
        assert!(script.contains("getElementById('typewriter-text')"));
    }

    #[test]
    fn test_runtime_script_leaves_no_placeholders() {
        let script = runtime_script(&EffectsConfig::default());
        for placeholder in ["{delay_ms}", "{interval_ms}", "{threshold}", "{marker_class}"] {
            assert!(!script.contains(placeholder), "{placeholder} left in script");
        }
    }

    #[test]
    fn test_runtime_script_custom_timing() {
        let mut effects = EffectsConfig::default();
        effects.typewriter.interval_ms = 40;
        effects.observer.threshold = 0.25;

        let script = runtime_script(&effects);
        assert!(script.contains("const INTERVAL_MS = 40;"));
        assert!(script.contains("threshold: 0.25"));
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("a'b"), "a\\'b");
        assert_eq!(js_string("</script>"), "\\x3c/script>");
        assert_eq!(js_string("line\nbreak"), "linebreak");
    }
}
