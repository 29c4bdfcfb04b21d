//! `[effects]` section configuration.
//!
//! Timings and class names shared by the native effect state machines and
//! the browser runtime embedded in the page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[effects]` section in folio.toml.
///
/// # Example
/// ```toml
/// [effects.typewriter]
/// delay_ms = 500
/// interval_ms = 100
///
/// [effects.observer]
/// threshold = 0.1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    pub typewriter: TypewriterConfig,
    pub observer: ObserverConfig,
}

/// `[effects.typewriter]` - character reveal timing.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterConfig {
    /// Delay before the first character, in milliseconds.
    #[serde(default = "defaults::effects::typewriter::delay_ms")]
    #[educe(Default = defaults::effects::typewriter::delay_ms())]
    pub delay_ms: u64,

    /// Interval between characters, in milliseconds.
    #[serde(default = "defaults::effects::typewriter::interval_ms")]
    #[educe(Default = defaults::effects::typewriter::interval_ms())]
    pub interval_ms: u64,
}

impl TypewriterConfig {
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// `[effects.observer]` - scroll-triggered fade-in.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverConfig {
    /// Fraction of an element that must be visible, in `0.0..=1.0`.
    #[serde(default = "defaults::effects::observer::threshold")]
    #[educe(Default = defaults::effects::observer::threshold())]
    pub threshold: f64,

    /// Margin grown around the viewport root: one CSS length in px, e.g.
    /// `0px` or `-20px`. Percentages are rejected because the terminal
    /// preview has no pixel viewport to resolve them against.
    #[serde(default = "defaults::effects::observer::root_margin")]
    #[educe(Default = defaults::effects::observer::root_margin())]
    pub root_margin: String,

    /// Class selecting the observed elements.
    #[serde(default = "defaults::effects::observer::marker_class")]
    #[educe(Default = defaults::effects::observer::marker_class())]
    pub marker_class: String,

    /// Class added once an element has been seen.
    #[serde(default = "defaults::effects::observer::visible_class")]
    #[educe(Default = defaults::effects::observer::visible_class())]
    pub visible_class: String,
}

impl ObserverConfig {
    /// `root_margin` in px, or `None` unless it is a single finite px length.
    pub fn root_margin_px(&self) -> Option<f64> {
        let px: f64 = self.root_margin.trim().strip_suffix("px")?.parse().ok()?;
        px.is_finite().then_some(px)
    }
}
