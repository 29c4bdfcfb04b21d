//! Scroll-triggered visibility.
//!
//! One [`VisibilityObserver`] watches every element carrying the marker
//! class. Each batch of [`IntersectionEntry`] values adds the visible class
//! to the observed targets that are intersecting at or above the threshold.
//! Targets are never unobserved and the class is never removed, so the
//! transition is one-way per element.

use crate::config::ObserverConfig;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Observer settings. The root is always the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Margin grown around the viewport, in the same unit as [`Bounds`].
    pub root_margin: f64,
    /// Minimum visible fraction of the target, `0.0..=1.0`.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: 0.0,
            threshold: 0.1,
        }
    }
}

impl ObserverOptions {
    /// Build from a validated config.
    pub fn from_config(config: &ObserverConfig) -> Self {
        Self {
            root_margin: config.root_margin_px().unwrap_or_default(),
            threshold: config.threshold,
        }
    }
}

/// Vertical extent of an element or of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// One target's intersection with the root at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<K> {
    pub target: K,
    pub is_intersecting: bool,
    /// Visible fraction of the target.
    pub intersection_ratio: f64,
}

impl<K> IntersectionEntry<K> {
    /// Measure `element` against `viewport` grown by `root_margin`.
    ///
    /// A zero-height element inside the root counts as fully visible.
    pub fn measure(target: K, element: Bounds, viewport: Bounds, root_margin: f64) -> Self {
        let root_top = viewport.top - root_margin;
        let root_bottom = viewport.bottom() + root_margin;

        let overlap = element.bottom().min(root_bottom) - element.top.max(root_top);
        let (is_intersecting, intersection_ratio) = if element.height <= 0.0 {
            let inside = element.top >= root_top && element.top <= root_bottom;
            (inside, if inside { 1.0 } else { 0.0 })
        } else if overlap > 0.0 {
            (true, (overlap / element.height).min(1.0))
        } else {
            (false, 0.0)
        };

        Self {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }
}

/// Element class mutation, implemented by whatever holds the elements.
pub trait ClassList<K> {
    fn add_class(&mut self, target: &K, class: &str);
}

pub struct VisibilityObserver<K> {
    options: ObserverOptions,
    visible_class: String,
    observed: Vec<K>,
    revealed: FxHashSet<K>,
}

impl<K: Clone + Eq + Hash> VisibilityObserver<K> {
    pub fn new(options: ObserverOptions, visible_class: impl Into<String>) -> Self {
        Self {
            options,
            visible_class: visible_class.into(),
            observed: Vec::new(),
            revealed: FxHashSet::default(),
        }
    }

    pub fn from_config(config: &ObserverConfig) -> Self {
        Self::new(ObserverOptions::from_config(config), config.visible_class.clone())
    }

    pub const fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Start watching `target`. Observing twice is a no-op.
    pub fn observe(&mut self, target: K) {
        if !self.observed.contains(&target) {
            self.observed.push(target);
        }
    }

    pub fn observed(&self) -> &[K] {
        &self.observed
    }

    pub fn is_visible(&self, target: &K) -> bool {
        self.revealed.contains(target)
    }

    /// Whether an entry counts as "in view" under the threshold.
    fn passes(&self, entry: &IntersectionEntry<K>) -> bool {
        entry.is_intersecting && entry.intersection_ratio >= self.options.threshold
    }

    /// Handle one callback batch.
    ///
    /// Adds the visible class to every observed, intersecting target and
    /// returns the targets revealed for the first time, in entry order.
    pub fn on_intersections(
        &mut self,
        entries: &[IntersectionEntry<K>],
        elements: &mut impl ClassList<K>,
    ) -> Vec<K> {
        let mut newly = Vec::new();
        for entry in entries {
            if !self.observed.contains(&entry.target) || !self.passes(entry) {
                continue;
            }
            elements.add_class(&entry.target, &self.visible_class);
            if self.revealed.insert(entry.target.clone()) {
                newly.push(entry.target.clone());
            }
        }
        newly
    }
}
