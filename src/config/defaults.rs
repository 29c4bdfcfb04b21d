//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Portfolio".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use crate::config::IconMode;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn data() -> PathBuf {
        "data.json".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn icons() -> IconMode {
        IconMode::default()
    }
}

// ============================================================================
// [effects] Section Defaults
// ============================================================================

pub mod effects {
    pub mod typewriter {
        pub fn delay_ms() -> u64 {
            500
        }

        pub fn interval_ms() -> u64 {
            100
        }
    }

    pub mod observer {
        pub fn threshold() -> f64 {
            0.1
        }

        pub fn root_margin() -> String {
            "0px".into()
        }

        pub fn marker_class() -> String {
            "fade-in-section".into()
        }

        pub fn visible_class() -> String {
            "is-visible".into()
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
