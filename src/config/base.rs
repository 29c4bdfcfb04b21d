//! `[base]` section configuration.
//!
//! Page-level metadata that does not come from the data document.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - page metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Ada Lovelace"
/// language = "en"
/// credit = "Built with folio"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Browser tab title. Also the navbar brand when the document has no profile.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// BCP 47 language code for the `<html lang>` attribute.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Optional credit line shown at the right of the footer.
    #[serde(default)]
    pub credit: Option<String>,
}
