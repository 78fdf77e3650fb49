//! `[roi]` section configuration.
//!
//! Constants of the ROI calculator shown on the economy page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[roi]` section in affineur.toml.
///
/// # Example
/// ```toml
/// [roi]
/// investment = 500000
/// multiplier = 1000
///
/// [roi.volume]
/// small = 30
/// medium = 250
/// large = 750
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RoiConfig {
    /// One-off system cost, rubles.
    #[serde(default = "defaults::roi::investment")]
    #[educe(Default = defaults::roi::investment())]
    pub investment: u64,

    /// Rubles saved per volume unit per defect percentage point.
    #[serde(default = "defaults::roi::multiplier")]
    #[educe(Default = defaults::roi::multiplier())]
    pub multiplier: u64,

    #[serde(default = "defaults::roi::min_defect_rate")]
    #[educe(Default = defaults::roi::min_defect_rate())]
    pub min_defect_rate: u32,

    #[serde(default = "defaults::roi::max_defect_rate")]
    #[educe(Default = defaults::roi::max_defect_rate())]
    pub max_defect_rate: u32,

    /// Used when the CLI is given no defect rate.
    #[serde(default = "defaults::roi::defect_rate")]
    #[educe(Default = defaults::roi::defect_rate())]
    pub defect_rate: u32,

    #[serde(default)]
    pub volume: VolumeFactors,
}

/// Volume factor of each production size.
#[derive(Debug, Clone, Copy, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct VolumeFactors {
    #[serde(default = "defaults::roi::volume::small")]
    #[educe(Default = defaults::roi::volume::small())]
    pub small: u64,

    #[serde(default = "defaults::roi::volume::medium")]
    #[educe(Default = defaults::roi::volume::medium())]
    pub medium: u64,

    #[serde(default = "defaults::roi::volume::large")]
    #[educe(Default = defaults::roi::volume::large())]
    pub large: u64,
}
