//! ROI calculator for the economy page.
//!
//! `savings = factor(volume) * defect_rate * multiplier` rubles per month,
//! `payback = ceil(investment / savings)` months.

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::config::RoiConfig;

/// Daily production volume.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    /// up to 50 kg
    Small,
    /// 50-500 kg
    Medium,
    /// 500+ kg
    Large,
}

impl Volume {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "до 50 кг",
            Self::Medium => "50-500 кг",
            Self::Large => "500+ кг",
        }
    }

    fn factor(self, config: &RoiConfig) -> u64 {
        match self {
            Self::Small => config.volume.small,
            Self::Medium => config.volume.medium,
            Self::Large => config.volume.large,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoiError {
    #[error("defect rate {rate}% is outside {min}..={max}%")]
    DefectRateOutOfRange { rate: u32, min: u32, max: u32 },

    #[error("volume factor for `{0:?}` is zero, nothing to save")]
    NoSavings(Volume),
}

/// Result of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoiEstimate {
    pub volume: Volume,
    pub defect_rate: u32,
    pub investment: u64,
    /// Rubles per month
    pub savings: u64,
    pub yearly_savings: u64,
    pub payback_months: u64,
}

pub fn estimate(config: &RoiConfig, volume: Volume, defect_rate: u32) -> Result<RoiEstimate, RoiError> {
    let (min, max) = (config.min_defect_rate, config.max_defect_rate);
    if !(min..=max).contains(&defect_rate) {
        return Err(RoiError::DefectRateOutOfRange {
            rate: defect_rate,
            min,
            max,
        });
    }

    let savings = volume
        .factor(config)
        .saturating_mul(u64::from(defect_rate))
        .saturating_mul(config.multiplier);
    if savings == 0 {
        return Err(RoiError::NoSavings(volume));
    }

    Ok(RoiEstimate {
        volume,
        defect_rate,
        investment: config.investment,
        savings,
        yearly_savings: savings.saturating_mul(12),
        payback_months: config.investment.div_ceil(savings),
    })
}

/// Format like `Intl.NumberFormat("ru-RU")`: groups of three separated by a
/// non-breaking space, four-digit numbers left ungrouped.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() < 5 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{a0}');
        }
        out.push(c);
    }
    out
}

/// "месяц" / "месяца" / "месяцев" as shown next to the payback period.
pub const fn months_word(n: u64) -> &'static str {
    match n {
        1 => "месяц",
        2..=4 => "месяца",
        _ => "месяцев",
    }
}
