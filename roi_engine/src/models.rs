//! Data models for the ROI engine.
//!
//! The `models` module defines the serialisable structs and enums
//! describing product tiers, the calculator's input parameter set and
//! the results record.  They derive `Serialize` and `Deserialize` so
//! the same types travel over the HTTP API and through the CLI's JSON
//! output unchanged.

use crate::error::{Result, RoiError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the four tiny-home models on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    /// Entry model, a compact studio or office.
    Studio,
    /// Mid-range guest house with a queen bed and workspace.
    Backyard,
    /// Premium weekend-escape model.
    Weekender,
    /// Full-size model for extended stays.
    Residence,
}

impl TierId {
    /// Every tier, in catalog order.
    pub const ALL: [TierId; 4] = [
        TierId::Studio,
        TierId::Backyard,
        TierId::Weekender,
        TierId::Residence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierId::Studio => "studio",
            TierId::Backyard => "backyard",
            TierId::Weekender => "weekender",
            TierId::Residence => "residence",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            TierId::Studio => 0,
            TierId::Backyard => 1,
            TierId::Weekender => 2,
            TierId::Residence => 3,
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TierId::ALL
            .into_iter()
            .find(|tier| tier.as_str() == wanted)
            .ok_or_else(|| RoiError::TierNotFound { id: s.to_string() })
    }
}

/// A static catalog entry for a tiny-home model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTier {
    pub id: TierId,
    /// Purchase price in dollars.
    pub price: f64,
    /// External dimensions, e.g. `"6.0m × 2.5m × 4.0m"`.
    pub dimensions: String,
    /// One-line feature summary shown on the tier card.
    pub features: String,
    /// Nightly rate the calculator starts from when this tier is
    /// selected.
    pub suggested_nightly_rate: f64,
    pub description: String,
}

/// The parameter set a user edits.
///
/// Missing fields fall back to the Blue Mountains defaults when the
/// input is deserialised, so API clients may send only what they
/// change.  Season and personal-use day counts are independent and
/// need not sum to a full year; the engine clamps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInput {
    pub tier: TierId,
    /// Base nightly rate.  Peak nights are charged at a premium.
    pub nightly_rate: f64,
    /// Peak season occupancy, 0 to 100.
    pub peak_occupancy_pct: f64,
    /// Off-peak occupancy, 0 to 100.
    pub off_peak_occupancy_pct: f64,
    pub peak_season_days: u32,
    pub off_season_days: u32,
    /// Charged once per booking, not per night.
    pub cleaning_fee_per_stay: f64,
    /// Days the owner keeps for themselves; never rentable.
    pub personal_use_days: u32,
    pub average_stay_length_nights: f64,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            tier: TierId::Backyard,
            nightly_rate: 225.0,
            peak_occupancy_pct: 80.0,
            off_peak_occupancy_pct: 40.0,
            peak_season_days: 120,
            off_season_days: 245,
            cleaning_fee_per_stay: 65.0,
            personal_use_days: 30,
            average_stay_length_nights: 2.0,
        }
    }
}

impl CalculatorInput {
    /// Switch to another tier and reset the nightly rate to that
    /// tier's suggested rate.
    pub fn select_tier(&mut self, tier: &ProductTier) {
        self.tier = tier.id;
        self.nightly_rate = tier.suggested_nightly_rate;
    }

    /// Check the input before handing it to the engine.
    ///
    /// The engine accepts anything; this is for the CLI and API so
    /// that obviously broken values are reported instead of turned
    /// into meaningless projections.  Day counts are not checked
    /// because the engine clamps them.
    pub fn validate(&self) -> Result<()> {
        if !self.nightly_rate.is_finite() || self.nightly_rate <= 0.0 {
            return Err(RoiError::invalid("nightly_rate", "must be a positive number"));
        }
        check_percentage("peak_occupancy_pct", self.peak_occupancy_pct)?;
        check_percentage("off_peak_occupancy_pct", self.off_peak_occupancy_pct)?;
        if !self.cleaning_fee_per_stay.is_finite() || self.cleaning_fee_per_stay < 0.0 {
            return Err(RoiError::invalid(
                "cleaning_fee_per_stay",
                "must be zero or a positive number",
            ));
        }
        if !self.average_stay_length_nights.is_finite() || self.average_stay_length_nights <= 0.0 {
            return Err(RoiError::invalid(
                "average_stay_length_nights",
                "must be a positive number of nights",
            ));
        }
        Ok(())
    }
}

fn check_percentage(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(RoiError::invalid(field, format!("{value} is outside 0..=100")))
    }
}

/// Rentable days after personal use has been taken out.
///
/// `total` goes negative when personal use exceeds a year; the
/// season figures follow it down rather than being clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailableDays {
    pub total: i64,
    pub peak: i64,
    pub off_peak: i64,
}

/// Occupied nights and the bookings they translate to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub peak_nights: i64,
    pub off_peak_nights: i64,
    pub total_nights: i64,
    pub peak_bookings: i64,
    pub off_peak_bookings: i64,
    pub total_bookings: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    /// Base rate with the peak premium applied.
    pub peak_nightly_rate: f64,
    pub peak_room: f64,
    pub off_peak_room: f64,
    pub cleaning: f64,
    pub total: f64,
}

/// Fixed annual running costs, independent of tier and occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseSchedule {
    pub insurance: f64,
    pub maintenance: f64,
    pub utilities: f64,
    /// Covered by the guest-paid cleaning fee.
    pub cleaning: f64,
    /// Zero for caravan-classified homes.
    pub council_rates: f64,
    pub marketing: f64,
}

impl Default for ExpenseSchedule {
    fn default() -> Self {
        Self {
            insurance: 1200.0,
            maintenance: 1500.0,
            utilities: 800.0,
            cleaning: 0.0,
            council_rates: 0.0,
            marketing: 0.0,
        }
    }
}

impl ExpenseSchedule {
    /// The earlier schedule that still budgeted $500 a year for
    /// marketing.
    pub fn legacy() -> Self {
        Self {
            marketing: 500.0,
            ..Self::default()
        }
    }

    pub fn total(&self) -> f64 {
        self.insurance
            + self.maintenance
            + self.utilities
            + self.cleaning
            + self.council_rates
            + self.marketing
    }
}

/// Everything derived from one [`CalculatorInput`].
///
/// `payback_years` is `tier_price / net_income` and is left as the
/// raw quotient: negative when the home runs at a loss and infinite
/// or NaN when it breaks exactly even.  Serialised to JSON, non-finite
/// values become `null`, which reads back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub tier: TierId,
    pub tier_price: f64,
    pub available_days: AvailableDays,
    pub bookings: BookingSummary,
    pub revenue: RevenueBreakdown,
    pub expenses: ExpenseSchedule,
    pub total_expenses: f64,
    pub net_income: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub payback_years: f64,
    pub five_year_profit: f64,
    pub ten_year_profit: f64,
}

fn nullable_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
