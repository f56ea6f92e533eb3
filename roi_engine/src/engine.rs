//! ROI computation engine.
//!
//! The `engine` module turns a [`CalculatorInput`] into a
//! [`CalculationResult`].  The arithmetic lives in [`compute_with`],
//! a pure function of the input, the selected tier, the
//! configuration and a [`BookingPolicy`].  [`Calculator`] bundles
//! those collaborators and uses [`rayon`] to evaluate many scenarios
//! or every tier at once.
//!
//! Nothing here fails.  Oversubscribed days, zero occupancy and loss
//! making scenarios all produce numbers; deciding how to show a
//! negative or infinite payback period is up to the caller.

use crate::booking::BookingPolicy;
use crate::catalog::TierCatalog;
use crate::config::RoiConfig;
use crate::models::{
    AvailableDays, BookingSummary, CalculationResult, CalculatorInput, ProductTier,
    RevenueBreakdown,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

pub const DAYS_PER_YEAR: i64 = 365;

/// Compute a result with the default configuration and catalog.
pub fn compute(input: &CalculatorInput) -> CalculationResult {
    Calculator::default().compute(input)
}

/// Run the ROI pipeline for one input.
///
/// `tier` is taken as given; `input.tier` is only echoed into the
/// result.
pub fn compute_with(
    input: &CalculatorInput,
    tier: &ProductTier,
    config: &RoiConfig,
    policy: &dyn BookingPolicy,
) -> CalculationResult {
    // Rentable days per season after personal use
    let available_days = available_days(input);

    // Occupied nights, then the stays they make up
    let peak_nights = occupied_nights(available_days.peak, input.peak_occupancy_pct);
    let off_peak_nights = occupied_nights(available_days.off_peak, input.off_peak_occupancy_pct);
    let peak_bookings = policy.bookings(peak_nights, input);
    let off_peak_bookings = policy.bookings(off_peak_nights, input);
    let bookings = BookingSummary {
        peak_nights,
        off_peak_nights,
        total_nights: peak_nights + off_peak_nights,
        peak_bookings,
        off_peak_bookings,
        total_bookings: peak_bookings + off_peak_bookings,
    };

    // Room revenue plus the per-stay cleaning fee
    let peak_nightly_rate = input.nightly_rate * config.peak_premium;
    let peak_room = bookings.peak_nights as f64 * peak_nightly_rate;
    let off_peak_room = bookings.off_peak_nights as f64 * input.nightly_rate;
    let cleaning = bookings.total_bookings as f64 * input.cleaning_fee_per_stay;
    let revenue = RevenueBreakdown {
        peak_nightly_rate,
        peak_room,
        off_peak_room,
        cleaning,
        total: peak_room + off_peak_room + cleaning,
    };

    // Fixed running costs and the resulting profitability figures
    let total_expenses = config.expenses.total();
    let net_income = revenue.total - total_expenses;

    CalculationResult {
        tier: input.tier,
        tier_price: tier.price,
        available_days,
        bookings,
        revenue,
        expenses: config.expenses,
        total_expenses,
        net_income,
        payback_years: tier.price / net_income,
        five_year_profit: net_income * 5.0 - tier.price,
        ten_year_profit: net_income * 10.0 - tier.price,
    }
}

/// Peak season is filled first; off-peak gets whatever rentable days
/// remain.  Nothing is clamped at zero.
fn available_days(input: &CalculatorInput) -> AvailableDays {
    let total = DAYS_PER_YEAR - i64::from(input.personal_use_days);
    let peak = i64::from(input.peak_season_days).min(total);
    let off_peak = i64::from(input.off_season_days).min(total - peak);
    AvailableDays {
        total,
        peak,
        off_peak,
    }
}

fn occupied_nights(days: i64, occupancy_pct: f64) -> i64 {
    (days as f64 * (occupancy_pct / 100.0)).floor() as i64
}

/// The engine together with its configuration, catalog and booking
/// policy.
///
/// A `Calculator` holds no per-request state; one instance can serve
/// any number of callers.
#[derive(Clone)]
pub struct Calculator {
    config: RoiConfig,
    catalog: TierCatalog,
    policy: Arc<dyn BookingPolicy>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(RoiConfig::default(), TierCatalog::default())
    }
}

impl Calculator {
    pub fn new(config: RoiConfig, catalog: TierCatalog) -> Self {
        let policy = config.booking_policy.policy();
        Self {
            config,
            catalog,
            policy,
        }
    }

    /// Use a custom booking policy instead of the configured one.
    pub fn with_policy(mut self, policy: Arc<dyn BookingPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &RoiConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TierCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> &dyn BookingPolicy {
        self.policy.as_ref()
    }

    pub fn compute(&self, input: &CalculatorInput) -> CalculationResult {
        self.compute_for_tier(input, self.catalog.get(input.tier))
    }

    fn compute_for_tier(&self, input: &CalculatorInput, tier: &ProductTier) -> CalculationResult {
        let result = compute_with(input, tier, &self.config, self.policy.as_ref());
        debug!(
            tier = %result.tier,
            policy = self.policy.name(),
            nights = result.bookings.total_nights,
            bookings = result.bookings.total_bookings,
            revenue = result.revenue.total,
            net_income = result.net_income,
            "computed ROI"
        );
        result
    }

    /// Compute many scenarios in parallel.  Results keep the order of
    /// `inputs`.
    pub fn compute_batch(&self, inputs: &[CalculatorInput]) -> Vec<CalculationResult> {
        inputs.par_iter().map(|input| self.compute(input)).collect()
    }

    /// Evaluate `input` against every tier in the catalog.
    ///
    /// With `keep_rate` unset each tier is priced at its own suggested
    /// nightly rate, as when a user clicks through the tier cards;
    /// otherwise the input's rate is kept for all of them.
    pub fn compare_tiers(&self, input: &CalculatorInput, keep_rate: bool) -> Vec<CalculationResult> {
        self.catalog
            .tiers()
            .par_iter()
            .map(|tier| {
                let mut scenario = input.clone();
                if keep_rate {
                    scenario.tier = tier.id;
                } else {
                    scenario.select_tier(tier);
                }
                self.compute_for_tier(&scenario, tier)
            })
            .collect()
    }
}
