//! Booking policies.
//!
//! Occupied nights have to be turned into a number of bookings
//! because the cleaning fee is charged once per stay.  How that is
//! done is a business rule, so it sits behind the [`BookingPolicy`]
//! trait and the engine is handed whichever implementation the
//! configuration selects.

use crate::error::{Result, RoiError};
use crate::models::CalculatorInput;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Converts a season's occupied nights into bookings.
///
/// Policies must be `Send + Sync` because batch and tier-comparison
/// runs call them from several threads.
pub trait BookingPolicy: Send + Sync {
    /// Short name used in logs and configuration.
    fn name(&self) -> &str;
    /// Number of bookings covering `nights` occupied nights.
    fn bookings(&self, nights: i64, input: &CalculatorInput) -> i64;
}

/// Each booking lasts `average_stay_length_nights`; partial stays
/// are dropped.
pub struct StayLengthPolicy;

impl StayLengthPolicy {
    /// Stay length used for division.  Zero, negative and non-finite
    /// lengths count as a one-night stay, matching how the input form
    /// treats an empty field.
    pub fn effective_stay_length(input: &CalculatorInput) -> f64 {
        let nights = input.average_stay_length_nights;
        if nights.is_finite() && nights > 0.0 {
            nights
        } else {
            1.0
        }
    }
}

impl BookingPolicy for StayLengthPolicy {
    fn name(&self) -> &str {
        "stay_length"
    }

    fn bookings(&self, nights: i64, input: &CalculatorInput) -> i64 {
        (nights as f64 / Self::effective_stay_length(input)).floor() as i64
    }
}

/// Every occupied night is its own booking.
pub struct NightlyPolicy;

impl BookingPolicy for NightlyPolicy {
    fn name(&self) -> &str {
        "nightly"
    }

    fn bookings(&self, nights: i64, _input: &CalculatorInput) -> i64 {
        nights
    }
}

/// Configuration-level selector for a [`BookingPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPolicyKind {
    #[default]
    StayLength,
    Nightly,
}

impl BookingPolicyKind {
    pub fn policy(&self) -> Arc<dyn BookingPolicy> {
        match self {
            BookingPolicyKind::StayLength => Arc::new(StayLengthPolicy),
            BookingPolicyKind::Nightly => Arc::new(NightlyPolicy),
        }
    }
}

impl FromStr for BookingPolicyKind {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "stay_length" => Ok(BookingPolicyKind::StayLength),
            "nightly" => Ok(BookingPolicyKind::Nightly),
            other => Err(RoiError::Config {
                message: format!("unknown booking policy '{other}'"),
            }),
        }
    }
}
