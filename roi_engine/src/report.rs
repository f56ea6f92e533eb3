//! Display helpers for calculation results.
//!
//! Amounts are shown in whole Australian dollars.  A payback period
//! that is negative, zero or not finite means the home never pays for
//! itself, and is shown as such rather than as a number.

use crate::models::{CalculationResult, ProductTier};
use std::fmt;

/// Format an amount as whole dollars, e.g. `$51,185` or `-$3,500`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `"2.2 years"`, or `"never"` when the investment is not recovered.
pub fn format_payback(years: f64) -> String {
    if years.is_finite() && years > 0.0 {
        format!("{years:.1} years")
    } else {
        "never".to_string()
    }
}

/// Plain-text summary of a result, laid out like the calculator's
/// results panel.
pub fn render(result: &CalculationResult, tier: &ProductTier) -> String {
    Report { result, tier }.to_string()
}

/// One line per tier, for comparing the catalog side by side.
pub fn render_comparison(results: &[CalculationResult]) -> String {
    Comparison(results).to_string()
}

struct Report<'a> {
    result: &'a CalculationResult,
    tier: &'a ProductTier,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report { result, tier } = self;
        let b = &result.bookings;
        let r = &result.revenue;

        writeln!(
            f,
            "{} model ({}) - {}",
            tier.id,
            tier.dimensions,
            format_currency(tier.price)
        )?;
        writeln!(f, "{}", tier.description)?;
        writeln!(f)?;
        writeln!(f, "Annual revenue     {:>14}", format_currency(r.total))?;
        writeln!(f, "Net income         {:>14}", format_currency(result.net_income))?;
        writeln!(f, "Payback period     {:>14}", format_payback(result.payback_years))?;
        writeln!(f, "5-year profit      {:>14}", format_currency(result.five_year_profit))?;
        writeln!(f, "10-year profit     {:>14}", format_currency(result.ten_year_profit))?;
        writeln!(f)?;
        writeln!(f, "Revenue breakdown")?;
        writeln!(
            f,
            "  Peak season nights ({})  {}",
            b.peak_nights,
            format_currency(r.peak_room)
        )?;
        writeln!(
            f,
            "  Off-peak nights ({})  {}",
            b.off_peak_nights,
            format_currency(r.off_peak_room)
        )?;
        writeln!(
            f,
            "  Cleaning fees ({} stays)  {}",
            b.total_bookings,
            format_currency(r.cleaning)
        )?;
        writeln!(f, "  Total revenue  {}", format_currency(r.total))?;
        writeln!(f, "  Annual expenses  -{}", format_currency(result.total_expenses))?;
        writeln!(f, "  Net income  {}", format_currency(result.net_income))
    }
}

struct Comparison<'a>(&'a [CalculationResult]);

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>10} {:>12} {:>12} {:>12} {:>12}",
            "tier", "price", "revenue", "net income", "payback", "10-year"
        )?;
        for result in self.0 {
            writeln!(
                f,
                "{:<10} {:>10} {:>12} {:>12} {:>12} {:>12}",
                result.tier.as_str(),
                format_currency(result.tier_price),
                format_currency(result.revenue.total),
                format_currency(result.net_income),
                format_payback(result.payback_years),
                format_currency(result.ten_year_profit),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TierCatalog;
    use crate::engine::{compute, Calculator};
    use crate::models::{CalculatorInput, TierId};

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(51_185.0), "$51,185");
        assert_eq!(format_currency(105_000.0), "$105,000");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.5), "$1,001");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-3_500.0), "-$3,500");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(f64::NAN), "n/a");
    }

    #[test]
    fn test_format_payback() {
        assert_eq!(format_payback(105_000.0 / 47_685.0), "2.2 years");
        assert_eq!(format_payback(-30.0), "never");
        assert_eq!(format_payback(f64::INFINITY), "never");
        assert_eq!(format_payback(f64::NAN), "never");
    }

    #[test]
    fn test_render_default_scenario() {
        let catalog = TierCatalog::default();
        let result = compute(&CalculatorInput::default());
        let text = render(&result, catalog.get(TierId::Backyard));

        assert!(text.starts_with("backyard model"));
        assert!(text.contains("$51,185"));
        assert!(text.contains("2.2 years"));
        assert!(text.contains("Cleaning fees (91 stays)  $5,915"));
        assert!(text.contains("-$3,500"));
    }

    #[test]
    fn test_render_loss_making_scenario() {
        let catalog = TierCatalog::default();
        let input = CalculatorInput {
            peak_occupancy_pct: 0.0,
            off_peak_occupancy_pct: 0.0,
            ..CalculatorInput::default()
        };
        let text = render(&compute(&input), catalog.get(TierId::Backyard));
        assert!(text.contains("never"));
        assert!(text.contains("-$3,500"));
    }

    #[test]
    fn test_render_comparison_has_a_row_per_tier() {
        let results = Calculator::default().compare_tiers(&CalculatorInput::default(), false);
        let text = render_comparison(&results);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("tier"));
        assert!(lines[2].starts_with("backyard"));
        assert!(lines[2].contains("$47,685"));
        assert!(text.ends_with('\n'));
    }
}
