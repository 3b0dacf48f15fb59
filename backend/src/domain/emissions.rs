//! Emission calculator.
//!
//! Converts sampled daily activity into annual CO2-equivalent emissions using
//! a fixed table of per-region emission factors. The calculation is pure: no
//! validation, no clock, no storage.

use serde::Serialize;
use thiserror::Error;

use super::activity::DailyActivity;

/// Region used by hosts when none is configured.
pub const DEFAULT_REGION: &str = "India";

/// Days per year used to annualize commute distance and meals.
pub const DAYS_PER_YEAR: u32 = 365;
/// Months per year used to annualize electricity consumption.
pub const MONTHS_PER_YEAR: u32 = 12;
/// Weeks per year used to annualize waste.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Kilograms per tonne; totals are reported in tonnes.
const KG_PER_TONNE: f64 = 1000.0;

/// Per-unit emission coefficients for one region (kg CO2e per unit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    /// Per kilometre travelled.
    pub transportation: f64,
    /// Per kilowatt-hour consumed.
    pub electricity: f64,
    /// Per meal eaten.
    pub diet: f64,
    /// Per kilogram of waste.
    pub waste: f64,
}

static EMISSION_FACTORS: &[(&str, EmissionFactors)] = &[(
    "India",
    EmissionFactors {
        transportation: 0.14,
        electricity: 0.82,
        diet: 1.25,
        waste: 0.1,
    },
)];

/// Lookup miss in the emission factor table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no emission factors registered for region {region:?}")]
pub struct UnknownRegion {
    region: String,
}

impl UnknownRegion {
    /// Region key that was requested.
    pub fn region(&self) -> &str {
        self.region.as_str()
    }
}

impl EmissionFactors {
    /// Look up the factors registered for `region`.
    ///
    /// Keys are matched exactly, including case.
    pub fn for_region(region: &str) -> Result<&'static Self, UnknownRegion> {
        EMISSION_FACTORS
            .iter()
            .find(|(key, _)| *key == region)
            .map(|(_, factors)| factors)
            .ok_or_else(|| UnknownRegion {
                region: region.to_owned(),
            })
    }

    /// Region keys with registered factors.
    pub fn regions() -> impl Iterator<Item = &'static str> {
        EMISSION_FACTORS.iter().map(|(key, _)| *key)
    }

    /// Total annual emissions in tonnes, rounded to two decimals.
    fn annual_total(
        &self,
        distance_annual: f64,
        electricity_annual: f64,
        meals_annual: f64,
        waste_annual: f64,
    ) -> f64 {
        let transportation = self.transportation * distance_annual;
        let electricity = self.electricity * electricity_annual;
        let diet = self.diet * meals_annual;
        let waste = self.waste * waste_annual;
        round_to_hundredths((transportation + electricity + diet + waste) / KG_PER_TONNE)
    }
}

/// Activity scaled to a full year, as persisted on each record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualActivity {
    /// Kilometres travelled per year.
    pub distance: f64,
    /// Kilowatt-hours consumed per year.
    pub electricity: f64,
    /// Kilograms of waste per year.
    pub waste: f64,
    /// Meals eaten per year.
    pub meals: u64,
}

impl AnnualActivity {
    /// Annualize sampled daily activity.
    pub fn from_daily(daily: &DailyActivity) -> Self {
        Self {
            distance: daily.distance_km() * f64::from(DAYS_PER_YEAR),
            electricity: daily.electricity_kwh() * f64::from(MONTHS_PER_YEAR),
            waste: daily.waste_kg() * f64::from(WEEKS_PER_YEAR),
            meals: u64::from(daily.meals()) * u64::from(DAYS_PER_YEAR),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "annual meal counts stay far below 2^53"
    )]
    fn meals_as_f64(&self) -> f64 {
        self.meals as f64
    }
}

/// Annualized activity paired with its total emissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    /// Annualized activity values.
    pub annual: AnnualActivity,
    /// Total annual emissions in tonnes CO2e, rounded to two decimals.
    pub total_emissions: f64,
}

/// Assess validated daily activity against a region's factors.
pub fn assess(region: &str, daily: &DailyActivity) -> Result<Assessment, UnknownRegion> {
    let factors = EmissionFactors::for_region(region)?;
    let annual = AnnualActivity::from_daily(daily);
    let total_emissions = factors.annual_total(
        annual.distance,
        annual.electricity,
        annual.meals_as_f64(),
        annual.waste,
    );
    Ok(Assessment {
        annual,
        total_emissions,
    })
}

/// Compute total annual emissions from raw sampled inputs.
///
/// Inputs are not validated; negative values produce negative totals.
///
/// # Examples
/// ```
/// use footprint::domain::emissions::compute;
///
/// let total = compute("India", 10.0, 100.0, 1.0, 2.0).unwrap();
/// assert_eq!(total, 2.41);
/// ```
pub fn compute(
    region: &str,
    distance_daily: f64,
    electricity_monthly: f64,
    waste_daily: f64,
    meals_daily: f64,
) -> Result<f64, UnknownRegion> {
    let factors = EmissionFactors::for_region(region)?;
    Ok(factors.annual_total(
        distance_daily * f64::from(DAYS_PER_YEAR),
        electricity_monthly * f64::from(MONTHS_PER_YEAR),
        meals_daily * f64::from(DAYS_PER_YEAR),
        waste_daily * f64::from(WEEKS_PER_YEAR),
    ))
}

/// Round to two decimals, ties to even on the exact binary value.
///
/// Formatting with a fixed precision is correctly rounded, so reparsing the
/// text yields the nearest double to the decimal result.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the emission formula.
    use super::*;
    use rstest::rstest;

    fn daily(distance: f64, electricity: f64, waste: f64, meals: u32) -> DailyActivity {
        DailyActivity::try_new(distance, electricity, waste, meals).expect("valid daily activity")
    }

    #[rstest]
    fn reference_example_rounds_to_two_decimals() {
        let total = compute("India", 10.0, 100.0, 1.0, 2.0).expect("India is registered");
        assert_eq!(total, 2.41);
    }

    #[rstest]
    #[case(0.0, 0.0, 0.0, 0.0, 0.0)]
    #[case(100.0, 1000.0, 100.0, 3.0, 16.84)]
    #[case(0.5, 0.0, 0.0, 0.0, 0.03)]
    #[case(0.0, 0.0, 0.0, 1.0, 0.46)]
    fn totals_match_formula(
        #[case] distance: f64,
        #[case] electricity: f64,
        #[case] waste: f64,
        #[case] meals: f64,
        #[case] expected: f64,
    ) {
        let total = compute("India", distance, electricity, waste, meals).expect("known region");
        assert_eq!(total, expected);
    }

    #[rstest]
    fn negative_inputs_are_not_rejected() {
        let total = compute("India", -10.0, 0.0, 0.0, 0.0).expect("known region");
        assert_eq!(total, -0.51);
    }

    #[rstest]
    fn compute_is_deterministic() {
        let first = compute("India", 12.5, 240.0, 0.5, 3.0).expect("known region");
        let second = compute("India", 12.5, 240.0, 0.5, 3.0).expect("known region");
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[rstest]
    #[case("india")]
    #[case("")]
    #[case("Atlantis")]
    fn unknown_regions_fail(#[case] region: &str) {
        let err = compute(region, 1.0, 1.0, 1.0, 1.0).expect_err("unregistered region");
        assert_eq!(err.region(), region);
        assert!(err.to_string().contains("no emission factors"));
    }

    #[rstest]
    fn annualization_uses_fixed_multipliers() {
        let annual = AnnualActivity::from_daily(&daily(10.0, 100.0, 1.0, 2));
        assert_eq!(annual.distance, 3650.0);
        assert_eq!(annual.electricity, 1200.0);
        assert_eq!(annual.waste, 52.0);
        assert_eq!(annual.meals, 730);
    }

    #[rstest]
    fn assess_agrees_with_compute() {
        let assessment = assess("India", &daily(10.0, 100.0, 1.0, 2)).expect("known region");
        let total = compute("India", 10.0, 100.0, 1.0, 2.0).expect("known region");
        assert_eq!(assessment.total_emissions, total);
    }

    #[rstest]
    #[case(0.125, 0.12)]
    #[case(0.375, 0.38)]
    #[case(2.4127, 2.41)]
    #[case(-0.505, -0.51)]
    fn rounding_matches_decimal_round_half_even(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_to_hundredths(value), expected);
    }

    #[rstest]
    fn india_is_the_only_registered_region() {
        assert_eq!(EmissionFactors::regions().collect::<Vec<_>>(), vec![DEFAULT_REGION]);
    }
}
