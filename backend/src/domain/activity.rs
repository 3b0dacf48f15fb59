//! Activity log entities: daily inputs, stored records and report views.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::emissions::{AnnualActivity, Assessment};
use super::user::{Session, UserId, Username};

/// Upper bound for daily commute distance accepted from hosts, in km.
pub const MAX_DISTANCE_KM: f64 = 100.0;
/// Upper bound for monthly electricity accepted from hosts, in kWh.
pub const MAX_ELECTRICITY_KWH: f64 = 1000.0;
/// Upper bound for daily waste accepted from hosts, in kg.
pub const MAX_WASTE_KG: f64 = 100.0;

/// Host input outside the accepted bounds.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ActivityInputError {
    /// Value was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Offending input name.
        field: &'static str,
    },
    /// Value fell outside `0..=max`.
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        /// Offending input name.
        field: &'static str,
        /// Supplied value.
        value: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

fn bounded(field: &'static str, value: f64, max: f64) -> Result<f64, ActivityInputError> {
    if !value.is_finite() {
        return Err(ActivityInputError::NotFinite { field });
    }
    if !(0.0..=max).contains(&value) {
        return Err(ActivityInputError::OutOfRange { field, value, max });
    }
    Ok(value)
}

/// One day's sampled activity as collected by a host.
///
/// ## Invariants
/// - `distance_km` is within `0..=100`.
/// - `electricity_kwh` (monthly consumption) is within `0..=1000`.
/// - `waste_kg` is within `0..=100`.
///
/// # Examples
/// ```
/// use footprint::domain::DailyActivity;
///
/// let daily = DailyActivity::try_new(12.5, 240.0, 0.5, 3).unwrap();
/// assert_eq!(daily.meals(), 3);
/// assert!(DailyActivity::try_new(120.0, 0.0, 0.0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyActivity {
    distance_km: f64,
    electricity_kwh: f64,
    waste_kg: f64,
    meals: u32,
}

impl DailyActivity {
    /// Validate host input against the accepted bounds.
    pub fn try_new(
        distance_km: f64,
        electricity_kwh: f64,
        waste_kg: f64,
        meals: u32,
    ) -> Result<Self, ActivityInputError> {
        Ok(Self {
            distance_km: bounded("distance", distance_km, MAX_DISTANCE_KM)?,
            electricity_kwh: bounded("electricity", electricity_kwh, MAX_ELECTRICITY_KWH)?,
            waste_kg: bounded("waste", waste_kg, MAX_WASTE_KG)?,
            meals,
        })
    }

    /// Daily commute distance in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Monthly electricity consumption in kilowatt-hours.
    pub fn electricity_kwh(&self) -> f64 {
        self.electricity_kwh
    }

    /// Waste generated today in kilograms.
    pub fn waste_kg(&self) -> f64 {
        self.waste_kg
    }

    /// Meals eaten per day.
    pub fn meals(&self) -> u32 {
        self.meals
    }
}

/// Storage-assigned activity record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier read from storage.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value as stored in the `data.id` column.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record about to be appended to the activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityRecord {
    /// Owning user.
    pub user_id: UserId,
    /// Denormalized copy of the owner's username.
    pub username: Username,
    /// Calendar date of the submission.
    pub date: NaiveDate,
    /// Annualized activity values.
    pub annual: AnnualActivity,
    /// Total annual emissions in tonnes CO2e.
    pub total_emissions: f64,
}

impl NewActivityRecord {
    /// Build a record for `session` from an assessment taken on `date`.
    pub fn new(session: &Session, date: NaiveDate, assessment: &Assessment) -> Self {
        Self {
            user_id: session.user_id(),
            username: session.username().clone(),
            date,
            annual: assessment.annual,
            total_emissions: assessment.total_emissions,
        }
    }

    /// Attach the identifier assigned by storage.
    pub fn with_id(self, id: RecordId) -> ActivityRecord {
        let Self {
            user_id,
            username,
            date,
            annual,
            total_emissions,
        } = self;
        ActivityRecord {
            id,
            user_id,
            username,
            date,
            annual,
            total_emissions,
        }
    }
}

/// Immutable stored activity record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Storage-assigned identifier.
    pub id: RecordId,
    /// Owning user.
    pub user_id: UserId,
    /// Denormalized copy of the owner's username.
    pub username: Username,
    /// Calendar date of the submission.
    pub date: NaiveDate,
    /// Annualized activity values.
    #[serde(flatten)]
    pub annual: AnnualActivity,
    /// Total annual emissions in tonnes CO2e.
    pub total_emissions: f64,
}

/// Unknown report period label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report period {0:?}; expected daily, weekly, monthly or yearly")]
pub struct ParseReportPeriodError(String);

/// Report views offered to hosts.
///
/// All periods list the same unfiltered rows; the period only labels the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// Daily view.
    #[default]
    Daily,
    /// Weekly view.
    Weekly,
    /// Monthly view.
    Monthly,
    /// Yearly view.
    Yearly,
}

impl ReportPeriod {
    /// Every period, in menu order.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    /// Capitalised label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = ParseReportPeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseReportPeriodError(value.to_owned()))
    }
}

/// Rows rendered for one report view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// View the rows were requested for.
    pub period: ReportPeriod,
    /// Every record owned by the session user, in insertion order.
    pub records: Vec<ActivityRecord>,
}

impl Report {
    /// Heading shown above the table, e.g. `Reports (Weekly) Carbon Footprint`.
    pub fn title(&self) -> String {
        format!("Reports ({}) Carbon Footprint", self.period)
    }
}
