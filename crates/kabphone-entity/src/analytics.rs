//! Admin analytics payloads.

use serde::{Deserialize, Serialize};

/// Income totals from `GET /orders/total-income`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalIncome {
    /// Today.
    #[serde(default)]
    pub total_income_day: f64,
    /// Last 7 days.
    #[serde(default)]
    pub total_income_week: f64,
    /// Last 30 days.
    #[serde(default)]
    pub total_income_month: f64,
    /// Last 365 days.
    #[serde(default)]
    pub total_income_year: f64,
}

impl TotalIncome {
    /// `(label, amount)` rows for display.
    pub fn rows(&self) -> [(&'static str, f64); 4] {
        [
            ("Day", self.total_income_day),
            ("Week", self.total_income_week),
            ("Month", self.total_income_month),
            ("Year", self.total_income_year),
        ]
    }
}

/// Brand and model of a ranked phone. Empty when no sales fall in the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneSummary {
    /// Manufacturer.
    #[serde(default)]
    pub brand_name: String,
    /// Model.
    #[serde(default)]
    pub model_name: String,
}

impl PhoneSummary {
    /// "Brand Model", or `None` for a period without sales.
    pub fn label(&self) -> Option<String> {
        if self.brand_name.is_empty() && self.model_name.is_empty() {
            None
        } else {
            Some(format!("{} {}", self.brand_name, self.model_name))
        }
    }
}

/// Best and worst sellers from `GET /orders/best-worst-phones`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestWorstPhones {
    /// Best seller today.
    #[serde(default)]
    pub best_phone_day: PhoneSummary,
    /// Best seller over 7 days.
    #[serde(default)]
    pub best_phone_week: PhoneSummary,
    /// Best seller over 30 days.
    #[serde(default)]
    pub best_phone_month: PhoneSummary,
    /// Best seller over 365 days.
    #[serde(default)]
    pub best_phone_year: PhoneSummary,
    /// Worst seller today.
    #[serde(default)]
    pub worst_phone_day: PhoneSummary,
    /// Worst seller over 7 days.
    #[serde(default)]
    pub worst_phone_week: PhoneSummary,
    /// Worst seller over 30 days.
    #[serde(default)]
    pub worst_phone_month: PhoneSummary,
    /// Worst seller over 365 days.
    #[serde(default)]
    pub worst_phone_year: PhoneSummary,
}

impl BestWorstPhones {
    /// `(period, best, worst)` rows for display.
    pub fn rows(&self) -> [(&'static str, &PhoneSummary, &PhoneSummary); 4] {
        [
            ("Day", &self.best_phone_day, &self.worst_phone_day),
            ("Week", &self.best_phone_week, &self.worst_phone_week),
            ("Month", &self.best_phone_month, &self.worst_phone_month),
            ("Year", &self.best_phone_year, &self.worst_phone_year),
        ]
    }
}
