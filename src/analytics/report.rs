//! Assembly of the analytics view: every derived figure the presentation
//! layer renders, produced in one pass over the store.

use rusqlite::Connection;
use serde::Serialize;

use crate::insights::{InsightService, TextGenerator};
use crate::models::{AgeGroupCount, GenderCount, MonthlyAdmissions, OperationStatusCount};

use super::advisor::{resource_suggestions, Advisory};
use super::forecast::{occupancy_forecast, OccupancyForecast};
use super::patterns::{
    average_stay, disease_patterns, hospital_readmission_rate, monthly_admission_trend,
    operation_statistics, patient_age_distribution, patient_gender_distribution,
    staff_workload_ranking, DiseasePattern, RankedWorkload, TOP_DISEASE_LIMIT, WORKLOAD_LIMIT,
};
use super::Derived;

pub const FORECAST_HORIZON_DAYS: u32 = 7;

#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub bed_forecast: Derived<Vec<OccupancyForecast>>,
    pub disease_patterns: Derived<Vec<DiseasePattern>>,
    pub optimization_suggestions: Derived<Vec<Advisory>>,
    pub age_distribution: Derived<Vec<AgeGroupCount>>,
    pub gender_distribution: Derived<Vec<GenderCount>>,
    pub monthly_admissions: Derived<Vec<MonthlyAdmissions>>,
    pub operation_stats: Derived<Vec<OperationStatusCount>>,
    pub staff_workload: Derived<Vec<RankedWorkload>>,
    pub average_stay_days: Derived<f64>,
    pub readmission_rate_pct: Derived<f64>,
    /// Present only when an insight service was supplied and there are
    /// disease patterns to narrate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_summary: Option<Derived<String>>,
}

/// Assemble the full analytics view. Every section degrades independently;
/// one broken table never empties the rest of the report.
pub fn assemble_analytics_report<G: TextGenerator>(
    conn: &Connection,
    insights: Option<&InsightService<G>>,
) -> AnalyticsReport {
    let disease_patterns = disease_patterns(conn, TOP_DISEASE_LIMIT);

    let trend_summary = insights.and_then(|svc| {
        if disease_patterns.value.is_empty() {
            None
        } else {
            Some(svc.analyze_trends(&disease_patterns.value))
        }
    });

    AnalyticsReport {
        bed_forecast: occupancy_forecast(conn, FORECAST_HORIZON_DAYS),
        optimization_suggestions: resource_suggestions(conn),
        age_distribution: patient_age_distribution(conn),
        gender_distribution: patient_gender_distribution(conn),
        monthly_admissions: monthly_admission_trend(conn),
        operation_stats: operation_statistics(conn),
        staff_workload: staff_workload_ranking(conn, WORKLOAD_LIMIT),
        average_stay_days: average_stay(conn),
        readmission_rate_pct: hospital_readmission_rate(conn),
        trend_summary,
        disease_patterns,
    }
}
