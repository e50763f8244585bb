//! Group-and-count summarizers: disease patterns, demographic distributions,
//! workload ranking, and the stay/readmission scalars.

use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::models::{
    AgeGroupCount, DiseaseFrequency, GenderCount, MonthlyAdmissions, OperationStatusCount,
    StaffWorkload,
};

use super::{Derived, FallbackReason};

/// Fixed age brackets, in report order. Missing ages land in the last
/// bracket, the report's catch-all.
const AGE_BRACKETS: [&str; 5] = ["0-17", "18-30", "31-45", "46-60", "60+"];

pub const TOP_DISEASE_LIMIT: usize = 10;
pub const WORKLOAD_LIMIT: usize = 10;
pub const MONTHLY_WINDOW_MONTHS: u32 = 6;

// ---------------------------------------------------------------------------
// Disease patterns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseasePattern {
    pub disease: String,
    pub frequency: u32,
    pub percentage: f64,
    pub avg_age: u32,
}

/// Shape the ranked frequency rows for the report. Percentages are taken
/// against the sum over the returned (already limited) rows, not the full
/// population — see DESIGN.md. Zero total defines every percentage as 0.
pub fn top_diseases(rows: &[DiseaseFrequency], limit: usize) -> Vec<DiseasePattern> {
    let rows = &rows[..rows.len().min(limit)];
    let total: u32 = rows.iter().map(|r| r.frequency).sum();

    rows.iter()
        .map(|r| DiseasePattern {
            disease: r.disease.clone(),
            frequency: r.frequency,
            percentage: if total > 0 {
                round1(f64::from(r.frequency) / f64::from(total) * 100.0)
            } else {
                0.0
            },
            avg_age: r.avg_age,
        })
        .collect()
}

/// Top-N diseases from the medical history; empty on fetch failure.
pub fn disease_patterns(conn: &Connection, limit: usize) -> Derived<Vec<DiseasePattern>> {
    match db::get_disease_frequencies(conn, limit as u32) {
        Ok(rows) => Derived::computed(top_diseases(&rows, limit)),
        Err(e) => {
            tracing::warn!("Disease frequencies unavailable: {e}");
            Derived::degraded(Vec::new(), FallbackReason::DataUnavailable)
        }
    }
}

// ---------------------------------------------------------------------------
// Demographic distributions
// ---------------------------------------------------------------------------

/// Bucket recorded ages into the fixed brackets. Only non-empty brackets are
/// emitted, in bracket order.
pub fn age_distribution(ages: &[Option<u32>]) -> Vec<AgeGroupCount> {
    let mut counts = [0u32; AGE_BRACKETS.len()];
    for age in ages {
        let idx = match age {
            Some(a) if *a < 18 => 0,
            Some(a) if *a <= 30 => 1,
            Some(a) if *a <= 45 => 2,
            Some(a) if *a <= 60 => 3,
            _ => 4,
        };
        counts[idx] += 1;
    }

    AGE_BRACKETS
        .into_iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(bracket, count)| AgeGroupCount {
            age_group: bracket,
            count,
        })
        .collect()
}

pub fn patient_age_distribution(conn: &Connection) -> Derived<Vec<AgeGroupCount>> {
    match db::get_patient_ages(conn) {
        Ok(ages) => Derived::computed(age_distribution(&ages)),
        Err(e) => {
            tracing::warn!("Patient ages unavailable: {e}");
            Derived::degraded(Vec::new(), FallbackReason::DataUnavailable)
        }
    }
}

pub fn patient_gender_distribution(conn: &Connection) -> Derived<Vec<GenderCount>> {
    match db::get_gender_distribution(conn) {
        Ok(rows) => Derived::computed(rows),
        Err(e) => {
            tracing::warn!("Gender distribution unavailable: {e}");
            Derived::degraded(Vec::new(), FallbackReason::DataUnavailable)
        }
    }
}

pub fn monthly_admission_trend(conn: &Connection) -> Derived<Vec<MonthlyAdmissions>> {
    match db::get_monthly_admissions(conn, MONTHLY_WINDOW_MONTHS) {
        Ok(rows) => Derived::computed(rows),
        Err(e) => {
            tracing::warn!("Monthly admissions unavailable: {e}");
            Derived::degraded(Vec::new(), FallbackReason::DataUnavailable)
        }
    }
}

pub fn operation_statistics(conn: &Connection) -> Derived<Vec<OperationStatusCount>> {
    match db::get_operation_status_counts(conn) {
        Ok(rows) => Derived::computed(rows),
        Err(e) => {
            tracing::warn!("Operation statistics unavailable: {e}");
            Derived::degraded(Vec::new(), FallbackReason::DataUnavailable)
        }
    }
}

// ---------------------------------------------------------------------------
// Staff workload ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWorkload {
    pub staff_name: String,
    pub role_name: Option<String>,
    pub opd_count: u32,
    pub ot_count: u32,
    pub total_workload: u32,
}

/// Rank staff by combined assignment count, heaviest first. The sort is
/// stable, so ties keep the upstream row order.
pub fn rank_staff_workload(rows: &[StaffWorkload], limit: usize) -> Vec<RankedWorkload> {
    let mut ranked: Vec<RankedWorkload> = rows
        .iter()
        .map(|w| RankedWorkload {
            staff_name: w.staff_name.clone(),
            role_name: w.role_name.clone(),
            opd_count: w.opd_count,
            ot_count: w.ot_count,
            total_workload: w.total_workload(),
        })
        .collect();
    ranked.sort_by(|a, b| b.total_workload.cmp(&a.total_workload));
    ranked.truncate(limit);
    ranked
}

pub fn staff_workload_ranking(conn: &Connection, limit: usize) -> Derived<Vec<RankedWorkload>> {
    match db::get_staff_workloads(conn) {
        Ok(rows) => Derived::computed(rank_staff_workload(&rows, limit)),
        Err(e) => {
            tracing::warn!("Staff workloads unavailable: {e}");
            Derived::degraded(Vec::new(), FallbackReason::DataUnavailable)
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar aggregates
// ---------------------------------------------------------------------------

/// Mean stay in days over discharged admissions, one decimal; 0 when
/// nothing has been discharged.
pub fn average_stay(conn: &Connection) -> Derived<f64> {
    match db::get_average_stay_days(conn) {
        Ok(avg) => Derived::computed(round1(avg.unwrap_or(0.0))),
        Err(e) => {
            tracing::warn!("Stay durations unavailable: {e}");
            Derived::degraded(0.0, FallbackReason::DataUnavailable)
        }
    }
}

/// Share of admissions beyond each patient's first, as a percentage of the
/// distinct patient count. Zero patients define the rate as 0.
pub fn readmission_rate(total_patients: u32, total_admissions: u32) -> f64 {
    if total_patients == 0 {
        return 0.0;
    }
    let rate = (f64::from(total_admissions) - f64::from(total_patients))
        / f64::from(total_patients)
        * 100.0;
    round1(rate.max(0.0))
}

pub fn hospital_readmission_rate(conn: &Connection) -> Derived<f64> {
    match db::get_admission_totals(conn) {
        Ok((patients, admissions)) => Derived::computed(readmission_rate(patients, admissions)),
        Err(e) => {
            tracing::warn!("Admission totals unavailable: {e}");
            Derived::degraded(0.0, FallbackReason::DataUnavailable)
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::test_support::{seed_history, seed_patient};

    fn row(disease: &str, frequency: u32) -> DiseaseFrequency {
        DiseaseFrequency {
            disease: disease.into(),
            frequency,
            avg_age: 40,
        }
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let patterns = top_diseases(&[row("fever", 7), row("asthma", 2), row("cardiac", 1)], 10);
        let total: f64 = patterns.iter().map(|p| p.percentage).sum();
        assert!((total - 100.0).abs() <= 0.1, "got {total}");
    }

    #[test]
    fn percentage_denominator_is_limited_rows() {
        // Limit drops the third row; the remaining two split 100% between them.
        let patterns = top_diseases(&[row("fever", 6), row("asthma", 2), row("cardiac", 2)], 2);
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].percentage, 75.0);
        assert_eq!(patterns[1].percentage, 25.0);
    }

    #[test]
    fn empty_rows_yield_empty_patterns() {
        assert!(top_diseases(&[], 10).is_empty());
    }

    #[test]
    fn zero_total_defines_zero_percentages() {
        let patterns = top_diseases(&[row("fever", 0)], 10);
        assert_eq!(patterns[0].percentage, 0.0);
    }

    #[test]
    fn age_brackets_in_fixed_order() {
        let ages = vec![Some(3), Some(25), Some(44), Some(60), Some(61), None];
        let dist = age_distribution(&ages);
        let brackets: Vec<&str> = dist.iter().map(|d| d.age_group).collect();
        assert_eq!(brackets, vec!["0-17", "18-30", "31-45", "46-60", "60+"]);
        // 61 and the missing age both land in the catch-all
        assert_eq!(dist[4].count, 2);
    }

    #[test]
    fn empty_brackets_are_omitted() {
        let dist = age_distribution(&[Some(70), Some(75)]);
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].age_group, "60+");
        assert_eq!(dist[0].count, 2);
    }

    #[test]
    fn workload_ranking_is_stable_on_ties() {
        let rows = vec![
            StaffWorkload {
                staff_name: "A".into(),
                role_name: None,
                opd_count: 2,
                ot_count: 1,
            },
            StaffWorkload {
                staff_name: "B".into(),
                role_name: None,
                opd_count: 1,
                ot_count: 2,
            },
            StaffWorkload {
                staff_name: "C".into(),
                role_name: None,
                opd_count: 5,
                ot_count: 0,
            },
        ];
        let ranked = rank_staff_workload(&rows, 10);
        assert_eq!(ranked[0].staff_name, "C");
        assert_eq!(ranked[1].staff_name, "A");
        assert_eq!(ranked[2].staff_name, "B");
        assert_eq!(ranked[0].total_workload, 5);
    }

    #[test]
    fn workload_ranking_truncates() {
        let rows: Vec<StaffWorkload> = (0..15)
            .map(|i| StaffWorkload {
                staff_name: format!("S{i}"),
                role_name: None,
                opd_count: i,
                ot_count: 0,
            })
            .collect();
        assert_eq!(rank_staff_workload(&rows, 10).len(), 10);
    }

    #[test]
    fn readmission_rate_rounds_and_floors() {
        assert_eq!(readmission_rate(4, 6), 50.0);
        assert_eq!(readmission_rate(3, 10), 233.3);
        assert_eq!(readmission_rate(5, 5), 0.0);
        assert_eq!(readmission_rate(0, 0), 0.0);
    }

    #[test]
    fn disease_patterns_facade_over_seeded_store() {
        let conn = open_memory_database().unwrap();
        let a = seed_patient(&conn, "A", Some(30), "male");
        let b = seed_patient(&conn, "B", Some(50), "female");
        seed_history(&conn, a, "fever", "-1 days");
        seed_history(&conn, b, "fever", "-2 days");
        seed_history(&conn, a, "asthma", "-3 days");

        let patterns = disease_patterns(&conn, 10);
        assert!(!patterns.is_fallback());
        assert_eq!(patterns.value[0].disease, "fever");
        assert_eq!(patterns.value[0].percentage, 66.7);
        assert_eq!(patterns.value[1].percentage, 33.3);
    }

    #[test]
    fn facades_degrade_on_broken_store() {
        let conn = open_memory_database().unwrap();
        conn.execute_batch("DROP TABLE medical_history; DROP TABLE patients;")
            .unwrap();

        assert_eq!(
            disease_patterns(&conn, 10).fallback,
            Some(FallbackReason::DataUnavailable)
        );
        assert_eq!(
            patient_age_distribution(&conn).fallback,
            Some(FallbackReason::DataUnavailable)
        );
        assert_eq!(
            patient_gender_distribution(&conn).fallback,
            Some(FallbackReason::DataUnavailable)
        );
    }
}
