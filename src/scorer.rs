use crate::matcher::{self, MatchResult};
use crate::models::{ReportEntry, ScoreVector};
use crate::taxonomy::{CATEGORIES, OUTCOME_COUNT};

/// Runs the matcher for every category against the lower-cased concatenation
/// of all reports' activities and learnings.
pub fn match_reports(reports: &[ReportEntry]) -> Vec<MatchResult> {
    let blob = reports
        .iter()
        .map(|r| format!("{} {}", r.activities, r.learnings))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, category)| matcher::match_category(&blob, i, category))
        .collect()
}

pub fn compute_scores(reports: &[ReportEntry]) -> ScoreVector {
    let hits: Vec<usize> = match_reports(reports).iter().map(|m| m.hit_count).collect();
    score_counts(&hits)
}

/// Converts per-category hit counts into percentages of total hits.
///
/// Rounding is `f64::round`, half away from zero, which for these
/// non-negative ratios is round-half-up. Each category rounds independently,
/// so the vector sum may land on 99 or 101; no remainder redistribution.
pub fn score_counts(hits: &[usize]) -> ScoreVector {
    let mut scores = [0u8; OUTCOME_COUNT];
    let total: usize = hits.iter().sum();
    if total == 0 {
        return scores;
    }

    for (i, count) in hits.iter().enumerate().take(OUTCOME_COUNT) {
        scores[i] = ((100.0 * *count as f64) / total as f64).round() as u8;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_report(activities: &str, learnings: &str) -> ReportEntry {
        ReportEntry {
            id: Uuid::new_v4(),
            student_no: "2023-00117".to_string(),
            student_name: "Avery Lee".to_string(),
            section: "BSIT-4A".to_string(),
            week_number: 3,
            report_date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            hours: 40.0,
            excused: false,
            activities: activities.to_string(),
            learnings: learnings.to_string(),
        }
    }

    #[test]
    fn zero_hits_yield_all_zeros() {
        let scores = score_counts(&[0; OUTCOME_COUNT]);
        assert_eq!(scores, [0u8; OUTCOME_COUNT]);
    }

    #[test]
    fn single_positive_category_takes_all() {
        let mut hits = [0usize; OUTCOME_COUNT];
        hits[4] = 3;
        let scores = score_counts(&hits);
        assert_eq!(scores[4], 100);
        assert_eq!(scores.iter().map(|s| *s as u32).sum::<u32>(), 100);
    }

    #[test]
    fn thirds_round_to_nearest() {
        let mut hits = [0usize; OUTCOME_COUNT];
        hits[0] = 1;
        hits[1] = 2;
        let scores = score_counts(&hits);
        assert_eq!(scores[0], 33);
        assert_eq!(scores[1], 67);
    }

    #[test]
    fn half_percent_rounds_up() {
        let mut hits = [0usize; OUTCOME_COUNT];
        hits[0] = 1;
        hits[1] = 7;
        let scores = score_counts(&hits);
        assert_eq!(scores[0], 13);
        assert_eq!(scores[1], 88);
    }

    #[test]
    fn independent_rounding_may_miss_100_by_one() {
        let mut hits = [0usize; OUTCOME_COUNT];
        hits[0] = 1;
        hits[1] = 1;
        hits[2] = 1;
        let scores = score_counts(&hits);
        let sum: u32 = scores.iter().map(|s| *s as u32).sum();
        assert!((99..=101).contains(&sum), "sum was {sum}");
    }

    #[test]
    fn every_score_is_a_valid_percentage() {
        let hits: Vec<usize> = (0..OUTCOME_COUNT).collect();
        let scores = score_counts(&hits);
        assert_eq!(scores.len(), OUTCOME_COUNT);
        assert!(scores.iter().all(|s| *s <= 100));
    }

    #[test]
    fn database_journal_scores_solution_design() {
        let reports = vec![sample_report(
            "Built a database schema",
            "Learned SQL design patterns",
        )];
        let matches = match_reports(&reports);
        // Category 'c' carries design/implement/build.
        let design = &matches[2];
        assert!(design.hit_count >= 1);
        assert!(design.matched_triggers.contains(&"design"));

        let scores = compute_scores(&reports);
        assert!(scores[2] > 0);
    }

    #[test]
    fn empty_reports_score_all_zeros() {
        let scores = compute_scores(&[]);
        assert_eq!(scores, [0u8; OUTCOME_COUNT]);
    }
}
