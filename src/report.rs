use std::fmt::Write;

use crate::matcher::MatchResult;
use crate::models::{ReportEntry, ScoreVector, SummaryResult};
use crate::taxonomy::CATEGORIES;

pub fn build_report(
    scope_label: &str,
    reports: &[ReportEntry],
    scores: &ScoreVector,
    matches: &[MatchResult],
    summary: &SummaryResult,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# OJT Program Outcome Report");
    let _ = writeln!(output, "Generated for {scope_label}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Outcome Scores");

    let total_hits: usize = matches.iter().map(|m| m.hit_count).sum();
    if total_hits == 0 {
        let _ = writeln!(output, "No outcome keywords matched in this window.");
    } else {
        for result in matches {
            let category = &CATEGORIES[result.category_index];
            let score = scores[result.category_index];
            if result.hit_count == 0 {
                let _ = writeln!(output, "- ({}) {}: 0%", category.code, category.label);
            } else {
                let _ = writeln!(
                    output,
                    "- ({}) {}: {}% (matched: {})",
                    category.code,
                    category.label,
                    score,
                    result.matched_triggers.join(", ")
                );
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let provenance = if summary.used_external_generation {
        "generated"
    } else {
        "heuristic"
    };
    let _ = writeln!(output, "_{provenance}_");
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", summary.text);

    let mut recent = reports.to_vec();
    // Row id as tiebreak keeps the listing stable across runs.
    recent.sort_by(|a, b| b.report_date.cmp(&a.report_date).then(a.id.cmp(&b.id)));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Journal Entries");

    if recent.is_empty() {
        let _ = writeln!(output, "No journal entries recorded for this scope.");
    } else {
        for entry in recent.iter().take(5) {
            let marker = if entry.excused { " [excused]" } else { "" };
            let _ = writeln!(
                output,
                "- {} ({}, {}, week {}) on {}, {:.1}h{}: {}",
                entry.student_name,
                entry.student_no,
                entry.section,
                entry.week_number,
                entry.report_date,
                entry.hours,
                marker,
                entry.activities
            );
        }
    }

    output
}
