use tracing::{debug, warn};

use crate::cache::LearningCache;
use crate::dedupe;
use crate::llm::TextGenerator;
use crate::models::{ReportEntry, SummaryMode, SummaryResult};

/// Local-fallback text is clipped to this many characters in raw and
/// chairman modes. Coordinator prose is never clipped.
pub const FALLBACK_MAX_CHARS: usize = 240;

const NO_ENTRIES: &str = "No journal entries found.";
const NO_DATA: &str = "No data available";

/// Who the summary is for. Coordinator mode reads learnings only and
/// deduplicates them; raw and chairman modes keep the full activity log
/// verbatim. That asymmetry is deliberate: coordinators review reflection,
/// the chairman view is an activity digest.
#[derive(Debug)]
pub struct SummaryScope<'a> {
    pub student_no: Option<&'a str>,
    pub week: Option<i32>,
    pub section: Option<&'a str>,
    pub mode: SummaryMode,
    pub use_llm: bool,
}

/// Produces a best-effort summary; never fails. The chain is ordered and the
/// order is load-bearing: a live cache entry short-circuits the external
/// call, and the external call is attempted at most once before the local
/// fallback.
pub async fn summarize<G: TextGenerator>(
    reports: &[ReportEntry],
    scope: &SummaryScope<'_>,
    cache: &LearningCache,
    generator: Option<&G>,
) -> SummaryResult {
    cache.purge_expired();

    if let Some(payload) = cached_payload(scope, cache) {
        debug!(
            student = ?scope.student_no,
            week = ?scope.week,
            section = ?scope.section,
            "using cached learnings"
        );
        return local_result(&payload, scope.mode);
    }

    let chunks = derive_chunks(reports, scope.mode);
    if chunks.is_empty() {
        return SummaryResult {
            text: empty_literal(scope.mode).to_string(),
            used_external_generation: false,
        };
    }

    if let (Some(student_no), Some(week)) = (scope.student_no, scope.week) {
        cache.put(student_no, week, chunks.clone());
    }

    if scope.use_llm {
        if let Some(generator) = generator {
            let raw_text = assemble(&chunks, scope.mode);
            match generator
                .generate(system_instruction(scope.mode), &raw_text)
                .await
            {
                Ok(text) => {
                    return SummaryResult {
                        text,
                        used_external_generation: true,
                    }
                }
                Err(err) => {
                    warn!(error = %err, "external generation failed, using local fallback")
                }
            }
        }
    }

    local_result(&chunks, scope.mode)
}

fn cached_payload(scope: &SummaryScope<'_>, cache: &LearningCache) -> Option<Vec<String>> {
    let student_no = scope.student_no?;
    let week = scope.week?;
    cache.get(student_no, week)
}

/// Text chunks derived from non-excused entries, per mode.
fn derive_chunks(reports: &[ReportEntry], mode: SummaryMode) -> Vec<String> {
    let included = reports.iter().filter(|r| !r.excused);

    match mode {
        SummaryMode::Coordinator => {
            let learnings = included
                .map(|r| r.learnings.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            dedupe::dedupe(&dedupe::split_sentences(&learnings))
        }
        SummaryMode::Raw | SummaryMode::Chairman => included
            .map(|r| format!("{} {}", r.activities.trim(), r.learnings.trim()))
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect(),
    }
}

fn assemble(chunks: &[String], mode: SummaryMode) -> String {
    match mode {
        SummaryMode::Coordinator => dedupe::to_prose(chunks),
        SummaryMode::Raw | SummaryMode::Chairman => chunks.join(" "),
    }
}

fn local_result(chunks: &[String], mode: SummaryMode) -> SummaryResult {
    let text = match mode {
        SummaryMode::Coordinator => dedupe::to_prose(chunks),
        SummaryMode::Raw | SummaryMode::Chairman => {
            chunks.join(" ").chars().take(FALLBACK_MAX_CHARS).collect()
        }
    };
    SummaryResult {
        text,
        used_external_generation: false,
    }
}

fn empty_literal(mode: SummaryMode) -> &'static str {
    match mode {
        SummaryMode::Raw | SummaryMode::Coordinator => NO_ENTRIES,
        SummaryMode::Chairman => NO_DATA,
    }
}

fn system_instruction(mode: SummaryMode) -> &'static str {
    match mode {
        SummaryMode::Raw => {
            "Summarize the following weekly internship journal entries in two or three \
             sentences. Keep concrete activities and tools."
        }
        SummaryMode::Coordinator => {
            "You are helping an internship coordinator review a student's weekly journal. \
             Summarize the learnings below, focusing on skills gained and areas needing \
             guidance, in at most three sentences."
        }
        SummaryMode::Chairman => {
            "You are preparing a department-level digest of internship activity for the \
             chairman. Summarize the entries below at a high level in at most three \
             sentences."
        }
    }
}
