use chrono::NaiveDate;
use uuid::Uuid;

use crate::taxonomy::OUTCOME_COUNT;

/// One weekly journal row, read-only once fetched.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub id: Uuid,
    pub student_no: String,
    pub student_name: String,
    pub section: String,
    pub week_number: i32,
    pub report_date: NaiveDate,
    pub hours: f64,
    pub excused: bool,
    pub activities: String,
    pub learnings: String,
}

/// Per-category percentages in taxonomy order. Elements are 0..=100; the sum
/// is 100 give or take independent rounding (99..=101), or exactly 0 when
/// nothing matched.
pub type ScoreVector = [u8; OUTCOME_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Raw,
    Coordinator,
    Chairman,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub text: String,
    pub used_external_generation: bool,
}
