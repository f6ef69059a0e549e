use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::ReportEntry;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let students = vec![
        (
            Uuid::parse_str("6f1f0b80-4a51-4a8e-9a2f-58c4a2f4d9b1")?,
            "2023-00117",
            "Avery Lee",
            "BSIT-4A",
        ),
        (
            Uuid::parse_str("b3a5c9d2-7e14-4a02-9d4f-1c8a52be60aa")?,
            "2023-00152",
            "Jules Moreno",
            "BSIT-4A",
        ),
        (
            Uuid::parse_str("1e2ad04f-52b5-4c5b-8e0a-7c4de1f9a331")?,
            "2023-00204",
            "Kiara Patel",
            "BSIT-4B",
        ),
    ];

    for (id, student_no, name, section) in students {
        sqlx::query(
            r#"
            INSERT INTO ojt_tracking.students (id, student_no, full_name, section)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (student_no) DO UPDATE
            SET full_name = EXCLUDED.full_name, section = EXCLUDED.section
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(student_no)
        .bind(name)
        .bind(section)
        .fetch_one(pool)
        .await?;
    }

    let reports = vec![
        (
            "seed-001",
            "2023-00117",
            1,
            40.0,
            "Set up my workstation and configured the development environment. Installed the company VPN client.",
            "Learned the onboarding procedure and how the support team organizes tickets.",
            NaiveDate::from_ymd_opt(2026, 1, 16).context("invalid date")?,
        ),
        (
            "seed-002",
            "2023-00117",
            2,
            40.0,
            "Built a database schema for the inventory module and wrote seed scripts.",
            "Learned SQL design patterns and how to validate schema changes before deployment.",
            NaiveDate::from_ymd_opt(2026, 1, 23).context("invalid date")?,
        ),
        (
            "seed-003",
            "2023-00152",
            1,
            32.0,
            "Shadowed the network administrator while patching switches.",
            "Learned how to configure VLANs and document network changes.",
            NaiveDate::from_ymd_opt(2026, 1, 16).context("invalid date")?,
        ),
        (
            "seed-004",
            "2023-00204",
            1,
            40.0,
            "Assisted the help desk with password resets and printer issues.",
            "Learned the ticket escalation workflow and how to communicate with end users.",
            NaiveDate::from_ymd_opt(2026, 1, 16).context("invalid date")?,
        ),
    ];

    for (source_key, student_no, week_number, hours, activities, learnings, report_date) in reports
    {
        let student_id: Uuid =
            sqlx::query("SELECT id FROM ojt_tracking.students WHERE student_no = $1")
                .bind(student_no)
                .fetch_one(pool)
                .await?
                .get("id");

        sqlx::query(
            r#"
            INSERT INTO ojt_tracking.weekly_reports
            (id, student_id, week_number, report_date, hours, excused, activities, learnings, source_key)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $8)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(week_number)
        .bind(report_date)
        .bind(hours)
        .bind(activities)
        .bind(learnings)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Fetches weekly report snapshots, optionally narrowed by section, student
/// number, and week. Failures here are hard errors: they propagate to the
/// caller instead of degrading into an empty result set.
pub async fn fetch_reports(
    pool: &PgPool,
    section: Option<&str>,
    student_no: Option<&str>,
    week: Option<i32>,
) -> anyhow::Result<Vec<ReportEntry>> {
    let mut query = String::from(
        "SELECT r.id, st.student_no, st.full_name, st.section, \
         r.week_number, r.report_date, r.hours, r.excused, r.activities, r.learnings \
         FROM ojt_tracking.weekly_reports r \
         JOIN ojt_tracking.students st ON st.id = r.student_id \
         WHERE 1 = 1",
    );

    let mut param = 0;
    if section.is_some() {
        param += 1;
        query.push_str(&format!(" AND st.section = ${param}"));
    }
    if student_no.is_some() {
        param += 1;
        query.push_str(&format!(" AND st.student_no = ${param}"));
    }
    if week.is_some() {
        param += 1;
        query.push_str(&format!(" AND r.week_number = ${param}"));
    }
    query.push_str(" ORDER BY st.student_no, r.week_number, r.report_date");

    let mut rows = sqlx::query(&query);
    if let Some(value) = section {
        rows = rows.bind(value);
    }
    if let Some(value) = student_no {
        rows = rows.bind(value);
    }
    if let Some(value) = week {
        rows = rows.bind(value);
    }

    let records = rows
        .fetch_all(pool)
        .await
        .context("failed to fetch weekly reports")?;
    let mut reports = Vec::new();

    for row in records {
        reports.push(ReportEntry {
            id: row.get("id"),
            student_no: row.get("student_no"),
            student_name: row.get("full_name"),
            section: row.get("section"),
            week_number: row.get("week_number"),
            report_date: row.get("report_date"),
            hours: row.get("hours"),
            excused: row.get("excused"),
            activities: row.get("activities"),
            learnings: row.get("learnings"),
        });
    }

    Ok(reports)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        student_no: String,
        full_name: String,
        section: String,
        week_number: i32,
        report_date: NaiveDate,
        hours: f64,
        #[serde(default)]
        excused: bool,
        activities: String,
        learnings: String,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        if !(1..=13).contains(&row.week_number) {
            anyhow::bail!(
                "week_number {} for student {} is outside 1..=13",
                row.week_number,
                row.student_no
            );
        }

        let student_id: Uuid = sqlx::query(
            r#"
            INSERT INTO ojt_tracking.students
            (id, student_no, full_name, section)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (student_no) DO UPDATE
            SET full_name = EXCLUDED.full_name, section = EXCLUDED.section
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&row.student_no)
        .bind(&row.full_name)
        .bind(&row.section)
        .fetch_one(pool)
        .await?
        .get("id");

        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO ojt_tracking.weekly_reports
            (id, student_id, week_number, report_date, hours, excused, activities, learnings, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(row.week_number)
        .bind(row.report_date)
        .bind(row.hours)
        .bind(row.excused)
        .bind(&row.activities)
        .bind(&row.learnings)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
