use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;

mod cache;
mod db;
mod dedupe;
mod llm;
mod matcher;
mod models;
mod report;
mod scorer;
mod summarizer;
mod taxonomy;

use cache::LearningCache;
use llm::{LlmClient, LlmConfig};
use models::SummaryMode;
use summarizer::SummaryScope;

#[derive(Parser)]
#[command(name = "ojt-outcome-tracker")]
#[command(about = "Program-outcome scoring and summaries for OJT weekly journals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Raw,
    Coordinator,
    Chairman,
}

impl From<ModeArg> for SummaryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Raw => SummaryMode::Raw,
            ModeArg::Coordinator => SummaryMode::Coordinator,
            ModeArg::Chairman => SummaryMode::Chairman,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import weekly reports from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Score journals against the 15 program outcomes
    #[command(group(
        ArgGroup::new("scope")
            .args(["section", "student"])
            .multiple(false)
    ))]
    Score {
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        student: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=13))]
        week: Option<i32>,
    },
    /// Summarize journal text for a review audience
    #[command(group(
        ArgGroup::new("scope")
            .args(["section", "student"])
            .multiple(false)
    ))]
    Summarize {
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        student: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=13))]
        week: Option<i32>,
        #[arg(long, value_enum, default_value = "raw")]
        mode: ModeArg,
        /// Skip the external generation service and use the local fallback
        #[arg(long)]
        no_llm: bool,
    },
    /// Generate a markdown report with scores and a summary
    #[command(group(
        ArgGroup::new("scope")
            .args(["section", "student"])
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        student: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=13))]
        week: Option<i32>,
        #[arg(long, value_enum, default_value = "chairman")]
        mode: ModeArg,
        #[arg(long)]
        no_llm: bool,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    let cache = LearningCache::new();
    let generator = match LlmConfig::from_env() {
        Some(cfg) => Some(LlmClient::new(cfg).context("failed to build generation client")?),
        None => None,
    };

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} weekly reports from {}.", csv.display());
        }
        Commands::Score {
            section,
            student,
            week,
        } => {
            let reports =
                db::fetch_reports(&pool, section.as_deref(), student.as_deref(), week).await?;

            if reports.is_empty() {
                println!("No weekly reports found for this scope.");
                return Ok(());
            }

            let matches = scorer::match_reports(&reports);
            let scores = scorer::compute_scores(&reports);

            println!("Outcome scores across {} reports:", reports.len());
            for result in &matches {
                let category = &taxonomy::CATEGORIES[result.category_index];
                if result.hit_count == 0 {
                    println!("- ({}) {}: 0%", category.code, category.label);
                } else {
                    println!(
                        "- ({}) {}: {}% (matched: {})",
                        category.code,
                        category.label,
                        scores[result.category_index],
                        result.matched_triggers.join(", ")
                    );
                }
            }
        }
        Commands::Summarize {
            section,
            student,
            week,
            mode,
            no_llm,
        } => {
            let reports =
                db::fetch_reports(&pool, section.as_deref(), student.as_deref(), week).await?;
            let scope = SummaryScope {
                student_no: student.as_deref(),
                week,
                section: section.as_deref(),
                mode: mode.into(),
                use_llm: !no_llm,
            };
            let summary = summarizer::summarize(&reports, &scope, &cache, generator.as_ref()).await;

            println!("{}", summary.text);
            if summary.used_external_generation {
                println!("(generated by the external service)");
            }
        }
        Commands::Report {
            section,
            student,
            week,
            mode,
            no_llm,
            out,
        } => {
            let reports =
                db::fetch_reports(&pool, section.as_deref(), student.as_deref(), week).await?;
            let matches = scorer::match_reports(&reports);
            let scores = scorer::compute_scores(&reports);

            let scope = SummaryScope {
                student_no: student.as_deref(),
                week,
                section: section.as_deref(),
                mode: mode.into(),
                use_llm: !no_llm,
            };
            let summary = summarizer::summarize(&reports, &scope, &cache, generator.as_ref()).await;

            let scope_label = match (student.as_deref(), section.as_deref()) {
                (Some(student), _) => format!("student {student}"),
                (None, Some(section)) => format!("section {section}"),
                (None, None) => "all sections".to_string(),
            };
            let label = match week {
                Some(week) => format!("{scope_label}, week {week}"),
                None => scope_label,
            };

            let output = report::build_report(&label, &reports, &scores, &matches, &summary);
            std::fs::write(&out, output)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
