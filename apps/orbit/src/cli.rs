//! # CLI
//!
//! Command definitions and handlers for the `orbit` binary.
//!
//! Handlers write to the `out` they are given so tests can capture output.
//! With `--json` every command prints one JSON document.

use crate::intake::{GoalIntake, IntakeError};
use crate::views::{GoalViews, ViewCache};
use clap::{ArgAction, Parser, Subcommand};
use orbit_core::{DEFAULT_FREQUENCY_ID, FormFeedback, ValidGoal, list_frequency_options};
use orbit_sdk::{OrbitClient, PendingGoal, Summary};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;
use tracing::info;

/// Goals service used when neither `--api-url` nor `ORBIT_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "orbit", version, about = "Weekly goals from the terminal")]
pub struct Cli {
    /// Base URL of the goals service.
    #[arg(long, env = "ORBIT_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Bearer token sent with every request.
    #[arg(long, env = "ORBIT_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the weekly frequency choices.
    Frequencies,

    /// Create a goal.
    Create {
        /// What you want to do ("Meditar", "Correr", ...).
        #[arg(short, long)]
        title: String,

        /// Times per week, 1 to 7.
        #[arg(short, long, default_value = DEFAULT_FREQUENCY_ID)]
        frequency: String,
    },

    /// List goals still pending this week.
    Pending,

    /// Show this week's progress.
    Summary,
}

impl Cli {
    /// Build the HTTP client described by the arguments.
    pub fn client(&self) -> Result<OrbitClient, CliError> {
        match &self.token {
            Some(token) => Ok(OrbitClient::with_token(&self.api_url, token)?),
            None => Ok(OrbitClient::new(&self.api_url)),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    /// The goal was rejected locally; the feedback was already printed.
    #[error("invalid goal")]
    Invalid(FormFeedback),

    #[error(transparent)]
    Sdk(#[from] orbit_sdk::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run the parsed command.
pub async fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), CliError> {
    match &cli.command {
        Command::Frequencies => cmd_frequencies(out, cli.json),
        Command::Create { title, frequency } => {
            let client = cli.client()?;
            cmd_create(&client, title, frequency, cli.json, out).await
        }
        Command::Pending => {
            let client = cli.client()?;
            cmd_pending(&client, cli.json, out).await
        }
        Command::Summary => {
            let client = cli.client()?;
            cmd_summary(&client, cli.json, out).await
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Print the frequency catalog.
pub fn cmd_frequencies(out: &mut dyn Write, json: bool) -> Result<(), CliError> {
    let options = list_frequency_options();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(options)?)?;
        return Ok(());
    }

    writeln!(out, "Quantas vezes na semana?")?;
    for option in options {
        writeln!(out, "  [{}] {} {}", option.id, option.label, option.icon)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOutput<'a> {
    goal: &'a ValidGoal,
    pending_goals: &'a [PendingGoal],
}

/// Create a goal, then show the refreshed pending list.
pub async fn cmd_create(
    client: &OrbitClient,
    title: &str,
    frequency: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cache = ViewCache::new();
    let views = GoalViews::new(client.clone(), cache.clone());
    let mut intake = GoalIntake::new(client.clone(), cache);

    intake.draft_mut().set_title(title);
    intake.draft_mut().set_frequency(frequency);

    let goal = match intake.submit().await {
        Ok(goal) => goal,
        Err(IntakeError::Validation(_)) => {
            let feedback = intake.feedback();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&feedback)?)?;
            } else {
                write!(out, "{}", feedback.to_text())?;
            }
            return Err(CliError::Invalid(feedback));
        }
        Err(IntakeError::Remote(err)) => return Err(err.into()),
    };
    info!(title = goal.title(), "goal created");

    let pending_goals = views.pending_goals().await?;

    if json {
        let output = CreateOutput {
            goal: &goal,
            pending_goals: &pending_goals,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(
            out,
            "Meta cadastrada: {} ({} {})",
            goal.title(),
            goal.desired_weekly_frequency().option().label,
            goal.desired_weekly_frequency().option().icon
        )?;
        write_pending(out, &pending_goals)?;
    }
    Ok(())
}

/// Print goals still pending this week.
pub async fn cmd_pending(
    client: &OrbitClient,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let views = GoalViews::new(client.clone(), ViewCache::new());
    let pending_goals = views.pending_goals().await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&pending_goals)?)?;
    } else {
        write_pending(out, &pending_goals)?;
    }
    Ok(())
}

/// Print this week's summary.
pub async fn cmd_summary(
    client: &OrbitClient,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let views = GoalViews::new(client.clone(), ViewCache::new());
    let summary = views.summary().await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write_summary(out, &summary)?;
    }
    Ok(())
}

// =============================================================================
// TEXT RENDERING
// =============================================================================

fn write_pending(out: &mut dyn Write, goals: &[PendingGoal]) -> std::io::Result<()> {
    if goals.is_empty() {
        return writeln!(out, "Nenhuma meta pendente.");
    }
    writeln!(out, "Metas pendentes:")?;
    for goal in goals {
        writeln!(
            out,
            "  + {} ({}/{})",
            goal.title, goal.completion_count, goal.desired_weekly_frequency
        )?;
    }
    Ok(())
}

fn write_summary(out: &mut dyn Write, summary: &Summary) -> std::io::Result<()> {
    writeln!(
        out,
        "Você completou {} de {} metas nessa semana ({}%)",
        summary.completed,
        summary.total,
        summary.progress_percent()
    )?;

    let Some(days) = &summary.goals_per_day else {
        return writeln!(out, "Você ainda não completou nenhuma meta essa semana.");
    };
    for (day, completions) in days {
        writeln!(out, "{}", day)?;
        for completion in completions {
            writeln!(out, "  - {} ({})", completion.title, completion.completed_at)?;
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create_with_defaults() {
        let cli = Cli::try_parse_from(["orbit", "create", "--title", "Meditar"]).expect("parses");
        assert!(matches!(
            &cli.command,
            Command::Create { title, frequency } if title == "Meditar" && frequency == "1"
        ));
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "orbit",
            "pending",
            "--json",
            "-vv",
            "--api-url",
            "http://example.test",
        ])
        .expect("parses");
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_url, "http://example.test");
    }

    #[test]
    fn create_requires_title() {
        assert!(Cli::try_parse_from(["orbit", "create"]).is_err());
    }

    #[test]
    fn frequencies_text_lists_all_options() {
        let mut out = Vec::new();
        cmd_frequencies(&mut out, false).expect("prints");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("[1] 1x na semana"));
        assert!(text.contains("[7] Todos os dias da semana"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn frequencies_json_is_an_array() {
        let mut out = Vec::new();
        cmd_frequencies(&mut out, true).expect("prints");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");

        let options = value.as_array().expect("array");
        assert_eq!(options.len(), 7);
        assert_eq!(options[2]["id"], "3");
        assert_eq!(options[2]["label"], "3x na semana");
    }
}
