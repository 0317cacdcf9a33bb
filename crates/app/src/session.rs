//! Line-oriented driver for the view controller.
//!
//! Reads one command per line and writes the derived view as a JSON line
//! after every state-changing command.
use std::{io::Write, str::FromStr};

use api_types::transaction::Transaction;
use engine::{ActiveSource, FilterSelection, ViewController, ViewSnapshot};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick "All Employees" in the filter.
    All,
    /// Click "View More".
    More,
    /// Pick one employee in the filter.
    Employee(String),
    /// List the filter entries.
    Employees,
    State,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let command = match (parts.next(), parts.next()) {
            (Some("all"), None) => Self::All,
            (Some("more"), None) => Self::More,
            (Some("employee"), Some(id)) => Self::Employee(id.to_string()),
            (Some("employees"), None) => Self::Employees,
            (Some("state"), None) => Self::State,
            (Some("quit" | "exit"), None) => Self::Quit,
            _ => return Err(AppError::Command(format!("unknown command: {line}"))),
        };
        if parts.next().is_some() {
            return Err(AppError::Command(format!("unexpected arguments: {line}")));
        }
        Ok(command)
    }
}

/// What the presentation layer reads, in the shape it consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Presented<'a> {
    mode: &'static str,
    transactions: Option<&'a [Transaction]>,
    is_loading: bool,
    employees_loading: bool,
    paginated_transactions_loading: bool,
    show_view_more: bool,
}

impl<'a> From<&'a ViewSnapshot> for Presented<'a> {
    fn from(snapshot: &'a ViewSnapshot) -> Self {
        Self {
            mode: match snapshot.source {
                ActiveSource::All(_) => "all",
                ActiveSource::Filtered(_) => "filtered",
            },
            transactions: snapshot.transactions(),
            is_loading: snapshot.is_loading,
            employees_loading: snapshot.employees_loading(),
            paginated_transactions_loading: snapshot.paginated_transactions_loading(),
            show_view_more: snapshot.view_more_visible(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FilterOption {
    value: String,
    label: String,
}

fn write_json<W: Write>(output: &mut W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *output, value)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_snapshot<W: Write>(controller: &ViewController, output: &mut W) -> Result<()> {
    let snapshot = controller.snapshot();
    write_json(output, &Presented::from(&snapshot))
}

async fn apply(controller: &ViewController, command: Command) -> Result<()> {
    match command {
        Command::All => {
            controller
                .select_filter(Some(FilterSelection::AllEmployees))
                .await?
        }
        Command::More => controller.view_more().await?,
        Command::Employee(employee_id) => {
            controller
                .select_filter(Some(FilterSelection::Employee(employee_id)))
                .await?
        }
        Command::Employees | Command::State | Command::Quit => {}
    }
    Ok(())
}

/// Runs the session until `quit` or end of input.
///
/// Engine failures and unknown commands are logged and the session goes on.
pub async fn run<R, W>(controller: &ViewController, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(err) = controller.start().await {
        tracing::error!("initial load failed: {err}");
    }
    write_snapshot(controller, &mut output)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!("{err}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Employees => {
                let options: Vec<FilterOption> = controller
                    .snapshot()
                    .filter_items()
                    .iter()
                    .map(|employee| FilterOption {
                        value: employee.id.clone(),
                        label: employee.display_name(),
                    })
                    .collect();
                write_json(&mut output, &options)?;
            }
            command => {
                if let Err(err) = apply(controller, command).await {
                    tracing::error!("{err}");
                }
                write_snapshot(controller, &mut output)?;
            }
        }
    }

    tracing::info!("session closed");
    Ok(())
}
