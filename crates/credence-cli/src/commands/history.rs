//! History command implementation.

use super::report_evaluation_error;
use crate::cli::{HistoryAction, HistoryArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use credence_domain::traits::Scorer;
use credence_evaluator::Evaluator;
use credence_history::HistoryStore;
use std::io::{self, Write};

/// Execute the history command.
pub async fn execute_history<S: Scorer>(
    args: HistoryArgs,
    evaluator: &Evaluator<S>,
    history: &mut HistoryStore,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        HistoryAction::List { limit } => {
            let entries = history.list();
            let shown = &entries[..limit.unwrap_or(entries.len()).min(entries.len())];
            println!("{}", formatter.format_history(shown)?);
        }
        HistoryAction::Show { id } => {
            let entry = history
                .get(&id)
                .ok_or_else(|| CliError::InvalidInput(format!("No history entry with id '{}'", id)))?;
            println!("{}", formatter.format_entry(entry)?);
        }
        HistoryAction::Clear { yes } => clear_history(history, yes, formatter)?,
        HistoryAction::Reevaluate { id } => {
            let result = evaluator
                .reevaluate(&id, history)
                .await
                .map_err(|e| report_evaluation_error(e, formatter))?;
            println!("{}", formatter.format_result(&result)?);
        }
    }

    Ok(())
}

fn clear_history(history: &mut HistoryStore, yes: bool, formatter: &Formatter) -> Result<()> {
    if history.is_empty() {
        println!("{}", formatter.info("History is already empty"));
        return Ok(());
    }

    // Confirm unless --yes is specified
    if !yes {
        print!("About to delete {} history entries. Continue? [y/N] ", history.len());
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let count = history.len();
    history.clear();
    println!(
        "{}",
        formatter.success(&format!("Deleted {} history entries", count))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use credence_domain::Submission;
    use credence_history::MemoryBackend;
    use credence_sdk::mock::{sample_result, MockScorer};

    fn setup() -> (Evaluator<MockScorer>, HistoryStore, Formatter) {
        (
            Evaluator::new(MockScorer::new(sample_result(72.0))),
            HistoryStore::open(MemoryBackend::new()),
            Formatter::new(OutputFormat::Quiet, false),
        )
    }

    #[tokio::test]
    async fn test_clear_with_yes() {
        let (evaluator, mut history, formatter) = setup();
        history.append(Submission::new("a"), None);

        let args = HistoryArgs {
            action: HistoryAction::Clear { yes: true },
        };
        execute_history(args, &evaluator, &mut history, &formatter)
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_show_unknown_id() {
        let (evaluator, mut history, formatter) = setup();

        let args = HistoryArgs {
            action: HistoryAction::Show {
                id: "missing".to_string(),
            },
        };
        let result = execute_history(args, &evaluator, &mut history, &formatter).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reevaluate_adds_entry() {
        let (evaluator, mut history, formatter) = setup();
        let entry = history.append(Submission::new("a"), None);

        let args = HistoryArgs {
            action: HistoryAction::Reevaluate { id: entry.id.clone() },
        };
        execute_history(args, &evaluator, &mut history, &formatter)
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert!(history.list()[0].result.is_some());
        assert!(history.get(&entry.id).unwrap().result.is_none());
    }
}
