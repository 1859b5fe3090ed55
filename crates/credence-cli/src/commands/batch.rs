//! Batch command implementation.

use super::report_evaluation_error;
use crate::cli::BatchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use credence_domain::traits::Scorer;
use credence_domain::Submission;
use credence_evaluator::Evaluator;
use credence_history::HistoryStore;
use serde::Deserialize;
use std::fs;

/// Batch file layout: a bare array or the request body `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Items(Vec<Submission>),
    Request { items: Vec<Submission> },
}

/// Execute the batch command.
pub async fn execute_batch<S: Scorer>(
    args: BatchArgs,
    evaluator: &Evaluator<S>,
    history: &mut HistoryStore,
    formatter: &Formatter,
) -> Result<()> {
    let items = read_batch(&args.file)?;

    let report = evaluator
        .evaluate_batch(&items, history)
        .await
        .map_err(|e| report_evaluation_error(e, formatter))?;

    println!("{}", formatter.format_batch(&report, &items)?);
    Ok(())
}

fn read_batch(path: &str) -> Result<Vec<Submission>> {
    let contents = fs::read_to_string(path)?;
    let file: BatchFile = serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("'{}' is not a list of submissions: {}", path, e))
    })?;

    Ok(match file {
        BatchFile::Items(items) | BatchFile::Request { items } => items,
    })
}
