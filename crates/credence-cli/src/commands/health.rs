//! Health command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use credence_domain::traits::Scorer;
use credence_evaluator::Evaluator;

/// Execute the health command.
pub async fn execute_health<S: Scorer>(
    evaluator: &Evaluator<S>,
    api_url: &str,
    formatter: &Formatter,
) -> Result<()> {
    if evaluator.health().await {
        println!("{}", formatter.success(&format!("API at {} is healthy", api_url)));
        Ok(())
    } else {
        Err(CliError::Connection(format!(
            "API at {} is not responding",
            api_url
        )))
    }
}
