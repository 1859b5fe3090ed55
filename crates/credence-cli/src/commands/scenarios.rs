//! Scenario command implementations.

use super::report_evaluation_error;
use crate::cli::ScenarioArgs;
use crate::error::Result;
use crate::output::Formatter;
use credence_domain::traits::Scorer;
use credence_evaluator::Evaluator;
use credence_history::HistoryStore;

/// Execute the scenarios command.
pub async fn execute_scenarios<S: Scorer>(
    evaluator: &Evaluator<S>,
    formatter: &Formatter,
) -> Result<()> {
    let scenarios = evaluator.scenarios().await?;
    println!("{}", formatter.format_scenarios(&scenarios)?);
    Ok(())
}

/// Execute the scenario command.
pub async fn execute_scenario<S: Scorer>(
    args: ScenarioArgs,
    evaluator: &Evaluator<S>,
    history: &mut HistoryStore,
    formatter: &Formatter,
) -> Result<()> {
    let result = evaluator
        .submit_scenario(&args.name, history)
        .await
        .map_err(|e| report_evaluation_error(e, formatter))?;

    println!("{}", formatter.format_result(&result)?);
    Ok(())
}
