//! Command implementations.

pub mod batch;
pub mod evaluate;
pub mod health;
pub mod history;
pub mod knowledge;
pub mod profile;
pub mod scenarios;

pub use self::batch::execute_batch;
pub use self::evaluate::execute_evaluate;
pub use self::health::execute_health;
pub use self::history::execute_history;
pub use self::knowledge::execute_knowledge;
pub use self::profile::execute_profile;
pub use self::scenarios::{execute_scenario, execute_scenarios};

use crate::error::CliError;
use crate::output::Formatter;
use credence_evaluator::EvaluationError;

/// Print field-level validation failures, then turn the error into a
/// short summary for the exit message.
pub(crate) fn report_evaluation_error(err: EvaluationError, formatter: &Formatter) -> CliError {
    match err {
        EvaluationError::Validation(report) => {
            eprintln!("{}", formatter.format_validation(&report));
            CliError::InvalidInput("Submission failed validation".to_string())
        }
        EvaluationError::BatchValidation { items } => {
            for (idx, report) in &items {
                eprintln!("Item #{}:", idx + 1);
                eprintln!("{}", formatter.format_validation(report));
            }
            CliError::InvalidInput(format!("{} batch item(s) failed validation", items.len()))
        }
        other => other.into(),
    }
}
