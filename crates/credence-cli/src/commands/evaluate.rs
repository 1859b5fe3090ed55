//! Evaluate command implementation.

use super::report_evaluation_error;
use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use credence_domain::traits::Scorer;
use credence_domain::Submission;
use credence_evaluator::Evaluator;
use credence_history::HistoryStore;
use std::fs;

/// Execute the evaluate command.
pub async fn execute_evaluate<S: Scorer>(
    args: EvaluateArgs,
    evaluator: &Evaluator<S>,
    history: &mut HistoryStore,
    formatter: &Formatter,
) -> Result<()> {
    let submission = build_submission(args)?;

    let result = evaluator
        .submit(&submission, history)
        .await
        .map_err(|e| report_evaluation_error(e, formatter))?;

    println!("{}", formatter.format_result(&result)?);
    Ok(())
}

/// Assemble a submission from a file or the content argument, then apply
/// any flags on top.
///
/// Only flags that were given override the base; unset booleans leave the
/// file's values alone.
pub fn build_submission(args: EvaluateArgs) -> Result<Submission> {
    let mut submission = match (&args.file, &args.content) {
        (Some(path), _) => serde_json::from_str::<Submission>(&fs::read_to_string(path)?)?,
        (None, Some(content)) => Submission::new(content.clone()),
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Provide the content to evaluate or --file".to_string(),
            ))
        }
    };

    let source = &mut submission.source;
    if args.source_url.is_some() {
        source.url = args.source_url;
    }
    if args.domain.is_some() {
        source.domain = args.domain;
    }
    if let Some(kind) = args.source_type {
        source.kind = kind.into();
    }
    if let Some(reputation) = args.reputation {
        source.set_reputation(reputation);
    }

    let author = &mut submission.author;
    if args.author.is_some() {
        author.name = args.author;
    }
    if args.credentials.is_some() {
        author.credentials = args.credentials;
    }
    author.is_anonymous |= args.anonymous;
    author.known_expert |= args.expert;

    let metadata = &mut submission.metadata;
    if args.published.is_some() {
        metadata.publication_date = args.published;
    }
    if args.modified.is_some() {
        metadata.last_modified = args.modified;
    }
    if let Some(language) = args.language {
        metadata.language = language;
    }
    metadata.has_emotional_language |= args.emotional;
    metadata.has_citations |= args.has_citations;
    if let Some(count) = args.citation_count {
        metadata.set_citation_count(count);
    }
    metadata.has_references |= args.has_references;
    for url in &args.references {
        metadata.add_reference_url(url);
    }

    Ok(submission)
}
