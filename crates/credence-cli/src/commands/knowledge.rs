//! Knowledge command implementation.

use crate::cli::{AddFactsArgs, KnowledgeAction, KnowledgeArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use credence_domain::traits::KnowledgeRepository;
use credence_domain::KnowledgeFact;
use credence_knowledge::KnowledgeStore;
use std::fs;

/// Execute the knowledge command.
pub async fn execute_knowledge<R: KnowledgeRepository>(
    args: KnowledgeArgs,
    store: &KnowledgeStore<R>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        KnowledgeAction::List { raw: true } => {
            let facts = store.fetch().await?;
            println!("{}", formatter.format_raw_facts(&facts)?);
        }
        KnowledgeAction::List { raw: false } => {
            let facts = store.list().await?;
            println!("{}", formatter.format_facts(&facts)?);
        }
        KnowledgeAction::Add(args) => {
            let source = args.source.clone();
            let expiration = args.expiration.clone();
            let facts = collect_facts(args)?;
            let count = facts.len();

            let listing = store.add(facts, source, expiration).await?;
            println!(
                "{}",
                formatter.success(&format!("Added {} fact(s) to the knowledge base", count))
            );
            println!("{}", formatter.format_facts(&listing)?);
        }
    }

    Ok(())
}

/// Facts from `--file`, or the single fact described by the flags.
fn collect_facts(args: AddFactsArgs) -> Result<Vec<KnowledgeFact>> {
    if let Some(path) = args.file {
        let contents = fs::read_to_string(&path)?;
        return serde_json::from_str(&contents).map_err(|e| {
            CliError::InvalidInput(format!("'{}' is not a list of facts: {}", path, e))
        });
    }

    let predicate = args.predicate.ok_or_else(|| {
        CliError::InvalidInput("Provide --file or --predicate with at least one --arg".to_string())
    })?;

    let mut fact = KnowledgeFact::new(predicate, args.args);
    if let Some(comment) = args.comment {
        fact = fact.with_comment(comment);
    }
    Ok(vec![fact])
}
