//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use credence_domain::SourceType;

/// Credence CLI - Check the credibility of information.
#[derive(Debug, Parser)]
#[command(name = "credence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// API base URL, overriding the profile
    #[arg(long, global = true, env = "CREDENCE_API_URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids and scores only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a piece of information
    Evaluate(EvaluateArgs),

    /// List the canned test scenarios
    Scenarios,

    /// Evaluate one canned test scenario
    Scenario(ScenarioArgs),

    /// Evaluate up to 10 submissions in one request
    Batch(BatchArgs),

    /// Check whether the API is reachable
    Health,

    /// Browse past evaluations
    History(HistoryArgs),

    /// Browse and extend the knowledge base
    Knowledge(KnowledgeArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the evaluate command.
#[derive(Debug, Default, Parser)]
pub struct EvaluateArgs {
    /// Text to evaluate
    pub content: Option<String>,

    /// JSON file holding a complete submission
    #[arg(long, conflicts_with = "content")]
    pub file: Option<String>,

    /// Source URL
    #[arg(long)]
    pub source_url: Option<String>,

    /// Source domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Source type
    #[arg(long, value_enum)]
    pub source_type: Option<SourceTypeArg>,

    /// Source reputation (0.0-1.0)
    #[arg(long)]
    pub reputation: Option<f64>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author credentials
    #[arg(long)]
    pub credentials: Option<String>,

    /// Published anonymously
    #[arg(long)]
    pub anonymous: bool,

    /// Author is a known expert
    #[arg(long)]
    pub expert: bool,

    /// Publication date
    #[arg(long)]
    pub published: Option<String>,

    /// Last modification date
    #[arg(long)]
    pub modified: Option<String>,

    /// Content language
    #[arg(long)]
    pub language: Option<String>,

    /// Content uses emotional language
    #[arg(long)]
    pub emotional: bool,

    /// Content cites sources
    #[arg(long)]
    pub has_citations: bool,

    /// Number of citations
    #[arg(long, allow_negative_numbers = true)]
    pub citation_count: Option<i64>,

    /// Content carries reference links
    #[arg(long)]
    pub has_references: bool,

    /// Reference URL (repeatable)
    #[arg(long = "reference")]
    pub references: Vec<String>,
}

/// Arguments for the scenario command.
#[derive(Debug, Parser)]
pub struct ScenarioArgs {
    /// Scenario name, as listed by `scenarios`
    pub name: String,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// JSON file containing an array of submissions
    #[arg(short, long)]
    pub file: String,
}

/// Arguments for history browsing.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: HistoryAction,
}

/// History actions.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List past evaluations, newest first
    List {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one entry in full
    Show {
        /// Entry id
        id: String,
    },

    /// Delete every entry
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Evaluate an entry's input again as a new entry
    Reevaluate {
        /// Entry id
        id: String,
    },
}

/// Arguments for knowledge base access.
#[derive(Debug, Parser)]
pub struct KnowledgeArgs {
    #[command(subcommand)]
    pub action: KnowledgeAction,
}

/// Knowledge base actions.
#[derive(Debug, Subcommand)]
pub enum KnowledgeAction {
    /// List prior evaluations stored in the knowledge base
    List {
        /// Show every fact as stored instead of decoded evaluations
        #[arg(long)]
        raw: bool,
    },

    /// Add facts
    Add(AddFactsArgs),
}

/// Arguments for adding facts.
#[derive(Debug, Default, Parser)]
pub struct AddFactsArgs {
    /// JSON file containing an array of facts
    #[arg(short, long, conflicts_with_all = ["predicate", "args", "comment"])]
    pub file: Option<String>,

    /// Predicate of a single fact
    #[arg(long)]
    pub predicate: Option<String>,

    /// Argument of a single fact (repeatable, in order)
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Comment for a single fact
    #[arg(long)]
    pub comment: Option<String>,

    /// Where the facts came from
    #[arg(long)]
    pub source: Option<String>,

    /// When the facts expire
    #[arg(long)]
    pub expiration: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// API base URL
        #[arg(short, long)]
        url: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Source type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SourceTypeArg {
    /// Government or institutional source
    Official,
    /// News organization
    News,
    /// Blog
    Blog,
    /// Social media
    Social,
    /// Unknown provenance
    Unknown,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SourceTypeArg> for SourceType {
    fn from(kind: SourceTypeArg) -> Self {
        match kind {
            SourceTypeArg::Official => SourceType::Official,
            SourceTypeArg::News => SourceType::News,
            SourceTypeArg::Blog => SourceType::Blog,
            SourceTypeArg::Social => SourceType::Social,
            SourceTypeArg::Unknown => SourceType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_command() {
        let cli = Cli::parse_from([
            "credence",
            "evaluate",
            "The bridge reopens on Monday",
            "--source-type",
            "news",
            "--has-citations",
            "--citation-count",
            "3",
            "--reference",
            "https://a.example",
            "--reference",
            "https://b.example",
        ]);
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.content.as_deref(), Some("The bridge reopens on Monday"));
                assert!(matches!(args.source_type, Some(SourceTypeArg::News)));
                assert_eq!(args.citation_count, Some(3));
                assert_eq!(args.references.len(), 2);
            }
            _ => panic!("Expected Evaluate command"),
        }
    }

    #[test]
    fn test_negative_citation_count_parses() {
        let cli = Cli::parse_from(["credence", "evaluate", "x", "--citation-count", "-4"]);
        match cli.command {
            Command::Evaluate(args) => assert_eq!(args.citation_count, Some(-4)),
            _ => panic!("Expected Evaluate command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["credence", "history", "list", "--format", "json", "-vv"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::History(HistoryArgs {
                action: HistoryAction::List { limit: None }
            })
        ));
    }

    #[test]
    fn test_knowledge_add_single_fact() {
        let cli = Cli::parse_from([
            "credence",
            "knowledge",
            "add",
            "--predicate",
            "source_type",
            "--arg",
            "bbc.com",
            "--arg",
            "news",
        ]);
        match cli.command {
            Command::Knowledge(KnowledgeArgs {
                action: KnowledgeAction::Add(args),
            }) => {
                assert_eq!(args.predicate.as_deref(), Some("source_type"));
                assert_eq!(args.args, vec!["bbc.com", "news"]);
            }
            _ => panic!("Expected knowledge add"),
        }
    }

    #[test]
    fn test_source_type_conversion() {
        let kind: SourceType = SourceTypeArg::Social.into();
        assert_eq!(kind, SourceType::Social);
    }
}
