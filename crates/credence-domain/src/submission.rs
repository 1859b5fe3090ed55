//! Submission module - the unit of information sent for credibility scoring

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default source reputation for a fresh submission
pub const DEFAULT_REPUTATION: f64 = 0.5;

/// Default content language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Kind of source the information came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Government or institutional source
    Official,
    /// News organization
    News,
    /// Blog
    Blog,
    /// Social media
    Social,
    /// Unknown provenance
    #[default]
    Unknown,
}

impl SourceType {
    /// All source types, in display order
    pub const ALL: [SourceType; 5] = [
        SourceType::Official,
        SourceType::News,
        SourceType::Blog,
        SourceType::Social,
        SourceType::Unknown,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Official => "official",
            SourceType::News => "news",
            SourceType::Blog => "blog",
            SourceType::Social => "social",
            SourceType::Unknown => "unknown",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Official => "Official Source",
            SourceType::News => "News Organization",
            SourceType::Blog => "Blog",
            SourceType::Social => "Social Media",
            SourceType::Unknown => "Unknown Source",
        }
    }

    /// Parse from the wire representation (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "official" => Some(SourceType::Official),
            "news" => Some(SourceType::News),
            "blog" => Some(SourceType::Blog),
            "social" => Some(SourceType::Social),
            "unknown" => Some(SourceType::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the information was published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Source URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Source category
    #[serde(rename = "type", default)]
    pub kind: SourceType,

    /// Reputation in [0, 1]; clamped on every write
    #[serde(
        default = "default_reputation",
        deserialize_with = "deserialize_reputation"
    )]
    reputation: f64,
}

impl Source {
    /// Create a source of the given kind with the default reputation
    pub fn new(kind: SourceType) -> Self {
        Self {
            url: None,
            domain: None,
            kind,
            reputation: DEFAULT_REPUTATION,
        }
    }

    /// Reputation in [0, 1]
    pub fn reputation(&self) -> f64 {
        self.reputation
    }

    /// Set the reputation, clamping into [0, 1]. NaN leaves the value unchanged.
    pub fn set_reputation(&mut self, value: f64) {
        if let Some(clamped) = clamp_reputation(value) {
            self.reputation = clamped;
        }
    }

    /// Builder-style variant of [`Source::set_reputation`]
    pub fn with_reputation(mut self, value: f64) -> Self {
        self.set_reputation(value);
        self
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new(SourceType::Unknown)
    }
}

/// Who wrote the information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Author credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,

    /// Published anonymously
    #[serde(default)]
    pub is_anonymous: bool,

    /// Recognized expert in the field
    #[serde(default)]
    pub known_expert: bool,
}

/// Publication metadata and content signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Publication date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,

    /// Last modification date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Content language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Content uses emotionally loaded language
    #[serde(default)]
    pub has_emotional_language: bool,

    /// Content cites sources
    #[serde(default)]
    pub has_citations: bool,

    /// Number of citations; negative input clamps to zero
    #[serde(default, deserialize_with = "deserialize_citation_count")]
    pub citation_count: u32,

    /// Content carries reference links
    #[serde(default)]
    pub has_references: bool,

    /// Reference URLs, in entry order
    #[serde(default)]
    pub reference_urls: Vec<String>,
}

impl Metadata {
    /// Set the citation count, clamping negative input to zero
    pub fn set_citation_count(&mut self, value: i64) {
        self.citation_count = value.clamp(0, i64::from(u32::MAX)) as u32;
    }

    /// Add a reference URL; blank input is ignored
    pub fn add_reference_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.reference_urls.push(url.to_string());
        }
    }

    /// Remove the reference URL at `index`, if present
    pub fn remove_reference_url(&mut self, index: usize) -> Option<String> {
        if index < self.reference_urls.len() {
            Some(self.reference_urls.remove(index))
        } else {
            None
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            publication_date: None,
            last_modified: None,
            language: DEFAULT_LANGUAGE.to_string(),
            has_emotional_language: false,
            has_citations: false,
            citation_count: 0,
            has_references: false,
            reference_urls: Vec::new(),
        }
    }
}

/// A submission - the request unit sent to the scorer
///
/// Submissions are treated as immutable once sent; the history keeps a copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Text to evaluate
    pub content: String,

    /// Source information
    #[serde(default)]
    pub source: Source,

    /// Author information
    #[serde(default)]
    pub author: Author,

    /// Publication metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Submission {
    /// Create a submission from the empty template with the given content
    ///
    /// # Examples
    ///
    /// ```
    /// use credence_domain::{Submission, SourceType};
    ///
    /// let submission = Submission::new("The bridge reopens on Monday");
    /// assert_eq!(submission.source.kind, SourceType::Unknown);
    /// assert_eq!(submission.source.reputation(), 0.5);
    /// assert_eq!(submission.metadata.language, "en");
    /// ```
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Content truncated to `max_chars` characters, with `...` appended when cut
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() > max_chars {
            let truncated: String = self.content.chars().take(max_chars).collect();
            format!("{}...", truncated)
        } else {
            self.content.clone()
        }
    }
}

/// Turn a test-scenario key into a display title
///
/// Underscores become spaces, the first `case<digits>` marker is dropped
/// (case-insensitive), and the result is trimmed.
///
/// # Examples
///
/// ```
/// use credence_domain::scenario_title;
///
/// assert_eq!(scenario_title("case1_official_source"), "official source");
/// assert_eq!(scenario_title("fake_news_Case12"), "fake news");
/// ```
pub fn scenario_title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let lowered = spaced.to_ascii_lowercase();
    let bytes = lowered.as_bytes();

    let mut search_from = 0;
    while let Some(offset) = lowered[search_from..].find("case") {
        let start = search_from + offset;
        let mut end = start + 4;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > start + 4 {
            let mut title = String::with_capacity(spaced.len());
            title.push_str(&spaced[..start]);
            title.push_str(&spaced[end..]);
            return title.trim().to_string();
        }
        search_from = start + 4;
    }

    spaced.trim().to_string()
}

fn clamp_reputation(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}

fn default_reputation() -> f64 {
    DEFAULT_REPUTATION
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn deserialize_reputation<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_reputation(raw).unwrap_or(DEFAULT_REPUTATION))
}

fn deserialize_citation_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.clamp(0.0, f64::from(u32::MAX)) as u32)
}
