//! Catalog entity types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed classification of catalog records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Files,
    Processes,
    Network,
    System,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Files,
        Category::Processes,
        Category::Network,
        Category::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Files => "files",
            Category::Processes => "processes",
            Category::Network => "network",
            Category::System => "system",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParameter {
    pub flag: String,
    pub description: String,
}

/// One documented shell invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub title: String,
    /// Literal shell text, never parsed.
    pub command: String,
    pub category: Category,
    pub description: String,
    pub explanation: String,
    pub parameters: Vec<CommandParameter>,
    pub keywords: Vec<String>,
}

impl Command {
    /// Lower-cased concatenation of every field the search engine matches against.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![
            &self.title,
            &self.description,
            &self.explanation,
            &self.command,
        ];
        parts.extend(self.keywords.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

/// A record as written by the seed data, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCommand {
    pub title: String,
    pub command: String,
    pub category: Category,
    pub description: String,
    pub explanation: String,
    pub parameters: Vec<CommandParameter>,
    pub keywords: Vec<String>,
}

impl NewCommand {
    pub fn with_id(self, id: impl Into<String>) -> Command {
        Command {
            id: id.into(),
            title: self.title,
            command: self.command,
            category: self.category,
            description: self.description,
            explanation: self.explanation,
            parameters: self.parameters,
            keywords: self.keywords,
        }
    }
}
