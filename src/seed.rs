//! Built-in catalog seed.
//!
//! The records ship as JSON without ids. Ids are derived from the title and
//! command text, so reseeding yields the same ids and saved bookmarks or
//! export selections keep resolving.

use uuid::Uuid;

use crate::command::{Command, NewCommand};
use crate::error::Result;

const SEED_JSON: &str = include_str!("../data/commands.json");

/// Stable id for a seed record.
pub fn command_id(title: &str, command: &str) -> String {
    let name = format!("{title}\n{command}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

pub fn seed_records() -> Result<Vec<NewCommand>> {
    Ok(serde_json::from_str(SEED_JSON)?)
}

pub fn seed_commands() -> Result<Vec<Command>> {
    Ok(seed_records()?
        .into_iter()
        .map(|rec| {
            let id = command_id(&rec.title, &rec.command);
            rec.with_id(id)
        })
        .collect())
}
