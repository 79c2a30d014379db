//! The command catalog: an immutable collection of [`Command`] records.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use crate::command::{Category, Command};
use crate::constants::CATEGORY_ALL;
use crate::error::{CatalogError, Result};
use crate::io_util::read_json;
use crate::seed;

/// Read access to a catalog. The search engine depends on nothing else.
pub trait Catalog: Send + Sync {
    /// Every record, in catalog order.
    fn get_all(&self) -> Vec<&Command>;

    /// Records whose category equals `category`. `"all"` behaves like
    /// [`Catalog::get_all`]; unknown values yield nothing.
    fn get_by_category(&self, category: &str) -> Vec<&Command> {
        if category == CATEGORY_ALL {
            return self.get_all();
        }
        let Ok(wanted) = category.parse::<Category>() else {
            return Vec::new();
        };
        self.get_all()
            .into_iter()
            .filter(|c| c.category == wanted)
            .collect()
    }

    /// Records whose id is in `ids`, in catalog order. Unknown ids are skipped.
    fn get_by_ids(&self, ids: &[String]) -> Vec<&Command> {
        if ids.is_empty() {
            return Vec::new();
        }
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.get_all()
            .into_iter()
            .filter(|c| wanted.contains(c.id.as_str()))
            .collect()
    }
}

/// In-memory catalog keyed by id, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    commands: Vec<Command>,
    by_id: HashMap<String, usize>,
}

impl MemoryCatalog {
    /// Build a catalog, rejecting duplicate ids and empty text fields.
    pub fn new(commands: Vec<Command>) -> std::result::Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(commands.len());
        for (pos, cmd) in commands.iter().enumerate() {
            validate(cmd)?;
            if by_id.insert(cmd.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(cmd.id.clone()));
            }
        }
        Ok(MemoryCatalog { commands, by_id })
    }

    /// Load a catalog snapshot written by the `seed` binary.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let commands: Vec<Command> = read_json(&path)?;
        debug!(
            path = %path.as_ref().display(),
            records = commands.len(),
            "loaded catalog snapshot"
        );
        Ok(Self::new(commands)?)
    }

    /// The catalog built from the embedded seed data.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(seed::seed_commands()?)?)
    }

    /// Load the snapshot at `path`, or the built-in catalog when there is none.
    /// A snapshot that exists but fails to parse or validate is an error.
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        info!(path = %path.display(), "no catalog snapshot, using built-in seed");
        Self::builtin()
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.by_id.get(id).map(|&pos| &self.commands[pos])
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl Catalog for MemoryCatalog {
    fn get_all(&self) -> Vec<&Command> {
        self.commands.iter().collect()
    }
}

fn validate(cmd: &Command) -> std::result::Result<(), CatalogError> {
    let fields = [
        ("id", &cmd.id),
        ("title", &cmd.title),
        ("command", &cmd.command),
        ("description", &cmd.description),
        ("explanation", &cmd.explanation),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                id: cmd.id.clone(),
                field,
            });
        }
    }
    Ok(())
}
