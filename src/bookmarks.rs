//! Saved command records.

use std::path::Path;

use crate::command::Command;
use crate::error::Result;
use crate::io_util::{read_json_or_default, write_json};

#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    items: Vec<Command>,
}

impl Bookmarks {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Bookmarks {
            items: read_json_or_default(path)?,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(path, &self.items)
    }

    /// Returns false when the record was already bookmarked.
    pub fn add(&mut self, command: &Command) -> bool {
        if self.is_bookmarked(&command.id) {
            return false;
        }
        self.items.push(command.clone());
        true
    }

    /// Returns false when nothing was bookmarked under `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c.id != id);
        self.items.len() != before
    }

    /// Flip the bookmark state; returns true if the record is now bookmarked.
    pub fn toggle(&mut self, command: &Command) -> bool {
        if self.remove(&command.id) {
            false
        } else {
            self.add(command)
        }
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.items.iter().any(|c| c.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|c| c.id.clone()).collect()
    }

    pub fn items(&self) -> &[Command] {
        &self.items
    }
}
