use tracing::debug;

use crate::catalog::Catalog;
use crate::command::Command;
use crate::constants::CATEGORY_ALL;
use crate::text::{contains_all, tokenize};

/// Filters a catalog by category and query text.
///
/// Searching never mutates the catalog, so one engine can be shared across
/// any number of concurrent callers.
pub struct SearchEngine<C> {
    catalog: C,
}

impl<C: Catalog> SearchEngine<C> {
    pub fn new(catalog: C) -> Self {
        SearchEngine { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Return the records matching `query` within `category`, in catalog order.
    ///
    /// An empty query browses the category. Otherwise every token surviving
    /// stop-word filtering must occur in a record's searchable text; a query
    /// made only of noise words matches nothing.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&Command> {
        let scoped = match category {
            Some(c) if !c.is_empty() && c != CATEGORY_ALL => self.catalog.get_by_category(c),
            _ => self.catalog.get_all(),
        };

        if query.is_empty() {
            return scoped;
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            debug!(query, "no meaningful search terms");
            return Vec::new();
        }

        let results: Vec<&Command> = scoped
            .into_iter()
            .filter(|cmd| contains_all(&cmd.searchable_text(), &tokens))
            .collect();

        debug!(
            query,
            category = category.unwrap_or(CATEGORY_ALL),
            ?tokens,
            results = results.len(),
            "search finished"
        );
        results
    }
}

/// Print matches for the CLI and return how many records matched in total.
pub fn search_and_print<C: Catalog>(
    engine: &SearchEngine<C>,
    query: &str,
    category: Option<&str>,
    top_k: usize,
) -> usize {
    let tokens = tokenize(query);

    println!("\nQuery: '{query}'");
    println!("  Tokens: {tokens:?}");

    let results = engine.search(query, category);

    if results.is_empty() {
        if tokens.is_empty() && !query.is_empty() {
            println!("  No searchable terms.");
        } else {
            println!("  No results found.");
        }
        return 0;
    }

    for cmd in results.iter().take(top_k) {
        println!("  [{}] {}", cmd.category, cmd.title);
        println!("      $ {}", cmd.command);
        println!("      {}  (id: {})", cmd.description, cmd.id);
    }
    if results.len() > top_k {
        println!("  … {} more", results.len() - top_k);
    }

    results.len()
}
