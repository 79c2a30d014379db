//! Search behaviour over the built-in catalog.

use linux_helper::{Catalog, Category, Command, MemoryCatalog, SearchEngine};

fn engine() -> SearchEngine<MemoryCatalog> {
    SearchEngine::new(MemoryCatalog::builtin().expect("seed catalog"))
}

fn ids(cmds: &[&Command]) -> Vec<String> {
    cmds.iter().map(|c| c.id.clone()).collect()
}

const QUERIES: &[&str] = &["", "pliki", "cpu", "dysk", "sieć", "find", "znajdź pliki", "oraz"];

#[test]
fn category_results_stay_in_category() {
    let e = engine();
    for category in Category::ALL {
        for q in QUERIES {
            for cmd in e.search(q, Some(category.as_str())) {
                assert_eq!(cmd.category, category, "query {q:?}");
            }
        }
    }
}

#[test]
fn all_and_absent_category_agree() {
    let e = engine();
    for q in QUERIES {
        assert_eq!(ids(&e.search(q, Some("all"))), ids(&e.search(q, None)));
    }
}

#[test]
fn every_token_must_match() {
    let e = engine();
    let tokens = ["znajdź", "pliki"];
    let results = e.search("znajdź pliki", None);
    assert!(!results.is_empty());
    for cmd in e.catalog().get_all() {
        let text = cmd.searchable_text();
        let expected = tokens.iter().all(|t| text.contains(t));
        let included = results.iter().any(|r| r.id == cmd.id);
        assert_eq!(expected, included, "{}", cmd.title);
    }

    assert!(!e.search("pliki", None).is_empty());
    assert!(e.search("pliki xyz123notfound", None).is_empty());
}

#[test]
fn stop_words_alone_match_nothing() {
    let e = engine();
    assert!(e.search("i oraz", Some("all")).is_empty());
    assert!(MemoryCatalog::default().get_all().is_empty());
    assert!(SearchEngine::new(MemoryCatalog::default())
        .search("i oraz", Some("all"))
        .is_empty());
}

#[test]
fn empty_query_browses() {
    let e = engine();
    for category in ["all", "files", "processes", "network", "system", "unknown"] {
        assert_eq!(
            ids(&e.search("", Some(category))),
            ids(&e.catalog().get_by_category(category))
        );
    }
    assert_eq!(e.search("", None).len(), e.catalog().len());
}

#[test]
fn repeated_searches_are_identical() {
    let e = engine();
    for q in QUERIES {
        assert_eq!(ids(&e.search(q, None)), ids(&e.search(q, None)));
    }
}

#[test]
fn id_lookup_skips_unknown() {
    let e = engine();
    let all = e.catalog().get_all();
    let (a, b) = (all[5].id.clone(), all[2].id.clone());
    let found = e
        .catalog()
        .get_by_ids(&[a.clone(), b.clone(), "unknown".to_string()]);
    assert_eq!(ids(&found), vec![b, a]);
}

#[test]
fn finds_large_files_record() {
    let e = engine();
    let results = e.search("znajdź duże pliki", Some("all"));
    assert!(results
        .iter()
        .any(|c| c.command == "find . -size +100M -type f"));
}

#[test]
fn unmatched_extra_word_empties_results() {
    let e = engine();
    assert!(e
        .search("znajdź duże pliki nieistniejące_slowo_xyz", Some("all"))
        .is_empty());
}

#[test]
fn cpu_is_not_a_network_command() {
    let e = engine();
    assert!(!e.search("cpu", Some("processes")).is_empty());
    assert!(e.search("cpu", Some("network")).is_empty());
}

#[test]
fn results_keep_catalog_order() {
    let e = engine();
    let positions: Vec<usize> = e
        .search("pliki", None)
        .iter()
        .map(|r| {
            e.catalog()
                .get_all()
                .iter()
                .position(|c| c.id == r.id)
                .unwrap()
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
