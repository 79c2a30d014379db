use crate::constants::{MAX_NOISE_TOKEN_LEN, STOP_WORDS};

pub fn is_stop_word(w: &str) -> bool {
    STOP_WORDS.contains(&w)
}

/// Split a query into lower-cased whitespace tokens, dropping stop-words and
/// tokens of two characters or fewer.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > MAX_NOISE_TOKEN_LEN && !is_stop_word(w))
        .map(str::to_owned)
        .collect()
}

/// True when every token occurs somewhere in `haystack`.
pub fn contains_all(haystack: &str, tokens: &[String]) -> bool {
    tokens.iter().all(|t| haystack.contains(t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_short_tokens_and_stop_words() {
        assert_eq!(
            tokenize("Jak znaleźć DUŻE pliki i katalogi oraz ls"),
            vec!["znaleźć", "duże", "pliki", "katalogi"]
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // "łą" is four bytes but two characters
        assert!(tokenize("łą").is_empty());
        assert_eq!(tokenize("żół"), vec!["żół"]);
    }

    #[test]
    fn noise_only_query_has_no_tokens() {
        assert!(tokenize("i oraz").is_empty());
        assert!(tokenize("the command polecenia").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(tokenize("find\tfiles\nnow"), vec!["find", "files", "now"]);
    }

    #[test]
    fn contains_all_is_conjunctive() {
        let tokens = vec!["pliki".to_string(), "xyz".to_string()];
        assert!(!contains_all("duże pliki", &tokens));
        assert!(contains_all("duże pliki xyz", &tokens));
        assert!(contains_all("anything", &[]));
    }
}
