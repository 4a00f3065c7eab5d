//! Free-text matcher / 关键词匹配
//!
//! Conjunctive substring match: every query token must occur somewhere in the
//! record's haystack. No scoring, no fuzzy matching.

use super::tokenizer::{haystack, tokenize_query};
use super::Record;

#[derive(Debug, Clone, Default)]
pub struct SearchMatcher {
    tokens: Vec<String>,
}

impl SearchMatcher {
    pub fn new(query: &str) -> Self {
        Self { tokens: tokenize_query(query) }
    }

    /// Blank query matches everything / 空查询匹配全部
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Query as seen by the matcher, for logs / 规范化后的查询
    pub fn normalized(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn matches_text(&self, haystack: &str) -> bool {
        self.tokens.iter().all(|t| haystack.contains(t.as_str()))
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.is_empty() || self.matches_text(&haystack(&record.searchable_fields()))
    }

    pub fn apply<'a, R: Record>(&self, records: Vec<&'a R>) -> Vec<&'a R> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::test_support::{items, Item};

    fn run<'a>(data: &'a [Item], q: &str) -> Vec<&'a Item> {
        SearchMatcher::new(q).apply(data.iter().collect())
    }

    fn ids(v: &[&Item]) -> Vec<u32> {
        v.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let data = items();
        assert_eq!(run(&data, "").len(), data.len());
        assert_eq!(run(&data, "    ").len(), data.len());
    }

    #[test]
    fn test_results_never_grow() {
        let data = items();
        for q in ["moscow", "state", "kazan volga", "zzz", "a"] {
            assert!(run(&data, q).len() <= data.len());
        }
    }

    #[test]
    fn test_token_order_independent() {
        let data = items();
        assert_eq!(ids(&run(&data, "moscow state")), ids(&run(&data, "state moscow")));
        assert_eq!(ids(&run(&data, "moscow state")), vec![1, 5, 6]);
    }

    #[test]
    fn test_case_insensitive() {
        let data = items();
        assert_eq!(ids(&run(&data, "MOSCOW")), ids(&run(&data, "moscow")));
        assert_eq!(ids(&run(&data, "KaZaN")), vec![2, 4]);
    }

    #[test]
    fn test_idempotent() {
        let data = items();
        let once = run(&data, "state");
        let twice = SearchMatcher::new("state").apply(once.clone());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_conjunctive_across_fields() {
        let data = items();
        // "kazan" from the name, "medicine" from the note
        assert_eq!(ids(&run(&data, "kazan medicine")), vec![4]);
        assert!(run(&data, "kazan siberia").is_empty());
    }

    #[test]
    fn test_extra_spaces_do_not_match_everything() {
        let data = items();
        assert_eq!(ids(&run(&data, "  tomsk   ")), vec![3]);
        assert_eq!(SearchMatcher::new("a   b").tokens().len(), 2);
        assert_eq!(SearchMatcher::new("  Tomsk  State ").normalized(), "tomsk state");
    }
}
