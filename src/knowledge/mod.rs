//! Knowledge retrieval
//!
//! Keyword-overlap search over the fixed article catalog plus a
//! session-scoped collection of user documents. Matching is OR-substring:
//! an item qualifies if any whitespace-separated query term occurs anywhere
//! in its searchable text. At this corpus size (four curated articles) that
//! is the whole search story — no index, no scoring.
//!
//! The store is an explicit instance owned by the caller, not a process-wide
//! singleton, so sessions and tests stay isolated.

mod catalog;

use crate::models::{KnowledgeItem, UserDocument};
pub use catalog::CATALOG;

/// How many matched articles feed the LLM grounding context.
const CONTEXT_ITEM_LIMIT: usize = 2;

/// Holds the fixed catalog and the mutable user-document collection.
///
/// Single-writer, single-reader per logical session; callers needing
/// concurrent access wrap the store in a lock.
pub struct KnowledgeStore {
    catalog: &'static [KnowledgeItem],
    documents: Vec<UserDocument>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        Self {
            catalog: &CATALOG,
            documents: Vec::new(),
        }
    }

    /// Append documents, preserving insertion order. Ids are caller-generated;
    /// duplicates are accepted and retained.
    pub fn add_documents(&mut self, docs: impl IntoIterator<Item = UserDocument>) {
        self.documents.extend(docs);
    }

    /// Remove every document matching `id`. Removing an unknown id is a no-op.
    pub fn remove_document(&mut self, id: &str) {
        self.documents.retain(|doc| doc.id != id);
    }

    /// Search the fixed catalog. Results keep catalog order; there is no
    /// ranking beyond inclusion. A query with no real terms (empty or
    /// whitespace-only) matches nothing.
    pub fn search_knowledge(&self, query: &str) -> Vec<&KnowledgeItem> {
        let terms = split_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        self.catalog
            .iter()
            .filter(|item| {
                let searchable = format!(
                    "{} {} {}",
                    item.title,
                    item.content,
                    item.keywords.join(" ")
                )
                .to_lowercase();
                any_term_matches(&searchable, &terms)
            })
            .collect()
    }

    pub fn get_knowledge_by_id(&self, id: &str) -> Option<&KnowledgeItem> {
        self.catalog.iter().find(|item| item.id == id)
    }

    pub fn all_knowledge(&self) -> &[KnowledgeItem] {
        self.catalog
    }

    /// Build grounding context for the chat model: the first two matched
    /// articles as `"<title>:\n<content>"` blocks joined by a blank line.
    /// Empty string means "no grounding available" — the caller sends the
    /// query ungrounded.
    pub fn relevant_context(&self, query: &str) -> String {
        let matched = self.search_knowledge(query);
        if matched.is_empty() {
            return String::new();
        }

        matched
            .iter()
            .take(CONTEXT_ITEM_LIMIT)
            .map(|item| format!("{}:\n{}", item.title, item.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Search user documents by name and content, same OR-substring
    /// semantics as the catalog search. Insertion order is preserved.
    pub fn search_user_documents(&self, query: &str) -> Vec<&UserDocument> {
        let terms = split_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        self.documents
            .iter()
            .filter(|doc| {
                let searchable = format!("{} {}", doc.name, doc.content).to_lowercase();
                any_term_matches(&searchable, &terms)
            })
            .collect()
    }

    pub fn documents(&self) -> &[UserDocument] {
        &self.documents
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased whitespace-separated query terms. `split_whitespace` discards
/// empty fragments, which is what makes the empty-query boundary hold.
fn split_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

fn any_term_matches(searchable: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| searchable.contains(term.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str, content: &str) -> UserDocument {
        UserDocument {
            id: id.to_string(),
            name: name.to_string(),
            kind: "text/plain".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let store = KnowledgeStore::new();
        let items = store.all_knowledge();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let store = KnowledgeStore::new();
        assert!(store.search_knowledge("").is_empty());
        assert!(store.search_knowledge("   ").is_empty());
        assert!(store.search_user_documents("").is_empty());
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let store = KnowledgeStore::new();
        let results = store.search_knowledge("80c");
        assert!(results.iter().any(|item| item.id == "tax-planning-guide"));

        let results_upper = store.search_knowledge("80C");
        assert!(results_upper
            .iter()
            .any(|item| item.id == "tax-planning-guide"));
    }

    #[test]
    fn test_or_semantics_across_terms() {
        let store = KnowledgeStore::new();
        // "zzzz" matches nothing, "retirement" matches — OR keeps the item
        let results = store.search_knowledge("zzzz retirement");
        assert!(results.iter().any(|item| item.id == "retirement-planning"));
    }

    #[test]
    fn test_results_preserve_catalog_order() {
        let store = KnowledgeStore::new();
        // "planning" appears across several articles
        let results = store.search_knowledge("planning");
        let positions: Vec<usize> = results
            .iter()
            .map(|item| {
                store
                    .all_knowledge()
                    .iter()
                    .position(|c| c.id == item.id)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_get_knowledge_by_id() {
        let store = KnowledgeStore::new();
        assert!(store.get_knowledge_by_id("investment-strategies").is_some());
        assert!(store.get_knowledge_by_id("no-such-article").is_none());
    }

    #[test]
    fn test_relevant_context_empty_iff_no_match() {
        let store = KnowledgeStore::new();
        assert_eq!(store.relevant_context("xyzzy"), "");

        let context = store.relevant_context("80c deduction");
        assert!(!context.is_empty());
        assert!(context.contains("Tax Planning Guide"));
    }

    #[test]
    fn test_relevant_context_takes_at_most_two() {
        let store = KnowledgeStore::new();
        // "planning" matches three articles; context carries only the first two
        let context = store.relevant_context("planning");
        assert!(context.contains("Tax Planning Guide"));
        assert!(context.contains("Retirement Planning"));
        assert!(!context.contains("Expense Management"));
    }

    #[test]
    fn test_user_document_lifecycle() {
        let mut store = KnowledgeStore::new();
        store.add_documents([doc("a", "x", "tax tips")]);

        let found = store.search_user_documents("tax");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");

        store.remove_document("a");
        assert!(store.search_user_documents("tax").is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = KnowledgeStore::new();
        store.add_documents([doc("a", "x", "tax tips")]);
        store.remove_document("b");
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_retained_and_removed_together() {
        let mut store = KnowledgeStore::new();
        store.add_documents([doc("a", "first", "alpha"), doc("a", "second", "beta")]);
        assert_eq!(store.documents().len(), 2);

        store.remove_document("a");
        assert!(store.documents().is_empty());
    }

    #[test]
    fn test_user_document_search_preserves_insertion_order() {
        let mut store = KnowledgeStore::new();
        store.add_documents([
            doc("1", "salary march", "gross salary 80000"),
            doc("2", "salary april", "gross salary 82000"),
        ]);

        let found = store.search_user_documents("salary");
        let ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
