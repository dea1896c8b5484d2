//! Displayed result collection.

use std::sync::Arc;

use elf_core::SearchResult;

use super::favorite::FavoriteState;

/// One displayed match. The favorite flag is the row's own local copy.
#[derive(Debug)]
pub struct ResultRow {
    favorite: FavoriteState,
}

impl ResultRow {
    pub fn new(result: SearchResult) -> Self {
        Self {
            favorite: FavoriteState::new(result.path, result.favorited),
        }
    }

    pub fn path(&self) -> &str {
        self.favorite.path()
    }

    pub fn is_favorited(&self) -> bool {
        self.favorite.is_favorited()
    }

    pub fn favorite(&self) -> &FavoriteState {
        &self.favorite
    }
}

/// The result collection published by the dispatcher.
///
/// Replaced wholesale by every completed search; rows keep backend order.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    /// Generation of the latest dispatch.
    pub generation: u64,

    pub rows: Vec<Arc<ResultRow>>,

    /// Whether the latest dispatch is still waiting for its response.
    pub loading: bool,
}

impl ResultList {
    pub fn from_results(generation: u64, results: Vec<SearchResult>) -> Self {
        Self {
            generation,
            rows: results.into_iter().map(|r| Arc::new(ResultRow::new(r))).collect(),
            loading: false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row by zero-based index.
    pub fn get(&self, index: usize) -> Option<&Arc<ResultRow>> {
        self.rows.get(index)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.path()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_results_keeps_order_and_flags() {
        let list = ResultList::from_results(
            3,
            vec![
                SearchResult::new("b.txt", true),
                SearchResult::new("a.txt", false),
                SearchResult::new("b.txt", true),
            ],
        );
        assert_eq!(list.generation, 3);
        assert!(!list.loading);
        assert_eq!(list.paths(), vec!["b.txt", "a.txt", "b.txt"]);
        assert!(list.get(0).unwrap().is_favorited());
        assert!(!list.get(1).unwrap().is_favorited());
        assert!(list.get(3).is_none());
    }
}
