//! Search mode resolution.
//!
//! The three mode flags are independent toggles. They resolve to exactly one
//! backend operation with the priority smart > regex > fuzzy/literal.

use elf_client::Command;
use elf_core::Query;

/// The tier a query resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// `hot_search`: may walk locations outside the index. Explicit only.
    Smart,
    /// `regex_search`: pattern match, fuzzy flag ignored.
    Regex,
    /// `search`: literal lookup, optionally fuzzy.
    Literal,
}

impl SearchMode {
    pub fn of(query: &Query) -> Self {
        if query.smart {
            SearchMode::Smart
        } else if query.regex {
            SearchMode::Regex
        } else {
            SearchMode::Literal
        }
    }

    /// Short label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Smart => "smart",
            SearchMode::Regex => "regex",
            SearchMode::Literal => "literal",
        }
    }
}

/// Resolve a query to the single command a dispatch sends.
pub fn resolve(query: &Query) -> Command {
    let entry = query.entry_text.clone();
    match SearchMode::of(query) {
        SearchMode::Smart => Command::HotSearch {
            entry,
            is_fuzzy: query.fuzzy,
            is_regex: query.regex,
        },
        SearchMode::Regex => Command::RegexSearch { entry },
        SearchMode::Literal => Command::Search {
            entry,
            is_fuzzy: query.fuzzy,
        },
    }
}

/// Whether moving from `prev` to `next` should fire a search on its own.
///
/// Fires only when there is text to search, smart mode is off, and the
/// fuzzy or regex flag changed. Typing alone never fires.
pub fn should_auto_fire(prev: &Query, next: &Query) -> bool {
    next.has_entry() && !next.smart && (prev.fuzzy != next.fuzzy || prev.regex != next.regex)
}
