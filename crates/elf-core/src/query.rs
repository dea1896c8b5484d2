//! Query state edited by the search view.

/// The user's current search input and mode flags.
///
/// The three flags are independent toggles. They are never validated against
/// each other; `fuzzy && regex` is passed through to the backend as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Text typed into the search field.
    pub entry_text: String,

    /// Fuzzy matching hint.
    pub fuzzy: bool,

    /// Treat the entry as a regular expression.
    pub regex: bool,

    /// Use the smart (hot directory) search tier.
    pub smart: bool,
}

impl Query {
    /// Create a query with all flags off.
    pub fn new(entry_text: impl Into<String>) -> Self {
        Self {
            entry_text: entry_text.into(),
            ..Self::default()
        }
    }

    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    pub fn with_smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }

    /// Whether there is any text to search for.
    pub fn has_entry(&self) -> bool {
        !self.entry_text.is_empty()
    }
}
