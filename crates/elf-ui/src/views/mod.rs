//! Search view and its terminal rendering.

pub mod render;
pub mod search_view;
pub mod terminal;

pub use render::{render_notification, render_query, render_results, render_view, HELP};
pub use search_view::{InputEvent, SearchView};
pub use terminal::{parse_line, TerminalInput};
