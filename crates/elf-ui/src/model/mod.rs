//! View-independent state for the search view.
//!
//! Nothing in here knows how it is drawn, so it can be tested without a
//! front end.

pub mod favorite;
pub mod mode;
pub mod results;

pub use favorite::{toggle_favorite, FavoriteState};
pub use mode::{resolve, should_auto_fire, SearchMode};
pub use results::{ResultList, ResultRow};
