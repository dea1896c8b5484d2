//! Plain-text rendering for the terminal front end.

use elf_core::{NotificationMessage, Query};

use crate::model::{ResultList, SearchMode};

fn flag(name: &str, on: bool) -> String {
    format!("{}:{}", name, if on { "on" } else { "off" })
}

/// Query line: entry, resolved mode and the three flags.
pub fn render_query(query: &Query) -> String {
    format!(
        "> {}  ({})  {} {} {}",
        query.entry_text,
        SearchMode::of(query).label(),
        flag("fuzzy", query.fuzzy),
        flag("regex", query.regex),
        flag("smart", query.smart),
    )
}

/// Result rows, one per line, numbered from 1 in backend order.
pub fn render_results(list: &ResultList) -> String {
    if list.loading {
        return "Searching...".to_string();
    }
    if list.is_empty() {
        return "No results.".to_string();
    }
    list.rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let star = if row.is_favorited() { "*" } else { " " };
            format!("{}. [{}] {}", i + 1, star, row.path())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The notification line, if one is showing.
pub fn render_notification(message: &NotificationMessage) -> Option<String> {
    message.visible.then(|| format!("-- {} --", message.text))
}

pub fn render_view(query: &Query, list: &ResultList) -> String {
    format!("{}\n{}", render_query(query), render_results(list))
}

pub const HELP: &str = "\
Type text and press Enter to search.
/fuzzy /regex /smart   toggle a mode (fuzzy/regex re-run the search)
/open N /dir N /edit N open row N as file, folder, or in the editor
/copy N /star N        copy the path of row N, toggle its favorite
/config                open the backend configuration
/dismiss               hide the notification
/help /quit";
