//! Line parsing for the terminal front end.

use crate::actions::RowAction;
use crate::views::search_view::InputEvent;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// Plain text: set the entry and search.
    Search(String),
    Event(InputEvent),
    Help,
    Quit,
    Empty,
}

/// Parse a line typed at the prompt.
///
/// Row numbers are 1-based as displayed.
pub fn parse_line(line: &str) -> Result<TerminalInput, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(TerminalInput::Empty);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(TerminalInput::Search(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let input = match name {
        "fuzzy" => TerminalInput::Event(InputEvent::ToggleFuzzy),
        "regex" => TerminalInput::Event(InputEvent::ToggleRegex),
        "smart" => TerminalInput::Event(InputEvent::ToggleSmart),
        "search" => TerminalInput::Event(InputEvent::SearchClicked),
        "config" => TerminalInput::Event(InputEvent::OpenConfig),
        "dismiss" => TerminalInput::Event(InputEvent::DismissNotification),
        "help" => TerminalInput::Help,
        "quit" | "exit" => TerminalInput::Quit,
        "open" => row(RowAction::OpenFile, arg)?,
        "dir" => row(RowAction::OpenDir, arg)?,
        "edit" => row(RowAction::OpenEditor, arg)?,
        "copy" => row(RowAction::CopyPath, arg)?,
        "star" => row(RowAction::ToggleFavorite, arg)?,
        other => return Err(format!("Unknown command: /{} (try /help)", other)),
    };
    Ok(input)
}

fn row(action: RowAction, arg: Option<&str>) -> Result<TerminalInput, String> {
    let number: usize = arg
        .ok_or_else(|| format!("/{} needs a row number", action.label()))?
        .parse()
        .map_err(|_| format!("/{} needs a row number", action.label()))?;
    if number == 0 {
        return Err("Rows are numbered from 1".to_string());
    }
    Ok(TerminalInput::Event(InputEvent::Row {
        index: number - 1,
        action,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_search() {
        assert_eq!(
            parse_line("  report  ").unwrap(),
            TerminalInput::Search("report".to_string())
        );
        assert_eq!(parse_line("").unwrap(), TerminalInput::Empty);
    }

    #[test]
    fn test_mode_commands() {
        assert_eq!(
            parse_line("/regex").unwrap(),
            TerminalInput::Event(InputEvent::ToggleRegex)
        );
        assert_eq!(parse_line("/quit").unwrap(), TerminalInput::Quit);
    }

    #[test]
    fn test_row_commands_are_one_based() {
        assert_eq!(
            parse_line("/star 2").unwrap(),
            TerminalInput::Event(InputEvent::Row {
                index: 1,
                action: RowAction::ToggleFavorite
            })
        );
        assert!(parse_line("/open 0").is_err());
        assert!(parse_line("/copy").is_err());
        assert!(parse_line("/dir x").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_line("/nope").unwrap_err();
        assert!(err.contains("/nope"));
    }
}
