/// Update function for the library browser
///
/// Every message maps to exactly one transition. Cursor motion is clamped to
/// the loaded list; failures only ever touch the error field.

use crate::library::LibraryState;
use crate::tea::{Key, Message, Outcome, UpdateResult};

/// Main update function that processes messages and returns updated model with commands
pub fn update(mut model: LibraryState, message: Message) -> UpdateResult<LibraryState> {
    match message {
        Message::KeyInput(key) => update_key(model, key),
        Message::CommandCompleted(outcome) => update_outcome(model, outcome),
        Message::Resize { height, .. } => {
            model.viewport_height = Some(height);
            UpdateResult::just_model(model)
        }
        Message::Error { cause } => {
            model.error = Some(cause);
            UpdateResult::just_model(model)
        }
        Message::Quit => UpdateResult::stop(model),
    }
}

/// Handle keyboard input
fn update_key(mut model: LibraryState, key: Key) -> UpdateResult<LibraryState> {
    let last = model.files.len().saturating_sub(1);

    match key {
        Key::Esc | Key::Ctrl('c') | Key::Char('q') => return UpdateResult::stop(model),

        Key::Up | Key::Char('k') => model.cursor = model.cursor.saturating_sub(1),
        Key::Down | Key::Char('j') => model.cursor = (model.cursor + 1).min(last),
        Key::Home | Key::Char('g') => model.cursor = 0,
        Key::End | Key::Char('G') => model.cursor = last,

        Key::Enter => {
            if model.cursor < model.files.len() {
                model.selected = Some(model.cursor);
            }
        }

        Key::Char('r') => {
            // one scan at a time
            if !model.loading {
                model.loading = true;
                let command = model.scan_command();
                return UpdateResult::with_command(model, command);
            }
        }

        _ => {}
    }

    UpdateResult::just_model(model)
}

/// Handle the result of a finished command
fn update_outcome(mut model: LibraryState, outcome: Outcome) -> UpdateResult<LibraryState> {
    let succeeded = match outcome {
        Outcome::FileListResult { names } => {
            model.loading = false;
            model.error = None;
            model.files = names;
            if model.files.is_empty() || model.cursor >= model.files.len() {
                model.cursor = 0;
            }
            if model.selected.is_some_and(|index| index >= model.files.len()) {
                model.selected = None;
            }
            true
        }
        Outcome::Failure { cause } => {
            model.loading = false;
            model.error = Some(cause);
            false
        }
        Outcome::StatusResult { .. } | Outcome::Blink { .. } => {
            return UpdateResult::just_model(model);
        }
    };

    if model.policy.flow(succeeded).is_stop() {
        UpdateResult::stop(model)
    } else {
        UpdateResult::just_model(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tea::{Command, CompletionPolicy, Flow};

    fn loaded(names: &[&str], cursor: usize) -> LibraryState {
        LibraryState {
            files: names.iter().map(|s| s.to_string()).collect(),
            cursor,
            loading: false,
            ..LibraryState::default()
        }
    }

    fn key(name: &str) -> Message {
        Message::KeyInput(name.parse().unwrap())
    }

    #[test]
    fn test_up_at_top_is_clamped() {
        let result = update(loaded(&["a.pdf", "b.pdf"], 0), key("up"));
        assert_eq!(result.model.cursor, 0);
        assert_eq!(result.flow, Flow::Continue);
    }

    #[test]
    fn test_vim_keys_navigate() {
        let model = loaded(&["a.pdf", "b.pdf", "c.pdf"], 0);
        let model = update(model, key("j")).model;
        let model = update(model, key("j")).model;
        assert_eq!(model.cursor, 2);
        let model = update(model, key("k")).model;
        assert_eq!(model.cursor, 1);
        let model = update(model, key("G")).model;
        assert_eq!(model.cursor, 2);
        let model = update(model, key("g")).model;
        assert_eq!(model.cursor, 0);
    }

    #[test]
    fn test_navigation_on_empty_list_stays_at_zero() {
        for name in ["down", "up", "end", "home", "j"] {
            let result = update(loaded(&[], 0), key(name));
            assert_eq!(result.model.cursor, 0, "{name}");
        }
    }

    #[test]
    fn test_enter_selects_current_row() {
        let result = update(loaded(&["a.pdf", "b.pdf"], 1), key("enter"));
        assert_eq!(result.model.selected, Some(1));
        assert_eq!(result.model.selected_file(), Some("b.pdf"));

        let empty = update(loaded(&[], 0), key("enter"));
        assert_eq!(empty.model.selected, None);
    }

    #[test]
    fn test_rescan_only_when_idle() {
        let result = update(loaded(&["a.pdf"], 0), key("r"));
        assert!(result.model.loading);
        assert_eq!(result.command, Command::list_files(".", "pdf"));

        let again = update(result.model, key("r"));
        assert!(again.command.is_none());
    }

    #[test]
    fn test_quit_keys_stop() {
        for name in ["q", "esc", "ctrl+c"] {
            let model = loaded(&["a.pdf"], 0);
            let result = update(model.clone(), key(name));
            assert_eq!(result.flow, Flow::Stop, "{name}");
            assert_eq!(result.model, model);
            assert!(result.command.is_none());
        }
    }

    #[test]
    fn test_reload_clamps_cursor_and_selection() {
        let mut model = loaded(&["a.pdf", "b.pdf", "c.pdf"], 2);
        model.selected = Some(2);
        model.loading = true;

        let result = update(
            model,
            Message::CommandCompleted(Outcome::FileListResult {
                names: vec!["a.pdf".to_string()],
            }),
        );
        assert_eq!(result.model.cursor, 0);
        assert_eq!(result.model.selected, None);
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut model = loaded(&[], 0);
        model.error = Some("boom".to_string());
        let result = update(
            model,
            Message::CommandCompleted(Outcome::FileListResult { names: vec![] }),
        );
        assert_eq!(result.model.error, None);
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut model = loaded(&["a.pdf", "b.pdf"], 1);
        model.selected = Some(1);
        model.loading = true;

        let result = update(
            model,
            Message::CommandCompleted(Outcome::Failure {
                cause: "permission denied".to_string(),
            }),
        );
        assert_eq!(result.model.files, vec!["a.pdf".to_string(), "b.pdf".to_string()]);
        assert_eq!(result.model.cursor, 1);
        assert_eq!(result.model.selected, Some(1));
        assert_eq!(result.model.error.as_deref(), Some("permission denied"));
        assert_eq!(result.flow, Flow::Continue);
    }

    #[test]
    fn test_policy_can_stop_after_scan() {
        let mut model = LibraryState::default();
        model.policy = CompletionPolicy::one_shot();
        let result = update(
            model,
            Message::CommandCompleted(Outcome::FileListResult { names: vec![] }),
        );
        assert_eq!(result.flow, Flow::Stop);
    }

    #[test]
    fn test_unrelated_outcomes_are_noops() {
        let model = loaded(&["a.pdf"], 0);
        for outcome in [Outcome::StatusResult { code: 200 }, Outcome::Blink { generation: 7 }] {
            let result = update(model.clone(), Message::CommandCompleted(outcome));
            assert_eq!(result.model, model);
            assert!(result.command.is_none());
            assert_eq!(result.flow, Flow::Continue);
        }
    }

    #[test]
    fn test_resize_and_internal_error() {
        let model = loaded(&["a.pdf"], 0);
        let resized = update(model, Message::Resize { width: 80, height: 12 }).model;
        assert_eq!(resized.viewport_height, Some(12));

        let errored = update(resized, Message::Error { cause: "input closed".to_string() });
        assert_eq!(errored.model.error.as_deref(), Some("input closed"));
        assert_eq!(errored.flow, Flow::Continue);
    }
}
