/// Update function for the HTTP probe
///
/// Interrupt keys stop, enter launches a check, every other key edits the
/// URL. Whether a completion ends the run is decided by the state's policy.

use crate::probe::ProbeState;
use crate::tea::{Key, Message, Outcome, UpdateResult};

/// Main update function that processes messages and returns updated model with commands
pub fn update(mut model: ProbeState, message: Message) -> UpdateResult<ProbeState> {
    match message {
        Message::KeyInput(key) => update_key(model, key),
        Message::CommandCompleted(outcome) => update_outcome(model, outcome),
        Message::Resize { .. } => UpdateResult::just_model(model),
        Message::Error { cause } => {
            model.error = Some(cause);
            UpdateResult::just_model(model)
        }
        Message::Quit => UpdateResult::stop(model),
    }
}

fn update_key(mut model: ProbeState, key: Key) -> UpdateResult<ProbeState> {
    if key.is_interrupt() {
        return UpdateResult::stop(model);
    }

    if key == Key::Enter {
        // one check at a time, and only for a non-empty URL
        if model.loading || model.input.is_empty() {
            return UpdateResult::just_model(model);
        }
        model.loading = true;
        model.error = None;
        model.checked_url = Some(model.input.value());
        let command = model.probe_command();
        return UpdateResult::with_command(model, command);
    }

    let command = model.input.handle_key(key);
    UpdateResult::with_command(model, command)
}

fn update_outcome(mut model: ProbeState, outcome: Outcome) -> UpdateResult<ProbeState> {
    let succeeded = match outcome {
        Outcome::StatusResult { code } => {
            model.loading = false;
            model.status = Some(code);
            model.error = None;
            true
        }
        Outcome::Failure { cause } => {
            model.loading = false;
            model.error = Some(cause);
            false
        }
        Outcome::Blink { generation } => {
            let command = model.input.handle_blink(generation);
            return UpdateResult::with_command(model, command);
        }
        Outcome::FileListResult { .. } => return UpdateResult::just_model(model),
    };

    if model.policy.flow(succeeded).is_stop() {
        UpdateResult::stop(model)
    } else {
        UpdateResult::just_model(model)
    }
}
