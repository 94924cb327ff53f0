use crate::library::LibraryState;
use ratatui::text::{Line, Span, Text};

/// Lines taken by everything except the file rows
const CHROME_ROWS: usize = 5;

/// Render the browser. Never fails, whatever the state.
pub fn view(model: &LibraryState) -> Text<'static> {
    render(model, true)
}

/// The listing as it should stay on screen once the program has ended
pub fn summary(model: &LibraryState) -> Text<'static> {
    render(model, false)
}

fn render(model: &LibraryState, interactive: bool) -> Text<'static> {
    let styles = &model.theme.styles;
    let kind = model.kind_label();

    if model.loading {
        return Text::from(Line::from(Span::styled(
            format!("Scanning for {} files...", kind),
            styles.loading,
        )));
    }

    if let Some(error) = &model.error {
        let mut lines = vec![Line::from(Span::styled(format!("Error: {}", error), styles.error))];
        if interactive {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Press r to rescan or q to quit.", styles.help)));
        }
        return Text::from(lines);
    }

    let mut lines = vec![
        Line::from(Span::styled(format!("Found {} files:", kind), styles.title)),
        Line::default(),
    ];

    if model.files.is_empty() {
        lines.push(Line::from(format!(
            "No {} files found in {}.",
            kind,
            root_label(model)
        )));
    } else {
        let (start, end) = visible_rows(model);
        for (index, file) in model.files[start..end].iter().enumerate() {
            let index = start + index;
            let marker = if model.selected == Some(index) { "*" } else { " " };
            if index == model.cursor {
                lines.push(Line::from(Span::styled(
                    format!(" > {}{} ", file, marker),
                    styles.selected,
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    format!("   {}{} ", file, marker),
                    styles.normal,
                )));
            }
        }
    }

    lines.push(Line::default());
    if let Some(file) = model.selected_file() {
        lines.push(Line::from(Span::styled(format!("Selected: {}", file), styles.title)));
    }
    if !interactive {
        if model.selected_file().is_none() {
            lines.pop();
        }
        return Text::from(lines);
    }
    lines.push(Line::from(Span::styled(
        "Use up/down keys (or k/j) to navigate, enter to select, r to rescan. Press q to quit.",
        styles.help,
    )));

    Text::from(lines)
}

fn root_label(model: &LibraryState) -> String {
    if model.config.root.as_os_str() == "." {
        "the current directory".to_string()
    } else {
        model.config.root.display().to_string()
    }
}

/// Window of rows that fits the viewport and keeps the cursor visible
fn visible_rows(model: &LibraryState) -> (usize, usize) {
    let total = model.files.len();
    let Some(height) = model.viewport_height else {
        return (0, total);
    };

    let rows = (height as usize).saturating_sub(CHROME_ROWS).max(1);
    let cursor = model.cursor.min(total.saturating_sub(1));
    let start = (cursor + 1).saturating_sub(rows);
    (start, (start + rows).min(total))
}
