use crate::probe::ProbeState;
use ratatui::text::{Line, Span, Text};

/// `200 OK`, or just the code when it has no standard reason phrase
pub fn status_text(code: u16) -> String {
    match reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
    {
        Some(reason) => format!("{} {}", code, reason),
        None => code.to_string(),
    }
}

/// Render the probe. Never fails, whatever the state.
pub fn view(model: &ProbeState) -> Text<'static> {
    render(model, true)
}

/// The probe result as it should stay on screen once the program has ended
pub fn summary(model: &ProbeState) -> Text<'static> {
    render(model, false)
}

fn render(model: &ProbeState, interactive: bool) -> Text<'static> {
    let styles = &model.theme.styles;
    let target = model.checked_url.clone().unwrap_or_else(|| model.input.value());

    let mut url_line = vec![Span::styled("URL: ", styles.title)];
    url_line.extend(model.input.view(styles).spans);

    let mut lines = vec![
        Line::from(Span::styled("HTTP status check", styles.title)),
        Line::default(),
        Line::from(url_line),
        Line::default(),
    ];

    if model.loading {
        lines.push(Line::from(Span::styled(
            format!("Checking {} ...", target),
            styles.loading,
        )));
    } else if let Some(error) = &model.error {
        lines.push(Line::from(Span::styled(format!("Error: {}", error), styles.error)));
        if let Some(code) = model.status {
            lines.push(Line::from(Span::styled(
                format!("Last response: {}", status_text(code)),
                styles.help,
            )));
        }
    } else if let Some(code) = model.status {
        lines.push(Line::from(Span::styled(
            format!("{} responded: {}", target, status_text(code)),
            styles.success,
        )));
    } else {
        lines.push(Line::from(Span::styled("No check has run yet.", styles.help)));
    }

    if !interactive {
        return Text::from(lines);
    }

    lines.push(Line::default());
    let help = if model.policy.stop_on_success && model.policy.stop_on_failure {
        "Press esc to quit."
    } else {
        "Edit the URL and press enter to check it again. Press esc to quit."
    };
    lines.push(Line::from(Span::styled(help, styles.help)));

    Text::from(lines)
}
