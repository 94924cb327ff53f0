use ratatui::style::{Color, Modifier, Style};

/// Styles shared by every renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub styles: StyleSet,
}

/// Named styles for each piece of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSet {
    pub title: Style,
    pub selected: Style,
    pub normal: Style,
    pub help: Style,
    pub loading: Style,
    pub error: Style,
    pub success: Style,
    pub input: Style,
    pub cursor: Style,
    pub placeholder: Style,
}

impl Theme {
    /// Purple-on-charcoal palette using the 256-color table
    pub fn charm() -> Self {
        Self {
            name: "Charm".to_string(),
            styles: StyleSet {
                title: Style::default().add_modifier(Modifier::BOLD),
                selected: Style::default()
                    .fg(Color::Indexed(212))
                    .bg(Color::Indexed(236))
                    .add_modifier(Modifier::BOLD),
                normal: Style::default(),
                help: Style::default().fg(Color::Indexed(241)),
                loading: Style::default().fg(Color::Indexed(205)),
                error: Style::default().fg(Color::Indexed(196)),
                success: Style::default().fg(Color::Indexed(42)),
                input: Style::default().fg(Color::Indexed(252)),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                placeholder: Style::default().fg(Color::Indexed(241)),
            },
        }
    }

    /// Colorless theme, only reverse video for the cursor and selection
    pub fn monochrome() -> Self {
        Self {
            name: "Monochrome".to_string(),
            styles: StyleSet {
                title: Style::default().add_modifier(Modifier::BOLD),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                normal: Style::default(),
                help: Style::default().add_modifier(Modifier::DIM),
                loading: Style::default(),
                error: Style::default().add_modifier(Modifier::BOLD),
                success: Style::default(),
                input: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                placeholder: Style::default().add_modifier(Modifier::DIM),
            },
        }
    }

    /// Pick a theme, honouring the `NO_COLOR` convention
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(value) if !value.is_empty() => Self::monochrome(),
            _ => Self::charm(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::charm()
    }
}
