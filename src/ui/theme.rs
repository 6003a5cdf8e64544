//! Terminal colors keyed by what is being printed

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

const PLAIN: Style = Style::new();

/// What a piece of output is, so every command colors it the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Headings and movie names used as headings
    Title,
    /// `#id` references to a stored movie
    MovieId,
    /// Field and metric labels
    Label,
    Ok,
    Failure,
    Caution,
    Note,
    /// Secondary hints, e.g. the empty-list message
    Faint,
}

#[derive(Debug, Clone)]
pub struct Theme {
    styles: [Style; 8],
}

impl Theme {
    /// Colors only on an interactive terminal that has not opted out with `NO_COLOR`
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::with_color(console::Term::stdout().is_term() && console::colors_enabled() && !no_color)
    }

    pub fn with_color(enabled: bool) -> Self {
        if !enabled {
            return Self { styles: [PLAIN; 8] };
        }
        let mut styles = [PLAIN; 8];
        styles[Role::Title as usize] = Style::new().cyan().bold();
        styles[Role::MovieId as usize] = Style::new().yellow();
        styles[Role::Label as usize] = Style::new().white().dimmed();
        styles[Role::Ok as usize] = Style::new().green().bold();
        styles[Role::Failure as usize] = Style::new().red().bold();
        styles[Role::Caution as usize] = Style::new().yellow().bold();
        styles[Role::Note as usize] = Style::new().magenta();
        styles[Role::Faint as usize] = Style::new().bright_black();
        Self { styles }
    }

    pub fn style(&self, role: Role) -> Style {
        self.styles[role as usize].clone()
    }

    /// Render `text` in the style for `role`
    pub fn paint(&self, role: Role, text: impl Display) -> String {
        text.style(self.style(role)).to_string()
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
