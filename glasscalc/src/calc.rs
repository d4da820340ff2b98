//! Calculator state: the display buffer and the theme flag.

use glasscore::ThemeMode;

use crate::eval;

/// Shown in place of a result when evaluation fails.
pub const ERROR_TEXT: &str = "Error";

/// Button labels in grid order, four per row.
#[rustfmt::skip]
pub const BUTTONS: [&str; 16] = [
    "7", "8", "9", "/",
    "4", "5", "6", "*",
    "1", "2", "3", "-",
    "0", ".", "=", "+",
];

/// What a press did to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Label appended to the buffer
    Appended,
    /// Operator refused by the guard; buffer unchanged
    Rejected,
    /// Buffer replaced by a result
    Evaluated,
    /// Buffer replaced by the error text
    Failed,
}

fn is_operator(label: &str) -> bool {
    matches!(label, "+" | "-" | "*" | "/")
}

#[derive(Debug, Clone, Default)]
pub struct Calculator {
    display: String,
    theme: ThemeMode,
}

impl Calculator {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            display: String::new(),
            theme,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Handle one button label.
    ///
    /// Operators are only appended after a non-letter, which keeps them
    /// off an empty buffer and off the end of "Error".
    pub fn press(&mut self, label: &str) -> Press {
        if label == "=" {
            return self.evaluate();
        }
        if is_operator(label) && !self.accepts_operator() {
            log::debug!("rejected '{}' after {:?}", label, self.display);
            return Press::Rejected;
        }
        self.display.push_str(label);
        Press::Appended
    }

    fn accepts_operator(&self) -> bool {
        self.display
            .chars()
            .last()
            .map_or(false, |c| !c.is_alphabetic())
    }

    /// Replace the buffer with its value, or with "Error".
    pub fn evaluate(&mut self) -> Press {
        match eval::evaluate(&self.display) {
            Ok(value) => {
                log::debug!("{} = {}", self.display, value);
                self.display = value.to_string();
                Press::Evaluated
            }
            Err(e) => {
                log::debug!("cannot evaluate {:?}: {}", self.display, e);
                self.display = ERROR_TEXT.to_string();
                Press::Failed
            }
        }
    }

    /// Flip between light and dark, returning the new mode.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }
}
