// src/errors/report.rs
//! Rendering of generator and profile errors through miette.

use std::io::IsTerminal;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, ThemeCharacters, ThemeStyles};

/// Unicode and ANSI colors for terminals, ascii otherwise.
fn handler(fancy: bool) -> GraphicalReportHandler {
    let theme = if fancy {
        GraphicalTheme {
            characters: ThemeCharacters::unicode(),
            styles: ThemeStyles::ansi(),
        }
    } else {
        GraphicalTheme {
            characters: ThemeCharacters::ascii(),
            styles: ThemeStyles::none(),
        }
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Render to stderr, colored only when stderr is a terminal.
pub fn render_to_stderr(report: &dyn Diagnostic) {
    let fancy = std::io::stderr().is_terminal();
    let mut output = String::new();
    if handler(fancy).render_report(&mut output, report).is_ok() {
        eprint!("{output}");
    }
}

/// Render to a buffer without colors.
pub fn render_to_string(report: &dyn Diagnostic) -> String {
    let mut output = String::new();
    let _ = handler(false).render_report(&mut output, report);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{GenError, ProfileError};

    #[test]
    fn render_gen_error_to_string() {
        let output = render_to_string(&GenError::NonPositiveWeight { total: 0.0 });
        assert!(output.contains("G0003"), "should contain error code");
        assert!(output.contains("total weight"), "should contain message");
        assert!(output.contains("help"), "should contain help text");
    }

    #[test]
    fn render_profile_error_lists_choices() {
        let err = ProfileError::Unknown {
            name: "huge".to_string(),
            available: "default, tiny".to_string(),
        };
        let output = render_to_string(&err);
        assert!(output.contains("P0001"));
        assert!(output.contains("default, tiny"));
    }
}
