use std::io::{self, BufRead, Write};

use crate::error::AppResult;

/// Line-oriented terminal I/O. Generic so the shell can be driven from a
/// script in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `label` and reads one line. `None` means end of input.
    pub fn ask(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks for a value, offering `current` as the default.
    pub fn edit(&mut self, field: &str, current: Option<&str>) -> AppResult<PromptAction> {
        let label = match current {
            Some(value) if !value.is_empty() => {
                format!("{field} [{value}] (Enter to keep, '-' to clear): ")
            }
            _ => format!("{field} (Enter to skip): "),
        };
        let Some(input) = self.ask(&label)? else {
            return Ok(PromptAction::Keep);
        };
        let trimmed = input.trim();

        if trimmed.is_empty() {
            Ok(PromptAction::Keep)
        } else if trimmed == "-" {
            Ok(PromptAction::Clear)
        } else {
            Ok(PromptAction::Set(trimmed.to_string()))
        }
    }

    pub fn apply(&mut self, field: &str, target: &mut Option<String>) -> AppResult<()> {
        match self.edit(field, target.as_deref())? {
            PromptAction::Keep => {}
            PromptAction::Clear => *target = None,
            PromptAction::Set(value) => *target = Some(value),
        }
        Ok(())
    }

    /// Same as `apply` for plain string fields where empty means unset.
    pub fn apply_text(&mut self, field: &str, target: &mut String) -> AppResult<()> {
        match self.edit(field, Some(target.as_str()))? {
            PromptAction::Keep => {}
            PromptAction::Clear => target.clear(),
            PromptAction::Set(value) => *target = value,
        }
        Ok(())
    }
}

pub enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

pub fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn edit_keeps_clears_and_sets() {
        let mut console = Console::new(Cursor::new("\n-\n  Ward 3A \n"), Vec::new());
        let mut area = Some("ICU".to_string());

        console.apply("Area", &mut area).unwrap();
        assert_eq!(area.as_deref(), Some("ICU"));
        console.apply("Area", &mut area).unwrap();
        assert_eq!(area, None);
        console.apply("Area", &mut area).unwrap();
        assert_eq!(area.as_deref(), Some("Ward 3A"));

        let shown = String::from_utf8(console.output().clone()).unwrap();
        assert!(shown.starts_with("Area [ICU] (Enter to keep, '-' to clear): "));
    }

    #[test]
    fn ask_reports_end_of_input() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert_eq!(console.ask("> ").unwrap(), None);
    }
}
