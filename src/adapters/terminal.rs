use crate::domain::ports::{Notice, NoticeKind, Prompter};
use crate::utils::error::{KioskError, Result};
use inquire::error::InquireError;
use inquire::{Select, Text};
use std::io::IsTerminal;

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Kiosk prompts on the attached terminal. Esc backs out of the current step.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

/// Esc cancels the prompt and means "go back"; any other failure is an error.
fn skippable<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(KioskError::PromptError {
            message: e.to_string(),
        }),
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, label: &str, placeholder: &str) -> Result<Option<String>> {
        skippable(Text::new(label).with_placeholder(placeholder).prompt())
    }

    fn select(&mut self, label: &str, options: &[String]) -> Result<Option<usize>> {
        let selection = skippable(
            Select::new(label, options.to_vec())
                .with_page_size(10)
                .raw_prompt(),
        )?;
        Ok(selection.map(|option| option.index))
    }

    fn notice(&mut self, notice: Notice) -> Result<()> {
        let marker = match notice.kind {
            NoticeKind::Info => "ℹ️ ",
            NoticeKind::Error => "❌",
            NoticeKind::Success => "✅",
        };
        println!();
        println!("{} {}", marker, notice.title);
        if let Some(detail) = notice.detail {
            println!("   {}", detail);
        }
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_backs_out() {
        let answer: std::result::Result<usize, InquireError> =
            Err(InquireError::OperationCanceled);
        assert_eq!(skippable(answer).unwrap(), None);
        assert_eq!(skippable(Ok::<_, InquireError>(2)).unwrap(), Some(2));
    }

    #[test]
    fn test_interrupt_is_an_error() {
        let answer: std::result::Result<String, InquireError> =
            Err(InquireError::OperationInterrupted);
        assert!(matches!(
            skippable(answer),
            Err(KioskError::PromptError { .. })
        ));
    }
}
