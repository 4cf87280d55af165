//! Interactive questions asked by the workflow.

use std::io;

use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::PromptError;

/// Validation hook for free-text input.
pub type InputCheck<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Source of operator answers.
///
/// Ctrl+C at any prompt is reported as [`PromptError::Interrupted`].
pub trait Prompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;

    fn input(
        &self,
        prompt: &str,
        initial: Option<&str>,
        check: InputCheck<'_>,
    ) -> Result<String, PromptError>;

    fn select(&self, prompt: &str, items: &[String], default: usize)
    -> Result<usize, PromptError>;

    /// Indices of the chosen items; `checked` sets the initial state.
    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, PromptError>;
}

/// Terminal prompts via dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

fn prompt_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
            PromptError::Interrupted
        }
        other => PromptError::Terminal(other.to_string()),
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn input(
        &self,
        prompt: &str,
        initial: Option<&str>,
        check: InputCheck<'_>,
    ) -> Result<String, PromptError> {
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|value: &String| check(value));
        if let Some(initial) = initial {
            input = input.default(initial.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, PromptError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Vec<usize>, PromptError> {
        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .defaults(checked)
            .interact()
            .map_err(prompt_error)
    }
}
