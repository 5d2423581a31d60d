//! Terminal adapters: interactivity probe and prompters.

use std::collections::VecDeque;
use std::io::IsTerminal;

use crafter_core::{
    application::{
        ApplicationError,
        ports::{InteractivityProbe, Prompter},
    },
    error::CrafterResult,
};
use dialoguer::Input;

/// Probes whether stdin is attached to a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinProbe;

impl InteractivityProbe for StdinProbe {
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }
}

/// Interactive prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct TtyPrompter;

impl Prompter for TtyPrompter {
    fn read_line(&mut self, prompt: &str) -> CrafterResult<String> {
        // dialoguer renders its own prompt suffix
        let prompt = prompt.trim_end().trim_end_matches(':').trim_end();
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ApplicationError::PromptFailed {
                reason: e.to_string(),
            })?;
        Ok(value.trim().to_string())
    }
}

/// Prompter with canned responses, for tests and non-terminal harnesses.
/// Records every prompt it was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> CrafterResult<String> {
        self.prompts.push(prompt.to_string());
        self.responses.pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: "no scripted response left".into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompter_replays_in_order() {
        let mut prompter = ScriptedPrompter::with_responses(["com.example", "demo"]);
        assert_eq!(prompter.read_line("Group ID: ").unwrap(), "com.example");
        assert_eq!(prompter.read_line("Artifact ID: ").unwrap(), "demo");
        assert_eq!(prompter.prompts, ["Group ID: ", "Artifact ID: "]);
    }

    #[test]
    fn exhausted_script_is_an_error() {
        let mut prompter = ScriptedPrompter::default();
        assert!(prompter.read_line("anything").is_err());
    }
}
