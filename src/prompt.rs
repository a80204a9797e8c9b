use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use inquire::validator::Validation;
use inquire::{CustomUserError, Text};

/// Where the scaffolder gets the answers that were not given as flags.
pub trait Prompter {
    /// Asks for one value. An empty answer takes `default` when there is one.
    fn ask_text(&mut self, message: &str, default: Option<&str>) -> Result<String>;

    /// Asks for the comma-separated tag selection, showing `known` as a
    /// menu numbered from 1.
    fn ask_tags(&mut self, known: &[String]) -> Result<String>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask_text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let non_empty_validator = |input: &str| -> Result<Validation, CustomUserError> {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("A value is required.".into()))
            } else {
                Ok(Validation::Valid)
            }
        };

        let mut text = Text::new(message);
        if let Some(default) = default {
            text = text.with_default(default);
        } else {
            text = text.with_validator(non_empty_validator);
        }

        let answer = text.prompt()?;
        Ok(answer.trim().to_string())
    }

    fn ask_tags(&mut self, known: &[String]) -> Result<String> {
        if known.is_empty() {
            println!("No tags yet.");
        } else {
            println!("Known tags:");
            for (i, tag) in known.iter().enumerate() {
                println!("  {:>2}. {}", i + 1, tag);
            }
        }

        let answer = Text::new("Tags?")
            .with_help_message("Comma-separated menu numbers and/or new tags, e.g. 1, new-feature. Enter for none.")
            .prompt()?;
        Ok(answer)
    }
}

/// Replays canned answers in order. An empty answer behaves like pressing
/// Enter on the terminal.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> ScriptedPrompter {
        ScriptedPrompter {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            asked: vec![],
        }
    }

    fn next_answer(&mut self, message: &str) -> Result<String> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer for '{}'", message))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let answer = self.next_answer(message)?;
        let answer = answer.trim();
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer.to_string()),
        }
    }

    fn ask_tags(&mut self, _known: &[String]) -> Result<String> {
        self.next_answer("tags")
    }
}
