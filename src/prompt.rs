//! Interactive prompts.
//!
//! The pipeline only talks to the [`Prompter`] trait, so a run can be driven
//! from a terminal or from any reader/writer pair.

use std::collections::HashMap;
use std::io::{self, BufRead, Stderr, StdinLock, Write};

use crate::error::{FigtokError, Result};

pub trait Prompter {
    /// Ask for a line of text. End of input cancels the session.
    fn input(&mut self, question: &str) -> Result<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Print a hint without expecting an answer.
    fn notice(&mut self, message: &str);

    /// Ask a batch of yes/no questions keyed by name.
    ///
    /// Either every question is answered or the whole batch fails.
    fn confirm_many(
        &mut self,
        questions: &[(String, String)],
        default: bool,
    ) -> Result<HashMap<String, bool>> {
        let mut answers = HashMap::with_capacity(questions.len());
        for (key, question) in questions {
            let answer = self.confirm(question, default)?;
            answers.insert(key.clone(), answer);
        }
        Ok(answers)
    }
}

/// Line-based prompter over any reader/writer pair.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompter<StdinLock<'static>, Stderr> {
    /// Prompts on stderr so stdout stays reserved for the run report.
    ///
    /// Holds the stdin lock; build one per process and share it.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt} ")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(FigtokError::PromptCancelled);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, question: &str) -> Result<String> {
        self.read_answer(question)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let answer = self.read_answer(&format!("{question} {hint}"))?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.notice("Please answer y or n."),
            }
        }
    }

    fn notice(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{message}");
    }
}
