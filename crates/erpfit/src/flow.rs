//! Line-oriented assessment flow.
//!
//! [`Flow`] drives a [`Session`] from any buffered reader and writes prompts
//! to any writer, one command per line:
//!
//! | Input          | Effect                                   |
//! |----------------|------------------------------------------|
//! | `1`..`5`       | choose the numbered option               |
//! | `n` or empty   | next question                            |
//! | `b`            | previous question                        |
//! | `r`            | discard answers and start over           |
//! | `q`            | quit without results                     |
//! | `?`            | show this help                           |
//!
//! [`Flow::run_with_retake`] additionally offers to start over once results
//! have been shown.

use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::catalog::{Question, Section};
use crate::error::{Error, Result};
use crate::session::{Advance, Session};

const HELP: &str = "Type an option number to answer, then Enter (or 'n') for the next \
                    question. 'b' goes back, 'r' restarts, 'q' quits.";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose the option with this one-based number.
    Select(usize),
    /// Move to the next question.
    Next,
    /// Move to the previous question.
    Back,
    /// Start over.
    Reset,
    /// Stop without results.
    Quit,
    /// Show usage.
    Help,
    /// Anything else.
    Unknown(String),
}

impl Command {
    /// Parse one line of input.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" | "n" | "next" => Self::Next,
            "b" | "back" => Self::Back,
            "r" | "reset" => Self::Reset,
            "q" | "quit" | "exit" => Self::Quit,
            "?" | "h" | "help" => Self::Help,
            other => other
                .parse()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::Select),
        }
    }
}

/// How a flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The last question was passed; the session holds results.
    Completed,
    /// The user quit or input ran out.
    Quit,
}

/// Drives a session from line input.
#[derive(Debug)]
pub struct Flow<'s, R, W> {
    session: &'s mut Session,
    input: R,
    output: W,
    allow_skip: bool,
}

impl<'s, R: BufRead, W: Write> Flow<'s, R, W> {
    /// Create a flow over `session`.
    pub fn new(session: &'s mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
            allow_skip: false,
        }
    }

    /// Allow moving past unanswered questions.
    #[must_use]
    pub fn allow_skip(mut self, allow: bool) -> Self {
        self.allow_skip = allow;
        self
    }

    /// Start the session and run until completion, quit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<Outcome> {
        self.session.start();
        writeln!(self.output, "{HELP}")?;

        loop {
            if self.session.is_complete() {
                return Ok(Outcome::Completed);
            }
            self.prompt()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("input closed before completion");
                return Ok(Outcome::Quit);
            }
            let command = Command::parse(&line);
            trace!(?command, cursor = %self.session.cursor(), "command");

            match command {
                Command::Select(n) => self.select(n)?,
                Command::Next => self.next()?,
                Command::Back => {
                    if !self.session.retreat() {
                        writeln!(self.output, "Already at the first question.")?;
                    }
                }
                Command::Reset => {
                    self.session.start();
                    writeln!(self.output, "Answers cleared. Starting over.")?;
                }
                Command::Quit => return Ok(Outcome::Quit),
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Unknown(text) => {
                    writeln!(self.output, "Unrecognized input {text:?}. Type ? for help.")?;
                }
            }
        }
    }

    /// Run the flow, hand each completed session to `on_complete`, and offer
    /// a retake until the user declines.
    ///
    /// `on_complete` writes to the flow's output, typically a results report.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input, writing output or `on_complete`
    /// fails.
    pub fn run_with_retake<F>(&mut self, mut on_complete: F) -> Result<Outcome>
    where
        F: FnMut(&Session, &mut W) -> Result<()>,
    {
        loop {
            if self.run()? == Outcome::Quit {
                return Ok(Outcome::Quit);
            }
            on_complete(&*self.session, &mut self.output)?;
            if !self.offer_retake()? {
                return Ok(Outcome::Completed);
            }
            debug!("retaking assessment");
        }
    }

    fn offer_retake(&mut self) -> Result<bool> {
        writeln!(self.output)?;
        write!(self.output, "Type 'r' to retake the assessment, or Enter to exit. ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        Ok(Command::parse(&line) == Command::Reset)
    }

    fn prompt(&mut self) -> Result<()> {
        let session = &*self.session;
        let cursor = session.cursor();
        let in_section = match Section::from_index(cursor.section) {
            Some(section) if session.catalog().section_len(section) > 0 => {
                session.catalog().section_len(section)
            }
            _ => session.layout().section_len(cursor.section),
        };

        writeln!(self.output)?;
        if let Some(info) = session.current_section_info() {
            writeln!(self.output, "{} {} - {}", info.icon, info.title, info.description)?;
        }
        write!(
            self.output,
            "Question {} of {in_section} | {} of {} ({:.0}%)",
            cursor.question + 1,
            session.position(),
            session.catalog().len(),
            session.progress() * 100.0
        )?;

        let Some(question) = session.current_question() else {
            writeln!(self.output)?;
            writeln!(self.output, "(no question at this position; press Enter to continue)")?;
            return Ok(());
        };

        let chosen = session
            .answers()
            .get(&question.id)
            .and_then(|a| selection_for(question, a.value));
        match chosen {
            Some(n) => writeln!(self.output, "  [answered: {n}]")?,
            None => writeln!(self.output)?,
        }
        writeln!(self.output, "{}", question.category)?;
        writeln!(self.output, "{}", question.text)?;
        for (n, (_, label)) in question.choices().iter().enumerate() {
            writeln!(self.output, "  {}) {label}", n + 1)?;
        }
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    fn select(&mut self, n: usize) -> Result<()> {
        let Some(question) = self.session.current_question() else {
            writeln!(self.output, "There is nothing to answer here.")?;
            return Ok(());
        };
        let Some(value) = value_for(question, n) else {
            let count = question.choices().len();
            writeln!(self.output, "Choose a number from 1 to {count}.")?;
            return Ok(());
        };
        let id = question.id.clone();
        self.session.answer_changed(&id, &value.to_string())
    }

    fn next(&mut self) -> Result<()> {
        let unanswered = self
            .session
            .current_question()
            .is_some_and(|q| !self.session.is_answered(&q.id));
        if unanswered && !self.allow_skip {
            writeln!(self.output, "Please choose an answer first.")?;
            return Ok(());
        }

        match self.session.advance() {
            Ok(Advance::Moved(_) | Advance::Completed) => Ok(()),
            Err(err @ Error::InsufficientAnswers { .. }) => {
                writeln!(self.output, "{err}. Go back ('b') and answer at least one.")?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Value to record when option `n` (one-based) of `question` is chosen.
fn value_for(question: &Question, n: usize) -> Option<u32> {
    let index = n.checked_sub(1)?;
    question.choices().get(index).map(|(value, _)| *value)
}

/// One-based option number that records `value`.
fn selection_for(question: &Question, value: u32) -> Option<usize> {
    question
        .choices()
        .iter()
        .position(|(v, _)| *v == value)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::logging::init_test_logging;
    use crate::recommendation::Recommendation;

    fn run_script(session: &mut Session, script: &str) -> (Outcome, String) {
        init_test_logging();
        let mut out = Vec::new();
        let outcome = Flow::new(session, Cursor::new(script.as_bytes()), &mut out)
            .run()
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("\n"), Command::Next);
        assert_eq!(Command::parse(" N "), Command::Next);
        assert_eq!(Command::parse("b"), Command::Back);
        assert_eq!(Command::parse("reset"), Command::Reset);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse("3"), Command::Select(3));
        assert_eq!(
            Command::parse("maybe"),
            Command::Unknown("maybe".to_string())
        );
    }

    #[test]
    fn test_full_run_completes() {
        let mut session = Session::default();
        let script = "1\n\n".repeat(24);
        let (outcome, out) = run_script(&mut session, &script);

        assert_eq!(outcome, Outcome::Completed);
        assert!(out.contains("Question 1 of 8 | 1 of 28 (4%)"));
        assert!(out.contains("Question 8 of 12 | 24 of 28 (86%)"));
        assert_eq!(session.answers().len(), 24);
        let results = session.results().unwrap();
        assert_eq!(results.psych_fit_score, 20);
        assert_eq!(results.recommendation, Recommendation::No);
    }

    #[test]
    fn test_choice_numbers_map_to_option_indexes() {
        let mut session = Session::default();
        // Eight psych answers, then option 2 (index 1) on tech-erp-1.
        let mut script = "4\nn\n".repeat(8);
        script.push_str("2\nq\n");
        let (outcome, _) = run_script(&mut session, &script);

        assert_eq!(outcome, Outcome::Quit);
        let answer = session.answers().get("tech-erp-1").unwrap();
        assert_eq!(answer.value, 1);
        assert_eq!(answer.is_correct, Some(true));
    }

    #[test]
    fn test_next_requires_answer() {
        let mut session = Session::default();
        let (outcome, out) = run_script(&mut session, "n\n");

        assert_eq!(outcome, Outcome::Quit);
        assert!(out.contains("Please choose an answer first."));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_allow_skip() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let outcome = Flow::new(&mut session, Cursor::new("\n".repeat(24)), &mut out)
            .allow_skip(true)
            .run()
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            session.results().unwrap().recommendation,
            Recommendation::No
        );
    }

    #[test]
    fn test_out_of_range_selection() {
        let mut session = Session::default();
        let (_, out) = run_script(&mut session, "9\n0\n");
        assert_eq!(out.matches("Choose a number from 1 to 5.").count(), 2);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_back_and_answered_marker() {
        let mut session = Session::default();
        let (_, out) = run_script(&mut session, "b\n3\nn\nb\n");
        assert!(out.contains("Already at the first question."));
        assert!(out.contains("[answered: 3]"));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_reset_clears_answers() {
        let mut session = Session::default();
        let (_, out) = run_script(&mut session, "3\nn\nr\n");
        assert!(out.contains("Starting over."));
        assert!(session.answers().is_empty());
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_unknown_input() {
        let mut session = Session::default();
        let (_, out) = run_script(&mut session, "hello\n");
        assert!(out.contains("Unrecognized input \"hello\""));
    }

    #[test]
    fn test_retake_runs_again() {
        let mut session = Session::default();
        let mut script = "1\n\n".repeat(24);
        script.push_str("r\n");
        script.push_str(&"5\n\n".repeat(8));
        script.push_str(&"2\n\n".repeat(8));
        script.push_str(&"5\n\n".repeat(8));
        script.push('\n');

        let mut out = Vec::new();
        let mut confidences = Vec::new();
        let outcome = Flow::new(&mut session, Cursor::new(script), &mut out)
            .run_with_retake(|session, out| {
                let results = session.results().unwrap();
                confidences.push(results.overall_confidence);
                writeln!(out, "REPORT {}", results.recommendation)?;
                Ok(())
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(confidences.len(), 2);
        assert!(confidences[1] > confidences[0]);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("retake the assessment").count(), 2);
        assert!(out.contains("REPORT No"));
    }

    #[test]
    fn test_retake_declined_at_end_of_input() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let mut reports = 0;
        let outcome = Flow::new(&mut session, Cursor::new("\n".repeat(24)), &mut out)
            .allow_skip(true)
            .run_with_retake(|_, _| {
                reports += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(reports, 1);
        assert!(session.is_complete());
    }

    #[test]
    fn test_retake_not_offered_after_quit() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let outcome = Flow::new(&mut session, Cursor::new("q\n"), &mut out)
            .run_with_retake(|_, _| panic!("no results to report"))
            .unwrap();

        assert_eq!(outcome, Outcome::Quit);
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("retake"));
    }
}
