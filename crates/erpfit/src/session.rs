//! Assessment session state.
//!
//! A [`Session`] owns everything a single run of the assessment needs: the
//! catalog, a cursor over it, the recorded answers and, once the last
//! question has been passed, the results. All mutation goes through the
//! named transitions [`Session::start`], [`Session::advance`],
//! [`Session::retreat`], [`Session::record_answer`], [`Session::score`] and
//! [`Session::reset`].
//!
//! The cursor walks a [`CursorLayout`]. The fixed layout is three sections
//! of eight positions each regardless of how many questions the catalog
//! actually holds, so with the built-in catalog the last four WISCAR
//! questions are never visited. [`CursorLayout::from_catalog`] follows the
//! catalog instead.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::answers::{Answer, AnswerSheet, SavedAnswer};
use crate::catalog::{Catalog, Question, Section, SectionInfo, SECTION_COUNT};
use crate::error::{Error, Result};
use crate::scoring::{self, EmptySectionPolicy, Results};

/// Positions per section in the fixed layout.
pub const FIXED_QUESTIONS_PER_SECTION: usize = 8;

/// Position of the session within the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    /// Zero-based section index.
    pub section: usize,
    /// Zero-based question index within the section.
    pub question: usize,
}

impl Cursor {
    /// Create a cursor.
    #[must_use]
    pub fn new(section: usize, question: usize) -> Self {
        Self { section, question }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.question)
    }
}

/// How the cursor's bounds are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Three sections of eight positions.
    #[default]
    Fixed,
    /// One position per catalog question.
    Catalog,
}

/// Number of positions in each section the cursor can visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorLayout {
    section_lengths: Vec<usize>,
}

impl CursorLayout {
    /// Three sections of [`FIXED_QUESTIONS_PER_SECTION`] positions.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            section_lengths: vec![FIXED_QUESTIONS_PER_SECTION; SECTION_COUNT],
        }
    }

    /// One position per question, section by section.
    ///
    /// Empty sections still get one position so the cursor can pass them.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let section_lengths = Section::ALL
            .iter()
            .map(|s| catalog.section_len(*s).max(1))
            .collect();
        Self { section_lengths }
    }

    /// Build the layout selected by `mode`.
    #[must_use]
    pub fn for_mode(mode: LayoutMode, catalog: &Catalog) -> Self {
        match mode {
            LayoutMode::Fixed => Self::fixed(),
            LayoutMode::Catalog => Self::from_catalog(catalog),
        }
    }

    /// Number of sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.section_lengths.len()
    }

    /// Number of positions in section `section`.
    #[must_use]
    pub fn section_len(&self, section: usize) -> usize {
        self.section_lengths.get(section).copied().unwrap_or(0)
    }

    /// Total number of positions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.section_lengths.iter().sum()
    }

    /// One-based ordinal of `cursor` across all sections.
    #[must_use]
    pub fn ordinal(&self, cursor: Cursor) -> usize {
        let before: usize = self.section_lengths.iter().take(cursor.section).sum();
        before + cursor.question + 1
    }

    /// The position after `cursor`, or `None` at the very last position.
    #[must_use]
    pub fn next(&self, cursor: Cursor) -> Option<Cursor> {
        if cursor.question + 1 < self.section_len(cursor.section) {
            Some(Cursor::new(cursor.section, cursor.question + 1))
        } else if cursor.section + 1 < self.section_count() {
            Some(Cursor::new(cursor.section + 1, 0))
        } else {
            None
        }
    }

    /// The position before `cursor`, or `None` at the origin.
    #[must_use]
    pub fn prev(&self, cursor: Cursor) -> Option<Cursor> {
        if cursor.question > 0 {
            Some(Cursor::new(cursor.section, cursor.question - 1))
        } else if cursor.section > 0 {
            let section = cursor.section - 1;
            Some(Cursor::new(section, self.section_len(section).saturating_sub(1)))
        } else {
            None
        }
    }
}

impl Default for CursorLayout {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Questions are being answered.
    #[default]
    Answering,
    /// Results have been computed; only a reset leaves this phase.
    Complete,
}

/// Outcome of [`Session::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to a new position.
    Moved(Cursor),
    /// The last position was passed and results are available.
    Completed,
}

/// A single assessment run.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    layout: CursorLayout,
    policy: EmptySectionPolicy,
    cursor: Cursor,
    answers: AnswerSheet,
    phase: Phase,
    results: Option<Results>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a pristine session over `catalog` with the fixed layout.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            layout: CursorLayout::fixed(),
            policy: EmptySectionPolicy::default(),
            cursor: Cursor::default(),
            answers: AnswerSheet::new(),
            phase: Phase::Answering,
            results: None,
            started_at: None,
            completed_at: None,
        }
    }

    /// Use `layout` to bound the cursor.
    #[must_use]
    pub fn with_layout(mut self, layout: CursorLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use `policy` for sections without answers.
    #[must_use]
    pub fn with_policy(mut self, policy: EmptySectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The catalog being answered.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cursor bounds.
    #[must_use]
    pub fn layout(&self) -> &CursorLayout {
        &self.layout
    }

    /// Current position.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Recorded answers.
    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether results have been computed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Results, once complete.
    #[must_use]
    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    /// When [`Session::start`] was last called.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Time since start, frozen at completion.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started_at?;
        Some(self.completed_at.unwrap_or_else(Utc::now) - started)
    }

    /// Clear all state and start the timer.
    pub fn start(&mut self) {
        self.reset();
        self.started_at = Some(Utc::now());
        info!(positions = self.layout.total(), "assessment started");
    }

    /// Return to the pristine pre-start state.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
        self.answers.clear();
        self.phase = Phase::Answering;
        self.results = None;
        self.started_at = None;
        self.completed_at = None;
        debug!("session reset");
    }

    /// Upsert an answer without validating it against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssessmentComplete`] once results exist.
    pub fn record_answer(
        &mut self,
        question_id: impl Into<String>,
        value: u32,
        is_correct: Option<bool>,
    ) -> Result<()> {
        self.ensure_answering()?;
        self.answers.record(Answer::new(question_id, value, is_correct));
        Ok(())
    }

    /// Record a raw answer from the presentation layer.
    ///
    /// Parses `raw_value`, grades it if the question has a correct option
    /// and records it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownQuestion`] if the id is not in the catalog,
    /// [`Error::InvalidAnswer`] if `raw_value` is not a non-negative integer,
    /// and [`Error::AssessmentComplete`] once results exist.
    pub fn answer_changed(&mut self, question_id: &str, raw_value: &str) -> Result<()> {
        let question = self
            .catalog
            .find(question_id)
            .ok_or_else(|| Error::unknown_question(question_id))?;
        let value: u32 = raw_value
            .trim()
            .parse()
            .map_err(|_| Error::invalid_answer(raw_value))?;
        let is_correct = question.grade(value);
        self.record_answer(question_id, value, is_correct)
    }

    /// Feed saved answers through [`Session::answer_changed`].
    ///
    /// Entries with an unknown id or an unparseable value are skipped with a
    /// warning and returned alongside their position in `saved`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssessmentComplete`] once results exist.
    pub fn load_saved(&mut self, saved: &[SavedAnswer]) -> Result<Vec<(usize, Error)>> {
        let mut rejected = Vec::new();
        for (i, entry) in saved.iter().enumerate() {
            match self.answer_changed(&entry.question_id, &entry.raw_value()) {
                Ok(()) => {}
                Err(err) if err.is_input_error() => {
                    warn!(entry = i, error = %err, "skipping saved answer");
                    rejected.push((i, err));
                }
                Err(err) => return Err(err),
            }
        }
        debug!(
            loaded = saved.len() - rejected.len(),
            rejected = rejected.len(),
            "saved answers applied"
        );
        Ok(rejected)
    }

    /// Whether `question_id` has an answer.
    #[must_use]
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers.contains(question_id)
    }

    /// The question under the cursor, or `None` if the catalog has no
    /// question at that position.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.question_at(self.cursor.section, self.cursor.question)
    }

    /// Metadata for the section under the cursor.
    #[must_use]
    pub fn current_section_info(&self) -> Option<SectionInfo> {
        self.catalog.section_info(self.cursor.section)
    }

    /// One-based ordinal of the current position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.layout.ordinal(self.cursor)
    }

    /// Fraction of the catalog reached, counting the current question.
    ///
    /// The denominator is the catalog size, not the layout, so under the
    /// fixed layout the last position reads 24 of 28.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.is_complete() {
            return 1.0;
        }
        match self.catalog.len() {
            0 => 0.0,
            total => (self.position() as f64 / total as f64).min(1.0),
        }
    }

    /// Whether [`Session::retreat`] would move the cursor.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.is_complete() && self.layout.prev(self.cursor).is_some()
    }

    /// Move forward, scoring the assessment when passing the last position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssessmentComplete`] once results exist, or the
    /// scoring error when the empty-section policy rejects the answers. In
    /// the latter case the cursor stays on the last position.
    pub fn advance(&mut self) -> Result<Advance> {
        self.ensure_answering()?;
        if let Some(next) = self.layout.next(self.cursor) {
            debug!(from = %self.cursor, to = %next, "advance");
            self.cursor = next;
            return Ok(Advance::Moved(next));
        }
        self.score()?;
        Ok(Advance::Completed)
    }

    /// Move back one position.
    ///
    /// Returns `false` without moving at the first position or once complete.
    pub fn retreat(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        match self.layout.prev(self.cursor) {
            Some(prev) => {
                debug!(from = %self.cursor, to = %prev, "retreat");
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Score the recorded answers and mark the session complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssessmentComplete`] if already scored, or
    /// [`Error::InsufficientAnswers`] under the reject policy.
    pub fn score(&mut self) -> Result<&Results> {
        self.ensure_answering()?;
        let results = scoring::score(&self.catalog, &self.answers, self.policy)?;
        info!(
            confidence = results.overall_confidence,
            recommendation = %results.recommendation,
            "assessment complete"
        );
        self.phase = Phase::Complete;
        self.completed_at = Some(Utc::now());
        Ok(&*self.results.insert(results))
    }

    fn ensure_answering(&self) -> Result<()> {
        if self.is_complete() {
            Err(Error::AssessmentComplete)
        } else {
            Ok(())
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}
