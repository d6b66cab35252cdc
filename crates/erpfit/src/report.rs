//! Rendering of results for the terminal.

use std::io::Write;

use chrono::Duration;
use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::scoring::Results;

/// A read-only view over finished results.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    results: &'a Results,
    elapsed: Option<Duration>,
    chart: bool,
    bar_width: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    results: &'a Results,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_seconds: Option<i64>,
}

impl<'a> Report<'a> {
    /// Create a report with default output settings.
    #[must_use]
    pub fn new(results: &'a Results) -> Self {
        let defaults = OutputConfig::default();
        Self {
            results,
            elapsed: None,
            chart: defaults.chart,
            bar_width: defaults.bar_width,
        }
    }

    /// Apply chart settings from configuration.
    #[must_use]
    pub fn with_output(mut self, output: &OutputConfig) -> Self {
        self.chart = output.chart;
        self.bar_width = output.bar_width;
        self
    }

    /// Include the time taken.
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Option<Duration>) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Write the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write(&self, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
        }
    }

    /// Write pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write_json(&self, out: &mut impl Write) -> Result<()> {
        let report = JsonReport {
            results: self.results,
            elapsed_seconds: self.elapsed.map(|d| d.num_seconds()),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }

    /// Write the human-readable report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_text(&self, out: &mut impl Write) -> Result<()> {
        let r = self.results;

        writeln!(out, "Assessment Results")?;
        writeln!(out, "==================")?;
        writeln!(out)?;
        writeln!(out, "Recommendation:      {}", r.recommendation)?;
        writeln!(out, "Overall confidence:  {:>3}%", r.overall_confidence)?;
        if let Some(elapsed) = self.elapsed {
            writeln!(
                out,
                "Time taken:          {}m {:02}s",
                elapsed.num_minutes(),
                elapsed.num_seconds() % 60
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{}", r.personalized_feedback)?;
        writeln!(out)?;

        writeln!(out, "[Scores]")?;
        self.write_score(out, "Psychological fit", r.psych_fit_score)?;
        self.write_score(out, "Technical readiness", r.tech_readiness_score)?;
        writeln!(out)?;

        writeln!(out, "[WISCAR]")?;
        for (dimension, score) in r.wiscar_scores.iter() {
            self.write_score(out, dimension.label(), score)?;
        }

        write_list(out, "Next steps", &r.next_steps, true)?;
        write_list(out, "Recommended roles", &r.career_roles, false)?;
        write_list(out, "Alternative roles", &r.alternative_roles, false)?;
        Ok(())
    }

    fn write_score(&self, out: &mut impl Write, label: &str, score: u32) -> Result<()> {
        if self.chart {
            writeln!(
                out,
                "  {label:<22}{score:>3}%  {}",
                bar(score, self.bar_width)
            )?;
        } else {
            writeln!(out, "  {label:<22}{score:>3}%")?;
        }
        Ok(())
    }
}

fn write_list(out: &mut impl Write, title: &str, items: &[String], numbered: bool) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "[{title}]")?;
    for (i, item) in items.iter().enumerate() {
        if numbered {
            writeln!(out, "  {}. {item}", i + 1)?;
        } else {
            writeln!(out, "  - {item}")?;
        }
    }
    Ok(())
}

/// A bar of `width` cells filled in proportion to `percent`.
#[must_use]
pub fn bar(percent: u32, width: usize) -> String {
    let percent = usize::try_from(percent.min(100)).unwrap_or(100);
    let filled = (percent * width + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
