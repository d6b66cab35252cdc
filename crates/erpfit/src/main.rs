//! `erpfit` - CLI for the ERP consultant readiness assessment
//!
//! This binary runs the assessment interactively, scores saved answers and
//! inspects the catalog and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use erpfit::cli::{Cli, Command, ConfigCommand, QuestionsCommand, ScoreCommand, TakeCommand};
use erpfit::config::OutputFormat;
use erpfit::flow::{Flow, Outcome};
use erpfit::report::Report;
use erpfit::{init_logging, Catalog, Config, Question, SavedAnswer, Section};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    debug!(?config, "configuration loaded");

    // Execute the command
    match cli.command {
        Command::Take(take_cmd) => handle_take(&config, &take_cmd),
        Command::Score(score_cmd) => handle_score(&config, &score_cmd),
        Command::Questions(questions_cmd) => handle_questions(&questions_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_take(config: &Config, cmd: &TakeCommand) -> Result<()> {
    let mut session = config.session(Catalog::builtin());
    let format = if cmd.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    let outcome = Flow::new(&mut session, io::stdin().lock(), io::stdout().lock())
        .allow_skip(config.session.allow_skip)
        .run_with_retake(|session, out| {
            let Some(results) = session.results() else {
                return Ok(());
            };
            writeln!(out)?;
            Report::new(results)
                .with_output(&config.output)
                .with_elapsed(session.elapsed())
                .write(format, out)
        })?;
    if outcome == Outcome::Quit {
        println!();
        println!("Assessment abandoned; nothing was scored.");
    }
    Ok(())
}

fn handle_score(config: &Config, cmd: &ScoreCommand) -> Result<()> {
    let saved = read_answers(&cmd.file)?;
    let mut session = config.session(Catalog::builtin());

    let rejected = session.load_saved(&saved)?;
    for (i, err) in &rejected {
        eprintln!("warning: skipped entry {i} of {}: {err}", cmd.file.display());
    }
    info!(count = saved.len() - rejected.len(), "answers loaded");

    let format = cmd.format.map_or(config.output.format, Into::into);
    let results = session.score()?;
    Report::new(results)
        .with_output(&config.output)
        .write(format, &mut io::stdout().lock())?;
    Ok(())
}

fn read_answers(path: &Path) -> Result<Vec<SavedAnswer>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn handle_questions(cmd: &QuestionsCommand) -> Result<()> {
    let catalog = Catalog::builtin();
    let sections: Vec<Section> = match cmd.section {
        Some(index) => {
            // Validates the index before anything is printed.
            catalog.section_questions(index)?;
            Section::from_index(index).into_iter().collect()
        }
        None => Section::ALL.to_vec(),
    };

    if cmd.json {
        let questions: Vec<&Question> = sections
            .iter()
            .flat_map(|s| catalog.questions_in(*s))
            .collect();
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(());
    }

    for section in sections {
        let info = section.info();
        println!(
            "{} {} ({} questions)",
            info.icon,
            info.title,
            catalog.section_len(section)
        );
        println!("  {}", info.description);
        println!();
        for question in catalog.questions_in(section) {
            println!("  {:<24} [{}]", question.id, question.category);
            println!("    {}", question.text);
            for (n, (_, label)) in question.choices().iter().enumerate() {
                println!("      {}) {label}", n + 1);
            }
        }
        println!();
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Session]");
                println!("  Layout:             {:?}", config.session.layout);
                println!("  Allow skip:         {}", config.session.allow_skip);
                println!();
                println!("[Scoring]");
                println!("  Empty section:      {:?}", config.scoring.empty_section);
                println!();
                println!("[Output]");
                println!("  Format:             {:?}", config.output.format);
                println!("  Chart:              {}", config.output.chart);
                println!("  Bar width:          {}", config.output.bar_width);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
