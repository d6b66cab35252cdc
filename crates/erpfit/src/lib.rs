//! `erpfit` - A readiness assessment for aspiring ERP consultants
//!
//! This library holds the question catalog, the session that walks it, and
//! the scoring engine that turns answers into psychometric, technical and
//! WISCAR scores with a Yes / Maybe / No recommendation.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod answers;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod recommendation;
pub mod report;
pub mod scoring;
pub mod session;

pub use answers::{Answer, AnswerSheet, SavedAnswer};
pub use catalog::{Catalog, Question, Section, WiscarDimension};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recommendation::Recommendation;
pub use scoring::{EmptySectionPolicy, Results, WiscarScores};
pub use session::{Advance, Cursor, CursorLayout, Session};
