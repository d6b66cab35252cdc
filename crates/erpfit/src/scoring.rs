//! The scoring engine.
//!
//! [`score`] turns a sheet of answers into a [`Results`] record. It is pure:
//! the same catalog, answers and policy always produce the same results.
//!
//! Answers are routed to sections by joining them against the catalog, so a
//! question's `section` and `dimension` fields decide where its value counts.
//! Answers whose id the catalog does not know are ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::answers::AnswerSheet;
use crate::catalog::{Catalog, Section, WiscarDimension};
use crate::error::{Error, Result};
use crate::recommendation::Recommendation;

/// Highest value on the agreement scale.
pub const LIKERT_MAX: u32 = 5;

/// Value credited to a technical answer graded correct.
pub const CORRECT_ANSWER_CREDIT: u32 = 5;

/// Maximum attainable sum for one WISCAR dimension.
///
/// Assumes exactly two questions per dimension, each scored out of
/// [`LIKERT_MAX`].
pub const WISCAR_DIMENSION_MAX: u32 = 10;

/// What to do when a section has no answers at scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySectionPolicy {
    /// Score the empty section as 0%.
    #[default]
    Zero,
    /// Refuse to score until every section has at least one answer.
    Reject,
}

/// Percentage scores for the six WISCAR dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WiscarScores {
    /// Will.
    pub will: u32,
    /// Interest.
    pub interest: u32,
    /// Skill.
    pub skill: u32,
    /// Cognitive.
    pub cognitive: u32,
    /// Ability to learn.
    pub ability_to_learn: u32,
    /// Real-world alignment.
    pub real_world_alignment: u32,
}

impl WiscarScores {
    /// Score for a single dimension.
    #[must_use]
    pub fn get(&self, dimension: WiscarDimension) -> u32 {
        match dimension {
            WiscarDimension::Will => self.will,
            WiscarDimension::Interest => self.interest,
            WiscarDimension::Skill => self.skill,
            WiscarDimension::Cognitive => self.cognitive,
            WiscarDimension::AbilityToLearn => self.ability_to_learn,
            WiscarDimension::RealWorldAlignment => self.real_world_alignment,
        }
    }

    fn set(&mut self, dimension: WiscarDimension, value: u32) {
        let slot = match dimension {
            WiscarDimension::Will => &mut self.will,
            WiscarDimension::Interest => &mut self.interest,
            WiscarDimension::Skill => &mut self.skill,
            WiscarDimension::Cognitive => &mut self.cognitive,
            WiscarDimension::AbilityToLearn => &mut self.ability_to_learn,
            WiscarDimension::RealWorldAlignment => &mut self.real_world_alignment,
        };
        *slot = value;
    }

    /// Dimensions paired with their scores, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (WiscarDimension, u32)> + '_ {
        WiscarDimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Unrounded mean of the six scores.
    #[must_use]
    pub fn mean(&self) -> f64 {
        let total: u32 = self.iter().map(|(_, score)| score).sum();
        f64::from(total) / 6.0
    }
}

/// The complete outcome of an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    /// Psychometric fit, 0 to 100.
    pub psych_fit_score: u32,
    /// Technical readiness, 0 to 100.
    pub tech_readiness_score: u32,
    /// WISCAR dimension scores.
    pub wiscar_scores: WiscarScores,
    /// Combined confidence, 0 to 100.
    pub overall_confidence: u32,
    /// Tier selected from the overall confidence.
    pub recommendation: Recommendation,
    /// Feedback paragraph for the tier.
    pub personalized_feedback: String,
    /// Next steps for the tier.
    pub next_steps: Vec<String>,
    /// Suggested roles.
    pub career_roles: Vec<String>,
    /// Adjacent roles.
    pub alternative_roles: Vec<String>,
}

impl Results {
    /// Combine the section scores and attach the tier's guidance.
    #[must_use]
    pub fn from_scores(
        psych_fit_score: u32,
        tech_readiness_score: u32,
        wiscar_scores: WiscarScores,
    ) -> Self {
        let overall_confidence = round_percent(
            (f64::from(psych_fit_score) + f64::from(tech_readiness_score) + wiscar_scores.mean())
                / 3.0,
        );
        let recommendation = Recommendation::from_confidence(overall_confidence);
        let guidance = recommendation.guidance();

        Self {
            psych_fit_score,
            tech_readiness_score,
            wiscar_scores,
            overall_confidence,
            recommendation,
            personalized_feedback: guidance.feedback.to_string(),
            next_steps: owned(guidance.next_steps),
            career_roles: owned(guidance.career_roles),
            alternative_roles: owned(guidance.alternative_roles),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    sum: u32,
    count: u32,
}

impl Tally {
    fn add(&mut self, value: u32) {
        self.sum = self.sum.saturating_add(value);
        self.count += 1;
    }

    /// Percentage of the maximum attainable with `count` answers.
    fn percent(&self, section: Section, policy: EmptySectionPolicy) -> Result<u32> {
        if self.count == 0 {
            return match policy {
                EmptySectionPolicy::Zero => {
                    warn!(%section, "no answers recorded; scoring section as 0");
                    Ok(0)
                }
                EmptySectionPolicy::Reject => Err(Error::InsufficientAnswers { section }),
            };
        }
        Ok(round_percent(ratio(self.sum, self.count.saturating_mul(LIKERT_MAX))))
    }
}

/// Score a sheet of answers against `catalog`.
///
/// # Errors
///
/// Returns [`Error::InsufficientAnswers`] when `policy` is
/// [`EmptySectionPolicy::Reject`] and some section has no answers.
pub fn score(
    catalog: &Catalog,
    answers: &AnswerSheet,
    policy: EmptySectionPolicy,
) -> Result<Results> {
    let mut psych = Tally::default();
    let mut tech = Tally::default();
    let mut wiscar = Tally::default();
    let mut dimension_sums = [0u32; 6];

    for answer in answers {
        let Some(question) = catalog.find(&answer.question_id) else {
            warn!(question = %answer.question_id, "ignoring answer to unknown question");
            continue;
        };
        match question.section {
            Section::Psychometric => psych.add(answer.value),
            Section::Technical => {
                let credit = if answer.is_correct == Some(true) {
                    CORRECT_ANSWER_CREDIT
                } else {
                    answer.value
                };
                tech.add(credit);
            }
            Section::Wiscar => {
                wiscar.add(answer.value);
                if let Some(dimension) = question.dimension {
                    let slot = &mut dimension_sums[dimension_slot(dimension)];
                    *slot = slot.saturating_add(answer.value);
                }
            }
        }
    }

    let psych_fit_score = psych.percent(Section::Psychometric, policy)?;
    let tech_readiness_score = tech.percent(Section::Technical, policy)?;
    // WISCAR dimensions divide by a fixed maximum, so an empty bucket only
    // matters for the reject policy.
    wiscar.percent(Section::Wiscar, policy)?;

    let mut wiscar_scores = WiscarScores::default();
    for dimension in WiscarDimension::ALL {
        let sum = dimension_sums[dimension_slot(dimension)];
        wiscar_scores.set(dimension, round_percent(ratio(sum, WISCAR_DIMENSION_MAX)));
    }

    let results = Results::from_scores(psych_fit_score, tech_readiness_score, wiscar_scores);
    debug!(
        psych = results.psych_fit_score,
        tech = results.tech_readiness_score,
        confidence = results.overall_confidence,
        "scored {} answers",
        answers.len()
    );
    Ok(results)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn dimension_slot(dimension: WiscarDimension) -> usize {
    WiscarDimension::ALL
        .iter()
        .position(|d| *d == dimension)
        .unwrap_or_default()
}

fn ratio(sum: u32, max: u32) -> f64 {
    f64::from(sum) / f64::from(max) * 100.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_percent(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answer;
    use crate::catalog::{AnswerKind, Question};

    fn sheet_for(
        catalog: &Catalog,
        section: Section,
        mut value: impl FnMut(&Question) -> (u32, Option<bool>),
    ) -> AnswerSheet {
        catalog
            .questions_in(section)
            .map(|q| {
                let (v, correct) = value(q);
                Answer::new(q.id.clone(), v, correct)
            })
            .collect()
    }

    fn merge(sheets: &[AnswerSheet]) -> AnswerSheet {
        sheets.iter().flat_map(|s| s.iter().cloned()).collect()
    }

    #[test]
    fn test_all_five_psych_answers() {
        let catalog = Catalog::builtin();
        let answers = sheet_for(&catalog, Section::Psychometric, |_| (5, None));
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 100);
        assert_eq!(results.tech_readiness_score, 0);
    }

    #[test]
    fn test_all_one_psych_answers() {
        let catalog = Catalog::builtin();
        let answers = sheet_for(&catalog, Section::Psychometric, |_| (1, None));
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 20);
    }

    #[test]
    fn test_correct_tech_answers_ignore_raw_value() {
        let catalog = Catalog::builtin();
        let answers = sheet_for(&catalog, Section::Technical, |_| (0, Some(true)));
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.tech_readiness_score, 100);
    }

    #[test]
    fn test_incorrect_tech_answers_use_raw_value() {
        let catalog = Catalog::builtin();
        // Four correct, four wrong with option index 3: (4*5 + 4*3) / 40.
        let mut flip = false;
        let answers = sheet_for(&catalog, Section::Technical, |_| {
            flip = !flip;
            if flip {
                (1, Some(true))
            } else {
                (3, Some(false))
            }
        });
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.tech_readiness_score, 80);
    }

    #[test]
    fn test_wiscar_dimensions_use_fixed_denominator() {
        let catalog = Catalog::builtin();
        let answers: AnswerSheet = [
            Answer::new("wiscar-will-1", 5, None),
            Answer::new("wiscar-will-2", 5, None),
            Answer::new("wiscar-skill-1", 3, None),
        ]
        .into_iter()
        .collect();
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.wiscar_scores.will, 100);
        assert_eq!(results.wiscar_scores.skill, 30);
        assert_eq!(results.wiscar_scores.interest, 0);
    }

    #[test]
    fn test_routing_follows_section_field_not_id() {
        let question = |id: &str, section, dimension| Question {
            id: id.to_string(),
            section,
            category: String::new(),
            text: String::new(),
            kind: AnswerKind::Likert,
            dimension,
            weight: 1,
        };
        let catalog = Catalog::new(vec![
            question("tech-looking-but-psych", Section::Psychometric, None),
            question("q2", Section::Wiscar, Some(WiscarDimension::Cognitive)),
        ]);
        let answers: AnswerSheet = [
            Answer::new("tech-looking-but-psych", 4, None),
            Answer::new("q2", 5, None),
        ]
        .into_iter()
        .collect();

        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 80);
        assert_eq!(results.tech_readiness_score, 0);
        assert_eq!(results.wiscar_scores.cognitive, 50);
    }

    #[test]
    fn test_unknown_answers_are_ignored() {
        let catalog = Catalog::builtin();
        let mut answers = sheet_for(&catalog, Section::Psychometric, |_| (5, None));
        answers.record(Answer::new("psych-imaginary-9", 1, None));
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 100);
    }

    #[test]
    fn test_reference_walkthrough() {
        let catalog = Catalog::builtin();
        let psych = sheet_for(&catalog, Section::Psychometric, |_| (4, None));
        let tech = sheet_for(&catalog, Section::Technical, |q| match q.id.as_str() {
            "tech-erp-1" | "tech-process-1" | "tech-integration-1" | "tech-workflow-1" => {
                (1, Some(true))
            }
            _ => (0, Some(false)),
        });
        // Only the first eight WISCAR questions are reachable with the fixed layout.
        let wiscar: AnswerSheet = catalog
            .questions_in(Section::Wiscar)
            .take(8)
            .map(|q| Answer::new(q.id.clone(), 4, None))
            .collect();

        let answers = merge(&[psych, tech, wiscar]);
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 80);
        assert_eq!(results.tech_readiness_score, 50);
        assert_eq!(results.wiscar_scores.cognitive, 80);
        assert_eq!(results.wiscar_scores.ability_to_learn, 0);
        // (80 + 50 + 320/6) / 3 = 61.1
        assert_eq!(results.overall_confidence, 61);
        assert_eq!(results.recommendation, Recommendation::No);
        assert!(results.career_roles.is_empty());
    }

    #[test]
    fn test_perfect_answers_recommend_yes() {
        let catalog = Catalog::builtin();
        let answers = merge(&[
            sheet_for(&catalog, Section::Psychometric, |_| (5, None)),
            sheet_for(&catalog, Section::Technical, |q| (1, q.grade(1))),
            sheet_for(&catalog, Section::Wiscar, |_| (5, None)),
        ]);
        // tech-modules-1 and tech-reporting-1 expect option 2, so they earn
        // the raw value 1: (6*5 + 2*1) / 40 = 80.
        let results = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 100);
        assert_eq!(results.tech_readiness_score, 80);
        assert_eq!(results.overall_confidence, 93);
        assert_eq!(results.recommendation, Recommendation::Yes);
        assert_eq!(results.next_steps.len(), 4);
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let catalog = Catalog::builtin();
        for likert in 1..=LIKERT_MAX {
            for option in 0..4 {
                let answers = merge(&[
                    sheet_for(&catalog, Section::Psychometric, |_| (likert, None)),
                    sheet_for(&catalog, Section::Technical, |q| (option, q.grade(option))),
                    sheet_for(&catalog, Section::Wiscar, |_| (likert, None)),
                ]);
                let r = score(&catalog, &answers, EmptySectionPolicy::Reject).unwrap();
                assert!(r.psych_fit_score <= 100);
                assert!(r.tech_readiness_score <= 100);
                assert!(r.wiscar_scores.iter().all(|(_, s)| s <= 100));
                assert!(r.overall_confidence <= 100);
            }
        }
    }

    #[test]
    fn test_empty_sheet_zero_policy() {
        let catalog = Catalog::builtin();
        let results = score(&catalog, &AnswerSheet::new(), EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.overall_confidence, 0);
        assert_eq!(results.recommendation, Recommendation::No);
    }

    #[test]
    fn test_reject_policy_names_empty_section() {
        let catalog = Catalog::builtin();
        let answers = merge(&[
            sheet_for(&catalog, Section::Psychometric, |_| (3, None)),
            sheet_for(&catalog, Section::Wiscar, |_| (3, None)),
        ]);
        let err = score(&catalog, &answers, EmptySectionPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientAnswers {
                section: Section::Technical
            }
        ));
    }

    #[test]
    fn test_score_is_deterministic() {
        let catalog = Catalog::builtin();
        let answers = sheet_for(&catalog, Section::Wiscar, |_| (2, None));
        let a = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        let b = score(&catalog, &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wiscar_mean_is_unrounded() {
        let scores = WiscarScores {
            will: 100,
            interest: 50,
            ..WiscarScores::default()
        };
        assert!((scores.mean() - 25.0).abs() < f64::EPSILON);

        let wiscar = WiscarScores {
            will: 1,
            ..WiscarScores::default()
        };
        let results = Results::from_scores(70, 70, wiscar);
        // (70 + 70 + 1/6) / 3 = 46.72
        assert_eq!(results.overall_confidence, 47);
    }

    #[test]
    fn test_deserialized_duplicates_score_once() {
        let json = r#"[
            {"question_id": "psych-detail-1", "value": 1},
            {"question_id": "psych-detail-1", "value": 5}
        ]"#;
        let answers: AnswerSheet = serde_json::from_str(json).unwrap();
        let results = score(&Catalog::builtin(), &answers, EmptySectionPolicy::Zero).unwrap();
        assert_eq!(results.psych_fit_score, 100);
    }
}
