//! The question catalog.
//!
//! Questions are grouped into three sections. WISCAR questions additionally
//! carry the dimension they measure, which is what scoring aggregates on.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of sections in every catalog.
pub const SECTION_COUNT: usize = 3;

/// Top-level question grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Personality and motivation.
    Psychometric,
    /// Domain knowledge quiz.
    Technical,
    /// Six-dimension readiness survey.
    Wiscar,
}

impl Section {
    /// All sections in presentation order.
    pub const ALL: [Section; SECTION_COUNT] =
        [Section::Psychometric, Section::Technical, Section::Wiscar];

    /// Look up a section by its zero-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based position of this section.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Psychometric => 0,
            Self::Technical => 1,
            Self::Wiscar => 2,
        }
    }

    /// Display metadata for this section.
    #[must_use]
    pub fn info(self) -> SectionInfo {
        match self {
            Self::Psychometric => SectionInfo {
                title: "Personality & Motivation",
                description: "Assess your psychological fit for ERP consulting",
                icon: "\u{1f9e0}",
            },
            Self::Technical => SectionInfo {
                title: "Technical Knowledge",
                description: "Evaluate your technical readiness and domain knowledge",
                icon: "\u{2699}\u{fe0f}",
            },
            Self::Wiscar => SectionInfo {
                title: "WISCAR Assessment",
                description: "Comprehensive evaluation of your consulting readiness",
                icon: "\u{1f4ca}",
            },
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Psychometric => write!(f, "psychometric"),
            Self::Technical => write!(f, "technical"),
            Self::Wiscar => write!(f, "wiscar"),
        }
    }
}

/// Title, description and icon shown above a section's questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    /// Section heading.
    pub title: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
}

/// The six WISCAR readiness dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiscarDimension {
    /// Persistence and drive.
    Will,
    /// Genuine curiosity about the field.
    Interest,
    /// Current analytical and communication skill.
    Skill,
    /// Systems thinking.
    Cognitive,
    /// Adaptability and openness to feedback.
    AbilityToLearn,
    /// Fit with day-to-day consulting work.
    RealWorldAlignment,
}

impl WiscarDimension {
    /// All dimensions in reporting order.
    pub const ALL: [WiscarDimension; 6] = [
        WiscarDimension::Will,
        WiscarDimension::Interest,
        WiscarDimension::Skill,
        WiscarDimension::Cognitive,
        WiscarDimension::AbilityToLearn,
        WiscarDimension::RealWorldAlignment,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Will => "Will",
            Self::Interest => "Interest",
            Self::Skill => "Skill",
            Self::Cognitive => "Cognitive",
            Self::AbilityToLearn => "Ability to Learn",
            Self::RealWorldAlignment => "Real World Alignment",
        }
    }
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerKind {
    /// Five-point agreement scale, values 1 through 5.
    Likert,
    /// Pick one option by zero-based index.
    MultipleChoice {
        /// Option texts in display order.
        options: Vec<String>,
        /// Index of the objectively correct option, if there is one.
        #[serde(skip_serializing_if = "Option::is_none")]
        correct: Option<u32>,
    },
}

/// Labels for the five Likert values, lowest first.
pub const LIKERT_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// A single catalog question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier.
    pub id: String,
    /// Section this question belongs to.
    pub section: Section,
    /// Display category shown above the prompt.
    pub category: String,
    /// Prompt text.
    pub text: String,
    /// Answer format.
    pub kind: AnswerKind,
    /// WISCAR dimension measured (WISCAR questions only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<WiscarDimension>,
    /// Weight; always 1.
    pub weight: u32,
}

impl Question {
    fn likert(id: &str, section: Section, category: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            section,
            category: category.to_string(),
            text: text.to_string(),
            kind: AnswerKind::Likert,
            dimension: None,
            weight: 1,
        }
    }

    fn wiscar(id: &str, dimension: WiscarDimension, text: &str) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::likert(id, Section::Wiscar, dimension.label(), text)
        }
    }

    fn choice(id: &str, category: &str, text: &str, options: [&str; 4], correct: u32) -> Self {
        Self {
            kind: AnswerKind::MultipleChoice {
                options: options.iter().map(ToString::to_string).collect(),
                correct: Some(correct),
            },
            ..Self::likert(id, Section::Technical, category, text)
        }
    }

    /// Whether `value` is the correct option, for gradable questions.
    #[must_use]
    pub fn grade(&self, value: u32) -> Option<bool> {
        match &self.kind {
            AnswerKind::MultipleChoice {
                correct: Some(correct),
                ..
            } => Some(value == *correct),
            _ => None,
        }
    }

    /// Labels for each selectable value, paired with the value to record.
    #[must_use]
    pub fn choices(&self) -> Vec<(u32, &str)> {
        match &self.kind {
            AnswerKind::Likert => (1u32..).zip(LIKERT_LABELS).collect(),
            AnswerKind::MultipleChoice { options, .. } => {
                (0u32..).zip(options.iter().map(String::as_str)).collect()
            }
        }
    }
}

/// An ordered, immutable set of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog from questions in presentation order.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The built-in ERP consultant readiness catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_questions())
    }

    /// Total number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the catalog has no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All questions in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions belonging to `section`, in order.
    pub fn questions_in(&self, section: Section) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.section == section)
    }

    /// Number of questions in `section`.
    #[must_use]
    pub fn section_len(&self, section: Section) -> usize {
        self.questions_in(section).count()
    }

    /// Ordered questions for the section at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionOutOfRange`] if `index` is not 0, 1 or 2.
    pub fn section_questions(&self, index: usize) -> Result<Vec<&Question>> {
        let section = Section::from_index(index).ok_or(Error::SectionOutOfRange { index })?;
        Ok(self.questions_in(section).collect())
    }

    /// Display metadata for the section at `index`.
    #[must_use]
    pub fn section_info(&self, index: usize) -> Option<SectionInfo> {
        Section::from_index(index).map(Section::info)
    }

    /// The question at position `question` within the section at `section`.
    #[must_use]
    pub fn question_at(&self, section: usize, question: usize) -> Option<&Question> {
        let section = Section::from_index(section)?;
        self.questions_in(section).nth(question)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_questions() -> Vec<Question> {
    use Section::Psychometric as P;
    use WiscarDimension as W;

    vec![
        Question::likert(
            "psych-interest-1",
            P,
            "Interest Scale",
            "I enjoy solving complex business problems using technology.",
        ),
        Question::likert(
            "psych-personality-1",
            P,
            "Personality Fit",
            "I prefer working in structured environments with clear procedures.",
        ),
        Question::likert(
            "psych-motivation-1",
            P,
            "Motivation",
            "I am motivated to continuously learn new software and business processes.",
        ),
        Question::likert(
            "psych-communication-1",
            P,
            "Communication",
            "I am comfortable interacting with different stakeholders and managing change.",
        ),
        Question::likert(
            "psych-resilience-1",
            P,
            "Resilience",
            "I remain patient and persistent when facing complex challenges.",
        ),
        Question::likert(
            "psych-detail-1",
            P,
            "Attention to Detail",
            "I pay close attention to details and follow processes carefully.",
        ),
        Question::likert(
            "psych-analytical-1",
            P,
            "Analytical Thinking",
            "I enjoy analyzing data and identifying patterns to solve business problems.",
        ),
        Question::likert(
            "psych-adaptability-1",
            P,
            "Adaptability",
            "I adapt quickly to new software and changing business requirements.",
        ),
        Question::choice(
            "tech-erp-1",
            "ERP Knowledge",
            "Which of the following best describes ERP software?",
            [
                "A single application that manages only financial data",
                "Integrated software that manages business processes across departments",
                "A database management system for storing customer information",
                "Software specifically designed for manufacturing companies",
            ],
            1,
        ),
        Question::choice(
            "tech-modules-1",
            "ERP Modules",
            "Which ERP module would handle employee payroll and benefits?",
            [
                "Financial Management (FI)",
                "Supply Chain Management (SCM)",
                "Human Resources (HR)",
                "Customer Relationship Management (CRM)",
            ],
            2,
        ),
        Question::choice(
            "tech-process-1",
            "Business Process",
            "A company wants to track inventory from procurement to sales. \
             Which process flow is most logical?",
            [
                "Sales \u{2192} Procurement \u{2192} Inventory \u{2192} Delivery",
                "Procurement \u{2192} Inventory \u{2192} Sales \u{2192} Delivery",
                "Inventory \u{2192} Sales \u{2192} Procurement \u{2192} Delivery",
                "Delivery \u{2192} Sales \u{2192} Inventory \u{2192} Procurement",
            ],
            1,
        ),
        Question::choice(
            "tech-integration-1",
            "System Integration",
            "Why is data integration important in ERP systems?",
            [
                "To reduce software licensing costs",
                "To ensure consistent information across all departments",
                "To improve computer processing speed",
                "To simplify user interface design",
            ],
            1,
        ),
        Question::choice(
            "tech-workflow-1",
            "Workflow Logic",
            "A purchase order requires approval if the amount exceeds $5,000. \
             This is an example of:",
            [
                "Data validation",
                "Business rule configuration",
                "System integration",
                "User access control",
            ],
            1,
        ),
        Question::choice(
            "tech-reporting-1",
            "Reporting",
            "Which type of report would help track monthly sales performance?",
            [
                "Exception report",
                "Operational dashboard",
                "Trend analysis report",
                "Compliance audit report",
            ],
            2,
        ),
        Question::choice(
            "tech-scenario-1",
            "Problem Solving",
            "A client complains that their inventory levels show differently in the \
             warehouse and accounting systems. What should you investigate first?",
            [
                "User training records",
                "Data synchronization between modules",
                "Hardware performance issues",
                "Software licensing compliance",
            ],
            1,
        ),
        Question::choice(
            "tech-implementation-1",
            "Implementation",
            "During ERP implementation, what is the most critical success factor?",
            [
                "Having the latest software version",
                "Strong project management and change management",
                "Minimal customization requirements",
                "Large IT support team",
            ],
            1,
        ),
        Question::wiscar(
            "wiscar-will-1",
            W::Will,
            "I persist through complex challenges even when progress seems slow.",
        ),
        Question::wiscar(
            "wiscar-will-2",
            W::Will,
            "I maintain high energy and motivation during long-term projects.",
        ),
        Question::wiscar(
            "wiscar-interest-1",
            W::Interest,
            "I find business process optimization genuinely fascinating.",
        ),
        Question::wiscar(
            "wiscar-interest-2",
            W::Interest,
            "I actively seek to understand how different business functions connect.",
        ),
        Question::wiscar(
            "wiscar-skill-1",
            W::Skill,
            "I have strong analytical and problem-solving abilities.",
        ),
        Question::wiscar(
            "wiscar-skill-2",
            W::Skill,
            "I communicate technical concepts clearly to non-technical stakeholders.",
        ),
        Question::wiscar(
            "wiscar-cognitive-1",
            W::Cognitive,
            "I can quickly understand complex system relationships and dependencies.",
        ),
        Question::wiscar(
            "wiscar-cognitive-2",
            W::Cognitive,
            "I think systematically about business processes and their interactions.",
        ),
        Question::wiscar(
            "wiscar-learn-1",
            W::AbilityToLearn,
            "I adapt quickly to new software and technologies.",
        ),
        Question::wiscar(
            "wiscar-learn-2",
            W::AbilityToLearn,
            "I actively seek feedback and use it to improve my performance.",
        ),
        Question::wiscar(
            "wiscar-alignment-1",
            W::RealWorldAlignment,
            "I enjoy working with clients to understand their business requirements.",
        ),
        Question::wiscar(
            "wiscar-alignment-2",
            W::RealWorldAlignment,
            "I thrive in consulting environments with diverse projects and clients.",
        ),
    ]
}
