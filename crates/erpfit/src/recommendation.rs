//! Recommendation tiers and their fixed guidance text.

use serde::{Deserialize, Serialize};

/// Lowest overall confidence that earns a [`Recommendation::Yes`].
pub const YES_THRESHOLD: u32 = 85;

/// Lowest overall confidence that earns a [`Recommendation::Maybe`].
pub const MAYBE_THRESHOLD: u32 = 65;

/// Outcome of the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Ready to pursue ERP consulting now.
    Yes,
    /// Promising, with gaps to close first.
    Maybe,
    /// Build foundations or consider adjacent roles.
    No,
}

impl Recommendation {
    /// Select the tier for an overall confidence percentage.
    #[must_use]
    pub fn from_confidence(confidence: u32) -> Self {
        if confidence >= YES_THRESHOLD {
            Self::Yes
        } else if confidence >= MAYBE_THRESHOLD {
            Self::Maybe
        } else {
            Self::No
        }
    }

    /// Static guidance shown for this tier.
    #[must_use]
    pub fn guidance(self) -> &'static Guidance {
        match self {
            Self::Yes => &YES_GUIDANCE,
            Self::Maybe => &MAYBE_GUIDANCE,
            Self::No => &NO_GUIDANCE,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::Maybe => write!(f, "Maybe"),
            Self::No => write!(f, "No"),
        }
    }
}

/// Feedback, next steps and suggested roles for one tier.
#[derive(Debug, PartialEq, Eq)]
pub struct Guidance {
    /// Feedback paragraph.
    pub feedback: &'static str,
    /// Ordered next steps.
    pub next_steps: &'static [&'static str],
    /// Roles to aim for directly.
    pub career_roles: &'static [&'static str],
    /// Adjacent roles worth considering.
    pub alternative_roles: &'static [&'static str],
}

static YES_GUIDANCE: Guidance = Guidance {
    feedback: "You have the motivation, cognitive ability, and technical readiness to become \
               an ERP Consultant. Start with module-specific ERP certifications and business \
               process analysis training.",
    next_steps: &[
        "Enroll in ERP platform certifications (SAP, Oracle, Dynamics)",
        "Take business process workshops",
        "Join ERP consulting projects or internships",
        "Build a portfolio of ERP implementations",
    ],
    career_roles: &[
        "ERP Functional Consultant",
        "ERP Implementation Consultant",
        "Business Process Analyst",
        "ERP Project Manager",
    ],
    alternative_roles: &[],
};

static MAYBE_GUIDANCE: Guidance = Guidance {
    feedback: "Your interest is high, but building stronger domain knowledge and technical \
               aptitude will enhance your success in ERP consulting.",
    next_steps: &[
        "Complete foundational courses in business processes",
        "Learn database basics and SQL",
        "Practice with ERP simulation software",
        "Develop project management skills",
    ],
    career_roles: &[
        "ERP Support Analyst",
        "Business Process Coordinator",
        "ERP Data Analyst",
    ],
    alternative_roles: &["Business Analyst", "IT Support Specialist"],
};

static NO_GUIDANCE: Guidance = Guidance {
    feedback: "Consider roles in general business analysis or IT support as a stepping stone \
               to ERP consulting, focusing on foundational skill-building first.",
    next_steps: &[
        "Build fundamental business and technical skills",
        "Explore introductory courses in business analysis",
        "Gain experience in customer support or data entry",
        "Consider alternative career paths that align with your strengths",
    ],
    career_roles: &[],
    alternative_roles: &[
        "Business Process Coordinator",
        "IT Support Specialist",
        "Junior Data Analyst",
        "Software Tester",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Recommendation::from_confidence(100), Recommendation::Yes);
        assert_eq!(Recommendation::from_confidence(85), Recommendation::Yes);
        assert_eq!(Recommendation::from_confidence(84), Recommendation::Maybe);
        assert_eq!(Recommendation::from_confidence(65), Recommendation::Maybe);
        assert_eq!(Recommendation::from_confidence(64), Recommendation::No);
        assert_eq!(Recommendation::from_confidence(0), Recommendation::No);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let rank = |r: Recommendation| match r {
            Recommendation::No => 0,
            Recommendation::Maybe => 1,
            Recommendation::Yes => 2,
        };
        let mut previous = 0;
        for confidence in 0..=100 {
            let current = rank(Recommendation::from_confidence(confidence));
            assert!(current >= previous, "tier dropped at {confidence}");
            previous = current;
        }
    }

    #[test]
    fn test_guidance_role_lists() {
        assert!(Recommendation::Yes.guidance().alternative_roles.is_empty());
        assert!(Recommendation::No.guidance().career_roles.is_empty());

        let maybe = Recommendation::Maybe.guidance();
        assert_eq!(maybe.career_roles.len(), 3);
        assert_eq!(maybe.alternative_roles.len(), 2);
    }

    #[test]
    fn test_every_tier_has_four_next_steps() {
        for tier in [Recommendation::Yes, Recommendation::Maybe, Recommendation::No] {
            assert_eq!(tier.guidance().next_steps.len(), 4, "{tier}");
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&Recommendation::Maybe).unwrap(),
            "\"Maybe\""
        );
    }
}
