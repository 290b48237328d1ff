//! Plan steps handed to the response generator as internal guidance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::locale::Locale;

/// Header line preceding the bulleted plan in the agent prompt.
pub const PLAN_HEADER: &str = "Follow these steps to construct your response:";

/// Which rule produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStepKind {
    CrisisResources,
    ProfessionalHelp,
    CalmingTechnique,
    EnergizingActivity,
    EmpatheticMessage,
    MoodTracking,
}

impl PlanStepKind {
    /// Fixed instruction text for this step in `locale`.
    pub fn instruction(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Turkish, Self::CrisisResources) => {
                "🚨 Acil destek kaynaklarını nazikçe öner."
            }
            (Locale::Turkish, Self::ProfessionalHelp) => {
                "📞 Profesyonel yardım almanın önemini vurgula."
            }
            (Locale::Turkish, Self::CalmingTechnique) => {
                "🧘 Rahatlatıcı tekniklerden (nefes, meditasyon) birini somut olarak öner."
            }
            (Locale::Turkish, Self::EnergizingActivity) => {
                "⚡ Motivasyon artırıcı egzersizlerden veya küçük bir öz bakım aktivitesinden somut bir örnek ver."
            }
            (Locale::Turkish, Self::EmpatheticMessage) => {
                "💙 Empatik, kişiselleştirilmiş bir destek mesajı oluştur ve somut bir öneri ile bitir."
            }
            (Locale::Turkish, Self::MoodTracking) => {
                "📊 Duygu takip etmenin veya günlük tutmanın faydalarını belirt."
            }
            (Locale::English, Self::CrisisResources) => {
                "🚨 Gently offer emergency support resources."
            }
            (Locale::English, Self::ProfessionalHelp) => {
                "📞 Stress the importance of getting professional help."
            }
            (Locale::English, Self::CalmingTechnique) => {
                "🧘 Concretely suggest one calming technique (breathing, meditation)."
            }
            (Locale::English, Self::EnergizingActivity) => {
                "⚡ Give a concrete example of a motivating exercise or a small self-care activity."
            }
            (Locale::English, Self::EmpatheticMessage) => {
                "💙 Write an empathetic, personalized support message and end it with a concrete suggestion."
            }
            (Locale::English, Self::MoodTracking) => {
                "📊 Mention the benefits of tracking emotions or keeping a journal."
            }
        }
    }
}

/// One natural-language instruction steering the response generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    kind: PlanStepKind,
    instruction: String,
}

impl PlanStep {
    pub fn new(kind: PlanStepKind, locale: Locale) -> Self {
        Self {
            kind,
            instruction: kind.instruction(locale).to_string(),
        }
    }

    pub fn kind(&self) -> PlanStepKind {
        self.kind
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instruction)
    }
}

/// Ordered sequence of plan steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: PlanStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn kinds(&self) -> Vec<PlanStepKind> {
        self.steps.iter().map(PlanStep::kind).collect()
    }

    /// Step texts in order.
    pub fn instructions(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.instruction.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Renders the plan as one instruction block: header, then `- step` lines.
    pub fn render_instructions(&self) -> String {
        let mut rendered = String::from(PLAN_HEADER);
        for step in &self.steps {
            rendered.push_str("\n- ");
            rendered.push_str(&step.instruction);
        }
        rendered
    }
}
