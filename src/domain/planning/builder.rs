//! Turns a pattern analysis and raw user text into an ordered plan.

use std::sync::Arc;

use super::classifier::{Intent, IntentClassifier, KeywordClassifier};
use super::locale::Locale;
use super::plan::{Plan, PlanStep, PlanStepKind};
use crate::domain::emotion::{CrisisRisk, PatternAnalysis};

/// Rule-based multi-step planner.
///
/// Emission order is fixed: crisis steps, calming technique, energizing
/// activity, the unconditional empathetic message, then mood tracking.
#[derive(Clone)]
pub struct PlanBuilder {
    locale: Locale,
    classifier: Arc<dyn IntentClassifier>,
}

impl PlanBuilder {
    pub fn new(locale: Locale, classifier: Arc<dyn IntentClassifier>) -> Self {
        Self { locale, classifier }
    }

    /// Builder using the keyword lexicon of `locale`.
    pub fn for_locale(locale: Locale) -> Self {
        Self::new(locale, Arc::new(KeywordClassifier::for_locale(locale)))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn classifier(&self) -> &Arc<dyn IntentClassifier> {
        &self.classifier
    }

    /// Builds the plan. Never empty.
    pub fn build_plan(&self, user_text: &str, analysis: &PatternAnalysis) -> Plan {
        let intents = self.classifier.classify(user_text);
        let mut plan = Plan::new();
        let mut emit = |kind| plan.push(PlanStep::new(kind, self.locale));

        if analysis.crisis_risk == CrisisRisk::High {
            emit(PlanStepKind::CrisisResources);
            emit(PlanStepKind::ProfessionalHelp);
        }
        if intents.contains(&Intent::StressOrAnxiety) {
            emit(PlanStepKind::CalmingTechnique);
        }
        if intents.contains(&Intent::LowEnergy) {
            emit(PlanStepKind::EnergizingActivity);
        }

        emit(PlanStepKind::EmpatheticMessage);

        if analysis.pattern_detected {
            emit(PlanStepKind::MoodTracking);
        }

        plan
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl std::fmt::Debug for PlanBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanBuilder")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
