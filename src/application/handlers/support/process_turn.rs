//! ProcessTurnHandler - Runs one user turn end to end.
//!
//! analyze (when emotion data is given) → crisis escalation → plan →
//! retrieve context → invoke agent → remember and persist the exchange.

use std::sync::Arc;

use serde::Serialize;

use crate::application::session_registry::{lock_session, SessionRegistry};
use crate::domain::emotion::{Intensity, PatternAnalysis, PatternAnalyzer};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::planning::{Intent, PlanBuilder};
use crate::domain::support::{ConversationTurn, MoodEntry, SupportError};
use crate::ports::{join_context, AgentExecutor, AgentInput, Retriever, SupportRepository};

/// Emotion data reported with a turn. Missing parts fall back to the
/// locale's "unspecified" label and the default intensity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionInput {
    pub label: Option<String>,
    pub intensity: Option<Intensity>,
}

/// Command to process one user turn.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub message: String,
    pub emotion: Option<EmotionInput>,
    pub now: Timestamp,
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TurnOutcome {
    Success {
        response: String,
        plan_steps: Vec<String>,
        analysis: PatternAnalysis,
    },
    Failure {
        error: String,
        fallback_response: String,
    },
}

impl TurnOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TurnOutcome::Success { .. })
    }
}

/// Handler for user turns.
pub struct ProcessTurnHandler {
    registry: Arc<SessionRegistry>,
    analyzer: PatternAnalyzer,
    plan_builder: PlanBuilder,
    agent: Arc<dyn AgentExecutor>,
    retriever: Option<Arc<dyn Retriever>>,
    repository: Option<Arc<dyn SupportRepository>>,
}

impl ProcessTurnHandler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        analyzer: PatternAnalyzer,
        plan_builder: PlanBuilder,
        agent: Arc<dyn AgentExecutor>,
    ) -> Self {
        Self {
            registry,
            analyzer,
            plan_builder,
            agent,
            retriever: None,
            repository: None,
        }
    }

    pub fn with_retriever(mut self, retriever: Option<Arc<dyn Retriever>>) -> Self {
        self.retriever = retriever;
        self
    }

    pub fn with_repository(mut self, repository: Option<Arc<dyn SupportRepository>>) -> Self {
        self.repository = repository;
        self
    }

    pub async fn handle(&self, cmd: ProcessTurnCommand) -> Result<TurnOutcome, SupportError> {
        if cmd.message.trim().is_empty() {
            return Err(SupportError::validation("message", "Message cannot be empty"));
        }

        let locale = self.plan_builder.locale();
        let handle = self.registry.get_or_create(&cmd.user_id, &cmd.session_id).await;

        // 1. Analyze and plan under the session lock
        let (analysis, plan, chat_history, mood_entry) = {
            let mut session = lock_session(&handle);
            session.touch(cmd.now);

            let (mut analysis, mood_entry) = match &cmd.emotion {
                Some(emotion) => {
                    let label = emotion
                        .label
                        .as_deref()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .unwrap_or(locale.unspecified_emotion());
                    let intensity = emotion.intensity.unwrap_or_default();
                    let analysis =
                        session.record_and_analyze(label, intensity, cmd.now, &self.analyzer);
                    (analysis, Some(MoodEntry::new(intensity, label, cmd.now)))
                }
                None => (PatternAnalysis::baseline(), None),
            };

            if self
                .plan_builder
                .classifier()
                .classify(&cmd.message)
                .contains(&Intent::Crisis)
            {
                tracing::warn!(
                    user_id = %cmd.user_id,
                    session_id = %cmd.session_id,
                    "Crisis language detected, escalating risk"
                );
                analysis.escalate_crisis();
            }

            let plan = self.plan_builder.build_plan(&cmd.message, &analysis);
            (analysis, plan, session.memory().messages().to_vec(), mood_entry)
        };

        tracing::debug!(
            user_id = %cmd.user_id,
            session_id = %cmd.session_id,
            trend = %analysis.trend,
            crisis_risk = %analysis.crisis_risk,
            pattern_detected = analysis.pattern_detected,
            steps = ?plan.kinds(),
            "Built response plan"
        );

        // 2. Retrieve context
        let context = self.retrieve_context(&cmd).await;

        // 3. Invoke agent
        let input = AgentInput {
            user_id: cmd.user_id.clone(),
            session_id: cmd.session_id,
            input: cmd.message.clone(),
            plan_instructions: plan.render_instructions(),
            current_time: cmd.now.format_for_agent(),
            context,
            chat_history,
        };

        let output = match self.agent.invoke(input).await {
            Ok(output) => output.output,
            Err(err) => {
                tracing::error!(
                    user_id = %cmd.user_id,
                    session_id = %cmd.session_id,
                    error = %err,
                    "Support agent failed"
                );
                return Ok(TurnOutcome::Failure {
                    error: err.to_string(),
                    fallback_response: locale.fallback_response().to_string(),
                });
            }
        };

        // 4. Remember and persist
        lock_session(&handle).remember_exchange(&cmd.message, &output);
        self.persist(&cmd, &output, mood_entry.as_ref()).await;

        tracing::info!(
            user_id = %cmd.user_id,
            session_id = %cmd.session_id,
            plan_steps = plan.len(),
            crisis_risk = %analysis.crisis_risk,
            "Processed support turn"
        );

        Ok(TurnOutcome::Success {
            response: output,
            plan_steps: plan.instructions(),
            analysis,
        })
    }

    async fn retrieve_context(&self, cmd: &ProcessTurnCommand) -> String {
        let Some(retriever) = &self.retriever else {
            return String::new();
        };

        match retriever.retrieve(&cmd.message).await {
            Ok(documents) => join_context(&documents),
            Err(e) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    error = %e,
                    "Retrieval failed, continuing without context"
                );
                String::new()
            }
        }
    }

    async fn persist(&self, cmd: &ProcessTurnCommand, output: &str, mood_entry: Option<&MoodEntry>) {
        let Some(repository) = &self.repository else {
            return;
        };

        let turn = ConversationTurn::new(cmd.message.clone(), output, cmd.now);
        if let Err(e) = repository.save_conversation(&cmd.user_id, &turn).await {
            tracing::warn!(user_id = %cmd.user_id, error = %e, "Failed to save conversation turn");
        }

        if let Some(entry) = mood_entry {
            if let Err(e) = repository.save_mood_entry(&cmd.user_id, entry).await {
                tracing::warn!(user_id = %cmd.user_id, error = %e, "Failed to save mood entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAgentExecutor;
    use crate::adapters::storage::InMemorySupportRepository;
    use crate::domain::emotion::{CrisisRisk, Recommendation, Trend};
    use crate::domain::planning::{Locale, PlanStepKind, PLAN_HEADER};
    use crate::ports::{AgentError, RetrievalError, RetrievedDocument};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticRetriever {
        documents: Vec<RetrievedDocument>,
        queries: Mutex<Vec<String>>,
        fail: bool,
    }

    impl StaticRetriever {
        fn with(documents: Vec<RetrievedDocument>) -> Self {
            Self {
                documents,
                queries: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                documents: Vec::new(),
                queries: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Retriever for StaticRetriever {
        async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, RetrievalError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(RetrievalError::Unavailable("index offline".to_string()));
            }
            Ok(self.documents.clone())
        }
    }

    struct Fixture {
        registry: Arc<SessionRegistry>,
        agent: MockAgentExecutor,
        handler: ProcessTurnHandler,
        user_id: UserId,
        session_id: SessionId,
    }

    fn fixture(agent: MockAgentExecutor, locale: Locale) -> Fixture {
        let registry = Arc::new(SessionRegistry::new(locale, None));
        let handler = ProcessTurnHandler::new(
            registry.clone(),
            PatternAnalyzer::default(),
            PlanBuilder::for_locale(locale),
            Arc::new(agent.clone()),
        );
        Fixture {
            registry,
            agent,
            handler,
            user_id: UserId::new("user-1").unwrap(),
            session_id: SessionId::new(),
        }
    }

    fn command(f: &Fixture, message: &str, emotion: Option<(&str, i32)>, now: Timestamp) -> ProcessTurnCommand {
        ProcessTurnCommand {
            user_id: f.user_id.clone(),
            session_id: f.session_id,
            message: message.to_string(),
            emotion: emotion.map(|(label, intensity)| EmotionInput {
                label: Some(label.to_string()),
                intensity: Some(Intensity::new(intensity)),
            }),
            now,
        }
    }

    fn history_len(f: &Fixture) -> usize {
        let handle = f.registry.get(&f.user_id, &f.session_id).unwrap();
        let len = lock_session(&handle).emotions().len();
        len
    }

    #[tokio::test]
    async fn success_returns_response_plan_and_analysis() {
        let f = fixture(MockAgentExecutor::new().with_output("Yanındayım."), Locale::Turkish);

        let outcome = f
            .handler
            .handle(command(&f, "Biraz stres var", Some(("kaygılı", 3)), Timestamp::now()))
            .await
            .unwrap();

        match outcome {
            TurnOutcome::Success { response, plan_steps, analysis } => {
                assert_eq!(response, "Yanındayım.");
                assert_eq!(plan_steps.len(), 2);
                assert_eq!(plan_steps[0], PlanStepKind::CalmingTechnique.instruction(Locale::Turkish));
                assert_eq!(analysis, PatternAnalysis::baseline());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn agent_receives_rendered_plan_time_and_history() {
        let f = fixture(MockAgentExecutor::new(), Locale::English);
        let now = Timestamp::now();

        f.handler.handle(command(&f, "hello", None, now)).await.unwrap();
        f.handler.handle(command(&f, "again", None, now.plus_secs(1))).await.unwrap();

        let calls = f.agent.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].user_id, f.user_id);
        assert_eq!(calls[0].session_id, f.session_id);
        assert!(calls[0].plan_instructions.starts_with(PLAN_HEADER));
        assert!(calls[0].plan_instructions.contains("\n- "));
        assert_eq!(calls[0].current_time, now.format_for_agent());
        assert_eq!(calls[0].context, "");
        assert!(calls[0].chat_history.is_empty());

        let second_history: Vec<_> = calls[1].chat_history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(second_history, vec!["hello", "I hear you: hello"]);
    }

    #[tokio::test]
    async fn sustained_high_intensity_worsens_trend() {
        let f = fixture(MockAgentExecutor::new(), Locale::Turkish);
        let now = Timestamp::now();

        let mut last = None;
        for i in 0..3 {
            last = Some(
                f.handler
                    .handle(command(&f, "kötüyüm", Some(("üzgün", 5)), now.plus_secs(i)))
                    .await
                    .unwrap(),
            );
        }

        match last.unwrap() {
            TurnOutcome::Success { analysis, plan_steps, .. } => {
                assert_eq!(analysis.trend, Trend::Worsening);
                assert_eq!(analysis.crisis_risk, CrisisRisk::Medium);
                assert!(analysis.recommends(Recommendation::ProfessionalHelp));
                assert!(analysis.pattern_detected);
                assert_eq!(
                    plan_steps.last().unwrap(),
                    PlanStepKind::MoodTracking.instruction(Locale::Turkish)
                );
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn crisis_language_escalates_to_high_risk() {
        let f = fixture(MockAgentExecutor::new(), Locale::English);

        let outcome = f
            .handler
            .handle(command(&f, "I want to die", Some(("sad", 2)), Timestamp::now()))
            .await
            .unwrap();

        match outcome {
            TurnOutcome::Success { analysis, plan_steps, .. } => {
                assert_eq!(analysis.crisis_risk, CrisisRisk::High);
                assert!(analysis.recommends(Recommendation::ProfessionalHelp));
                assert_eq!(plan_steps[0], PlanStepKind::CrisisResources.instruction(Locale::English));
                assert_eq!(plan_steps[1], PlanStepKind::ProfessionalHelp.instruction(Locale::English));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn agent_failure_returns_fallback_and_keeps_observation() {
        let agent = MockAgentExecutor::new().with_error(AgentError::Provider("timeout".to_string()));
        let f = fixture(agent, Locale::Turkish);

        let outcome = f
            .handler
            .handle(command(&f, "merhaba", Some(("yorgun", 4)), Timestamp::now()))
            .await
            .unwrap();

        match outcome {
            TurnOutcome::Failure { error, fallback_response } => {
                assert!(error.contains("timeout"));
                assert!(!fallback_response.is_empty());
                assert_eq!(fallback_response, Locale::Turkish.fallback_response());
            }
            other => panic!("expected failure, got {other:?}"),
        }

        assert_eq!(history_len(&f), 1);
        let handle = f.registry.get(&f.user_id, &f.session_id).unwrap();
        assert!(lock_session(&handle).memory().is_empty());
    }

    #[tokio::test]
    async fn missing_emotion_parts_use_defaults() {
        let f = fixture(MockAgentExecutor::new(), Locale::English);
        let mut cmd = command(&f, "hi", None, Timestamp::now());
        cmd.emotion = Some(EmotionInput::default());

        f.handler.handle(cmd).await.unwrap();

        let handle = f.registry.get(&f.user_id, &f.session_id).unwrap();
        let session = lock_session(&handle);
        let observation = session.emotions().last().unwrap();
        assert_eq!(observation.emotion(), "Unspecified");
        assert_eq!(observation.intensity(), Intensity::default());
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let f = fixture(MockAgentExecutor::new(), Locale::Turkish);

        let err = f
            .handler
            .handle(command(&f, "   ", Some(("x", 3)), Timestamp::now()))
            .await
            .unwrap_err();

        assert!(matches!(err, SupportError::ValidationFailed { .. }));
        assert_eq!(f.agent.call_count(), 0);
        assert!(f.registry.is_empty());
    }

    #[tokio::test]
    async fn retrieved_documents_become_context() {
        let retriever = Arc::new(StaticRetriever::with(vec![
            RetrievedDocument::new("breathing helps"),
            RetrievedDocument::new("walk outside"),
        ]));
        let f = fixture(MockAgentExecutor::new(), Locale::English);
        let handler = ProcessTurnHandler::new(
            f.registry.clone(),
            PatternAnalyzer::default(),
            PlanBuilder::for_locale(Locale::English),
            Arc::new(f.agent.clone()),
        )
        .with_retriever(Some(retriever.clone()));

        handler.handle(command(&f, "so anxious", None, Timestamp::now())).await.unwrap();

        assert_eq!(f.agent.get_calls()[0].context, "breathing helps\n\nwalk outside");
        assert_eq!(retriever.queries.lock().unwrap().as_slice(), ["so anxious".to_string()]);
    }

    #[tokio::test]
    async fn failing_retriever_degrades_to_empty_context() {
        let f = fixture(MockAgentExecutor::new(), Locale::English);
        let handler = ProcessTurnHandler::new(
            f.registry.clone(),
            PatternAnalyzer::default(),
            PlanBuilder::for_locale(Locale::English),
            Arc::new(f.agent.clone()),
        )
        .with_retriever(Some(Arc::new(StaticRetriever::failing())));

        let outcome = handler.handle(command(&f, "hi", None, Timestamp::now())).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(f.agent.get_calls()[0].context, "");
    }

    #[tokio::test]
    async fn success_persists_turn_and_mood() {
        let repository = Arc::new(InMemorySupportRepository::new());
        let f = fixture(MockAgentExecutor::new().with_output("ok"), Locale::English);
        let handler = ProcessTurnHandler::new(
            f.registry.clone(),
            PatternAnalyzer::default(),
            PlanBuilder::for_locale(Locale::English),
            Arc::new(f.agent.clone()),
        )
        .with_repository(Some(repository.clone()));
        let now = Timestamp::now();

        handler.handle(command(&f, "hello", Some(("calm", 2)), now)).await.unwrap();
        handler.handle(command(&f, "no mood", None, now.plus_secs(1))).await.unwrap();

        let turns = repository.load_conversations(&f.user_id).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], ConversationTurn::new("hello", "ok", now));

        let moods = repository.load_mood_history(&f.user_id).await.unwrap();
        assert_eq!(moods, vec![MoodEntry::new(Intensity::new(2), "calm", now)]);
    }

    #[tokio::test]
    async fn failed_turn_is_not_persisted() {
        let repository = Arc::new(InMemorySupportRepository::new());
        let agent = MockAgentExecutor::new().with_error(AgentError::EmptyOutput);
        let f = fixture(agent, Locale::English);
        let handler = ProcessTurnHandler::new(
            f.registry.clone(),
            PatternAnalyzer::default(),
            PlanBuilder::for_locale(Locale::English),
            Arc::new(f.agent.clone()),
        )
        .with_repository(Some(repository.clone()));

        let outcome = handler
            .handle(command(&f, "hello", Some(("calm", 2)), Timestamp::now()))
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert!(repository.load_conversations(&f.user_id).await.unwrap().is_empty());
        assert!(repository.load_mood_history(&f.user_id).await.unwrap().is_empty());
    }
}
