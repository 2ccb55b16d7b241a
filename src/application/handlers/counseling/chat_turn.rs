//! ChatTurnHandler - Command handler for one client/counselor exchange.

use std::sync::Arc;

use super::ChatError;
use crate::application::counselor_turn::CounselorTurnGenerator;
use crate::application::readiness::ReadinessGate;
use crate::domain::foundation::SessionId;
use crate::ports::{DialogueLog, SessionStore};

/// Command carrying one client message.
#[derive(Debug, Clone)]
pub struct ChatTurnCommand {
    pub session_id: String,
    pub user_utterance: String,
}

/// The counselor's reply and whether the session ended with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnResult {
    pub system_utterance: String,
    pub end_signal: bool,
}

/// Handler for chat turns.
///
/// A turn holds the session lease from lookup to commit. The new history is
/// built on a copy and only replaces the live session once the dialogue log
/// has been written, so a failed generation or write leaves the session as it
/// was.
pub struct ChatTurnHandler {
    store: Arc<dyn SessionStore>,
    log: Arc<dyn DialogueLog>,
    generator: ReadinessGate<CounselorTurnGenerator>,
}

impl ChatTurnHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        log: Arc<dyn DialogueLog>,
        generator: ReadinessGate<CounselorTurnGenerator>,
    ) -> Self {
        Self {
            store,
            log,
            generator,
        }
    }

    pub async fn handle(&self, cmd: ChatTurnCommand) -> Result<ChatTurnResult, ChatError> {
        let session_id = SessionId::parse(cmd.session_id)?;
        let generator = self.generator.get()?;

        let mut lease = self.store.lease(&session_id).await?;
        let client = lease.begin_turn(&cmd.user_utterance)?;
        let history = lease.history().with_turn(client.clone());

        let outcome = generator.next_turn(&history).await?;
        let system_utterance = outcome.utterance(generator.closing_line()).to_string();
        let end_signal = outcome.is_terminal();

        let mut next = (*lease).clone();
        if end_signal {
            next.terminate(client, system_utterance.as_str())?;
        } else {
            next.complete_turn(client, system_utterance.as_str())?;
        }

        self.log.save(next.id(), next.history()).await?;
        tracing::info!(
            session_id = %session_id,
            turn_count = next.turn_count(),
            "Turn persisted"
        );
        *lease = next;

        if end_signal {
            self.store.evict(&session_id).await;
            tracing::info!(session_id = %session_id, "Session terminated");
        }

        Ok(ChatTurnResult {
            system_utterance,
            end_signal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generation::{MockGenerationBackend, MockGenerationError};
    use crate::adapters::safety::MockSafetyReviewer;
    use crate::adapters::storage::{InMemoryDialogueLog, InMemorySessionStore};
    use crate::application::handlers::counseling::InitSessionHandler;
    use crate::domain::counseling::{KeywordTermination, Turn, FALLBACK_MESSAGE};
    use crate::domain::foundation::ErrorCode;
    use std::time::Duration;

    const OPENING: &str = "안녕하세요. 어떤 일로 오셨나요?";
    const CLOSING: &str = "오늘 상담은 여기까지입니다.";

    struct Fixture {
        store: InMemorySessionStore,
        log: InMemoryDialogueLog,
        reviewer: MockSafetyReviewer,
        handler: ChatTurnHandler,
    }

    fn fixture(backend: MockGenerationBackend) -> Fixture {
        let store = InMemorySessionStore::new(Duration::from_secs(1800), 10);
        let log = InMemoryDialogueLog::new();
        let reviewer = MockSafetyReviewer::new();
        let generator = CounselorTurnGenerator::new(
            Arc::new(backend),
            Arc::new(reviewer.clone()),
            Arc::new(KeywordTermination::default()),
            CLOSING,
        );
        let handler = ChatTurnHandler::new(
            Arc::new(store.clone()),
            Arc::new(log.clone()),
            ReadinessGate::ready(generator),
        );
        Fixture {
            store,
            log,
            reviewer,
            handler,
        }
    }

    async fn open(fixture: &Fixture) -> SessionId {
        InitSessionHandler::new(Arc::new(fixture.store.clone()), OPENING)
            .handle()
            .await
            .unwrap()
            .session_id
    }

    fn command(id: &SessionId, message: &str) -> ChatTurnCommand {
        ChatTurnCommand {
            session_id: id.to_string(),
            user_utterance: message.to_string(),
        }
    }

    #[tokio::test]
    async fn turn_appends_both_sides_and_persists() {
        let fx = fixture(MockGenerationBackend::new().with_response("Counselor: 많이 힘드셨겠어요."));
        let id = open(&fx).await;

        let result = fx.handler.handle(command(&id, "요즘 잠을 못 자요")).await.unwrap();

        assert_eq!(result.system_utterance, "많이 힘드셨겠어요.");
        assert!(!result.end_signal);

        let lease = fx.store.lease(&id).await.unwrap();
        assert_eq!(lease.turn_count(), 2);
        assert_eq!(
            lease.history().turns(),
            &[
                Turn::counselor(OPENING),
                Turn::client("요즘 잠을 못 자요"),
                Turn::counselor("많이 힘드셨겠어요."),
            ]
        );
        assert_eq!(&fx.log.load(&id).await.unwrap(), lease.history());
    }

    #[tokio::test]
    async fn malformed_generation_returns_fallback_and_counts_the_turn() {
        let fx = fixture(MockGenerationBackend::new().with_response("역할 표시가 없는 문장"));
        let id = open(&fx).await;

        let result = fx.handler.handle(command(&id, "안녕하세요")).await.unwrap();

        assert_eq!(result.system_utterance, FALLBACK_MESSAGE);
        assert!(!result.end_signal);
        assert_eq!(fx.reviewer.call_count(), 0);
        assert_eq!(fx.store.lease(&id).await.unwrap().turn_count(), 2);
    }

    #[tokio::test]
    async fn termination_persists_closing_line_and_evicts() {
        let fx = fixture(MockGenerationBackend::new().with_response("Counselor: 상담을 종료하겠습니다."));
        let id = open(&fx).await;

        let result = fx.handler.handle(command(&id, "이제 괜찮아요")).await.unwrap();

        assert_eq!(result.system_utterance, CLOSING);
        assert!(result.end_signal);
        assert_eq!(fx.reviewer.call_count(), 0);
        assert!(!fx.store.contains(&id).await);

        let logged = fx.log.load(&id).await.unwrap();
        assert_eq!(logged.last(), Some(&Turn::counselor(CLOSING)));
        assert_eq!(logged.len(), 3);

        let err = fx.handler.handle(command(&id, "여보세요?")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn backend_failure_leaves_session_unchanged() {
        let fx = fixture(MockGenerationBackend::new().with_error(MockGenerationError::Timeout));
        let id = open(&fx).await;

        let err = fx.handler.handle(command(&id, "들리세요?")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::GenerationFailed);
        let lease = fx.store.lease(&id).await.unwrap();
        assert_eq!(lease.turn_count(), 1);
        assert_eq!(lease.history().len(), 1);
        assert_eq!(fx.log.save_count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_leaves_session_unchanged() {
        let fx = fixture(MockGenerationBackend::new());
        let id = open(&fx).await;
        fx.log.set_failing(true);

        let err = fx.handler.handle(command(&id, "들리세요?")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::PersistenceFailed);
        let lease = fx.store.lease(&id).await.unwrap();
        assert_eq!(lease.turn_count(), 1);
        assert_eq!(lease.history().len(), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let fx = fixture(MockGenerationBackend::new());

        let err = fx
            .handler
            .handle(command(&SessionId::generate(), "안녕하세요"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn malformed_session_id_is_a_validation_error() {
        let fx = fixture(MockGenerationBackend::new());

        let err = fx
            .handler
            .handle(ChatTurnCommand {
                session_id: "../etc/passwd".to_string(),
                user_utterance: "안녕하세요".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn blank_message_is_a_validation_error() {
        let fx = fixture(MockGenerationBackend::new());
        let id = open(&fx).await;

        let err = fx.handler.handle(command(&id, "   ")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(fx.store.lease(&id).await.unwrap().turn_count(), 1);
    }

    #[tokio::test]
    async fn loading_generator_is_not_ready() {
        let store = InMemorySessionStore::new(Duration::from_secs(1800), 10);
        let gate: ReadinessGate<CounselorTurnGenerator> =
            ReadinessGate::spawn("counselor", std::future::pending::<Result<_, String>>());
        let handler = ChatTurnHandler::new(
            Arc::new(store.clone()),
            Arc::new(InMemoryDialogueLog::new()),
            gate,
        );
        let id = InitSessionHandler::new(Arc::new(store), OPENING)
            .handle()
            .await
            .unwrap()
            .session_id;

        let err = handler.handle(command(&id, "안녕하세요")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotReady);
    }
}
