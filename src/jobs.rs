//! Runs generation jobs off the UI loop and reports back through a channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::generator::QuestionService;
use crate::session::{Command, GenerationJob, SessionEvent};

/// Owns the single in-flight generation task.
pub struct JobRunner {
    service: Arc<dyn QuestionService>,
    events: mpsc::UnboundedSender<SessionEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl JobRunner {
    pub fn new(
        service: Arc<dyn QuestionService>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            service,
            events,
            in_flight: None,
        }
    }

    /// Carry out a command returned by the session.
    pub fn run(&mut self, command: Option<Command>) {
        if let Some(Command::Generate(job)) = command {
            self.spawn(job);
        }
    }

    fn spawn(&mut self, job: GenerationJob) {
        self.abort();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let result = service.generate(&job.document).await;
            let settled = SessionEvent::GenerationSettled {
                ticket: job.ticket,
                result,
            };
            if events.send(settled).is_err() {
                debug!(ticket = job.ticket, "session gone before generation settled");
            }
        }));
    }

    /// Drop the in-flight task, if any. Its result will never arrive.
    pub fn abort(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for JobRunner {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::GenerateError;
    use crate::models::{QuestionRecord, SessionPhase, UploadedFile};
    use crate::session::SessionController;

    struct FixedService(usize);

    #[async_trait]
    impl QuestionService for FixedService {
        async fn generate(
            &self,
            document: &UploadedFile,
        ) -> Result<Vec<QuestionRecord>, GenerateError> {
            let options = ["a", "b", "c", "d", "e"].map(String::from);
            Ok((0..self.0)
                .map(|i| {
                    QuestionRecord::new(format!("{} {i}", document.name), options.clone(), 0)
                        .unwrap()
                })
                .collect())
        }
    }

    struct StalledService;

    #[async_trait]
    impl QuestionService for StalledService {
        async fn generate(&self, _: &UploadedFile) -> Result<Vec<QuestionRecord>, GenerateError> {
            let timeout = Duration::from_secs(3600);
            tokio::time::sleep(timeout).await;
            Err(GenerateError::Timeout(timeout))
        }
    }

    fn session_with_file() -> SessionController {
        let mut session = SessionController::new();
        session.apply(SessionEvent::AddFiles(vec![UploadedFile::new("deck.pptx", vec![1])]));
        session
    }

    #[tokio::test]
    async fn settles_job_through_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = JobRunner::new(Arc::new(FixedService(3)), tx);
        let mut session = session_with_file();

        runner.run(session.apply(SessionEvent::Generate));
        let event = rx.recv().await.unwrap();
        session.apply(event);

        assert_eq!(session.phase(), SessionPhase::QuizTaking);
        assert_eq!(session.questions()[2].question(), "deck.pptx 2");
    }

    #[tokio::test]
    async fn aborted_job_never_reports() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = JobRunner::new(Arc::new(StalledService), tx);
        let mut session = session_with_file();

        runner.run(session.apply(SessionEvent::Generate));
        assert!(runner.is_busy());

        session.apply(SessionEvent::CancelGeneration);
        runner.abort();
        drop(runner);

        assert!(rx.recv().await.is_none());
        assert_eq!(session.phase(), SessionPhase::Intake);
    }
}
