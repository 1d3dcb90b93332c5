use ::anyhow::Result;
use ::axum::response::Response;
use ::std::sync::Mutex;
use ::std::time::Duration;
use ::tracing::debug;
use ::tracing::info;

use crate::internals::QueuePhase;
use crate::internals::StepId;
use crate::internals::StepQueue;
use crate::internals::Transition;
use crate::internals::with_this_mut;
use crate::util::ShutdownSignal;

///
/// The state of one running mock server.
///
/// Stages only get to ask which step is current, and the response writer
/// is the only place the queue is moved on.
///
#[derive(Debug)]
pub struct ServerSession {
    queue: Mutex<StepQueue>,
    shutdown: ShutdownSignal,
}

impl ServerSession {
    pub fn new(queue: StepQueue, shutdown: ShutdownSignal) -> Self {
        Self {
            queue: Mutex::new(queue),
            shutdown,
        }
    }

    pub fn is_current(&self, step_id: StepId) -> Result<bool> {
        with_this_mut(&self.queue, "is_current", |queue| queue.is_current(step_id))
    }

    pub fn current_delay(&self) -> Result<Option<Duration>> {
        with_this_mut(&self.queue, "current_delay", |queue| queue.current().delay)
    }

    pub fn phase(&self) -> Result<QueuePhase> {
        with_this_mut(&self.queue, "phase", |queue| queue.phase())
    }

    pub fn remaining(&self) -> Result<usize> {
        with_this_mut(&self.queue, "remaining", |queue| queue.remaining())
    }

    pub fn served(&self) -> Result<usize> {
        with_this_mut(&self.queue, "served", |queue| queue.served())
    }

    /// Builds the response for the current step, then moves the queue on.
    ///
    /// When that was the last step, and the server is not being left open,
    /// this waits for the listener to be closed before returning.
    pub async fn respond_and_advance(&self) -> Result<Response> {
        let (step, transition) = with_this_mut(&self.queue, "respond_and_advance", |queue| {
            let step = queue.current().clone();
            let transition = queue.advance();

            (step, transition)
        })?;

        let response = step.to_response();
        debug!(step = %step.id, status = %step.status, ?transition, "Mock server served step");

        if transition == Transition::Close {
            info!("Mock server served its last step, closing");
            self.shutdown.close().await;
        }

        Ok(response)
    }

    /// Closes the server, waiting until it no longer accepts connections.
    pub async fn close(&self) -> Result<()> {
        let is_newly_closed = with_this_mut(&self.queue, "close", |queue| queue.close())?;
        if is_newly_closed {
            debug!("Mock server closed by its owner");
        }

        self.shutdown.close().await;

        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_released()
    }
}

#[cfg(test)]
mod test_respond_and_advance {
    use super::*;
    use ::http::StatusCode;

    use crate::Step;
    use crate::StepOptions;
    use crate::internals::resolve_steps;

    fn new_session(steps: Vec<Step>, leave_open: bool) -> ServerSession {
        let resolved = resolve_steps(steps, &StepOptions::default()).unwrap();
        let queue = StepQueue::new(resolved, leave_open).unwrap();

        // No accept loop runs here, so the listener counts as released right away.
        let (shutdown, release) = ShutdownSignal::new();
        release.release();

        ServerSession::new(queue, shutdown)
    }

    #[tokio::test]
    async fn it_should_respond_with_steps_in_order() {
        let session = new_session(
            vec![
                Step::text("first").status(StatusCode::CREATED),
                Step::text("second").status(StatusCode::CONFLICT),
            ],
            false,
        );

        let first = session.respond_and_advance().await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = session.respond_and_advance().await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(session.phase().unwrap(), QueuePhase::Closed);
    }

    #[tokio::test]
    async fn it_should_request_close_after_last_step() {
        let session = new_session(vec![Step::text("only")], false);

        session.respond_and_advance().await.unwrap();

        assert!(session.shutdown.is_requested());
    }

    #[tokio::test]
    async fn it_should_not_request_close_when_left_open() {
        let session = new_session(vec![Step::text("only")], true);

        session.respond_and_advance().await.unwrap();
        session.respond_and_advance().await.unwrap();

        assert!(!session.shutdown.is_requested());
        assert_eq!(session.phase().unwrap(), QueuePhase::ExhaustedOpen);
        assert_eq!(session.served().unwrap(), 2);
    }
}
