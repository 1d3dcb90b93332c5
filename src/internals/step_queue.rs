use ::std::collections::VecDeque;
use ::std::sync::Arc;

use crate::MockServerError;
use crate::internals::ResolvedStep;
use crate::internals::StepId;

#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub enum QueuePhase {
    /// The first step is current, and nothing has been served yet.
    AwaitingFirstStep,
    Serving,
    /// Every step has been served, and the last one is still being served.
    ExhaustedOpen,
    Closed,
}

/// What the server should do after a step has been served.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub enum Transition {
    /// The given step is now current.
    Next(StepId),
    StayOpen,
    Close,
    AlreadyClosed,
}

///
/// The steps still to be served, and the one being served right now.
///
/// The current step is never cleared. Once the queue runs out,
/// the last step stays current, so a server left open keeps serving it.
///
#[derive(Debug)]
pub struct StepQueue {
    current: Arc<ResolvedStep>,
    remaining: VecDeque<Arc<ResolvedStep>>,
    phase: QueuePhase,
    leave_open: bool,
    served: usize,
}

impl StepQueue {
    pub fn new(steps: Vec<ResolvedStep>, leave_open: bool) -> Result<Self, MockServerError> {
        let mut remaining: VecDeque<Arc<ResolvedStep>> = steps.into_iter().map(Arc::new).collect();
        let current = remaining.pop_front().ok_or(MockServerError::NoSteps)?;

        Ok(Self {
            current,
            remaining,
            phase: QueuePhase::AwaitingFirstStep,
            leave_open,
            served: 0,
        })
    }

    pub fn current(&self) -> &Arc<ResolvedStep> {
        &self.current
    }

    pub fn is_current(&self, step_id: StepId) -> bool {
        self.current.id == step_id
    }

    pub fn phase(&self) -> QueuePhase {
        self.phase
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn served(&self) -> usize {
        self.served
    }

    /// Moves on from the step just served.
    ///
    /// This is called once for every response written.
    pub fn advance(&mut self) -> Transition {
        self.served += 1;

        if self.phase == QueuePhase::Closed {
            return Transition::AlreadyClosed;
        }

        if let Some(next) = self.remaining.pop_front() {
            self.current = next;
            self.phase = QueuePhase::Serving;
            return Transition::Next(self.current.id);
        }

        if self.leave_open {
            self.phase = QueuePhase::ExhaustedOpen;
            Transition::StayOpen
        } else {
            self.phase = QueuePhase::Closed;
            Transition::Close
        }
    }

    /// Returns true if this call is the one which closed the queue.
    pub fn close(&mut self) -> bool {
        let was_open = self.phase != QueuePhase::Closed;
        self.phase = QueuePhase::Closed;

        was_open
    }
}


#[cfg(test)]
mod test_advance {
    use super::*;
    use crate::Step;
    use crate::StepOptions;
    use crate::internals::resolve_steps;

    fn new_queue(payloads: &[&str], leave_open: bool) -> StepQueue {
        let steps = payloads.iter().map(|payload| Step::text(*payload));
        let resolved = resolve_steps(steps, &StepOptions::default()).unwrap();

        StepQueue::new(resolved, leave_open).unwrap()
    }

    #[test]
    fn it_should_close_after_one_step_by_default() {
        let mut queue = new_queue(&["only"], false);

        assert_eq!(queue.advance(), Transition::Close);
        assert_eq!(queue.phase(), QueuePhase::Closed);
    }

    #[test]
    fn it_should_move_through_steps_in_order() {
        let mut queue = new_queue(&["a", "b", "c"], false);

        assert_eq!(queue.advance(), Transition::Next(StepId(1)));
        assert_eq!(queue.current().body, "b");
        assert_eq!(queue.phase(), QueuePhase::Serving);

        assert_eq!(queue.advance(), Transition::Next(StepId(2)));
        assert_eq!(queue.current().body, "c");

        assert_eq!(queue.advance(), Transition::Close);
        assert_eq!(queue.served(), 3);
    }

    #[test]
    fn it_should_keep_serving_the_last_step_when_left_open() {
        let mut queue = new_queue(&["a", "b"], true);

        queue.advance();
        assert_eq!(queue.advance(), Transition::StayOpen);
        assert_eq!(queue.phase(), QueuePhase::ExhaustedOpen);
        assert_eq!(queue.current().body, "b");

        assert_eq!(queue.advance(), Transition::StayOpen);
        assert_eq!(queue.current().body, "b");
    }

    #[test]
    fn it_should_not_close_twice() {
        let mut queue = new_queue(&["a"], false);

        assert_eq!(queue.advance(), Transition::Close);
        assert_eq!(queue.advance(), Transition::AlreadyClosed);
        assert_eq!(queue.current().body, "a");
    }

    #[test]
    fn it_should_tell_steps_apart_with_the_same_content() {
        let mut queue = new_queue(&["same", "same"], false);

        assert!(queue.is_current(StepId(0)));
        assert!(!queue.is_current(StepId(1)));

        queue.advance();
        assert!(!queue.is_current(StepId(0)));
        assert!(queue.is_current(StepId(1)));
    }
}

#[cfg(test)]
mod test_close {
    use super::*;
    use crate::Step;
    use crate::StepOptions;
    use crate::internals::resolve_steps;

    #[test]
    fn it_should_report_only_the_first_close() {
        let steps = resolve_steps(vec![Step::text("a")], &StepOptions::default()).unwrap();
        let mut queue = StepQueue::new(steps, true).unwrap();

        assert!(queue.close());
        assert!(!queue.close());
        assert_eq!(queue.phase(), QueuePhase::Closed);
    }
}
