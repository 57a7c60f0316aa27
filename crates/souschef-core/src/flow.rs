//! Generic async-flow state machine.
//!
//! One instance drives one user-visible flow (Chef, Bartender). A flow is
//! always in exactly one state; `Processing` resolves to `Done` or
//! `Failed` unless a newer generation supersedes it, in which case the
//! stale completion is discarded.

/// View state of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState<T> {
    Idle,
    Processing,
    Done(T),
    Failed(String),
}

/// An async flow with generation-token bookkeeping.
///
/// `begin` hands out a token tied to the request being started; `finish`
/// ignores results carrying any other token. Both `begin` and `reset`
/// invalidate outstanding tokens, so an in-flight call that completes
/// after the user moved on cannot clobber the view.
#[derive(Debug)]
pub struct AsyncFlow<T> {
    state: FlowState<T>,
    generation: u64,
}

impl<T> Default for AsyncFlow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncFlow<T> {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &FlowState<T> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, FlowState::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.state, FlowState::Processing)
    }

    /// The completed result, if the flow is in `Done`.
    pub fn result(&self) -> Option<&T> {
        match &self.state {
            FlowState::Done(value) => Some(value),
            _ => None,
        }
    }

    /// The raw failure message, if the flow is in `Failed`.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FlowState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Enter `Processing` and return the token the eventual completion
    /// must present. Valid from any state ("generate another" re-enters
    /// processing from `Done`).
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = FlowState::Processing;
        self.generation
    }

    /// Apply a completion. Returns `false` (leaving state untouched) when
    /// the token is stale or the flow is no longer processing.
    pub fn finish(&mut self, token: u64, result: Result<T, String>) -> bool {
        if token != self.generation || !self.is_processing() {
            return false;
        }
        self.state = match result {
            Ok(value) => FlowState::Done(value),
            Err(message) => FlowState::Failed(message),
        };
        true
    }

    /// Return to `Idle`, clearing any result and invalidating outstanding
    /// tokens. Calling reset twice has the same effect as once.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = FlowState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_finish_ok() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let token = flow.begin();
        assert!(flow.is_processing());
        assert!(flow.finish(token, Ok(7)));
        assert_eq!(flow.result(), Some(&7));
    }

    #[test]
    fn test_begin_then_finish_err() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let token = flow.begin();
        assert!(flow.finish(token, Err("boom".to_string())));
        assert_eq!(flow.error(), Some("boom"));
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let old = flow.begin();
        let new = flow.begin();
        assert!(!flow.finish(old, Ok(1)));
        assert!(flow.is_processing());
        assert!(flow.finish(new, Ok(2)));
        assert_eq!(flow.result(), Some(&2));
    }

    #[test]
    fn test_reset_invalidates_in_flight_token() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let token = flow.begin();
        flow.reset();
        assert!(flow.is_idle());
        assert!(!flow.finish(token, Ok(1)));
        assert!(flow.is_idle());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let token = flow.begin();
        flow.finish(token, Ok(3));
        flow.reset();
        flow.reset();
        assert!(flow.is_idle());
        assert_eq!(flow.result(), None);
    }

    #[test]
    fn test_another_round_from_done() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let token = flow.begin();
        flow.finish(token, Ok(1));
        let token = flow.begin();
        assert!(flow.is_processing());
        assert!(flow.finish(token, Ok(2)));
        assert_eq!(flow.result(), Some(&2));
    }

    #[test]
    fn test_double_finish_ignored() {
        let mut flow: AsyncFlow<i32> = AsyncFlow::new();
        let token = flow.begin();
        assert!(flow.finish(token, Ok(1)));
        assert!(!flow.finish(token, Ok(2)));
        assert_eq!(flow.result(), Some(&1));
    }
}
