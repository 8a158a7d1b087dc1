/// Lifecycle of one query.
///
/// While `loading` both `data` and `error` are empty; once resolved exactly
/// one of them is set.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    /// Nothing requested (no URL yet)
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.loading = true;
        self.data = None;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.loading = false;
        self.data = Some(data);
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.data = None;
        self.error = Some(message.into());
    }

    pub fn is_resolved(&self) -> bool {
        !self.loading && (self.data.is_some() || self.error.is_some())
    }
}

/// Monotonic request counter. Only the response of the most recently issued
/// request may land in state; anything older is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    /// Issue a new request, invalidating all earlier ones
    pub fn begin(&mut self) -> u64 {
        self.current = self.current.wrapping_add(1);
        self.current
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current == generation
    }

    pub fn current(&self) -> u64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exactly_one(state: &QueryState<i32>) -> bool {
        let resolved = state.data.is_some() ^ state.error.is_some();
        state.loading ^ resolved
    }

    #[test]
    fn test_lifecycle_keeps_single_outcome() {
        let mut state = QueryState::<i32>::idle();
        assert!(!state.is_resolved());

        state.start();
        assert!(exactly_one(&state));
        assert!(state.data.is_none() && state.error.is_none());

        state.succeed(7);
        assert!(exactly_one(&state));
        assert_eq!(state.data, Some(7));

        state.start();
        assert_eq!(state.data, None);
        state.fail("boom");
        assert!(exactly_one(&state));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.data, None);
    }

    #[test]
    fn test_only_latest_generation_is_current() {
        let mut generation = RequestGeneration::default();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
