use gloo_timers::callback::Timeout;

pub(crate) const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Runs only the last of a burst of calls, `delay_ms` after it was made.
///
/// Scheduling a call drops the pending [`Timeout`], which cancels it.
pub(crate) struct Debouncer {
    delay_ms: u32,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn call(&mut self, f: impl FnOnce() + 'static) {
        self.cancel();
        self.pending = Some(Timeout::new(self.delay_ms, f));
    }

    pub fn cancel(&mut self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }
}
