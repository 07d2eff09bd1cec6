use futures::channel::oneshot;
use std::collections::VecDeque;

pub(crate) const DEFAULT_NOTIFY_TITLE: &str = "Notification";
pub(crate) const DEFAULT_CONFIRM_TITLE: &str = "Confirm Action";

fn title_or(title: String, default: &str) -> String {
    if title.trim().is_empty() {
        default.to_string()
    } else {
        title
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DialogMode {
    /// Single "OK" action.
    Acknowledge,
    /// "Cancel" / "Confirm".
    Confirm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DialogRequest {
    /// Assigned by the queue; used to match the answer to the visible dialog.
    pub id: u64,
    pub title: String,
    pub message: String,
    pub mode: DialogMode,
    pub danger: bool,
}

impl DialogRequest {
    pub fn notification(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title_or(title.into(), DEFAULT_NOTIFY_TITLE),
            message: message.into(),
            mode: DialogMode::Acknowledge,
            danger: false,
        }
    }

    pub fn confirmation(
        message: impl Into<String>,
        title: impl Into<String>,
        danger: bool,
    ) -> Self {
        Self {
            id: 0,
            title: title_or(title.into(), DEFAULT_CONFIRM_TITLE),
            message: message.into(),
            mode: DialogMode::Confirm,
            danger,
        }
    }
}

/// FIFO of pending dialogs. Only the front request is visible.
#[derive(Debug, Default)]
pub(crate) struct DialogQueue {
    next_id: u64,
    pending: VecDeque<(DialogRequest, oneshot::Sender<bool>)>,
}

impl DialogQueue {
    pub fn push(&mut self, mut request: DialogRequest) -> oneshot::Receiver<bool> {
        self.next_id = self.next_id.wrapping_add(1);
        request.id = self.next_id;

        let (tx, rx) = oneshot::channel();
        self.pending.push_back((request, tx));
        rx
    }

    pub fn current(&self) -> Option<&DialogRequest> {
        self.pending.front().map(|(request, _)| request)
    }

    /// Resolves the visible dialog if `id` still matches it. Returns whether it did.
    pub fn resolve(&mut self, id: u64, outcome: bool) -> bool {
        match self.pending.front() {
            Some((request, _)) if request.id == id => {}
            _ => return false,
        }

        if let Some((_, tx)) = self.pending.pop_front() {
            // The caller may have stopped waiting; nothing to deliver then.
            let _ = tx.send(outcome);
        }
        true
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
