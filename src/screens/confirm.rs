//! Two-step confirmation: pick a target, then confirm or cancel.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confirmation {
    pending: Option<i64>,
}

impl Confirmation {
    /// Select `id` and raise the prompt. Replaces any earlier selection.
    pub fn request(&mut self, id: i64) {
        self.pending = Some(id);
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Dismiss the prompt with no side effects
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consume the confirmed target, closing the prompt
    pub fn take(&mut self) -> Option<i64> {
        self.pending.take()
    }
}
