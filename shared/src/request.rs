//! Latest-request-wins bookkeeping.
//!
//! Every fetched resource of a widget owns one [`RequestSlot`]. Issuing a new
//! request supersedes whatever was in flight, and a response is committed only
//! when it carries the token that is still current for its slot.

/// Identifies one issued request within its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestSlot {
    issued: u64,
    current: Option<u64>,
}

impl RequestSlot {
    /// Issue a token for a new request, superseding any pending one.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        self.current = Some(self.issued);
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token.0)
    }

    /// Accept the response for `token` if it is still current.
    ///
    /// Returns `false` for superseded, retired or already settled tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Drop interest in the pending request without issuing a new one.
    pub fn retire(&mut self) {
        self.current = None;
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut slot = RequestSlot::default();
        let first = slot.issue();
        let second = slot.issue();

        assert!(!slot.settle(first));
        assert!(slot.settle(second));
        assert!(!slot.is_pending());
    }

    #[test]
    fn token_settles_once() {
        let mut slot = RequestSlot::default();
        let token = slot.issue();

        assert!(slot.settle(token));
        assert!(!slot.settle(token));
    }

    #[test]
    fn retired_slot_rejects_everything() {
        let mut slot = RequestSlot::default();
        let token = slot.issue();
        slot.retire();

        assert!(!slot.is_pending());
        assert!(!slot.settle(token));
    }
}
