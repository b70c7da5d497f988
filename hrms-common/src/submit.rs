//! In-flight flag for form submissions
//!
//! A form instance holds one [`SubmitGate`]. While a [`SubmitTicket`] is
//! alive further submissions are refused; dropping the ticket (on success,
//! error or cancellation of the future that owns it) re-opens the gate.
//! Single-threaded by construction: the flag is an `Rc<Cell<bool>>`.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    in_flight: Rc<Cell<bool>>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a submission is already running
    pub fn try_begin(&self) -> Option<SubmitTicket> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(SubmitTicket {
            in_flight: Rc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }
}

#[derive(Debug)]
#[must_use = "the gate re-opens as soon as the ticket is dropped"]
pub struct SubmitTicket {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submission_refused_while_in_flight() {
        let gate = SubmitGate::new();
        let ticket = gate.try_begin();
        assert!(ticket.is_some());
        assert!(gate.is_in_flight());
        assert!(gate.try_begin().is_none());

        drop(ticket);
        assert!(!gate.is_in_flight());
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let gate = SubmitGate::new();
        let view_copy = gate.clone();
        let _ticket = gate.try_begin().unwrap();
        assert!(view_copy.try_begin().is_none());
    }

    #[test]
    fn test_separate_forms_do_not_block_each_other() {
        let login_form = SubmitGate::new();
        let user_form = SubmitGate::new();
        let _a = login_form.try_begin().unwrap();
        assert!(user_form.try_begin().is_some());
    }

    #[tokio::test]
    async fn test_ticket_released_when_future_completes() {
        let gate = SubmitGate::new();
        let ticket = gate.try_begin().unwrap();
        async move {
            let _held = ticket;
            tokio::task::yield_now().await;
        }
        .await;
        assert!(!gate.is_in_flight());
    }
}
