use std::sync::atomic::{AtomicU64, Ordering};

/// Issued once per trigger of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Latest-trigger-wins guard for one interaction. A response is applied only
/// while its ticket is still the newest one issued.
#[derive(Debug, Default)]
pub struct InFlight {
    latest: AtomicU64,
}

impl InFlight {
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let guard = InFlight::default();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
