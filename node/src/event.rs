//! Events emitted after each committed operation.

use dao_governance::{ProposalStatus, VoteSide};
use dao_types::{AccountAddress, ProposalId, ShareAmount, Timestamp};

/// Governance-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DaoEvent {
    /// Collateral was locked and shares credited.
    Deposited {
        account: AccountAddress,
        amount: ShareAmount,
        balance: ShareAmount,
    },
    /// Shares were burned and collateral released.
    Withdrawn {
        account: AccountAddress,
        amount: ShareAmount,
        balance: ShareAmount,
    },
    /// A new proposal opened for voting.
    ProposalCreated {
        id: ProposalId,
        author: AccountAddress,
        created_at: Timestamp,
    },
    /// A vote was counted.
    VoteCast {
        id: ProposalId,
        voter: AccountAddress,
        side: VoteSide,
        weight: ShareAmount,
    },
    /// A vote pushed a proposal into a terminal status.
    ProposalResolved {
        id: ProposalId,
        status: ProposalStatus,
        votes_yes: ShareAmount,
        votes_no: ShareAmount,
    },
}

/// Synchronous fan-out event bus for governance events.
///
/// Listeners are invoked inline while the node's state lock is held, so they
/// observe events in commit order; keep handlers fast and never call back
/// into the node from one.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&DaoEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&DaoEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &DaoEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn deposited() -> DaoEvent {
        DaoEvent::Deposited {
            account: AccountAddress::new("voter1"),
            amount: ShareAmount::new(100),
            balance: ShareAmount::new(100),
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&deposited());
        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&deposited());
    }

    #[test]
    fn listener_receives_correct_event_variant() {
        let resolved = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let r = Arc::clone(&resolved);
        bus.subscribe(Box::new(move |event| {
            if let DaoEvent::ProposalResolved { status, .. } = event {
                assert_eq!(*status, ProposalStatus::Approved);
                r.fetch_add(1, Ordering::SeqCst);
            }
        }));

        bus.emit(&deposited());
        bus.emit(&DaoEvent::ProposalResolved {
            id: ProposalId::from_label("p"),
            status: ProposalStatus::Approved,
            votes_yes: ShareAmount::new(200),
            votes_no: ShareAmount::ZERO,
        });
        assert_eq!(resolved.load(Ordering::SeqCst), 1);
    }
}
