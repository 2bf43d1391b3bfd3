//! Process-wide ticket and score ledger
//!
//! Lives for the process lifetime, outside any single run. A run session
//! mutates it only through [`Economy::consume_ticket`] and
//! [`Economy::apply_delta`]; nothing else may touch the balances.

use serde::{Deserialize, Serialize};

/// Persistent total score and ticket balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    total_score: u64,
    tickets: u32,
}

impl Economy {
    pub fn new(starting_tickets: u32) -> Self {
        Self {
            total_score: 0,
            tickets: starting_tickets,
        }
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn tickets(&self) -> u32 {
        self.tickets
    }

    /// Take one ticket. Returns false, and changes nothing, when empty.
    pub fn consume_ticket(&mut self) -> bool {
        if self.tickets == 0 {
            return false;
        }
        self.tickets -= 1;
        true
    }

    /// Grant tickets (the shell's reward hooks feed through here).
    pub fn grant_tickets(&mut self, count: u32) {
        self.tickets = self.tickets.saturating_add(count);
    }

    /// Apply a signed score delta.
    ///
    /// A negative delta halves the total (floored, never below zero)
    /// regardless of its magnitude; a non-negative delta adds exactly.
    pub fn apply_delta(&mut self, delta: i64) {
        if delta < 0 {
            self.total_score /= 2;
        } else {
            self.total_score += delta as u64;
        }
    }

    /// Snapshot for the embedding shell. In-process only; nothing is written
    /// to disk.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn consume_ticket_decrements_by_one() {
        let mut economy = Economy::new(1);
        assert!(economy.consume_ticket());
        assert_eq!(economy.tickets(), 0);
    }

    #[test]
    fn consume_ticket_rejected_when_empty() {
        let mut economy = Economy::new(0);
        assert!(!economy.consume_ticket());
        assert_eq!(economy.tickets(), 0);
    }

    #[test]
    fn positive_delta_adds_exactly() {
        let mut economy = Economy::new(0);
        economy.apply_delta(10);
        economy.apply_delta(1);
        assert_eq!(economy.total_score(), 11);
    }

    #[test]
    fn negative_delta_halves_from_own_prior_value() {
        let mut economy = Economy::new(0);
        economy.apply_delta(7);
        // The magnitude of the deduction is irrelevant; the total halves.
        economy.apply_delta(-3);
        assert_eq!(economy.total_score(), 3);
    }

    #[test]
    fn halving_at_zero_stays_zero() {
        let mut economy = Economy::new(0);
        economy.apply_delta(-100);
        assert_eq!(economy.total_score(), 0);
    }

    #[test]
    fn granted_tickets_become_spendable() {
        let mut economy = Economy::new(0);
        economy.grant_tickets(2);
        assert!(economy.consume_ticket());
        assert!(economy.consume_ticket());
        assert!(!economy.consume_ticket());
    }

    #[test]
    fn snapshot_round_trips() {
        let mut economy = Economy::new(5);
        economy.apply_delta(42);
        let json = economy.to_json().unwrap();
        let restored = Economy::from_json(&json).unwrap();
        assert_eq!(restored.total_score(), 42);
        assert_eq!(restored.tickets(), 5);
    }

    proptest! {
        /// For any delta sequence the total tracks the halve-or-add model and
        /// never goes negative.
        #[test]
        fn total_never_negative(deltas in proptest::collection::vec(-1000i64..1000, 0..64)) {
            let mut economy = Economy::new(0);
            let mut model: i128 = 0;
            for delta in deltas {
                economy.apply_delta(delta);
                if delta < 0 {
                    model = (model / 2).max(0);
                } else {
                    model += delta as i128;
                }
                prop_assert!(model >= 0);
                prop_assert_eq!(economy.total_score() as i128, model);
            }
        }
    }
}
