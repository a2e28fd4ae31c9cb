//! Envelope repository
//!
//! Holds the ordered envelope list and the running total budget behind a
//! single lock. Each public method is one atomic step: lookups, checks and
//! mutations happen under the same lock acquisition, and a method that
//! returns an error has not modified anything.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::IdStrategy;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Amount, Envelope, EnvelopeId};

/// Lock-protected state
#[derive(Debug, Clone)]
struct Ledger {
    envelopes: Vec<Envelope>,
    total_budget: Amount,
    next_id: EnvelopeId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            envelopes: Vec::new(),
            total_budget: Amount::zero(),
            next_id: EnvelopeId::new(1),
        }
    }
}

impl Ledger {
    fn position(&self, id: EnvelopeId) -> Option<usize> {
        self.envelopes.iter().position(|e| e.id == id)
    }
}

/// A point-in-time copy of the store
#[derive(Debug, Clone)]
pub struct EnvelopeSnapshot {
    pub envelopes: Vec<Envelope>,
    pub total_budget: Amount,
}

/// Outcome of a withdrawal
#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub before: Envelope,
    pub after: Envelope,
    pub total_budget: Amount,
}

/// Outcome of a transfer
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub from_before: Envelope,
    pub to_before: Envelope,
    pub from_after: Envelope,
    pub to_after: Envelope,
    /// Full envelope list after the transfer
    pub envelopes: Vec<Envelope>,
}

/// Repository for envelopes
pub struct EnvelopeRepository {
    id_strategy: IdStrategy,
    data: RwLock<Ledger>,
}

impl EnvelopeRepository {
    /// Create an empty repository
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            id_strategy,
            data: RwLock::new(Ledger::default()),
        }
    }

    fn read(&self) -> EnvelopeResult<RwLockReadGuard<'_, Ledger>> {
        self.data
            .read()
            .map_err(|e| EnvelopeError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> EnvelopeResult<RwLockWriteGuard<'_, Ledger>> {
        self.data
            .write()
            .map_err(|e| EnvelopeError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// The id assignment rule in use
    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    /// Append a new envelope and add its budget to the total
    ///
    /// The caller is responsible for validating title and budget.
    pub fn insert(&self, title: String, budget: Amount) -> EnvelopeResult<Envelope> {
        let mut data = self.write()?;

        let id = match self.id_strategy {
            IdStrategy::Monotonic => data.next_id,
            IdStrategy::Length => EnvelopeId::new(data.envelopes.len() as u64 + 1),
        };
        data.next_id = id.next().max(data.next_id);

        let envelope = Envelope::new(id, title, budget);
        data.envelopes.push(envelope.clone());
        data.total_budget += budget;

        Ok(envelope)
    }

    /// Get all envelopes in insertion order, with the total budget
    pub fn get_all(&self) -> EnvelopeResult<EnvelopeSnapshot> {
        let data = self.read()?;

        Ok(EnvelopeSnapshot {
            envelopes: data.envelopes.clone(),
            total_budget: data.total_budget,
        })
    }

    /// Get the first envelope with the given id
    pub fn get(&self, id: EnvelopeId) -> EnvelopeResult<Option<Envelope>> {
        let data = self.read()?;

        Ok(data.envelopes.iter().find(|e| e.id == id).cloned())
    }

    /// Current total budget
    pub fn total_budget(&self) -> EnvelopeResult<Amount> {
        Ok(self.read()?.total_budget)
    }

    /// Number of envelopes
    pub fn count(&self) -> EnvelopeResult<usize> {
        Ok(self.read()?.envelopes.len())
    }

    /// Subtract `amount` from an envelope and optionally rename it
    ///
    /// Fails with `NotFound` if the id is unknown and `InsufficientFunds` if
    /// the balance does not cover the amount.
    pub fn withdraw(
        &self,
        id: EnvelopeId,
        amount: Amount,
        new_title: Option<String>,
    ) -> EnvelopeResult<Withdrawal> {
        let mut data = self.write()?;

        let index = data
            .position(id)
            .ok_or_else(|| EnvelopeError::envelope_not_found(id.to_string()))?;

        let before = data.envelopes[index].clone();
        if !before.can_cover(amount) {
            return Err(EnvelopeError::InsufficientFunds {
                envelope: before.title,
                needed: amount.value(),
                available: before.budget.value(),
            });
        }

        let envelope = &mut data.envelopes[index];
        envelope.budget -= amount;
        if let Some(title) = new_title {
            envelope.title = title;
        }
        let after = envelope.clone();

        data.total_budget -= amount;

        Ok(Withdrawal {
            before,
            after,
            total_budget: data.total_budget,
        })
    }

    /// Remove an envelope and subtract its budget from the total
    ///
    /// Returns the removed envelope, or `None` if no envelope had that id.
    pub fn delete(&self, id: EnvelopeId) -> EnvelopeResult<Option<Envelope>> {
        let mut data = self.write()?;

        let Some(index) = data.position(id) else {
            return Ok(None);
        };

        let removed = data.envelopes.remove(index);
        data.total_budget -= removed.budget;
        if data.envelopes.is_empty() {
            data.total_budget = Amount::zero();
        }

        Ok(Some(removed))
    }

    /// Move `amount` from one envelope to another
    ///
    /// The total budget is untouched. An unknown id fails with `NotFound`
    /// naming the first missing id, an uncovered amount with
    /// `InsufficientFunds`. Transferring an envelope to itself succeeds
    /// without changing it.
    pub fn transfer(
        &self,
        from_id: EnvelopeId,
        to_id: EnvelopeId,
        amount: Amount,
    ) -> EnvelopeResult<TransferOutcome> {
        let mut data = self.write()?;

        let from_index = data
            .position(from_id)
            .ok_or_else(|| EnvelopeError::envelope_not_found(from_id.to_string()))?;
        let to_index = data
            .position(to_id)
            .ok_or_else(|| EnvelopeError::envelope_not_found(to_id.to_string()))?;

        let from_before = data.envelopes[from_index].clone();
        let to_before = data.envelopes[to_index].clone();

        if !from_before.can_cover(amount) {
            return Err(EnvelopeError::InsufficientFunds {
                envelope: from_before.title,
                needed: amount.value(),
                available: from_before.budget.value(),
            });
        }

        if from_index != to_index {
            data.envelopes[from_index].budget -= amount;
            data.envelopes[to_index].budget += amount;
        }

        Ok(TransferOutcome {
            from_after: data.envelopes[from_index].clone(),
            to_after: data.envelopes[to_index].clone(),
            from_before,
            to_before,
            envelopes: data.envelopes.clone(),
        })
    }
}

impl Default for EnvelopeRepository {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(v: f64) -> Amount {
        Amount::new(v)
    }

    fn assert_total_matches(repo: &EnvelopeRepository) {
        let snapshot = repo.get_all().unwrap();
        let sum: Amount = snapshot.envelopes.iter().map(|e| e.budget).sum();
        assert!(
            snapshot.total_budget.approx_eq(sum),
            "total {} != sum {}",
            snapshot.total_budget,
            sum
        );
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let repo = EnvelopeRepository::default();

        let rent = repo.insert("Rent".into(), amount(1000.0)).unwrap();
        let food = repo.insert("Food".into(), amount(200.0)).unwrap();

        assert_eq!(rent.id, EnvelopeId::new(1));
        assert_eq!(food.id, EnvelopeId::new(2));
        assert_eq!(repo.total_budget().unwrap().value(), 1200.0);
        assert_eq!(repo.count().unwrap(), 2);
        assert_total_matches(&repo);
    }

    #[test]
    fn test_monotonic_ids_not_reused() {
        let repo = EnvelopeRepository::new(IdStrategy::Monotonic);
        let a = repo.insert("A".into(), amount(1.0)).unwrap();
        repo.insert("B".into(), amount(1.0)).unwrap();
        repo.delete(a.id).unwrap();

        let c = repo.insert("C".into(), amount(1.0)).unwrap();
        assert_eq!(c.id, EnvelopeId::new(3));
    }

    #[test]
    fn test_length_ids_can_collide() {
        let repo = EnvelopeRepository::new(IdStrategy::Length);
        let a = repo.insert("A".into(), amount(1.0)).unwrap();
        let b = repo.insert("B".into(), amount(1.0)).unwrap();
        repo.delete(a.id).unwrap();

        let c = repo.insert("C".into(), amount(1.0)).unwrap();
        assert_eq!(c.id, b.id);

        // Lookups resolve to the first match in insertion order
        assert_eq!(repo.get(b.id).unwrap().unwrap().title, "B");
    }

    #[test]
    fn test_get_missing() {
        let repo = EnvelopeRepository::default();
        assert!(repo.get(EnvelopeId::new(999)).unwrap().is_none());
    }

    #[test]
    fn test_withdraw() {
        let repo = EnvelopeRepository::default();
        let rent = repo.insert("Rent".into(), amount(1000.0)).unwrap();

        let result = repo.withdraw(rent.id, amount(300.0), None).unwrap();
        assert_eq!(result.before.budget.value(), 1000.0);
        assert_eq!(result.after.budget.value(), 700.0);
        assert_eq!(result.after.title, "Rent");
        assert_eq!(result.total_budget.value(), 700.0);
        assert_total_matches(&repo);
    }

    #[test]
    fn test_withdraw_with_rename() {
        let repo = EnvelopeRepository::default();
        let rent = repo.insert("Rent".into(), amount(100.0)).unwrap();

        let result = repo
            .withdraw(rent.id, amount(100.0), Some("Housing".into()))
            .unwrap();
        assert_eq!(result.after.title, "Housing");
        assert!(result.after.budget.is_zero());
    }

    #[test]
    fn test_withdraw_insufficient_leaves_state() {
        let repo = EnvelopeRepository::default();
        let food = repo.insert("Food".into(), amount(50.0)).unwrap();

        let err = repo
            .withdraw(food.id, amount(50.01), Some("Renamed".into()))
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::InsufficientFunds { .. }));

        let unchanged = repo.get(food.id).unwrap().unwrap();
        assert_eq!(unchanged.budget.value(), 50.0);
        assert_eq!(unchanged.title, "Food");
        assert_eq!(repo.total_budget().unwrap().value(), 50.0);
    }

    #[test]
    fn test_withdraw_not_found() {
        let repo = EnvelopeRepository::default();
        let err = repo
            .withdraw(EnvelopeId::new(4), amount(1.0), None)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let repo = EnvelopeRepository::default();
        let rent = repo.insert("Rent".into(), amount(800.0)).unwrap();
        let food = repo.insert("Food".into(), amount(100.0)).unwrap();

        let removed = repo.delete(food.id).unwrap().unwrap();
        assert_eq!(removed.title, "Food");
        assert_eq!(repo.total_budget().unwrap().value(), 800.0);

        let snapshot = repo.get_all().unwrap();
        assert_eq!(snapshot.envelopes.len(), 1);
        assert_eq!(snapshot.envelopes[0].id, rent.id);
    }

    #[test]
    fn test_delete_missing_changes_nothing() {
        let repo = EnvelopeRepository::default();
        repo.insert("Rent".into(), amount(10.0)).unwrap();

        assert!(repo.delete(EnvelopeId::new(42)).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.total_budget().unwrap().value(), 10.0);
    }

    #[test]
    fn test_delete_last_resets_total() {
        let repo = EnvelopeRepository::default();
        let a = repo.insert("A".into(), amount(0.1)).unwrap();
        let b = repo.insert("B".into(), amount(0.2)).unwrap();
        repo.delete(a.id).unwrap();
        repo.delete(b.id).unwrap();

        assert!(repo.total_budget().unwrap().is_zero());
    }

    #[test]
    fn test_transfer() {
        let repo = EnvelopeRepository::default();
        let rent = repo.insert("Rent".into(), amount(700.0)).unwrap();
        let food = repo.insert("Food".into(), amount(200.0)).unwrap();

        let outcome = repo
            .transfer(food.id, rent.id, amount(100.0))
            .unwrap();
        assert_eq!(outcome.from_after.budget.value(), 100.0);
        assert_eq!(outcome.to_after.budget.value(), 800.0);
        assert_eq!(outcome.from_before.budget.value(), 200.0);
        assert_eq!(outcome.envelopes.len(), 2);
        assert_eq!(repo.total_budget().unwrap().value(), 900.0);
        assert_total_matches(&repo);
    }

    #[test]
    fn test_transfer_unknown_envelope() {
        let repo = EnvelopeRepository::default();
        let rent = repo.insert("Rent".into(), amount(700.0)).unwrap();

        let err = repo
            .transfer(rent.id, EnvelopeId::new(9), amount(1.0))
            .unwrap_err();
        assert_eq!(err.to_string(), "Envelope not found: 9");
        assert_eq!(repo.get(rent.id).unwrap().unwrap().budget.value(), 700.0);
    }

    #[test]
    fn test_transfer_insufficient_leaves_both() {
        let repo = EnvelopeRepository::default();
        let a = repo.insert("A".into(), amount(10.0)).unwrap();
        let b = repo.insert("B".into(), amount(5.0)).unwrap();

        let err = repo.transfer(a.id, b.id, amount(11.0)).unwrap_err();
        assert!(matches!(err, EnvelopeError::InsufficientFunds { .. }));
        assert_eq!(repo.get(a.id).unwrap().unwrap().budget.value(), 10.0);
        assert_eq!(repo.get(b.id).unwrap().unwrap().budget.value(), 5.0);
    }

    #[test]
    fn test_transfer_to_self_is_noop() {
        let repo = EnvelopeRepository::default();
        let a = repo.insert("A".into(), amount(0.3)).unwrap();

        let outcome = repo.transfer(a.id, a.id, amount(0.1)).unwrap();
        assert_eq!(outcome.from_after.budget.value(), 0.3);
        assert_eq!(repo.total_budget().unwrap().value(), 0.3);
    }

    #[test]
    fn test_total_tracks_mixed_operations() {
        let repo = EnvelopeRepository::default();
        let a = repo.insert("A".into(), amount(12.34)).unwrap();
        let b = repo.insert("B".into(), amount(0.1)).unwrap();
        let c = repo.insert("C".into(), amount(99.99)).unwrap();
        assert_total_matches(&repo);

        repo.withdraw(a.id, amount(2.2), None).unwrap();
        assert_total_matches(&repo);
        repo.transfer(c.id, b.id, amount(33.3)).unwrap();
        assert_total_matches(&repo);
        repo.delete(b.id).unwrap();
        assert_total_matches(&repo);
        let _ = repo.withdraw(c.id, amount(1000.0), None);
        assert_total_matches(&repo);
    }

    #[test]
    fn test_concurrent_mutations_keep_total_consistent() {
        let repo = EnvelopeRepository::default();
        let a = repo.insert("A".into(), amount(500.0)).unwrap().id;
        let b = repo.insert("B".into(), amount(500.0)).unwrap().id;

        std::thread::scope(|scope| {
            for t in 0..8 {
                let repo = &repo;
                scope.spawn(move || {
                    let (from, to) = if t % 2 == 0 { (a, b) } else { (b, a) };
                    for _ in 0..50 {
                        repo.transfer(from, to, amount(1.1)).unwrap();
                        repo.withdraw(to, amount(0.1), None).unwrap();
                    }
                });
            }
        });

        assert_total_matches(&repo);
        assert!(repo.total_budget().unwrap().approx_eq(amount(960.0)));
        assert_eq!(repo.count().unwrap(), 2);
    }
}
