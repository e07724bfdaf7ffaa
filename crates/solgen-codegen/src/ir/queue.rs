use super::errors::{GenerationError, Result};
use solgen_core::FunctionId;
use std::collections::{BTreeSet, HashSet};

/// Functions whose calls were discovered during lowering and still need
/// code. Behaves like a queue without order or duplicates: callers only rely
/// on every pushed function eventually being popped exactly once.
///
/// Popped functions are remembered until [`start_round`](Self::start_round),
/// so a function is generated at most once per most-derived contract even if
/// later calls push it again.
#[derive(Debug, Default)]
pub struct FunctionGenerationQueue {
    pending: BTreeSet<FunctionId>,
    generated: HashSet<FunctionId>,
}

impl FunctionGenerationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `function` is already pending or was generated in
    /// this round.
    pub fn push(&mut self, function: FunctionId) -> bool {
        if self.generated.contains(&function) {
            return false;
        }
        self.pending.insert(function)
    }

    pub fn pop(&mut self) -> Result<FunctionId> {
        let function = self
            .pending
            .pop_first()
            .ok_or(GenerationError::EmptyQueue)?;
        self.generated.insert(function);
        Ok(function)
    }

    pub fn contains(&self, function: FunctionId) -> bool {
        self.pending.contains(&function)
    }

    pub fn was_generated(&self, function: FunctionId) -> bool {
        self.generated.contains(&function)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Forgets which functions were generated. Pending entries stay.
    pub fn start_round(&mut self) {
        self.generated.clear();
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.generated.clear();
    }
}
