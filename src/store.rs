// Latest aggregate, swapped whole at the end of each collection cycle

use crate::models::Aggregate;
use std::sync::{Arc, RwLock};

/// Holds the most recent complete aggregate.
///
/// Readers get a shared handle to an immutable map, so a cycle that finishes
/// while a reader holds the handle never changes what that reader sees.
#[derive(Debug, Default)]
pub struct AggregateStore {
    current: RwLock<Arc<Aggregate>>,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> Arc<Aggregate> {
        // A poisoned lock still guards a whole map; the swap cannot panic midway.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn replace(&self, aggregate: Aggregate) {
        let next = Arc::new(aggregate);
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *guard, next)
        };
        drop(previous);
    }
}
