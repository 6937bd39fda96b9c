use std::collections::HashSet;
use std::sync::LazyLock;

use parking_lot::Mutex;

use crate::EntityId;

/// Hands out entity ids from a wrapping counter, skipping ids that are still live.
///
/// Freeing an id does not rewind the counter, so a released id is only
/// reissued after the counter wraps all the way around. Internally
/// synchronized: ids may be minted from any thread.
#[derive(Debug, Default)]
pub struct IdAllocator {
    state: Mutex<AllocatorState>,
}

#[derive(Debug, Default)]
struct AllocatorState {
    next: u32,
    live: HashSet<u32>,
}

static GLOBAL: LazyLock<IdAllocator> = LazyLock::new(IdAllocator::new);

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose counter starts at `next` instead of zero.
    pub fn starting_at(next: u32) -> Self {
        Self {
            state: Mutex::new(AllocatorState {
                next,
                live: HashSet::new(),
            }),
        }
    }

    /// The process-wide allocator shared by every world.
    pub fn global() -> &'static IdAllocator {
        &GLOBAL
    }

    /// Mint an id that is not currently live.
    pub fn generate(&self) -> EntityId {
        let mut state = self.state.lock();
        assert!(
            state.live.len() <= u32::MAX as usize,
            "entity id space exhausted"
        );
        loop {
            let candidate = state.next;
            state.next = state.next.wrapping_add(1);
            if state.live.insert(candidate) {
                tracing::trace!(id = candidate, "generated id");
                return EntityId(candidate);
            }
        }
    }

    /// Release an id. Returns false if it was not live.
    pub fn free(&self, id: EntityId) -> bool {
        let released = self.state.lock().live.remove(&id.0);
        if released {
            tracing::trace!(id = id.0, "freed id");
        }
        released
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.state.lock().live.contains(&id.0)
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }
}
