//! Fixed-size watchpoint pool.
//!
//! Only allocation exists today; there is no way to set or list watchpoints
//! yet, which is why `info w` prints nothing.

/// Number of watchpoint slots.
pub const NR_WP: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watchpoint {
    pub no: usize,
}

#[derive(Debug, Default)]
pub struct WatchpointPool {
    free: Vec<Watchpoint>,
    allocated: bool,
}

impl WatchpointPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate every slot onto the free list. Calling it again is a no-op.
    pub fn init(&mut self) {
        if self.allocated {
            return;
        }
        self.free = (0..NR_WP).map(|no| Watchpoint { no }).collect();
        self.allocated = true;
        debug!("watchpoint pool allocated: {NR_WP} slots");
    }

    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let mut pool = WatchpointPool::new();
        assert!(!pool.is_allocated());
        assert_eq!(pool.free_slots(), 0);

        pool.init();
        pool.init();
        assert!(pool.is_allocated());
        assert_eq!(pool.free_slots(), NR_WP);
    }
}
