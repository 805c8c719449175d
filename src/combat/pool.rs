//! Free-list pool for transient projectiles
//!
//! `acquire` never fails: an empty pool allocates. `release` takes the object
//! by value, so the previous owner cannot keep using it.

/// Objects that can be recycled through a pool
pub trait Poolable: Default {
    /// Clear per-use state before the object goes back on the free list
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Objects created because the free list was empty
    pub allocated: usize,
    /// Objects handed out from the free list
    pub reused: usize,
    /// Objects dropped on release because the pool was full
    pub discarded: usize,
}

#[derive(Debug)]
pub struct Pool<T: Poolable> {
    available: Vec<T>,
    max_size: usize,
    stats: PoolStats,
}

impl<T: Poolable> Pool<T> {
    pub fn new(max_size: usize) -> Self {
        Self {
            available: Vec::new(),
            max_size,
            stats: PoolStats::default(),
        }
    }

    /// Take a recycled object, or allocate a fresh one if none are idle
    pub fn acquire(&mut self) -> T {
        match self.available.pop() {
            Some(item) => {
                self.stats.reused += 1;
                item
            }
            None => {
                self.stats.allocated += 1;
                T::default()
            }
        }
    }

    /// Return an object; it is reset and kept unless the pool is full
    pub fn release(&mut self, mut item: T) {
        if self.available.len() < self.max_size {
            item.reset();
            self.available.push(item);
        } else {
            self.stats.discarded += 1;
        }
    }

    pub fn idle(&self) -> usize {
        self.available.len()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}
