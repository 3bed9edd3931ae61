//! Reusable scratch objects.
//!
//! A [`Pool`] hands out [`Pooled`] guards. Values are reset when acquired and
//! again when the guard drops, so a released value never carries state into
//! the next use.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// Values that can be cleared for reuse.
pub trait Recycle: Default {
    fn reset(&mut self);
}

/// Upper bound on idle values kept per pool.
const MAX_IDLE: usize = 16;

pub struct Pool<T> {
    idle: Mutex<Vec<T>>,
}

impl<T: Recycle> Pool<T> {
    pub const fn new() -> Self {
        Self {
            idle: parking_lot::const_mutex(Vec::new()),
        }
    }

    pub fn acquire(&self) -> Pooled<'_, T> {
        let mut value = self.idle.lock().pop().unwrap_or_default();
        value.reset();
        Pooled { pool: self, value }
    }

    /// Number of idle values waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, mut value: T) {
        value.reset();
        let mut idle = self.idle.lock();
        if idle.len() < MAX_IDLE {
            idle.push(value);
        }
    }
}

impl<T: Recycle> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped access to a pooled value; returns it to the pool on drop.
pub struct Pooled<'p, T: Recycle> {
    pool: &'p Pool<T>,
    value: T,
}

impl<T: Recycle> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Recycle> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Recycle> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        let value = std::mem::take(&mut self.value);
        self.pool.release(value);
    }
}
