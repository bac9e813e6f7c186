//! Recursion limits for the solver's recursive walks.
//!
//! `RecursionGuard` is keyed: subtype checking enters `(source, target)`
//! pairs, and meeting a pair that is already on the stack is the coinductive
//! cycle case. It also bounds depth, total work and the size of the visiting
//! set. `DepthCounter` only bounds depth, for walks over finite trees
//! (lowering, formatting, enum initializers).
//!
//! Limits come from named [`RecursionProfile`]s:
//!
//! ```ignore
//! let guard = RecursionGuard::with_profile(RecursionProfile::SubtypeCheck);
//! ```
//!
//! Debug builds panic when a guard is dropped with entries that were never
//! left, or when a key is left twice.

use duck_common::limits;
use rustc_hash::FxHashSet;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Structural comparison; recursive declarations can nest deeply before
    /// a pair repeats.
    SubtypeCheck,
    /// Nested fresh object literals.
    ExcessPropertyCheck,
    TypeLowering,
    TypeFormatting,
    FailureExplanation,
    EnumInitializer,
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::SubtypeCheck => 100,
            Self::ExcessPropertyCheck => 50,
            Self::TypeLowering => limits::MAX_LOWERING_DEPTH,
            Self::TypeFormatting => limits::MAX_FORMAT_DEPTH,
            Self::FailureExplanation => limits::MAX_EXPLAIN_DEPTH,
            Self::EnumInitializer => limits::MAX_ENUM_INITIALIZER_DEPTH,
        }
    }

    /// Every profile shares the same work budget.
    pub const fn max_iterations(self) -> u32 {
        100_000
    }
}

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// The key is already on the stack.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }
}

/// Cycle detection plus depth and work limits.
///
/// Every [`RecursionResult::Entered`] must be matched by one
/// [`leave`](Self::leave) with the same key.
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth
            || self.visiting.len() as u32 >= limits::MAX_VISITING_SET_SIZE
        {
            return RecursionResult::DepthExceeded;
        }
        if !self.visiting.insert(key) {
            return RecursionResult::Cycle;
        }

        self.depth += 1;
        RecursionResult::Entered
    }

    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);
        debug_assert!(was_present, "RecursionGuard::leave() without a matching enter()");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Enter attempts since construction or the last reset.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Forget all state, keeping the limits.
    pub fn reset(&mut self) {
        self.visiting.clear();
        self.depth = 0;
        self.iterations = 0;
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} entries never left",
                self.visiting.len(),
            );
        }
    }
}

/// Depth-only limit, no keys.
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
}

impl DepthCounter {
    pub fn with_profile(profile: RecursionProfile) -> Self {
        DepthCounter {
            depth: 0,
            max_depth: profile.max_depth(),
        }
    }

    /// `false` at the limit; the depth is then unchanged and `leave()` must
    /// not be called.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(self.depth > 0, "DepthCounter::leave() at depth 0");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!("DepthCounter dropped at depth {}", self.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_limits() {
        let p = RecursionProfile::SubtypeCheck;
        assert_eq!(p.max_depth(), 100);
        assert_eq!(p.max_iterations(), 100_000);
        assert_eq!(
            RecursionProfile::TypeLowering.max_depth(),
            limits::MAX_LOWERING_DEPTH
        );
        assert_eq!(
            RecursionProfile::EnumInitializer.max_depth(),
            limits::MAX_ENUM_INITIALIZER_DEPTH
        );
    }

    #[test]
    fn reentering_same_pair_is_cycle() {
        let mut guard = RecursionGuard::new(10, 100);
        assert_eq!(guard.enter((1u32, 2u32)), RecursionResult::Entered);
        assert_eq!(guard.enter((1u32, 2u32)), RecursionResult::Cycle);
        // The reversed pair is a different key.
        assert_eq!(guard.enter((2u32, 1u32)), RecursionResult::Entered);
        assert_eq!(guard.depth(), 2);

        guard.leave((2, 1));
        guard.leave((1, 2));
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn depth_limit() {
        let mut guard = RecursionGuard::new(2, 100);
        assert!(guard.enter(1u32).is_entered());
        assert!(guard.enter(2u32).is_entered());
        assert_eq!(guard.enter(3u32), RecursionResult::DepthExceeded);

        guard.leave(2);
        guard.leave(1);
    }

    #[test]
    fn iteration_limit_until_reset() {
        let mut guard = RecursionGuard::new(10, 2);
        for key in [1u32, 2] {
            assert!(guard.enter(key).is_entered());
            guard.leave(key);
        }
        assert_eq!(guard.enter(3u32), RecursionResult::IterationExceeded);
        assert_eq!(guard.iterations(), 3);

        guard.reset();
        assert!(guard.enter(3u32).is_entered());
        guard.leave(3);
    }

    #[test]
    fn depth_counter_enter_leave() {
        let mut counter = DepthCounter::with_profile(RecursionProfile::FailureExplanation);
        for _ in 0..limits::MAX_EXPLAIN_DEPTH {
            assert!(counter.enter());
        }
        assert!(!counter.enter());
        for _ in 0..limits::MAX_EXPLAIN_DEPTH {
            counter.leave();
        }
        assert_eq!(counter.depth(), 0);
    }
}
