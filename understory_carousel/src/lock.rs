// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation lock with single-owner completion tokens.
//!
//! Acquiring the lock hands out a [`CompletionToken`]. The token is neither
//! `Clone` nor `Copy`, so exactly one owner can give it back through
//! [`AnimationLock::release`]. Each acquisition bumps a generation counter;
//! a token from an earlier generation (a superseded transition, or one that
//! outlived a [`AnimationLock::reset`]) is rejected and leaves the lock alone.
//!
//! ```
//! use understory_carousel::lock::AnimationLock;
//!
//! let mut lock = AnimationLock::default();
//! let token = lock.acquire();
//! assert!(lock.is_held());
//! assert!(lock.release(token));
//! assert!(!lock.is_held());
//! ```

use core::fmt;

/// Proof of one in-flight transition. Returning it clears the lock.
#[must_use = "dropping a completion token leaves the carousel locked"]
#[derive(PartialEq, Eq)]
pub struct CompletionToken {
    generation: u64,
}

impl CompletionToken {
    /// Generation this token was issued for.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Debug for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompletionToken")
            .field(&self.generation)
            .finish()
    }
}

/// Mutual-exclusion flag guarding the committed slide index.
#[derive(Clone, Debug, Default)]
pub struct AnimationLock {
    generation: u64,
    held: bool,
}

impl AnimationLock {
    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Current generation; bumped by every acquisition and reset.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Takes the lock for a new transition.
    ///
    /// If the lock is already held, the previous token is superseded: it will
    /// be rejected when returned.
    pub fn acquire(&mut self) -> CompletionToken {
        self.generation = self.generation.wrapping_add(1);
        self.held = true;
        CompletionToken {
            generation: self.generation,
        }
    }

    /// Returns a token. Only the token of the current generation clears the
    /// lock; the result says whether it did.
    pub fn release(&mut self, token: CompletionToken) -> bool {
        if !self.held || token.generation != self.generation {
            log::debug!(
                "rejecting stale completion token {} (current generation {})",
                token.generation,
                self.generation
            );
            return false;
        }
        self.held = false;
        true
    }

    /// Drops the lock and invalidates every outstanding token.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.held = false;
    }
}
