// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed slide index with saturating moves and an animation lock.
//!
//! [`SlideIndex`] owns the settled `current` index of a carousel. Moves are
//! requested in whole [`Step`]s of `slides_to_scroll` slides and clamped into
//! `[0, slide_count - slides_to_show]`. Every accepted move takes the
//! [`AnimationLock`]; while the lock is held further moves are dropped.
//!
//! ```
//! use understory_carousel::index::{SlideIndex, Step};
//!
//! let mut index = SlideIndex::new(0, 6, 2, 2);
//! let (slide, token) = index.request_move(Step::Next).unwrap();
//! assert_eq!(slide, 2);
//!
//! // Locked until the transition hands its token back.
//! assert!(index.request_move(Step::Next).is_none());
//! assert!(index.finish(token));
//! assert_eq!(index.request_move(Step::Next).map(|(slide, _)| slide), Some(4));
//! ```

use core::ops::Range;

use crate::lock::{AnimationLock, CompletionToken};

/// Direction of a paging move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Towards index zero.
    Previous,
    /// Towards the last valid index.
    Next,
}

/// The settled index of a carousel plus its animation lock.
#[derive(Clone, Debug)]
pub struct SlideIndex {
    current: usize,
    slide_count: usize,
    slides_to_show: usize,
    slides_to_scroll: usize,
    lock: AnimationLock,
}

impl SlideIndex {
    /// Creates an index at `initial`, clamped into the valid range.
    ///
    /// `slides_to_show` and `slides_to_scroll` of zero are treated as one.
    #[must_use]
    pub fn new(
        initial: usize,
        slide_count: usize,
        slides_to_show: usize,
        slides_to_scroll: usize,
    ) -> Self {
        let mut index = Self {
            current: 0,
            slide_count,
            slides_to_show: slides_to_show.max(1),
            slides_to_scroll: slides_to_scroll.max(1),
            lock: AnimationLock::default(),
        };
        index.current = index.clamp(initial);
        index
    }

    /// Committed index.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of slides in the track.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Number of slides visible at once.
    #[must_use]
    pub fn slides_to_show(&self) -> usize {
        self.slides_to_show
    }

    /// Largest index that still fills the visible window.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.slide_count.saturating_sub(self.slides_to_show)
    }

    /// Returns `true` when there are more slides than fit in the window.
    #[must_use]
    pub fn is_pageable(&self) -> bool {
        self.slide_count > self.slides_to_show
    }

    /// Returns `true` at index zero.
    #[must_use]
    pub fn at_start(&self) -> bool {
        self.current == 0
    }

    /// Returns `true` at the last valid index.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.current == self.max_index()
    }

    /// Returns `true` while a transition holds the lock.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.lock.is_held()
    }

    /// Clamps any candidate into `[0, max_index]`.
    #[must_use]
    pub fn clamp(&self, candidate: usize) -> usize {
        candidate.min(self.max_index())
    }

    /// Index a move of `step` would land on, ignoring the lock.
    #[must_use]
    pub fn target_for(&self, step: Step) -> usize {
        match step {
            Step::Previous => self.current.saturating_sub(self.slides_to_scroll),
            Step::Next => self.clamp(self.current.saturating_add(self.slides_to_scroll)),
        }
    }

    /// Requests a move by one step.
    ///
    /// Returns `None` and leaves the index untouched while the lock is held.
    /// Otherwise commits the clamped target and returns it together with the
    /// token that must be handed back once the transition settles. A move
    /// that clamps to the unchanged index is still accepted and still locks.
    pub fn request_move(&mut self, step: Step) -> Option<(usize, CompletionToken)> {
        if self.lock.is_held() {
            log::debug!("dropping {step:?} move: transition in flight");
            return None;
        }
        self.current = self.target_for(step);
        Some((self.current, self.lock.acquire()))
    }

    /// Takes the lock without moving, for a transition back to the
    /// committed offset. Returns `None` while already locked.
    pub fn request_settle(&mut self) -> Option<CompletionToken> {
        if self.lock.is_held() {
            return None;
        }
        Some(self.lock.acquire())
    }

    /// Hands a completion token back. Returns `true` if it cleared the lock.
    pub fn finish(&mut self, token: CompletionToken) -> bool {
        self.lock.release(token)
    }

    /// Slides that are currently in the visible window.
    ///
    /// Empty when the track holds fewer slides than the window.
    #[must_use]
    pub fn active_range(&self) -> Range<usize> {
        if self.slide_count < self.slides_to_show {
            return 0..0;
        }
        self.current..(self.current + self.slides_to_show).min(self.slide_count)
    }

    /// Updates the slide count (for example after mounting) and re-clamps
    /// the committed index.
    pub fn set_slide_count(&mut self, slide_count: usize) {
        self.slide_count = slide_count;
        self.current = self.clamp(self.current);
    }

    /// Puts the index back at `initial` (clamped) and invalidates every
    /// outstanding token.
    pub fn reset(&mut self, initial: usize) {
        self.lock.reset();
        self.current = self.clamp(initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(index: &mut SlideIndex, step: Step) -> usize {
        let (slide, token) = index.request_move(step).unwrap();
        assert!(index.finish(token));
        slide
    }

    #[test]
    fn forward_moves_saturate_at_max() {
        let mut index = SlideIndex::new(0, 6, 2, 2);
        assert_eq!(settle(&mut index, Step::Next), 2);
        assert_eq!(settle(&mut index, Step::Next), 4);
        assert_eq!(settle(&mut index, Step::Next), 4);
        assert!(index.at_end());
    }

    #[test]
    fn backward_moves_saturate_at_zero() {
        let mut index = SlideIndex::new(3, 6, 2, 2);
        assert_eq!(settle(&mut index, Step::Previous), 1);
        assert_eq!(settle(&mut index, Step::Previous), 0);
        assert_eq!(settle(&mut index, Step::Previous), 0);
        assert!(index.at_start());
    }

    #[test]
    fn uneven_scroll_clamps_to_last_window() {
        let mut index = SlideIndex::new(0, 7, 3, 3);
        assert_eq!(settle(&mut index, Step::Next), 3);
        assert_eq!(settle(&mut index, Step::Next), 4);
    }

    #[test]
    fn lower_bound_wins_when_window_covers_everything() {
        let mut index = SlideIndex::new(5, 3, 3, 1);
        assert_eq!(index.current(), 0);
        assert_eq!(settle(&mut index, Step::Next), 0);

        let mut index = SlideIndex::new(2, 2, 4, 1);
        assert_eq!(index.current(), 0);
        assert_eq!(settle(&mut index, Step::Next), 0);
    }

    #[test]
    fn initial_slide_is_clamped() {
        assert_eq!(SlideIndex::new(99, 6, 2, 2).current(), 4);
        assert_eq!(SlideIndex::new(3, 6, 2, 2).current(), 3);
        assert_eq!(SlideIndex::new(0, 0, 2, 2).current(), 0);
    }

    #[test]
    fn moves_are_dropped_while_locked() {
        let mut index = SlideIndex::new(0, 10, 2, 2);
        let (slide, token) = index.request_move(Step::Next).unwrap();
        assert_eq!(slide, 2);
        assert!(index.is_animating());

        for _ in 0..5 {
            assert!(index.request_move(Step::Next).is_none());
            assert!(index.request_move(Step::Previous).is_none());
            assert!(index.request_settle().is_none());
        }
        assert_eq!(index.current(), 2);

        assert!(index.finish(token));
        assert!(!index.is_animating());
    }

    #[test]
    fn degenerate_move_still_locks() {
        let mut index = SlideIndex::new(0, 6, 2, 2);
        let (slide, token) = index.request_move(Step::Previous).unwrap();
        assert_eq!(slide, 0);
        assert!(index.is_animating());
        assert!(index.finish(token));
    }

    #[test]
    fn active_range_tracks_window() {
        let mut index = SlideIndex::new(0, 6, 2, 2);
        assert_eq!(index.active_range(), 0..2);
        settle(&mut index, Step::Next);
        assert_eq!(index.active_range(), 2..4);

        let short = SlideIndex::new(0, 1, 2, 2);
        assert_eq!(short.active_range(), 0..0);

        let exact = SlideIndex::new(0, 3, 3, 1);
        assert_eq!(exact.active_range(), 0..3);
    }

    #[test]
    fn reset_rejects_old_tokens() {
        let mut index = SlideIndex::new(0, 6, 2, 2);
        let (_, token) = index.request_move(Step::Next).unwrap();
        index.reset(1);
        assert_eq!(index.current(), 1);
        assert!(!index.is_animating());
        assert!(!index.finish(token));
    }
}
