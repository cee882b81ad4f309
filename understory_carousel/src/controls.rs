// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow affordances derived from the committed index.

/// Visibility and enablement of the previous/next arrows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrowState {
    /// Both arrows are hidden (and disabled).
    pub hidden: bool,
    /// The previous arrow cannot be used.
    pub prev_disabled: bool,
    /// The next arrow cannot be used.
    pub next_disabled: bool,
}

impl ArrowState {
    /// Hidden and disabled, used when there is nothing to page through.
    pub const HIDDEN: Self = Self {
        hidden: true,
        prev_disabled: true,
        next_disabled: true,
    };
}

/// Computes arrow state for `current` in a track of `slide_count` slides
/// showing `slides_to_show` at a time.
///
/// When every slide already fits, both arrows are hidden regardless of
/// `current`.
///
/// ```
/// use understory_carousel::controls::{ArrowState, arrow_state};
///
/// let state = arrow_state(0, 6, 2);
/// assert!(state.prev_disabled && !state.next_disabled);
/// assert_eq!(arrow_state(0, 3, 3), ArrowState::HIDDEN);
/// ```
#[must_use]
pub fn arrow_state(current: usize, slide_count: usize, slides_to_show: usize) -> ArrowState {
    if slide_count <= slides_to_show {
        return ArrowState::HIDDEN;
    }
    ArrowState {
        hidden: false,
        prev_disabled: current == 0,
        next_disabled: current >= slide_count - slides_to_show,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_disables_previous() {
        let state = arrow_state(0, 6, 2);
        assert!(!state.hidden);
        assert!(state.prev_disabled);
        assert!(!state.next_disabled);
    }

    #[test]
    fn middle_page_enables_both() {
        let state = arrow_state(2, 6, 2);
        assert!(!state.prev_disabled);
        assert!(!state.next_disabled);
    }

    #[test]
    fn last_page_disables_next() {
        let state = arrow_state(4, 6, 2);
        assert!(!state.prev_disabled);
        assert!(state.next_disabled);
    }

    #[test]
    fn nothing_to_page_hides_everything() {
        for current in 0..5 {
            assert_eq!(arrow_state(current, 3, 3), ArrowState::HIDDEN);
            assert_eq!(arrow_state(current, 1, 2), ArrowState::HIDDEN);
            assert_eq!(arrow_state(current, 0, 2), ArrowState::HIDDEN);
        }
    }
}
