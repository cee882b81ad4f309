// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe classification: turn pointer samples into a live drag offset and a
//! commit decision.
//!
//! ## Usage
//!
//! 1) On pointer/touch down, call [`GestureClassifier::start`]. It refuses to
//!    start for multi-touch samples or when every slide already fits.
//! 2) On each move, call [`GestureClassifier::update`]. It returns the track
//!    offset to display while the finger is down, or `None` when the sample
//!    produces no visual change.
//! 3) On up/cancel/leave, call [`GestureClassifier::end`] and act on the
//!    returned [`GestureEnd`].
//!
//! The session records only the horizontal travel as the swipe length; the
//! vertical component feeds the direction angle alone, so a mostly vertical
//! scroll never reads as a long swipe.
//!
//! ## Minimal example
//!
//! ```
//! use understory_carousel::gesture::{DragContext, GestureClassifier, GestureEnd, PointerSample};
//! use understory_carousel::index::Step;
//!
//! let ctx = DragContext {
//!     committed_offset: 0.0,
//!     at_start: true,
//!     at_end: false,
//!     pageable: true,
//!     animating: false,
//!     min_swipe: 100.0,
//!     edge_friction: 0.35,
//! };
//!
//! let mut gesture = GestureClassifier::default();
//! assert!(gesture.start(PointerSample::mouse(300.0, 50.0), &ctx));
//!
//! // Dragging leftwards by 150px pulls the track along with the finger.
//! assert_eq!(gesture.update(PointerSample::mouse(150.0, 52.0), &ctx), Some(-150.0));
//! assert_eq!(gesture.end(), GestureEnd::Commit(Step::Next));
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::index::Step;

/// Direction of a swipe, named after the start-minus-current vector.
///
/// A finger travelling towards −x yields a vector pointing right
/// ([`SwipeDirection::Right`]) and pages forward; travelling towards +x
/// yields [`SwipeDirection::Left`] and pages backward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Angle within `[135°, 225°]`.
    Left,
    /// Angle within `[0°, 45°]` or `[315°, 360°)`.
    Right,
    /// Too steep to count as a horizontal swipe.
    Stay,
}

impl SwipeDirection {
    /// Paging step this direction commits to, if any.
    #[must_use]
    pub fn step(self) -> Option<Step> {
        match self {
            Self::Left => Some(Step::Previous),
            Self::Right => Some(Step::Next),
            Self::Stay => None,
        }
    }
}

/// Angle of the vector from `current` back to `start`, in whole degrees
/// normalized to `[0, 360)`.
#[must_use]
pub fn swipe_angle(start: Point, current: Point) -> f64 {
    let x_dist = start.x - current.x;
    let y_dist = start.y - current.y;
    let angle = y_dist.atan2(x_dist).to_degrees().round();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Classifies a normalized swipe angle.
#[must_use]
pub fn classify_angle(angle: f64) -> SwipeDirection {
    if (0.0..=45.0).contains(&angle) || (315.0..=360.0).contains(&angle) {
        SwipeDirection::Right
    } else if (135.0..=225.0).contains(&angle) {
        SwipeDirection::Left
    } else {
        SwipeDirection::Stay
    }
}

/// One pointer or touch sample in page coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Position of the first touch point, or of the mouse pointer.
    pub position: Point,
    /// Number of simultaneous touch points; `1` for mouse input.
    pub points: usize,
}

impl PointerSample {
    /// Mouse sample at `(x, y)`.
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            points: 1,
        }
    }

    /// Touch sample whose first point is at `(x, y)`.
    #[must_use]
    pub fn touch(x: f64, y: f64, points: usize) -> Self {
        Self {
            position: Point::new(x, y),
            points,
        }
    }
}

/// Per-gesture record, alive only while dragging.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSession {
    /// Where the gesture started.
    pub start: Point,
    /// Latest accepted sample position.
    pub current: Point,
    /// Rounded horizontal travel since start.
    pub swipe_length: f64,
    /// Travel needed to commit a page move.
    pub min_swipe: f64,
    /// Touch points seen at start.
    pub finger_count: usize,
}

impl TouchSession {
    /// Direction of the session's current displacement.
    #[must_use]
    pub fn direction(&self) -> SwipeDirection {
        classify_angle(swipe_angle(self.start, self.current))
    }

    /// Returns `true` if the pointer has moved horizontally at all.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.start.x != self.current.x
    }
}

/// Carousel facts the classifier needs for one sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragContext {
    /// Track offset of the committed index.
    pub committed_offset: f64,
    /// Committed index is zero.
    pub at_start: bool,
    /// Committed index is the last valid one.
    pub at_end: bool,
    /// More slides exist than fit in the window.
    pub pageable: bool,
    /// A transition currently holds the lock.
    pub animating: bool,
    /// Travel needed to commit, usually `list_width / touch_threshold`.
    pub min_swipe: f64,
    /// Damping applied when dragging past either end, in `(0, 1)`.
    pub edge_friction: f64,
}

/// Named phase of the classifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture in progress.
    Idle,
    /// A session is live and move samples are applied.
    Dragging,
}

/// What the carousel should do once a gesture ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    /// Swipe passed the threshold; page by this step.
    Commit(Step),
    /// Pointer moved but not enough (or not horizontally); return the track
    /// to the committed offset.
    Settle,
    /// Nothing to do.
    Ignore,
}

/// Gesture state machine: `Idle → Dragging → (Commit | Settle | Idle)`.
#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    session: Option<TouchSession>,
}

impl GestureClassifier {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        if self.session.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    /// Returns `true` while a session is live.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Live session, if dragging.
    #[must_use]
    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// Begins a gesture. Returns `false` (and discards any session) for
    /// multi-touch samples or when the carousel cannot page.
    pub fn start(&mut self, sample: PointerSample, ctx: &DragContext) -> bool {
        if sample.points != 1 || !ctx.pageable {
            log::debug!(
                "rejecting gesture start ({} points, pageable: {})",
                sample.points,
                ctx.pageable
            );
            self.session = None;
            return false;
        }
        self.session = Some(TouchSession {
            start: sample.position,
            current: sample.position,
            swipe_length: 0.0,
            min_swipe: ctx.min_swipe,
            finger_count: sample.points,
        });
        true
    }

    /// Applies a move sample, returning the live track offset to display.
    ///
    /// Returns `None` when not dragging, for multi-touch samples, while a
    /// transition is in flight, or when the displacement classifies as
    /// [`SwipeDirection::Stay`].
    pub fn update(&mut self, sample: PointerSample, ctx: &DragContext) -> Option<f64> {
        let session = self.session.as_mut()?;
        if sample.points != 1 || ctx.animating {
            return None;
        }

        session.current = sample.position;
        session.swipe_length = (session.current.x - session.start.x).abs().round();

        let direction = session.direction();
        if direction == SwipeDirection::Stay {
            return None;
        }

        let sign = if session.current.x > session.start.x {
            1.0
        } else {
            -1.0
        };
        let past_edge = (ctx.at_start && direction == SwipeDirection::Left)
            || (ctx.at_end && direction == SwipeDirection::Right);
        let length = if past_edge {
            session.swipe_length * ctx.edge_friction
        } else {
            session.swipe_length
        };

        let offset = ctx.committed_offset + length * sign;
        log::trace!("drag {direction:?} length {length} -> offset {offset}");
        Some(offset)
    }

    /// Ends the gesture, discarding the session.
    pub fn end(&mut self) -> GestureEnd {
        let Some(session) = self.session.take() else {
            return GestureEnd::Ignore;
        };

        if session.swipe_length > 0.0 && session.swipe_length >= session.min_swipe {
            match session.direction().step() {
                Some(step) => GestureEnd::Commit(step),
                None => GestureEnd::Settle,
            }
        } else if session.moved() {
            GestureEnd::Settle
        } else {
            GestureEnd::Ignore
        }
    }

    /// Drops any live session without producing an outcome.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
