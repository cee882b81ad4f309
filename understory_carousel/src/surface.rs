// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams: the layout surface the carousel mutates and the event source
//! it subscribes to.
//!
//! The carousel does not own any element tree. It measures through
//! [`LayoutSurface`] and describes every visual change as a [`Mutation`]; a
//! DOM host maps these onto classes, attributes and inline styles, a retained
//! UI maps them onto its own widgets. Listener registration goes through
//! [`EventSource`], which hands back a [`Subscription`] per [`Channel`] so the
//! carousel can unsubscribe explicitly on destroy.

use core::ops::Range;

use crate::controls::ArrowState;
use crate::options::ArrowMarkup;

/// One visual change requested by the carousel.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Wrap the host's slides into a list and a track, stamp each slide with
    /// its index, and remember each slide's original styling.
    Mount {
        /// Number of slides found at mount time.
        slide_count: usize,
    },
    /// Create (for HTML markup) or adopt (for host selectors) the arrow
    /// controls. `visible` is `false` when there is nothing to page through;
    /// such arrows are created hidden and aria-disabled.
    MountArrows {
        /// Previous arrow markup.
        prev: ArrowMarkup,
        /// Next arrow markup.
        next: ArrowMarkup,
        /// Whether the arrows are shown.
        visible: bool,
    },
    /// Toggle the loading flag on the container.
    Loading(bool),
    /// Width of the whole track.
    TrackWidth(f64),
    /// Content width of each slide element.
    SlideWidth(f64),
    /// Horizontal offset of the track inside the list.
    TrackOffset(f64),
    /// Slides in this range are active and visible to assistive tech; all
    /// others are inactive and hidden.
    ActiveSlides(Range<usize>),
    /// Arrow visibility and enablement.
    Arrows(ArrowState),
    /// Restore the original markup: unwrap slides, restore their styling,
    /// drop created arrows and reset adopted ones.
    Unmount,
}

/// Measurement and mutation access to the carousel's container.
pub trait LayoutSurface {
    /// Width of the visible list, in layout units.
    fn list_width(&self) -> f64;

    /// Number of slides (children of the container, in document order).
    fn slide_count(&self) -> usize;

    /// Horizontal margin, border and padding around one slide's content.
    fn slide_chrome(&self) -> f64 {
        0.0
    }

    /// Applies one mutation.
    fn apply(&mut self, mutation: Mutation);
}

/// Input channels the carousel listens on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Clicks on the previous arrow.
    PrevArrow,
    /// Clicks on the next arrow.
    NextArrow,
    /// Touch and mouse start/move/end/cancel on the list.
    Pointer,
    /// Viewport resize and orientation changes.
    Resize,
}

/// Handle for one registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    /// Channel the listener was registered on.
    pub channel: Channel,
    /// Host-assigned identifier.
    pub id: u64,
}

/// Listener registration with explicit teardown.
pub trait EventSource {
    /// Starts delivering `channel` events for this carousel.
    fn subscribe(&mut self, channel: Channel) -> Subscription;

    /// Stops delivering events for a subscription returned by
    /// [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, subscription: Subscription);
}
