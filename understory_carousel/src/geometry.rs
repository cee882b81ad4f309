// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paging geometry: slide width, track width, and per-index track offsets.
//!
//! All values are in the host's horizontal layout units (typically CSS or
//! logical pixels). The free functions are pure; [`Geometry`] caches the
//! results of one measurement pass so the rest of the carousel can ask for
//! offsets without re-measuring.
//!
//! ```
//! use understory_carousel::geometry::{Geometry, offset_for_index};
//!
//! // A 500px list showing two slides out of six.
//! let geometry = Geometry::measure(500.0, 6, 2);
//! assert_eq!(geometry.slide_width(), 250.0);
//! assert_eq!(geometry.track_width(), 1500.0);
//! assert_eq!(geometry.offset_for_index(2), -500.0);
//! assert_eq!(offset_for_index(2, 250.0), -500.0);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Width of a single slide when `slides_to_show` slides share `list_width`.
///
/// Rounded up so the visible window is always covered. A `slides_to_show` of
/// zero is treated as one.
#[must_use]
pub fn slide_width(list_width: f64, slides_to_show: usize) -> f64 {
    (list_width / slides_to_show.max(1) as f64).ceil()
}

/// Width of the full slide track holding `slide_count` slides.
#[must_use]
pub fn track_width(slide_width: f64, slide_count: usize) -> f64 {
    (slide_width * slide_count as f64).ceil()
}

/// Horizontal track offset that brings slide `index` to the list's leading edge.
#[must_use]
pub fn offset_for_index(index: usize, slide_width: f64) -> f64 {
    -(index as f64 * slide_width)
}

/// Result of one measurement pass over the list.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    list_width: f64,
    slide_width: f64,
    track_width: f64,
}

impl Geometry {
    /// Measures a list of `list_width` holding `slide_count` slides, of which
    /// `slides_to_show` are visible at once.
    #[must_use]
    pub fn measure(list_width: f64, slide_count: usize, slides_to_show: usize) -> Self {
        let list_width = if list_width.is_finite() {
            list_width.max(0.0)
        } else {
            0.0
        };
        let slide_width = slide_width(list_width, slides_to_show);
        Self {
            list_width,
            slide_width,
            track_width: track_width(slide_width, slide_count),
        }
    }

    /// Visible list width this geometry was measured from.
    #[must_use]
    pub fn list_width(&self) -> f64 {
        self.list_width
    }

    /// Width of one slide, including its chrome.
    #[must_use]
    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    /// Width of the whole track.
    #[must_use]
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Content width to assign to each slide element once its horizontal
    /// margin and border (`chrome`) are taken out.
    #[must_use]
    pub fn slide_content_width(&self, chrome: f64) -> f64 {
        (self.slide_width - chrome.max(0.0)).max(0.0)
    }

    /// Committed track offset for `index`.
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> f64 {
        offset_for_index(index, self.slide_width)
    }

    /// Minimum horizontal travel for a swipe to commit, given the configured
    /// touch threshold divisor.
    #[must_use]
    pub fn min_swipe(&self, touch_threshold: f64) -> f64 {
        self.list_width / touch_threshold
    }
}
