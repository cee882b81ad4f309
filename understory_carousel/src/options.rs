// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance carousel configuration.
//!
//! Options are fixed when a [`Carousel`](crate::Carousel) is built. Start from
//! [`CarouselOptions::default`] and override with the `with_*` methods; the
//! carousel validates them once at construction.
//!
//! ```
//! use understory_carousel::options::CarouselOptions;
//! use understory_carousel::transition::Easing;
//!
//! let options = CarouselOptions::default()
//!     .with_slides_to_show(3)
//!     .with_slides_to_scroll(1)
//!     .with_easing(Easing::Swing);
//! assert!(options.validate().is_ok());
//! assert_eq!(options.speed_ms, 500);
//! ```
//!
//! With the `serde` feature, options deserialize from the camelCase keys a
//! page script would pass (`slidesToShow`, `touchThreshold`, `speed`, …).

use alloc::string::String;
use core::fmt;

use crate::transition::{Easing, UnknownEasing};

/// Markup for one arrow control.
///
/// Markup that looks like an HTML fragment (`<button …>`) is created and
/// inserted by the layout surface and removed again on destroy. Anything else
/// names an element the host already owns; it is only restyled.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
pub struct ArrowMarkup(String);

impl ArrowMarkup {
    /// Wraps a markup fragment or host selector.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The raw markup or selector.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for HTML fragments the surface must create.
    #[must_use]
    pub fn is_html(&self) -> bool {
        let trimmed = self.0.trim_start();
        trimmed.starts_with('<') && trimmed[1..].contains('>')
    }

    fn default_prev() -> Self {
        Self::new(
            r#"<button type="button" class="slim-prev" aria-label="Previous">Previous</button>"#,
        )
    }

    fn default_next() -> Self {
        Self::new(r#"<button type="button" class="slim-next" aria-label="Next">Next</button>"#)
    }
}

/// Immutable configuration of one carousel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CarouselOptions {
    /// Index shown after initialization; clamped to the valid range.
    pub initial_slide: usize,
    /// Slides visible at once.
    pub slides_to_show: usize,
    /// Slides advanced per arrow press or committed swipe.
    pub slides_to_scroll: usize,
    /// Whether previous/next arrows are built.
    pub arrows: bool,
    /// Transition duration in milliseconds.
    #[cfg_attr(feature = "serde", serde(rename = "speed"))]
    pub speed_ms: u64,
    /// Transition easing.
    pub easing: Easing,
    /// Divisor of the list width giving the minimum committing swipe.
    pub touch_threshold: f64,
    /// Damping applied when dragging past either end, in `(0, 1)`.
    pub edge_friction: f64,
    /// Markup for the previous arrow.
    pub prev_arrow: ArrowMarkup,
    /// Markup for the next arrow.
    pub next_arrow: ArrowMarkup,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            initial_slide: 0,
            slides_to_show: 2,
            slides_to_scroll: 2,
            arrows: true,
            speed_ms: 500,
            easing: Easing::Linear,
            touch_threshold: 5.0,
            edge_friction: 0.35,
            prev_arrow: ArrowMarkup::default_prev(),
            next_arrow: ArrowMarkup::default_next(),
        }
    }
}

impl CarouselOptions {
    /// Sets the initial slide.
    #[must_use]
    pub fn with_initial_slide(mut self, index: usize) -> Self {
        self.initial_slide = index;
        self
    }

    /// Sets how many slides are visible at once.
    #[must_use]
    pub fn with_slides_to_show(mut self, count: usize) -> Self {
        self.slides_to_show = count;
        self
    }

    /// Sets how many slides one move advances.
    #[must_use]
    pub fn with_slides_to_scroll(mut self, count: usize) -> Self {
        self.slides_to_scroll = count;
        self
    }

    /// Enables or disables the arrow controls.
    #[must_use]
    pub fn with_arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    /// Sets the transition duration in milliseconds.
    #[must_use]
    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Sets the transition easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the transition easing by name.
    pub fn with_easing_name(self, name: &str) -> Result<Self, OptionsError> {
        Ok(self.with_easing(name.parse()?))
    }

    /// Sets the touch threshold divisor.
    #[must_use]
    pub fn with_touch_threshold(mut self, threshold: f64) -> Self {
        self.touch_threshold = threshold;
        self
    }

    /// Sets the edge friction factor.
    #[must_use]
    pub fn with_edge_friction(mut self, friction: f64) -> Self {
        self.edge_friction = friction;
        self
    }

    /// Sets custom markup for both arrows.
    #[must_use]
    pub fn with_arrow_markup(mut self, prev: ArrowMarkup, next: ArrowMarkup) -> Self {
        self.prev_arrow = prev;
        self.next_arrow = next;
        self
    }

    /// Checks every field for a usable value.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.slides_to_show == 0 {
            return Err(OptionsError::ZeroSlidesToShow);
        }
        if self.slides_to_scroll == 0 {
            return Err(OptionsError::ZeroSlidesToScroll);
        }
        if !self.touch_threshold.is_finite() || self.touch_threshold <= 0.0 {
            return Err(OptionsError::TouchThreshold(self.touch_threshold));
        }
        if !(self.edge_friction > 0.0 && self.edge_friction < 1.0) {
            return Err(OptionsError::EdgeFriction(self.edge_friction));
        }
        Ok(())
    }
}

/// Error returned for unusable options.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionsError {
    /// `slides_to_show` must be at least one.
    ZeroSlidesToShow,
    /// `slides_to_scroll` must be at least one.
    ZeroSlidesToScroll,
    /// `touch_threshold` must be finite and positive.
    TouchThreshold(f64),
    /// `edge_friction` must lie strictly between zero and one.
    EdgeFriction(f64),
    /// The easing name is not recognized.
    Easing(UnknownEasing),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSlidesToShow => f.write_str("slides_to_show must be at least 1"),
            Self::ZeroSlidesToScroll => f.write_str("slides_to_scroll must be at least 1"),
            Self::TouchThreshold(value) => {
                write!(f, "touch_threshold must be finite and positive, got {value}")
            }
            Self::EdgeFriction(value) => {
                write!(f, "edge_friction must be within (0, 1), got {value}")
            }
            Self::Easing(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Easing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UnknownEasing> for OptionsError {
    fn from(err: UnknownEasing) -> Self {
        Self::Easing(err)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = CarouselOptions::default();
        assert_eq!(options.initial_slide, 0);
        assert_eq!(options.slides_to_show, 2);
        assert_eq!(options.slides_to_scroll, 2);
        assert!(options.arrows);
        assert_eq!(options.speed_ms, 500);
        assert_eq!(options.easing, Easing::Linear);
        assert_eq!(options.touch_threshold, 5.0);
        assert_eq!(options.edge_friction, 0.35);
        assert!(options.prev_arrow.is_html());
        assert!(options.next_arrow.is_html());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = CarouselOptions::default();
        assert_eq!(
            base.clone().with_slides_to_show(0).validate(),
            Err(OptionsError::ZeroSlidesToShow)
        );
        assert_eq!(
            base.clone().with_slides_to_scroll(0).validate(),
            Err(OptionsError::ZeroSlidesToScroll)
        );
        assert_eq!(
            base.clone().with_touch_threshold(0.0).validate(),
            Err(OptionsError::TouchThreshold(0.0))
        );
        assert!(matches!(
            base.clone().with_touch_threshold(f64::NAN).validate(),
            Err(OptionsError::TouchThreshold(_))
        ));
        assert_eq!(
            base.clone().with_edge_friction(1.0).validate(),
            Err(OptionsError::EdgeFriction(1.0))
        );
        assert_eq!(
            base.with_edge_friction(0.0).validate(),
            Err(OptionsError::EdgeFriction(0.0))
        );
    }

    #[test]
    fn easing_by_name() {
        let options = CarouselOptions::default().with_easing_name("ease-out").unwrap();
        assert_eq!(options.easing, Easing::EaseOut);

        let err = CarouselOptions::default()
            .with_easing_name("elastic")
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown easing \"elastic\"");
    }

    #[test]
    fn arrow_markup_classification() {
        assert!(ArrowMarkup::new("  <a href='#'>prev</a>").is_html());
        assert!(ArrowMarkup::new("<span/>").is_html());
        assert!(!ArrowMarkup::new("#prev-button").is_html());
        assert!(!ArrowMarkup::new("<").is_html());
        assert!(!ArrowMarkup::new("").is_html());
    }
}
