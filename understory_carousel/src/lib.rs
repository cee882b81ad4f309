// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless paging carousel core.
//!
//! This crate turns a container of slides into a paged strip that advances by
//! arrow presses or swipe gestures. It owns the parts that need state across
//! events and leaves every visual and platform concern to the host:
//!
//! - [`geometry`]: slide width, track width and per-index track offsets.
//! - [`index`]: the committed slide index, saturating moves, and the
//!   [`lock`] that keeps at most one transition in flight.
//! - [`gesture`]: classifies pointer/touch samples into a live drag offset
//!   and a commit, settle, or ignore decision, with edge friction at either end.
//! - [`transition`]: the [`TransitionDriver`] seam plus a tick-driven
//!   [`TweenDriver`].
//! - [`controls`]: arrow enabled/disabled/hidden state.
//! - [`surface`]: the [`LayoutSurface`] the carousel measures and mutates and
//!   the [`EventSource`] it subscribes to.
//! - [`Carousel`]: one instance composing all of the above, and
//!   [`CarouselRegistry`] for pages that host several.
//!
//! ## Design Philosophy
//!
//! - **Headless**: no element tree, no timers, no listeners of its own.
//! - **Synchronous**: every method runs to completion on the input thread.
//! - **Structural locking**: the animation lock can only be released by the
//!   [`CompletionToken`](lock::CompletionToken) its acquisition produced.
//! - **No steady-state errors**: invalid input degrades to a no-op; only
//!   option validation and name dispatch return errors.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::{
//!     Carousel, CarouselOptions, Channel, EventSource, InputEvent, LayoutSurface, Mutation,
//!     PointerPhase, PointerSample, Subscription, TweenDriver,
//! };
//!
//! #[derive(Default)]
//! struct Page {
//!     offset: f64,
//! }
//!
//! impl LayoutSurface for Page {
//!     fn list_width(&self) -> f64 {
//!         500.0
//!     }
//!     fn slide_count(&self) -> usize {
//!         6
//!     }
//!     fn apply(&mut self, mutation: Mutation) {
//!         if let Mutation::TrackOffset(offset) = mutation {
//!             self.offset = offset;
//!         }
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Listeners(u64);
//!
//! impl EventSource for Listeners {
//!     fn subscribe(&mut self, channel: Channel) -> Subscription {
//!         self.0 += 1;
//!         Subscription { channel, id: self.0 }
//!     }
//!     fn unsubscribe(&mut self, _: Subscription) {}
//! }
//!
//! let mut carousel = Carousel::new(
//!     CarouselOptions::default(),
//!     Page::default(),
//!     TweenDriver::default(),
//!     Listeners::default(),
//! )
//! .unwrap();
//! carousel.initialize();
//!
//! // A 150px leftward swipe on a 500px list passes the 100px threshold.
//! carousel.handle(InputEvent::Pointer(PointerPhase::Start, PointerSample::mouse(400.0, 10.0)));
//! carousel.handle(InputEvent::Pointer(PointerPhase::Move, PointerSample::mouse(250.0, 12.0)));
//! carousel.handle(InputEvent::Pointer(PointerPhase::End, PointerSample::mouse(250.0, 12.0)));
//! assert_eq!(carousel.current_slide(), 2);
//!
//! // Drive the transition from the host's frame clock.
//! carousel.tick(0);
//! carousel.tick(500);
//! assert!(!carousel.is_animating());
//! assert_eq!(carousel.surface().offset, -500.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: use `libm` for float functions in `no_std` builds.
//! - `serde`: deserialize [`CarouselOptions`] from camelCase keys.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod carousel;
pub mod command;
pub mod controls;
pub mod geometry;
pub mod gesture;
pub mod index;
pub mod lock;
pub mod options;
mod registry;
pub mod surface;
pub mod transition;

pub use carousel::{Carousel, InputEvent, PointerPhase};
pub use command::{Command, DispatchError, Reply};
pub use controls::ArrowState;
pub use gesture::{PointerSample, SwipeDirection};
pub use index::Step;
pub use options::{ArrowMarkup, CarouselOptions, OptionsError};
pub use registry::CarouselRegistry;
pub use surface::{Channel, EventSource, LayoutSurface, Mutation, Subscription};
pub use transition::{Easing, TransitionDriver, TweenDriver};
