// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel widget: one instance composing geometry, index, gesture,
//! transition and arrow state over host-provided seams.

use smallvec::SmallVec;

use crate::command::{Command, DispatchError, Reply};
use crate::controls::{self, ArrowState};
use crate::geometry::Geometry;
use crate::gesture::{DragContext, GestureClassifier, GestureEnd, PointerSample};
use crate::index::{SlideIndex, Step};
use crate::lock::CompletionToken;
use crate::options::{CarouselOptions, OptionsError};
use crate::surface::{Channel, EventSource, LayoutSurface, Mutation, Subscription};
use crate::transition::{TransitionDriver, TransitionFrame, TransitionRequest};

/// Phase of a pointer or touch event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// `touchstart` / `mousedown`.
    Start,
    /// `touchmove` / `mousemove`.
    Move,
    /// `touchend` / `mouseup`, and also `touchcancel` / `mouseout`.
    End,
}

/// Input delivered by the host's event source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// An arrow control was activated.
    Arrow(Step),
    /// A pointer or touch sample on the list.
    Pointer(PointerPhase, PointerSample),
    /// The viewport changed size (already debounced by the host).
    Resize,
}

/// A carousel over a host [`LayoutSurface`], [`TransitionDriver`] and
/// [`EventSource`].
///
/// All methods run synchronously on the thread delivering input. While a
/// transition holds the lock, arrow presses and swipe commits are dropped;
/// resizes that arrive mid-drag or mid-transition are deferred until the
/// carousel settles.
#[derive(Debug)]
pub struct Carousel<S, D, E> {
    options: CarouselOptions,
    surface: S,
    driver: D,
    events: E,
    index: SlideIndex,
    geometry: Geometry,
    gesture: GestureClassifier,
    track_offset: f64,
    subscriptions: SmallVec<[Subscription; 4]>,
    initialized: bool,
    resize_pending: bool,
}

impl<S, D, E> Carousel<S, D, E>
where
    S: LayoutSurface,
    D: TransitionDriver,
    E: EventSource,
{
    /// Creates an uninitialized carousel. Nothing touches the surface until
    /// [`initialize`](Self::initialize).
    pub fn new(
        options: CarouselOptions,
        surface: S,
        driver: D,
        events: E,
    ) -> Result<Self, OptionsError> {
        options.validate()?;
        let index = SlideIndex::new(
            options.initial_slide,
            0,
            options.slides_to_show,
            options.slides_to_scroll,
        );
        Ok(Self {
            options,
            surface,
            driver,
            events,
            index,
            geometry: Geometry::default(),
            gesture: GestureClassifier::default(),
            track_offset: 0.0,
            subscriptions: SmallVec::new(),
            initialized: false,
            resize_pending: false,
        })
    }

    /// Options this carousel was built with.
    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Returns `true` between [`initialize`](Self::initialize) and
    /// [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Committed slide index.
    #[must_use]
    pub fn current_slide(&self) -> usize {
        self.index.current()
    }

    /// Number of slides found at initialization.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.index.slide_count()
    }

    /// Returns `true` while a transition holds the lock.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.index.is_animating()
    }

    /// Returns `true` while a drag gesture is live.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Most recent measurement.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Offset the track is currently displayed at.
    #[must_use]
    pub fn track_offset(&self) -> f64 {
        self.track_offset
    }

    /// Offset of the committed index.
    #[must_use]
    pub fn committed_offset(&self) -> f64 {
        self.geometry.offset_for_index(self.index.current())
    }

    /// Arrow affordances for the committed index.
    #[must_use]
    pub fn arrow_state(&self) -> ArrowState {
        if !self.options.arrows {
            return ArrowState::HIDDEN;
        }
        controls::arrow_state(
            self.index.current(),
            self.index.slide_count(),
            self.index.slides_to_show(),
        )
    }

    /// The layout surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The layout surface, mutably. Changes to its width are picked up by the
    /// next [`resize`](Self::resize).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The transition driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The transition driver, mutably, for hosts that feed completion into it.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The event source.
    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Builds the carousel on its surface and binds its listeners.
    ///
    /// Calling this on an initialized carousel does nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            log::debug!("carousel already initialized");
            return;
        }
        self.initialized = true;

        let slide_count = self.surface.slide_count();
        self.index.set_slide_count(slide_count);
        self.index.reset(self.options.initial_slide);

        self.surface.apply(Mutation::Mount { slide_count });
        if self.options.arrows {
            self.surface.apply(Mutation::MountArrows {
                prev: self.options.prev_arrow.clone(),
                next: self.options.next_arrow.clone(),
                visible: self.index.is_pageable(),
            });
        }
        self.refresh_active_slides();

        self.surface.apply(Mutation::Loading(true));
        self.apply_dimensions();
        self.surface.apply(Mutation::Loading(false));

        self.bind_events();
        self.refresh_arrows();
        log::debug!(
            "carousel initialized: {slide_count} slides, current {}",
            self.index.current()
        );
    }

    /// Pages by one step and returns the committed index.
    ///
    /// Dropped (index unchanged) while uninitialized or while a transition is
    /// in flight. An accepted move that clamps to the same index still plays
    /// a zero-distance transition and takes the lock.
    pub fn navigate(&mut self, step: Step) -> usize {
        if !self.initialized {
            return self.index.current();
        }
        let Some((slide, token)) = self.index.request_move(step) else {
            return self.index.current();
        };
        self.start_transition(token);
        self.refresh_active_slides();
        self.refresh_arrows();
        slide
    }

    /// Routes one host input event.
    pub fn handle(&mut self, event: InputEvent) {
        if !self.initialized {
            log::trace!("ignoring {event:?}: carousel not initialized");
            return;
        }
        match event {
            InputEvent::Arrow(step) => {
                let channel = match step {
                    Step::Previous => Channel::PrevArrow,
                    Step::Next => Channel::NextArrow,
                };
                if self.is_subscribed(channel) {
                    self.navigate(step);
                }
            }
            InputEvent::Pointer(PointerPhase::Start, sample) => self.pointer_start(sample),
            InputEvent::Pointer(PointerPhase::Move, sample) => self.pointer_move(sample),
            InputEvent::Pointer(PointerPhase::End, _) => self.pointer_end(),
            InputEvent::Resize => self.resize(),
        }
    }

    /// Starts a drag gesture.
    pub fn pointer_start(&mut self, sample: PointerSample) {
        if !self.initialized {
            return;
        }
        let ctx = self.drag_context();
        self.gesture.start(sample, &ctx);
    }

    /// Applies a drag sample and shows the live offset.
    pub fn pointer_move(&mut self, sample: PointerSample) {
        let ctx = self.drag_context();
        if let Some(offset) = self.gesture.update(sample, &ctx) {
            self.set_track_offset(offset);
        }
    }

    /// Ends a drag gesture: commit, settle back, or nothing.
    pub fn pointer_end(&mut self) {
        match self.gesture.end() {
            GestureEnd::Commit(step) => {
                self.navigate(step);
            }
            GestureEnd::Settle => self.settle(),
            GestureEnd::Ignore => {}
        }
        self.flush_resize();
    }

    /// Re-measures the list after a viewport change.
    ///
    /// Deferred while dragging or animating; a no-op when the width did not
    /// change.
    pub fn resize(&mut self) {
        if !self.initialized {
            return;
        }
        if self.index.is_animating() || self.gesture.is_dragging() {
            log::debug!("deferring resize until the carousel settles");
            self.resize_pending = true;
            return;
        }
        self.resize_pending = false;
        let measured = Geometry::measure(
            self.surface.list_width(),
            self.index.slide_count(),
            self.index.slides_to_show(),
        );
        if measured == self.geometry {
            return;
        }
        self.apply_dimensions();
    }

    /// Advances the transition driver to `now_ms` and applies its frame.
    pub fn tick(&mut self, now_ms: u64) {
        match self.driver.poll(now_ms) {
            TransitionFrame::Idle => {}
            TransitionFrame::Running(offset) => self.set_track_offset(offset),
            TransitionFrame::Finished(offset, token) => {
                self.set_track_offset(offset);
                if self.index.finish(token) {
                    self.flush_resize();
                }
            }
        }
    }

    /// Unbinds listeners, abandons any transition or gesture, restores the
    /// original markup and returns to the initial slide.
    ///
    /// Calling this on an uninitialized carousel does nothing.
    pub fn destroy(&mut self) {
        if !self.initialized {
            return;
        }
        self.gesture.cancel();
        for subscription in self.subscriptions.drain(..) {
            self.events.unsubscribe(subscription);
        }
        self.driver.cancel();
        self.index.set_slide_count(0);
        self.index.reset(self.options.initial_slide);
        self.geometry = Geometry::default();
        self.track_offset = 0.0;
        self.resize_pending = false;
        self.surface.apply(Mutation::Unmount);
        self.initialized = false;
        log::debug!("carousel destroyed");
    }

    /// Runs a command by name.
    pub fn dispatch(&mut self, name: &str) -> Result<Reply, DispatchError> {
        let command: Command = name.parse()?;
        Ok(self.run(command))
    }

    /// Runs a parsed command.
    pub fn run(&mut self, command: Command) -> Reply {
        match command {
            Command::Initialize => {
                self.initialize();
                Reply::Done
            }
            Command::Previous => Reply::Slide(self.navigate(Step::Previous)),
            Command::Next => Reply::Slide(self.navigate(Step::Next)),
            Command::Resize => {
                self.resize();
                Reply::Done
            }
            Command::CurrentSlide => Reply::Slide(self.index.current()),
            Command::Destroy => {
                self.destroy();
                Reply::Done
            }
        }
    }

    fn bind_events(&mut self) {
        if self.options.arrows && self.index.is_pageable() {
            self.subscriptions
                .push(self.events.subscribe(Channel::PrevArrow));
            self.subscriptions
                .push(self.events.subscribe(Channel::NextArrow));
        }
        self.subscriptions
            .push(self.events.subscribe(Channel::Pointer));
        self.subscriptions.push(self.events.subscribe(Channel::Resize));
    }

    fn is_subscribed(&self, channel: Channel) -> bool {
        self.subscriptions.iter().any(|s| s.channel == channel)
    }

    fn drag_context(&self) -> DragContext {
        DragContext {
            committed_offset: self.committed_offset(),
            at_start: self.index.at_start(),
            at_end: self.index.at_end(),
            pageable: self.index.is_pageable(),
            animating: self.index.is_animating(),
            min_swipe: self.geometry.min_swipe(self.options.touch_threshold),
            edge_friction: self.options.edge_friction,
        }
    }

    fn settle(&mut self) {
        match self.index.request_settle() {
            Some(token) => self.start_transition(token),
            None => log::debug!("skipping settle: transition already in flight"),
        }
    }

    fn start_transition(&mut self, token: CompletionToken) {
        self.driver.start(TransitionRequest {
            from: self.track_offset,
            to: self.committed_offset(),
            duration_ms: self.options.speed_ms,
            easing: self.options.easing,
            token,
        });
    }

    fn apply_dimensions(&mut self) {
        self.geometry = Geometry::measure(
            self.surface.list_width(),
            self.index.slide_count(),
            self.index.slides_to_show(),
        );
        self.surface
            .apply(Mutation::TrackWidth(self.geometry.track_width()));
        let chrome = self.surface.slide_chrome();
        self.surface.apply(Mutation::SlideWidth(
            self.geometry.slide_content_width(chrome),
        ));
        self.set_track_offset(self.committed_offset());
    }

    fn flush_resize(&mut self) {
        if self.resize_pending && !self.index.is_animating() && !self.gesture.is_dragging() {
            self.resize();
        }
    }

    fn refresh_active_slides(&mut self) {
        self.surface
            .apply(Mutation::ActiveSlides(self.index.active_range()));
    }

    fn refresh_arrows(&mut self) {
        if self.options.arrows {
            self.surface.apply(Mutation::Arrows(self.arrow_state()));
        }
    }

    fn set_track_offset(&mut self, offset: f64) {
        self.track_offset = offset;
        self.surface.apply(Mutation::TrackOffset(offset));
    }
}
