// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track transitions: the driver seam plus a tick-driven tween.
//!
//! The carousel never animates anything itself. It hands a
//! [`TransitionRequest`] to a [`TransitionDriver`] and polls it from
//! [`Carousel::tick`](crate::Carousel::tick). When the driver reports
//! [`TransitionFrame::Finished`] it returns the request's
//! [`CompletionToken`], which is the only way to release the animation lock.
//!
//! A driver backed by a host animation engine (CSS transitions, a compositor
//! animation) keeps the token until the host reports completion. The bundled
//! [`TweenDriver`] interpolates in software from host timestamps.
//!
//! ```
//! use understory_carousel::lock::AnimationLock;
//! use understory_carousel::transition::{
//!     Easing, TransitionDriver, TransitionFrame, TransitionRequest, TweenDriver,
//! };
//!
//! let mut lock = AnimationLock::default();
//! let mut driver = TweenDriver::default();
//! driver.start(TransitionRequest {
//!     from: 0.0,
//!     to: -500.0,
//!     duration_ms: 100,
//!     easing: Easing::Linear,
//!     token: lock.acquire(),
//! });
//!
//! assert_eq!(driver.poll(1_000), TransitionFrame::Running(0.0));
//! assert_eq!(driver.poll(1_050), TransitionFrame::Running(-250.0));
//! match driver.poll(1_100) {
//!     TransitionFrame::Finished(offset, token) => {
//!         assert_eq!(offset, -500.0);
//!         assert!(lock.release(token));
//!     }
//!     other => panic!("unexpected frame {other:?}"),
//! }
//! ```

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::lock::CompletionToken;

/// Easing curve applied to a transition's linear progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Cosine ease in and out, `0.5 - cos(πp) / 2`.
    Swing,
    /// Cubic ease in.
    EaseIn,
    /// Cubic ease out.
    EaseOut,
    /// Cubic ease in and out.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::Swing => 0.5 - (p * PI).cos() / 2.0,
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, p),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, p),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, p),
        }
    }

    /// Name used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Swing => "swing",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an easing name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEasing(pub alloc::string::String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing {:?}", self.0)
    }
}

impl core::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "swing" => Ok(Self::Swing),
            "ease-in" | "easeIn" => Ok(Self::EaseIn),
            "ease-out" | "easeOut" => Ok(Self::EaseOut),
            "ease-in-out" | "easeInOut" => Ok(Self::EaseInOut),
            other => Err(UnknownEasing(other.into())),
        }
    }
}

/// Solves a CSS-style cubic Bézier timing curve for `x = fraction`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let slope = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton first, bisection if the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = fraction;
        for _ in 0..32 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-7 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// A request to move the track from one offset to another.
#[derive(Debug)]
pub struct TransitionRequest {
    /// Offset the track is displayed at now.
    pub from: f64,
    /// Offset the track must end at.
    pub to: f64,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Easing curve.
    pub easing: Easing,
    /// Token to return once the track reaches `to`.
    pub token: CompletionToken,
}

/// What a driver reports on each poll.
#[derive(Debug, PartialEq)]
pub enum TransitionFrame {
    /// No transition in flight.
    Idle,
    /// In flight; display the track at this offset.
    Running(f64),
    /// Reached the target offset; the token must go back to the lock.
    Finished(f64, CompletionToken),
}

/// The animation primitive the carousel drives.
///
/// Implementations must hand each request's token back at most once, via
/// [`TransitionFrame::Finished`]. Starting a new request while one is in
/// flight supersedes it: the earlier token is dropped, never returned.
pub trait TransitionDriver {
    /// Begins a transition, superseding any in-flight one.
    fn start(&mut self, request: TransitionRequest);

    /// Advances to the host timestamp `now_ms`.
    fn poll(&mut self, now_ms: u64) -> TransitionFrame;

    /// Abandons any in-flight transition without completing it.
    fn cancel(&mut self);

    /// Returns `true` while a transition is in flight.
    fn is_running(&self) -> bool;
}

#[derive(Debug)]
struct Tween {
    from: f64,
    to: f64,
    duration_ms: u64,
    easing: Easing,
    started_ms: Option<u64>,
    token: CompletionToken,
}

impl Tween {
    fn sample(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let progress = elapsed_ms as f64 / self.duration_ms as f64;
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }
}

/// Software tween driven by host timestamps.
///
/// The clock starts on the first [`poll`](TransitionDriver::poll) after
/// [`start`](TransitionDriver::start), so the host does not need to pass a
/// timestamp when the transition is requested.
#[derive(Debug, Default)]
pub struct TweenDriver {
    active: Option<Tween>,
}

impl TransitionDriver for TweenDriver {
    fn start(&mut self, request: TransitionRequest) {
        if let Some(previous) = self.active.take() {
            log::debug!(
                "superseding transition generation {}",
                previous.token.generation()
            );
        }
        self.active = Some(Tween {
            from: request.from,
            to: request.to,
            duration_ms: request.duration_ms,
            easing: request.easing,
            started_ms: None,
            token: request.token,
        });
    }

    fn poll(&mut self, now_ms: u64) -> TransitionFrame {
        let Some(tween) = self.active.as_mut() else {
            return TransitionFrame::Idle;
        };
        let started = *tween.started_ms.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(started);
        if elapsed < tween.duration_ms {
            return TransitionFrame::Running(tween.sample(elapsed));
        }
        match self.active.take() {
            Some(done) => TransitionFrame::Finished(done.to, done.token),
            None => TransitionFrame::Idle,
        }
    }

    fn cancel(&mut self) {
        self.active = None;
    }

    fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::lock::AnimationLock;

    fn request(lock: &mut AnimationLock, from: f64, to: f64, duration_ms: u64) -> TransitionRequest {
        TransitionRequest {
            from,
            to,
            duration_ms,
            easing: Easing::Linear,
            token: lock.acquire(),
        }
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::Swing,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing} at 1");
            assert!((easing.apply(-3.0)).abs() < 1e-9, "{easing} clamps low");
        }
    }

    #[test]
    fn swing_and_ease_in_out_are_symmetric_at_midpoint() {
        assert!((Easing::Swing.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-4);
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn easing_names_round_trip() {
        assert_eq!("swing".parse::<Easing>(), Ok(Easing::Swing));
        assert_eq!("easeInOut".parse::<Easing>(), Ok(Easing::EaseInOut));
        assert_eq!(Easing::EaseOut.to_string(), "ease-out");
        assert_eq!(
            "bounce".parse::<Easing>(),
            Err(UnknownEasing("bounce".into()))
        );
    }

    #[test]
    fn idle_driver_reports_idle() {
        let mut driver = TweenDriver::default();
        assert_eq!(driver.poll(0), TransitionFrame::Idle);
        assert!(!driver.is_running());
    }

    #[test]
    fn tween_interpolates_then_finishes_once() {
        let mut lock = AnimationLock::default();
        let mut driver = TweenDriver::default();
        driver.start(request(&mut lock, 100.0, 300.0, 200));

        assert_eq!(driver.poll(10), TransitionFrame::Running(100.0));
        assert_eq!(driver.poll(60), TransitionFrame::Running(150.0));
        assert_eq!(driver.poll(160), TransitionFrame::Running(250.0));
        let TransitionFrame::Finished(offset, token) = driver.poll(500) else {
            panic!("tween should have finished");
        };
        assert_eq!(offset, 300.0);
        assert!(lock.release(token));
        assert_eq!(driver.poll(600), TransitionFrame::Idle);
    }

    #[test]
    fn zero_duration_finishes_on_first_poll() {
        let mut lock = AnimationLock::default();
        let mut driver = TweenDriver::default();
        driver.start(request(&mut lock, -250.0, -250.0, 0));
        assert!(matches!(
            driver.poll(42),
            TransitionFrame::Finished(offset, _) if offset == -250.0
        ));
    }

    #[test]
    fn restart_supersedes_previous_token() {
        let mut lock = AnimationLock::default();
        let mut driver = TweenDriver::default();
        driver.start(request(&mut lock, 0.0, -100.0, 100));
        driver.poll(0);
        driver.start(request(&mut lock, -50.0, -200.0, 100));

        assert_eq!(driver.poll(1_000), TransitionFrame::Running(-50.0));
        let TransitionFrame::Finished(offset, token) = driver.poll(1_100) else {
            panic!("second tween should finish");
        };
        assert_eq!(offset, -200.0);
        assert!(lock.release(token));
        assert!(!lock.is_held());
    }

    #[test]
    fn cancel_drops_token() {
        let mut lock = AnimationLock::default();
        let mut driver = TweenDriver::default();
        driver.start(request(&mut lock, 0.0, -100.0, 100));
        driver.cancel();
        assert!(!driver.is_running());
        assert_eq!(driver.poll(1_000), TransitionFrame::Idle);
        assert!(lock.is_held());
    }
}
