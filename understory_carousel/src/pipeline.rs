// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation pipelines: native class transitions or property interpolation.
//!
//! A carousel selects its pipeline once, from the [capability probe](crate::probe):
//!
//! - [`AnimationPipeline::Declarative`]: the host animates class changes itself and
//!   reports completion through a named event.
//! - [`AnimationPipeline::Interpolated`]: the carousel computes panel styles for
//!   each clock tick over a fixed duration.
//!
//! This module holds the pipeline selection plus the pure interpolation math.
//! Sequencing of class mutations lives in [`Carousel`](crate::Carousel).

use kurbo::Vec2;

use crate::options::Effect;
use crate::panel::PanelStyle;
use crate::plan::{TransitionPlan, TravelDirection};
use crate::probe::NativeTransition;

/// Offset magnitude of a panel parked outside the wrapper, in percent.
pub const OFFSCREEN: f64 = 100.0;

/// The visual pipeline driving transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationPipeline {
    /// Class changes animated by the host, completed by a native notification.
    Declarative(NativeTransition),
    /// Panel properties interpolated by the carousel.
    Interpolated {
        /// Length of each transition, in milliseconds.
        duration: u64,
        /// Easing curve.
        easing: Easing,
    },
}

impl AnimationPipeline {
    /// Picks the declarative pipeline when native support was detected.
    #[must_use]
    pub fn select(native: Option<NativeTransition>, duration: u64, easing: Easing) -> Self {
        match native {
            Some(native) => Self::Declarative(native),
            None => Self::Interpolated { duration, easing },
        }
    }

    /// Returns `true` for [`AnimationPipeline::Declarative`].
    #[must_use]
    pub fn is_declarative(&self) -> bool {
        matches!(self, Self::Declarative(_))
    }
}

/// Easing curve for interpolated transitions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end (smoothstep).
    #[default]
    Smooth,
}

impl Easing {
    /// Maps linear progress in `0.0..=1.0` onto the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Exit offset of the outgoing panel and entry offset of the incoming panel.
///
/// Returns `None` for [`Effect::Fade`].
#[must_use]
pub fn slide_offsets(effect: Effect, direction: TravelDirection) -> Option<(Vec2, Vec2)> {
    let sign = direction.sign();
    let (exit, entry) = match effect {
        Effect::Fade => return None,
        Effect::Slide => (Vec2::new(-sign, 0.0), Vec2::new(sign, 0.0)),
        Effect::SlideUp => (Vec2::new(0.0, sign), Vec2::new(0.0, -sign)),
        Effect::SlideDown => (Vec2::new(0.0, -sign), Vec2::new(0.0, sign)),
    };
    Some((exit * OFFSCREEN, entry * OFFSCREEN))
}

/// Styles every panel starts with under the interpolated pipeline.
#[must_use]
pub fn resting_style(effect: Effect, active: bool) -> PanelStyle {
    if effect.is_slide() {
        PanelStyle {
            visible: active,
            ..PanelStyle::default()
        }
    } else {
        PanelStyle {
            opacity: if active { 1.0 } else { 0.0 },
            ..PanelStyle::default()
        }
    }
}

/// One in-flight interpolated transition.
///
/// The clock starts at the first [`Interpolation::progress`] call, so requests
/// need no timestamp.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interpolation {
    effect: Effect,
    direction: TravelDirection,
    duration: u64,
    easing: Easing,
    started_at: Option<u64>,
}

impl Interpolation {
    /// Prepares an interpolation for `plan`.
    #[must_use]
    pub fn new(plan: &TransitionPlan, effect: Effect, duration: u64, easing: Easing) -> Self {
        Self {
            effect,
            direction: plan.direction,
            duration,
            easing,
            started_at: None,
        }
    }

    /// Linear progress at `now`, in `0.0..=1.0`.
    pub fn progress(&mut self, now: u64) -> f64 {
        let start = *self.started_at.get_or_insert(now);
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start);
        (elapsed as f64 / self.duration as f64).min(1.0)
    }

    /// Outgoing and incoming styles at linear progress `t`.
    #[must_use]
    pub fn sample(&self, t: f64) -> (PanelStyle, PanelStyle) {
        let eased = self.easing.apply(t);
        match slide_offsets(self.effect, self.direction) {
            None => (
                PanelStyle {
                    opacity: 1.0 - eased,
                    ..PanelStyle::default()
                },
                PanelStyle {
                    opacity: eased,
                    ..PanelStyle::default()
                },
            ),
            Some((exit, entry)) => (
                PanelStyle {
                    offset: Vec2::ZERO.lerp(exit, eased),
                    ..PanelStyle::default()
                },
                PanelStyle {
                    offset: entry.lerp(Vec2::ZERO, eased),
                    ..PanelStyle::default()
                },
            ),
        }
    }
}
