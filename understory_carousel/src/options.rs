// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options and transition effects.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::pipeline::Easing;

/// Visual effect used to hand off between panels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Cross-fade between the outgoing and incoming panel.
    #[default]
    Fade,
    /// Horizontal slide.
    Slide,
    /// Vertical slide, upwards.
    SlideUp,
    /// Vertical slide, downwards.
    SlideDown,
}

impl Effect {
    /// Style class placed on the inner wrapper when the host animates natively.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
        }
    }

    /// Option name as accepted by [`FromStr`].
    #[must_use]
    pub const fn option_name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::SlideUp => "slideUp",
            Self::SlideDown => "slideDown",
        }
    }

    /// Returns `true` for the slide variants.
    #[must_use]
    pub const fn is_slide(self) -> bool {
        !matches!(self, Self::Fade)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option_name())
    }
}

/// Error returned when an effect name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEffectError {
    name: String,
}

impl ParseEffectError {
    /// The rejected effect name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown carousel effect {:?}, expected one of fade, slide, slideUp, slideDown",
            self.name
        )
    }
}

impl core::error::Error for ParseEffectError {}

impl FromStr for Effect {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fade" => Ok(Self::Fade),
            "slide" => Ok(Self::Slide),
            "slideUp" => Ok(Self::SlideUp),
            "slideDown" => Ok(Self::SlideDown),
            other => Err(ParseEffectError { name: other.into() }),
        }
    }
}

/// Default autoplay interval, in milliseconds.
pub const DEFAULT_INTERVAL: u64 = 3500;

/// Interval used when the configured one is zero.
pub const FALLBACK_INTERVAL: u64 = 3000;

/// Default interpolation duration for the fallback pipeline, in milliseconds.
pub const DEFAULT_DURATION: u64 = 800;

/// Options recognized when building a [`Carousel`](crate::Carousel).
///
/// All times are milliseconds on the host's clock.
///
/// ```
/// use understory_carousel::{CarouselOptions, Effect};
///
/// let options = CarouselOptions::default()
///     .with_effect(Effect::SlideUp)
///     .with_auto(false)
///     .with_idx(2);
/// assert_eq!(options.on_class, "active");
/// assert_eq!(options.effect, Effect::SlideUp);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselOptions {
    /// Class of the inner wrapper element around the panels.
    pub wrap_class: String,
    /// Class marking the active panel.
    pub on_class: String,
    /// Render prev/next buttons.
    pub control: bool,
    /// Transition effect.
    pub effect: Effect,
    /// Label markup of the previous button.
    pub prev: String,
    /// Label markup of the next button.
    pub next: String,
    /// Autoplay delay. Zero means [`FALLBACK_INTERVAL`].
    pub interval: u64,
    /// Enable autoplay with pause-on-hover.
    pub auto: bool,
    /// Render pagination.
    pub page: bool,
    /// Initially active panel.
    pub idx: usize,
    /// Fixed label for every pagination item; items are numbered from 1 when unset.
    pub trigger: Option<String>,
    /// Fallback pipeline interpolation duration.
    pub duration: u64,
    /// Fallback pipeline easing curve.
    pub easing: Easing,
    /// Force-commit a native transition whose completion never arrives.
    ///
    /// `None` waits forever.
    pub completion_timeout: Option<u64>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            wrap_class: "switch-in".into(),
            on_class: "active".into(),
            control: true,
            effect: Effect::Fade,
            prev: "&#8249;".into(),
            next: "&#8250;".into(),
            interval: DEFAULT_INTERVAL,
            auto: true,
            page: true,
            idx: 0,
            trigger: None,
            duration: DEFAULT_DURATION,
            easing: Easing::Smooth,
            completion_timeout: None,
        }
    }
}

impl CarouselOptions {
    /// Sets [`wrap_class`](Self::wrap_class).
    #[must_use]
    pub fn with_wrap_class(mut self, class: impl Into<String>) -> Self {
        self.wrap_class = class.into();
        self
    }

    /// Sets [`on_class`](Self::on_class).
    #[must_use]
    pub fn with_on_class(mut self, class: impl Into<String>) -> Self {
        self.on_class = class.into();
        self
    }

    /// Sets [`control`](Self::control).
    #[must_use]
    pub fn with_control(mut self, control: bool) -> Self {
        self.control = control;
        self
    }

    /// Sets [`effect`](Self::effect).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Sets the prev/next button labels.
    #[must_use]
    pub fn with_labels(mut self, prev: impl Into<String>, next: impl Into<String>) -> Self {
        self.prev = prev.into();
        self.next = next.into();
        self
    }

    /// Sets [`interval`](Self::interval).
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Sets [`auto`](Self::auto).
    #[must_use]
    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    /// Sets [`page`](Self::page).
    #[must_use]
    pub fn with_page(mut self, page: bool) -> Self {
        self.page = page;
        self
    }

    /// Sets [`idx`](Self::idx).
    #[must_use]
    pub fn with_idx(mut self, idx: usize) -> Self {
        self.idx = idx;
        self
    }

    /// Sets [`trigger`](Self::trigger).
    #[must_use]
    pub fn with_trigger(mut self, label: impl Into<String>) -> Self {
        self.trigger = Some(label.into());
        self
    }

    /// Sets [`duration`](Self::duration) and [`easing`](Self::easing).
    #[must_use]
    pub fn with_interpolation(mut self, duration: u64, easing: Easing) -> Self {
        self.duration = duration;
        self.easing = easing;
        self
    }

    /// Sets [`completion_timeout`](Self::completion_timeout).
    #[must_use]
    pub fn with_completion_timeout(mut self, timeout: Option<u64>) -> Self {
        self.completion_timeout = timeout;
        self
    }

    /// The autoplay interval after applying the zero fallback.
    #[must_use]
    pub fn effective_interval(&self) -> u64 {
        if self.interval == 0 {
            FALLBACK_INTERVAL
        } else {
            self.interval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn parses_option_names() {
        assert_eq!("fade".parse(), Ok(Effect::Fade));
        assert_eq!("slide".parse(), Ok(Effect::Slide));
        assert_eq!("slideUp".parse(), Ok(Effect::SlideUp));
        assert_eq!("slideDown".parse(), Ok(Effect::SlideDown));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "slide-up".parse::<Effect>().unwrap_err();
        assert_eq!(err.name(), "slide-up");
        assert!(err.to_string().contains("slideUp"));
    }

    #[test]
    fn class_names_differ_from_option_names() {
        assert_eq!(Effect::SlideDown.class_name(), "slide-down");
        assert_eq!(Effect::SlideDown.to_string(), "slideDown");
        assert!(!Effect::Fade.is_slide());
        assert!(Effect::SlideUp.is_slide());
    }

    #[test]
    fn defaults_match_plugin_settings() {
        let options = CarouselOptions::default();
        assert_eq!(options.wrap_class, "switch-in");
        assert_eq!(options.interval, 3500);
        assert!(options.control && options.auto && options.page);
        assert_eq!(options.idx, 0);
        assert_eq!(options.duration, 800);
        assert_eq!(options.completion_timeout, None);
    }

    #[test]
    fn zero_interval_falls_back() {
        assert_eq!(
            CarouselOptions::default().with_interval(0).effective_interval(),
            FALLBACK_INTERVAL
        );
        assert_eq!(
            CarouselOptions::default().with_interval(1200).effective_interval(),
            1200
        );
    }
}
