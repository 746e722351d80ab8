// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability probe: does the host report style transition completion natively?
//!
//! The probe checks a fixed, priority-ordered list of style properties and
//! returns the completion event name paired with the first one the host
//! supports. When nothing matches, the carousel falls back to interpolating
//! panel properties itself; that is the expected path on older hosts, not an
//! error.
//!
//! ```
//! use understory_carousel::probe::{SupportedProperties, detect};
//!
//! let native = detect(&SupportedProperties(&["MozTransition", "transition"])).unwrap();
//! assert_eq!(native.end_event(), "transitionend");
//!
//! assert!(detect(&SupportedProperties(&[])).is_none());
//! ```

/// Style properties probed in priority order, paired with their completion event.
pub const TRANSITION_PROPERTIES: [(&str, &str); 4] = [
    ("webkitTransition", "webkitTransitionEnd"),
    ("MozTransition", "transitionend"),
    ("OTransition", "oTransitionEnd otransitionend"),
    ("transition", "transitionend"),
];

/// Host-side view of the style system, queried once per carousel.
pub trait StyleEnvironment {
    /// Returns `true` if the host recognizes the style property `name`.
    fn supports_property(&self, name: &str) -> bool;
}

impl<F> StyleEnvironment for F
where
    F: Fn(&str) -> bool,
{
    fn supports_property(&self, name: &str) -> bool {
        self(name)
    }
}

/// A fixed list of supported style property names.
#[derive(Copy, Clone, Debug)]
pub struct SupportedProperties<'a>(pub &'a [&'a str]);

impl StyleEnvironment for SupportedProperties<'_> {
    fn supports_property(&self, name: &str) -> bool {
        self.0.contains(&name)
    }
}

/// Native transition support: the completion event(s) the host will fire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeTransition {
    end_event: &'static str,
}

impl NativeTransition {
    /// Creates support for the given completion event.
    ///
    /// `end_event` may hold several whitespace-separated event names; any of
    /// them counts as the completion notification.
    #[must_use]
    pub const fn new(end_event: &'static str) -> Self {
        Self { end_event }
    }

    /// The completion event name(s) as reported by the probe.
    #[must_use]
    pub fn end_event(&self) -> &'static str {
        self.end_event
    }

    /// Iterates the individual completion event names.
    pub fn event_names(&self) -> impl Iterator<Item = &'static str> {
        self.end_event.split_whitespace()
    }

    /// Returns `true` if `event` is one of the completion event names.
    #[must_use]
    pub fn matches(&self, event: &str) -> bool {
        self.event_names().any(|name| name == event)
    }
}

/// Probes `env` and returns the first supported transition, if any.
pub fn detect<E>(env: &E) -> Option<NativeTransition>
where
    E: StyleEnvironment + ?Sized,
{
    TRANSITION_PROPERTIES
        .iter()
        .find(|(property, _)| env.supports_property(property))
        .map(|&(_, end_event)| NativeTransition::new(end_event))
}
