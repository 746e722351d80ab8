// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: headless carousel (slider) primitives.
//!
//! This crate owns the _state machine_ of a carousel: which panel is active,
//! how a request to move becomes a transition, and how that transition is
//! sequenced so exactly one visual pipeline drives it. It does not render
//! anything. A host renders the [`Layout`], mirrors the emitted
//! [`HostCommand`]s onto its elements, and feeds back input and time.
//!
//! The core type is [`Carousel`]. It tracks:
//! - A fixed, ordered set of panels and the committed active index ([`panel`]).
//! - At most one in-flight transition; requests made meanwhile are dropped.
//! - The animation pipeline selected once from the [`probe`]: native class
//!   transitions with a completion event, or property interpolation.
//! - Optional autoplay with pause-on-hover ([`autoplay`]).
//! - Navigation buttons and pagination ([`controls`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::{Carousel, CarouselOptions, Control, Effect};
//!
//! // No native transition support: the carousel interpolates itself.
//! let options = CarouselOptions::default()
//!     .with_effect(Effect::Slide)
//!     .with_auto(false);
//! let mut carousel = Carousel::new(3, options, &|_: &str| false);
//!
//! // Pagination item 2 clicked while panel 0 is active.
//! let response = carousel.click(Control::Page(2));
//! assert!(response.prevent_default);
//! let plan = response.plan.unwrap();
//! assert_eq!((plan.from, plan.to), (0, 2));
//!
//! // Drive the clock past the 800ms default duration.
//! carousel.advance(0);
//! carousel.advance(800);
//! assert_eq!(carousel.active_index(), Some(2));
//! assert_eq!(carousel.layout().unwrap().pagination.as_ref().unwrap().active(), 2);
//! ```
//!
//! ## Transitions
//!
//! Requests are [`TransitionRequest::Next`], [`TransitionRequest::Prev`] or
//! [`TransitionRequest::To`]. Relative requests wrap around the ends; absolute
//! requests to the current panel, or out of range, are ignored. Direction is
//! forward for `Next`, backward for `Prev`, and numeric for absolute jumps. See
//! [`plan::resolve`].
//!
//! Under native support, a fade swaps the active class immediately and waits for
//! the completion event; slides mark the incoming panel with `next`/`prev`,
//! request a reflow, mark both panels with `from`/`to`, and swap the active
//! class when the event arrives. Without native support the carousel
//! interpolates opacity or offsets on [`Carousel::advance`] and swaps classes
//! when the interpolation ends.
//!
//! In both cases the committed index changes exactly once, at the end, and a
//! [`HostCommand::Committed`] is emitted.
//!
//! ## Failure modes
//!
//! Nothing here returns an error: invalid requests are no-ops. If a host never
//! delivers the completion event, the carousel stays in flight forever unless
//! [`CarouselOptions::completion_timeout`] is set.
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through the `log`
//! facade.

#![no_std]

extern crate alloc;

pub mod autoplay;
mod carousel;
pub mod controls;
pub mod options;
pub mod panel;
pub mod pipeline;
pub mod plan;
pub mod probe;

pub use carousel::{Carousel, ClickResponse, HostCommand};
pub use controls::{Control, Layout, Pagination};
pub use options::{CarouselOptions, Effect, ParseEffectError};
pub use panel::{Panel, PanelClasses, PanelRegistry, PanelStyle};
pub use pipeline::{AnimationPipeline, Easing};
pub use plan::{TransitionPlan, TransitionRequest, TravelDirection};
pub use probe::NativeTransition;
