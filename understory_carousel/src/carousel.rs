// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition engine.
//!
//! [`Carousel`] accepts at most one transition at a time. A request that
//! arrives while a transition is in flight is dropped, never queued. Every
//! accepted transition ends in exactly one commit, whichever pipeline ran it.

use smallvec::SmallVec;

use crate::autoplay::Autoplay;
use crate::controls::{Control, Layout};
use crate::options::CarouselOptions;
use crate::panel::{PanelClasses, PanelRegistry, PanelStyle};
use crate::pipeline::{AnimationPipeline, Interpolation, resting_style};
use crate::plan::{TransitionPlan, TransitionRequest, TravelDirection, resolve};
use crate::probe::{NativeTransition, StyleEnvironment, detect};

/// A mutation for the host to apply, in order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HostCommand {
    /// Add class markers to a panel.
    AddClass {
        /// Panel index.
        panel: usize,
        /// Markers to add.
        classes: PanelClasses,
    },
    /// Remove class markers from a panel.
    RemoveClass {
        /// Panel index.
        panel: usize,
        /// Markers to remove.
        classes: PanelClasses,
    },
    /// Force a style recalculation of a panel before continuing.
    Reflow {
        /// Panel index.
        panel: usize,
    },
    /// Replace a panel's inline style.
    SetStyle {
        /// Panel index.
        panel: usize,
        /// The new style.
        style: PanelStyle,
    },
    /// Attach a one-shot listener for the completion event(s).
    Subscribe {
        /// Event name(s), whitespace separated.
        event: &'static str,
    },
    /// Detach the completion listener.
    Unsubscribe {
        /// Event name(s), whitespace separated.
        event: &'static str,
    },
    /// A transition finished and the active panel changed.
    Committed(TransitionPlan),
}

/// Commands held inline before spilling to the heap; one transition emits at most seven.
const INLINE_COMMANDS: usize = 8;

type CommandQueue = SmallVec<[HostCommand; INLINE_COMMANDS]>;

/// Result of a click on a control.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClickResponse {
    /// The host should suppress the default link navigation.
    pub prevent_default: bool,
    /// The transition started by the click, if one was accepted.
    pub plan: Option<TransitionPlan>,
}

/// The one listener attached for an in-flight native transition.
///
/// Attaching emits [`HostCommand::Subscribe`]; detaching consumes the listener
/// and emits [`HostCommand::Unsubscribe`].
#[derive(Debug)]
struct CompletionListener {
    native: NativeTransition,
}

impl CompletionListener {
    fn attach(native: NativeTransition, commands: &mut CommandQueue) -> Self {
        commands.push(HostCommand::Subscribe {
            event: native.end_event(),
        });
        Self { native }
    }

    fn detach(self, commands: &mut CommandQueue) {
        commands.push(HostCommand::Unsubscribe {
            event: self.native.end_event(),
        });
    }
}

#[derive(Debug)]
enum InFlight {
    Native {
        plan: TransitionPlan,
        listener: CompletionListener,
        waiting_since: Option<u64>,
    },
    Interpolating {
        plan: TransitionPlan,
        interpolation: Interpolation,
    },
}

impl InFlight {
    fn plan(&self) -> TransitionPlan {
        match self {
            Self::Native { plan, .. } | Self::Interpolating { plan, .. } => *plan,
        }
    }
}

/// Applies class and style changes to the registry and records them for the host.
struct Mutations<'a> {
    registry: &'a mut PanelRegistry,
    commands: &'a mut CommandQueue,
}

impl Mutations<'_> {
    fn add(&mut self, panel: usize, classes: PanelClasses) {
        self.registry.add_classes(panel, classes);
        self.commands.push(HostCommand::AddClass { panel, classes });
    }

    fn remove(&mut self, panel: usize, classes: PanelClasses) {
        self.registry.remove_classes(panel, classes);
        self.commands.push(HostCommand::RemoveClass { panel, classes });
    }

    fn reflow(&mut self, panel: usize) {
        self.commands.push(HostCommand::Reflow { panel });
    }

    fn style(&mut self, panel: usize, style: PanelStyle) {
        self.registry.set_style(panel, style);
        self.commands.push(HostCommand::SetStyle { panel, style });
    }
}

/// Direction marker for the incoming panel and travel marker for both panels.
fn slide_markers(direction: TravelDirection) -> (PanelClasses, PanelClasses) {
    match direction {
        TravelDirection::Forward => (PanelClasses::NEXT, PanelClasses::FROM),
        TravelDirection::Backward => (PanelClasses::PREV, PanelClasses::TO),
    }
}

/// State of a carousel with at least two panels.
#[derive(Debug)]
struct Engine {
    registry: PanelRegistry,
    pipeline: AnimationPipeline,
    layout: Layout,
    autoplay: Option<Autoplay>,
    in_flight: Option<InFlight>,
}

/// A headless carousel over a fixed number of panels.
///
/// The host:
/// 1. renders [`Carousel::layout`] once,
/// 2. applies [`Carousel::drain_commands`] after every call,
/// 3. forwards clicks, hover changes and completion events,
/// 4. calls [`Carousel::advance`] on every frame or timer tick.
///
/// Carousels with fewer than two panels are static: they have no layout, emit
/// no commands and ignore every request.
///
/// ```
/// use understory_carousel::{Carousel, CarouselOptions, HostCommand};
/// use understory_carousel::probe::SupportedProperties;
///
/// let options = CarouselOptions::default().with_auto(false);
/// let mut carousel = Carousel::new(3, options, &SupportedProperties(&["transition"]));
/// carousel.drain_commands().for_each(drop);
///
/// let plan = carousel.request_next().unwrap();
/// assert_eq!(plan.to, 1);
/// // Single flight: dropped while the first transition runs.
/// assert!(carousel.request_next().is_none());
///
/// assert!(carousel.notify_transition_end("transitionend"));
/// assert_eq!(carousel.active_index(), Some(1));
/// assert!(carousel
///     .drain_commands()
///     .any(|c| c == HostCommand::Committed(plan)));
/// ```
#[derive(Debug)]
pub struct Carousel {
    options: CarouselOptions,
    panel_count: usize,
    engine: Option<Engine>,
    commands: CommandQueue,
}

impl Carousel {
    /// Builds a carousel over `panel_count` panels, probing `env` for native transitions.
    pub fn new<E>(panel_count: usize, options: CarouselOptions, env: &E) -> Self
    where
        E: StyleEnvironment + ?Sized,
    {
        let native = if panel_count < 2 { None } else { detect(env) };
        Self::with_native(panel_count, options, native)
    }

    /// Builds a carousel with an already probed capability.
    #[must_use]
    pub fn with_native(
        panel_count: usize,
        options: CarouselOptions,
        native: Option<NativeTransition>,
    ) -> Self {
        let mut commands = CommandQueue::new();
        let engine = if panel_count < 2 {
            log::debug!("carousel with {panel_count} panel(s) stays static");
            None
        } else {
            Some(Engine::new(panel_count, &options, native, &mut commands))
        };
        Self {
            options,
            panel_count,
            engine,
            commands,
        }
    }

    /// The options the carousel was built with.
    #[must_use]
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Number of panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Returns `true` if the carousel has fewer than two panels and does nothing.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.engine.is_none()
    }

    /// The committed active panel; `None` for static carousels.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.engine.as_ref().map(|e| e.registry.active_index())
    }

    /// Returns `true` if `index` is the committed active panel.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active_index() == Some(index)
    }

    /// Panels with their current classes and styles.
    #[must_use]
    pub fn registry(&self) -> Option<&PanelRegistry> {
        self.engine.as_ref().map(|e| &e.registry)
    }

    /// Markup to build around the panels.
    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.engine.as_ref().map(|e| &e.layout)
    }

    /// The pipeline selected at construction.
    #[must_use]
    pub fn pipeline(&self) -> Option<AnimationPipeline> {
        self.engine.as_ref().map(|e| e.pipeline)
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.in_flight().is_some()
    }

    /// The plan of the in-flight transition.
    #[must_use]
    pub fn in_flight(&self) -> Option<TransitionPlan> {
        self.engine
            .as_ref()
            .and_then(|e| e.in_flight.as_ref())
            .map(InFlight::plan)
    }

    /// Returns `true` if autoplay is enabled and not paused.
    #[must_use]
    pub fn is_autoplaying(&self) -> bool {
        self.engine
            .as_ref()
            .and_then(|e| e.autoplay.as_ref())
            .is_some_and(Autoplay::is_active)
    }

    /// Takes the pending host commands, oldest first.
    pub fn drain_commands(&mut self) -> smallvec::Drain<'_, [HostCommand; INLINE_COMMANDS]> {
        self.commands.drain(..)
    }

    /// Requests the following panel.
    pub fn request_next(&mut self) -> Option<TransitionPlan> {
        self.request(TransitionRequest::Next)
    }

    /// Requests the preceding panel.
    pub fn request_prev(&mut self) -> Option<TransitionPlan> {
        self.request(TransitionRequest::Prev)
    }

    /// Requests the panel at `index`. Out-of-range indices are ignored.
    pub fn request_to(&mut self, index: usize) -> Option<TransitionPlan> {
        self.request(TransitionRequest::To(index))
    }

    /// Starts a transition for `request`, if one is accepted.
    ///
    /// Returns `None` when the request is dropped: the carousel is static, a
    /// transition is in flight, or the request resolves to nothing.
    pub fn request(&mut self, request: TransitionRequest) -> Option<TransitionPlan> {
        let engine = self.engine.as_mut()?;
        engine.start(request, &self.options, &mut self.commands)
    }

    /// Handles a click on `control`.
    pub fn click(&mut self, control: Control) -> ClickResponse {
        if !self.layout().is_some_and(|layout| layout.offers(control)) {
            return ClickResponse {
                prevent_default: false,
                plan: None,
            };
        }
        ClickResponse {
            prevent_default: true,
            plan: self.request(control.request()),
        }
    }

    /// The pointer entered the carousel: pause autoplay.
    pub fn pointer_enter(&mut self) {
        self.pause_autoplay();
    }

    /// The pointer left the carousel: resume autoplay.
    pub fn pointer_leave(&mut self) {
        self.resume_autoplay();
    }

    /// Cancels the pending autoplay step. Never affects an in-flight transition.
    pub fn pause_autoplay(&mut self) {
        if let Some(autoplay) = self.engine.as_mut().and_then(|e| e.autoplay.as_mut()) {
            autoplay.pause();
        }
    }

    /// Resumes autoplay, if it was enabled at construction.
    pub fn resume_autoplay(&mut self) {
        if let Some(autoplay) = self.engine.as_mut().and_then(|e| e.autoplay.as_mut()) {
            autoplay.resume();
        }
    }

    /// Delivers a native completion event.
    ///
    /// Returns `true` if it completed the in-flight transition. Events that do
    /// not match, or arrive with no listener attached, are ignored.
    pub fn notify_transition_end(&mut self, event: &str) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        let listening = matches!(
            &engine.in_flight,
            Some(InFlight::Native { listener, .. }) if listener.native.matches(event)
        );
        if !listening {
            log::trace!("ignoring completion event {event:?}");
            return false;
        }
        engine.finish(&self.options, &mut self.commands);
        true
    }

    /// Advances clock-driven work to `now` (milliseconds on the host clock).
    ///
    /// Steps the fallback interpolation, the completion watchdog and autoplay.
    /// A transition committed here can be followed by an autoplay step in the
    /// same call.
    pub fn advance(&mut self, now: u64) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        engine.step(now, &self.options, &mut self.commands);
        let due = engine.autoplay.as_mut().is_some_and(|a| a.poll(now));
        if due {
            log::trace!("autoplay step at {now}");
            engine.start(TransitionRequest::Next, &self.options, &mut self.commands);
        }
    }
}

impl Engine {
    fn new(
        panel_count: usize,
        options: &CarouselOptions,
        native: Option<NativeTransition>,
        commands: &mut CommandQueue,
    ) -> Self {
        let active = if options.idx < panel_count {
            options.idx
        } else {
            log::warn!(
                "initial panel {} out of range for {panel_count} panels, using 0",
                options.idx
            );
            0
        };
        let pipeline = AnimationPipeline::select(native, options.duration, options.easing);
        let mut registry = PanelRegistry::new(panel_count, active);
        commands.push(HostCommand::AddClass {
            panel: active,
            classes: PanelClasses::ACTIVE,
        });
        if !pipeline.is_declarative() {
            let mut mutations = Mutations {
                registry: &mut registry,
                commands: &mut *commands,
            };
            for panel in 0..panel_count {
                mutations.style(panel, resting_style(options.effect, panel == active));
            }
        }
        let layout = Layout::new(options, panel_count, active, pipeline.is_declarative());
        let autoplay = options.auto.then(|| {
            let mut autoplay = Autoplay::new(options.effective_interval());
            autoplay.resume();
            autoplay
        });
        log::debug!(
            "carousel ready: {panel_count} panels, {} effect, {pipeline:?}",
            options.effect
        );
        Self {
            registry,
            pipeline,
            layout,
            autoplay,
            in_flight: None,
        }
    }

    fn start(
        &mut self,
        request: TransitionRequest,
        options: &CarouselOptions,
        commands: &mut CommandQueue,
    ) -> Option<TransitionPlan> {
        if self.in_flight.is_some() {
            log::trace!("dropping {request:?}: transition in flight");
            return None;
        }
        let plan = resolve(request, self.registry.active_index(), self.registry.len())?;
        if self
            .registry
            .get(plan.to)
            .is_some_and(|panel| panel.is_marked_active())
        {
            log::trace!("dropping {request:?}: panel {} already marked active", plan.to);
            return None;
        }
        log::debug!("transition {plan:?}");

        let mut mutations = Mutations {
            registry: &mut self.registry,
            commands: &mut *commands,
        };
        self.in_flight = Some(match self.pipeline {
            AnimationPipeline::Declarative(native) => {
                if options.effect.is_slide() {
                    let (marker, travel) = slide_markers(plan.direction);
                    mutations.add(plan.to, marker);
                    mutations.reflow(plan.to);
                    mutations.add(plan.from, travel);
                    mutations.add(plan.to, travel);
                } else {
                    mutations.remove(plan.from, PanelClasses::ACTIVE);
                    mutations.add(plan.to, PanelClasses::ACTIVE);
                }
                InFlight::Native {
                    plan,
                    listener: CompletionListener::attach(native, mutations.commands),
                    waiting_since: None,
                }
            }
            AnimationPipeline::Interpolated { duration, easing } => {
                let interpolation = Interpolation::new(&plan, options.effect, duration, easing);
                let (outgoing, incoming) = interpolation.sample(0.0);
                mutations.style(plan.from, outgoing);
                mutations.style(plan.to, incoming);
                InFlight::Interpolating {
                    plan,
                    interpolation,
                }
            }
        });
        Some(plan)
    }

    fn step(&mut self, now: u64, options: &CarouselOptions, commands: &mut CommandQueue) {
        let done = match &mut self.in_flight {
            None => false,
            Some(InFlight::Interpolating {
                plan,
                interpolation,
            }) => {
                let t = interpolation.progress(now);
                let (outgoing, incoming) = interpolation.sample(t);
                let mut mutations = Mutations {
                    registry: &mut self.registry,
                    commands: &mut *commands,
                };
                mutations.style(plan.from, outgoing);
                mutations.style(plan.to, incoming);
                t >= 1.0
            }
            Some(InFlight::Native {
                plan,
                waiting_since,
                ..
            }) => match options.completion_timeout {
                None => false,
                Some(timeout) => {
                    let since = *waiting_since.get_or_insert(now);
                    let expired = now.saturating_sub(since) >= timeout;
                    if expired {
                        log::warn!(
                            "no completion event for {plan:?} within {timeout}ms, committing"
                        );
                    }
                    expired
                }
            },
        };
        if done {
            self.finish(options, commands);
        }
    }

    fn finish(&mut self, options: &CarouselOptions, commands: &mut CommandQueue) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        let plan = in_flight.plan();
        let mut mutations = Mutations {
            registry: &mut self.registry,
            commands: &mut *commands,
        };
        match in_flight {
            InFlight::Native { listener, .. } => {
                listener.detach(mutations.commands);
                if options.effect.is_slide() {
                    let (marker, travel) = slide_markers(plan.direction);
                    mutations.remove(plan.to, marker | travel);
                    mutations.add(plan.to, PanelClasses::ACTIVE);
                    mutations.remove(plan.from, PanelClasses::ACTIVE | travel);
                }
            }
            InFlight::Interpolating { .. } => {
                mutations.remove(plan.from, PanelClasses::ACTIVE);
                mutations.add(plan.to, PanelClasses::ACTIVE);
            }
        }
        self.registry.commit(plan.to);
        if let Some(pagination) = self.layout.pagination.as_mut() {
            pagination.set_active(plan.to);
        }
        commands.push(HostCommand::Committed(plan));
        log::debug!("committed panel {}", plan.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Effect;
    use alloc::vec;
    use alloc::vec::Vec;

    const END: NativeTransition = NativeTransition::new("transitionend");

    fn native(count: usize, effect: Effect) -> Carousel {
        let options = CarouselOptions::default()
            .with_effect(effect)
            .with_auto(false);
        let mut carousel = Carousel::with_native(count, options, Some(END));
        carousel.drain_commands().for_each(drop);
        carousel
    }

    fn marked(carousel: &Carousel) -> Vec<usize> {
        carousel
            .registry()
            .unwrap()
            .panels()
            .iter()
            .filter(|p| p.is_marked_active())
            .map(|p| p.index())
            .collect()
    }

    #[test]
    fn native_fade_swaps_classes_up_front() {
        let mut carousel = native(3, Effect::Fade);
        let plan = carousel.request_next().unwrap();
        let commands: Vec<_> = carousel.drain_commands().collect();
        assert_eq!(
            commands,
            vec![
                HostCommand::RemoveClass {
                    panel: 0,
                    classes: PanelClasses::ACTIVE
                },
                HostCommand::AddClass {
                    panel: 1,
                    classes: PanelClasses::ACTIVE
                },
                HostCommand::Subscribe {
                    event: "transitionend"
                },
            ]
        );
        // Marker moved, commit has not happened yet.
        assert_eq!(marked(&carousel), vec![1]);
        assert_eq!(carousel.active_index(), Some(0));

        assert!(carousel.notify_transition_end("transitionend"));
        let commands: Vec<_> = carousel.drain_commands().collect();
        assert_eq!(
            commands,
            vec![
                HostCommand::Unsubscribe {
                    event: "transitionend"
                },
                HostCommand::Committed(plan),
            ]
        );
        assert_eq!(carousel.active_index(), Some(1));
    }

    #[test]
    fn native_slide_sequences_reflow_between_markers() {
        let mut carousel = native(3, Effect::Slide);
        carousel.request_prev().unwrap();
        let commands: Vec<_> = carousel.drain_commands().collect();
        assert_eq!(
            commands,
            vec![
                HostCommand::AddClass {
                    panel: 2,
                    classes: PanelClasses::PREV
                },
                HostCommand::Reflow { panel: 2 },
                HostCommand::AddClass {
                    panel: 0,
                    classes: PanelClasses::TO
                },
                HostCommand::AddClass {
                    panel: 2,
                    classes: PanelClasses::TO
                },
                HostCommand::Subscribe {
                    event: "transitionend"
                },
            ]
        );
        assert_eq!(marked(&carousel), vec![0]);

        carousel.notify_transition_end("transitionend");
        let registry = carousel.registry().unwrap();
        assert_eq!(registry.get(2).unwrap().classes(), PanelClasses::ACTIVE);
        assert_eq!(registry.get(0).unwrap().classes(), PanelClasses::empty());
        assert_eq!(carousel.active_index(), Some(2));
    }

    #[test]
    fn listener_fires_once() {
        let mut carousel = native(2, Effect::Fade);
        carousel.request_next();
        assert!(carousel.notify_transition_end("transitionend"));
        assert!(!carousel.notify_transition_end("transitionend"));
        let detaches = carousel
            .drain_commands()
            .filter(|c| matches!(c, HostCommand::Unsubscribe { .. }))
            .count();
        assert_eq!(detaches, 1);
    }

    #[test]
    fn mismatched_event_is_ignored() {
        let mut carousel = native(2, Effect::Fade);
        carousel.request_next();
        assert!(!carousel.notify_transition_end("animationend"));
        assert!(carousel.is_transitioning());
    }

    #[test]
    fn interpolated_fade_commits_at_duration() {
        let options = CarouselOptions::default()
            .with_auto(false)
            .with_interpolation(800, crate::pipeline::Easing::Linear);
        let mut carousel = Carousel::with_native(2, options, None);
        carousel.drain_commands().for_each(drop);

        carousel.request_to(1).unwrap();
        carousel.advance(100);
        carousel.advance(500);
        let style = carousel.registry().unwrap().get(1).unwrap().style();
        assert_eq!(style.opacity, 0.5);
        assert_eq!(carousel.active_index(), Some(0));

        carousel.advance(900);
        assert_eq!(carousel.active_index(), Some(1));
        assert_eq!(marked(&carousel), vec![1]);
        assert!(
            !carousel
                .drain_commands()
                .any(|c| matches!(c, HostCommand::Subscribe { .. }))
        );
    }

    #[test]
    fn watchdog_commits_stalled_native_transition() {
        let options = CarouselOptions::default()
            .with_auto(false)
            .with_completion_timeout(Some(1000));
        let mut carousel = Carousel::with_native(2, options, Some(END));
        carousel.request_next();
        carousel.advance(10);
        carousel.advance(1009);
        assert!(carousel.is_transitioning());
        carousel.advance(1010);
        assert!(!carousel.is_transitioning());
        assert_eq!(carousel.active_index(), Some(1));
        assert!(!carousel.notify_transition_end("transitionend"));
    }

    #[test]
    fn without_watchdog_native_transition_waits() {
        let mut carousel = native(2, Effect::Fade);
        carousel.request_next();
        carousel.advance(u64::MAX);
        assert!(carousel.is_transitioning());
    }

    #[test]
    fn out_of_range_idx_falls_back_to_first() {
        let options = CarouselOptions::default().with_idx(7);
        let carousel = Carousel::with_native(3, options, Some(END));
        assert_eq!(carousel.active_index(), Some(0));
    }
}
