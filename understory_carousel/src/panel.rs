// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel registry: the fixed, ordered panels and which one is active.
//!
//! [`PanelRegistry::active_index`] is the source of truth for the active panel.
//! The per-panel [`PanelClasses`] and [`PanelStyle`] are rendering state
//! derived from it by the transition pipelines; hosts mirror them onto their
//! own elements.

use alloc::vec::Vec;

use kurbo::Vec2;

bitflags::bitflags! {
    /// Style-class markers a pipeline places on a panel.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PanelClasses: u8 {
        /// The panel carries the configured active class.
        const ACTIVE = 0b0000_0001;
        /// Incoming panel of a forward slide (`next`).
        const NEXT   = 0b0000_0010;
        /// Incoming panel of a backward slide (`prev`).
        const PREV   = 0b0000_0100;
        /// Both panels of a forward slide while it runs (`from`).
        const FROM   = 0b0000_1000;
        /// Both panels of a backward slide while it runs (`to`).
        const TO     = 0b0001_0000;
    }
}

impl Default for PanelClasses {
    fn default() -> Self {
        Self::empty()
    }
}

impl PanelClasses {
    /// Iterates the class names for these markers.
    ///
    /// `on_class` is the configured name of [`PanelClasses::ACTIVE`].
    pub fn names<'a>(self, on_class: &'a str) -> impl Iterator<Item = &'a str> {
        [
            (Self::ACTIVE, on_class),
            (Self::NEXT, "next"),
            (Self::PREV, "prev"),
            (Self::FROM, "from"),
            (Self::TO, "to"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}

/// Inline style a pipeline applies to a panel.
///
/// Only the interpolated pipeline writes styles; under native transitions every
/// panel keeps the default.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelStyle {
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Position offset in percent of the wrapper size (`left` in `x`, `top` in `y`).
    pub offset: Vec2,
    /// Whether the panel is displayed at all.
    pub visible: bool,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset: Vec2::ZERO,
            visible: true,
        }
    }
}

/// One panel of the carousel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Panel {
    index: usize,
    classes: PanelClasses,
    style: PanelStyle,
}

impl Panel {
    /// Position of the panel, stable for the carousel's lifetime.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Class markers currently applied.
    #[must_use]
    pub fn classes(&self) -> PanelClasses {
        self.classes
    }

    /// Inline style currently applied.
    #[must_use]
    pub fn style(&self) -> PanelStyle {
        self.style
    }

    /// Returns `true` if the panel carries the active class marker.
    #[must_use]
    pub fn is_marked_active(&self) -> bool {
        self.classes.contains(PanelClasses::ACTIVE)
    }
}

/// Ordered panels plus the committed active index.
#[derive(Clone, Debug)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
    active: usize,
}

impl PanelRegistry {
    /// Creates `count` panels with `active` marked.
    ///
    /// # Panics
    ///
    /// Panics if `active` is not below `count`.
    #[must_use]
    pub fn new(count: usize, active: usize) -> Self {
        assert!(
            active < count,
            "active panel {active} out of range for {count} panels"
        );
        let panels = (0..count)
            .map(|index| Panel {
                index,
                classes: if index == active {
                    PanelClasses::ACTIVE
                } else {
                    PanelClasses::empty()
                },
                style: PanelStyle::default(),
            })
            .collect();
        Self { panels, active }
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if there are no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// The committed active index.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Returns `true` if `index` is the committed active panel.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active
    }

    /// All panels in order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// The panel at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub(crate) fn add_classes(&mut self, index: usize, classes: PanelClasses) {
        self.panels[index].classes.insert(classes);
    }

    pub(crate) fn remove_classes(&mut self, index: usize, classes: PanelClasses) {
        self.panels[index].classes.remove(classes);
    }

    pub(crate) fn set_style(&mut self, index: usize, style: PanelStyle) {
        self.panels[index].style = style;
    }

    pub(crate) fn commit(&mut self, index: usize) {
        debug_assert!(index < self.panels.len(), "commit out of range");
        self.active = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_marks_only_the_initial_panel() {
        let registry = PanelRegistry::new(4, 2);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.active_index(), 2);
        let marked: Vec<_> = registry
            .panels()
            .iter()
            .filter(|p| p.is_marked_active())
            .map(Panel::index)
            .collect();
        assert_eq!(marked, vec![2]);
        assert!(registry.is_active(2));
        assert!(!registry.is_active(0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn new_rejects_out_of_range_active() {
        let _ = PanelRegistry::new(2, 2);
    }

    #[test]
    fn class_names_follow_flag_order() {
        let classes = PanelClasses::TO | PanelClasses::ACTIVE | PanelClasses::PREV;
        let names: Vec<_> = classes.names("on").collect();
        assert_eq!(names, vec!["on", "prev", "to"]);
        assert_eq!(PanelClasses::empty().names("on").count(), 0);
    }

    #[test]
    fn class_and_style_updates() {
        let mut registry = PanelRegistry::new(2, 0);
        registry.add_classes(1, PanelClasses::NEXT | PanelClasses::FROM);
        registry.remove_classes(1, PanelClasses::NEXT);
        assert_eq!(registry.get(1).unwrap().classes(), PanelClasses::FROM);

        let hidden = PanelStyle {
            visible: false,
            ..PanelStyle::default()
        };
        registry.set_style(1, hidden);
        assert_eq!(registry.get(1).unwrap().style(), hidden);

        registry.commit(1);
        assert_eq!(registry.active_index(), 1);
    }
}
