// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control surface: navigation buttons, pagination, and the wrapper markup.
//!
//! These types describe what a host renders around the panels. They carry no
//! behavior beyond mapping a [`Control`] to a [`TransitionRequest`] and keeping
//! the pagination highlight in step with committed transitions.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::options::CarouselOptions;
use crate::plan::TransitionRequest;

/// Wrapper class used under the interpolated pipeline.
pub const FALLBACK_WRAPPER_CLASS: &str = "non-css3";
/// Class of the pagination container.
pub const PAGINATION_CLASS: &str = "pagi-nav";
/// Class of the highlighted pagination item.
pub const PAGE_ON_CLASS: &str = "on";

/// A user-facing control that requests a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The previous button.
    Prev,
    /// The next button.
    Next,
    /// The pagination item at this position.
    Page(usize),
}

impl Control {
    /// Parses a navigation button's `data-navi` value.
    #[must_use]
    pub fn from_navi(navi: &str) -> Option<Self> {
        match navi {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            _ => None,
        }
    }

    /// The transition this control asks for.
    #[must_use]
    pub fn request(self) -> TransitionRequest {
        match self {
            Self::Prev => TransitionRequest::Prev,
            Self::Next => TransitionRequest::Next,
            Self::Page(index) => TransitionRequest::To(index),
        }
    }
}

/// A prev or next navigation anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavButton {
    /// Which way the button navigates.
    pub control: Control,
    /// Value of the `data-navi` attribute.
    pub navi: &'static str,
    /// Class attribute.
    pub class: &'static str,
    /// Label markup.
    pub label: String,
}

/// One pagination anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageItem {
    /// Label markup.
    pub label: String,
    /// Whether the item is highlighted.
    pub on: bool,
}

/// Pagination: one item per panel, exactly one highlighted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    items: Vec<PageItem>,
    active: usize,
}

impl Pagination {
    /// Builds `count` items highlighting `active`.
    ///
    /// Items are numbered from 1 unless a fixed `trigger` label is given.
    #[must_use]
    pub fn new(count: usize, active: usize, trigger: Option<&str>) -> Self {
        let items = (0..count)
            .map(|index| PageItem {
                label: match trigger {
                    Some(label) => label.into(),
                    None => format!("{}", index + 1),
                },
                on: index == active,
            })
            .collect();
        Self { items, active }
    }

    /// The items in panel order.
    #[must_use]
    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// The highlighted position.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Moves the highlight to `index`. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.items.len() || index == self.active {
            return;
        }
        self.items[self.active].on = false;
        self.items[index].on = true;
        self.active = index;
    }
}

/// Markup the host builds once around the panels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Classes of the inner wrapper: the wrap class, then the effect or fallback class.
    pub wrapper_classes: [String; 2],
    /// Prev and next anchors, when controls are enabled.
    pub buttons: Option<[NavButton; 2]>,
    /// Pagination, when enabled.
    pub pagination: Option<Pagination>,
}

impl Layout {
    pub(crate) fn new(options: &CarouselOptions, count: usize, active: usize, native: bool) -> Self {
        let effect_class = if native {
            options.effect.class_name()
        } else {
            FALLBACK_WRAPPER_CLASS
        };
        let buttons = options.control.then(|| {
            [
                NavButton {
                    control: Control::Prev,
                    navi: "prev",
                    class: "btn btn-prev",
                    label: options.prev.clone(),
                },
                NavButton {
                    control: Control::Next,
                    navi: "next",
                    class: "btn btn-next",
                    label: options.next.clone(),
                },
            ]
        });
        let pagination = options
            .page
            .then(|| Pagination::new(count, active, options.trigger.as_deref()));
        Self {
            wrapper_classes: [options.wrap_class.clone(), effect_class.into()],
            buttons,
            pagination,
        }
    }

    /// Returns `true` if the layout offers `control`.
    #[must_use]
    pub fn offers(&self, control: Control) -> bool {
        match control {
            Control::Prev | Control::Next => self.buttons.is_some(),
            Control::Page(index) => self.pagination.as_ref().is_some_and(|p| index < p.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Effect;

    #[test]
    fn navi_values() {
        assert_eq!(Control::from_navi("prev"), Some(Control::Prev));
        assert_eq!(Control::from_navi("next"), Some(Control::Next));
        assert_eq!(Control::from_navi("first"), None);
        assert_eq!(Control::Page(2).request(), TransitionRequest::To(2));
    }

    #[test]
    fn pagination_numbers_items() {
        let pagination = Pagination::new(3, 1, None);
        let labels: Vec<_> = pagination.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        let on: Vec<_> = pagination.items().iter().map(|i| i.on).collect();
        assert_eq!(on, [false, true, false]);
    }

    #[test]
    fn pagination_trigger_label() {
        let pagination = Pagination::new(2, 0, Some("&bull;"));
        assert!(pagination.items().iter().all(|i| i.label == "&bull;"));
    }

    #[test]
    fn set_active_moves_single_highlight() {
        let mut pagination = Pagination::new(4, 0, None);
        pagination.set_active(3);
        pagination.set_active(9);
        assert_eq!(pagination.active(), 3);
        assert_eq!(pagination.items().iter().filter(|i| i.on).count(), 1);
        assert!(pagination.items()[3].on);
    }

    #[test]
    fn layout_respects_options() {
        let options = CarouselOptions::default()
            .with_effect(Effect::SlideDown)
            .with_control(false);
        let layout = Layout::new(&options, 3, 0, true);
        assert_eq!(layout.wrapper_classes, ["switch-in", "slide-down"]);
        assert!(layout.buttons.is_none());
        assert!(!layout.offers(Control::Next));
        assert!(layout.offers(Control::Page(2)));
        assert!(!layout.offers(Control::Page(3)));

        let fallback = Layout::new(&CarouselOptions::default(), 3, 0, false);
        assert_eq!(fallback.wrapper_classes[1], FALLBACK_WRAPPER_CLASS);
        let buttons = fallback.buttons.unwrap();
        assert_eq!(buttons[0].navi, "prev");
        assert_eq!(buttons[1].label, "&#8250;");
    }
}
