// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny text host for the carousel demos.
//!
//! [`TextHost`] mirrors [`HostCommand`]s onto an in-memory model of the panel
//! elements and prints one line per panel, standing in for a DOM binding.

use std::fmt::Write as _;

use understory_carousel::{Carousel, HostCommand, PanelClasses, PanelStyle};

/// In-memory stand-in for the panel elements.
#[derive(Debug)]
pub struct TextHost {
    on_class: String,
    classes: Vec<PanelClasses>,
    styles: Vec<PanelStyle>,
    listener: Option<&'static str>,
}

impl TextHost {
    /// Creates a host for `carousel`'s panels.
    pub fn new(carousel: &Carousel) -> Self {
        let count = carousel.panel_count();
        Self {
            on_class: carousel.options().on_class.clone(),
            classes: vec![PanelClasses::empty(); count],
            styles: vec![PanelStyle::default(); count],
            listener: None,
        }
    }

    /// The completion event the host is listening for, if any.
    pub fn listener(&self) -> Option<&'static str> {
        self.listener
    }

    /// Applies every pending command, printing the notable ones.
    pub fn sync(&mut self, carousel: &mut Carousel) {
        for command in carousel.drain_commands() {
            match command {
                HostCommand::AddClass { panel, classes } => self.classes[panel].insert(classes),
                HostCommand::RemoveClass { panel, classes } => self.classes[panel].remove(classes),
                HostCommand::Reflow { panel } => println!("  reflow panel {panel}"),
                HostCommand::SetStyle { panel, style } => self.styles[panel] = style,
                HostCommand::Subscribe { event } => self.listener = Some(event),
                HostCommand::Unsubscribe { .. } => self.listener = None,
                HostCommand::Committed(plan) => {
                    println!("  committed {} -> {} ({:?})", plan.from, plan.to, plan.direction);
                }
            }
        }
    }

    /// One line per panel: classes, then opacity and offset.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, (classes, style)) in self.classes.iter().zip(&self.styles).enumerate() {
            let names: Vec<_> = classes.names(&self.on_class).collect();
            let _ = writeln!(
                out,
                "  [{index}] class=\"{}\" opacity={:.2} offset=({:.0}%, {:.0}%){}",
                names.join(" "),
                style.opacity,
                style.offset.x,
                style.offset.y,
                if style.visible { "" } else { " hidden" },
            );
        }
        out
    }
}
