// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel basics.
//!
//! Drive a three-panel sliding carousel on a host with native transitions:
//! button clicks, a pagination jump, and a request dropped mid-flight.
//!
//! Run:
//! - `cargo run -p understory_demos --example carousel_basics`

use understory_carousel::probe::SupportedProperties;
use understory_carousel::{Carousel, CarouselOptions, Control, Effect};
use understory_demos::TextHost;

fn main() {
    let options = CarouselOptions::default()
        .with_effect(Effect::Slide)
        .with_auto(false);
    let mut carousel = Carousel::new(3, options, &SupportedProperties(&["transition"]));
    let mut host = TextHost::new(&carousel);

    let layout = carousel.layout().expect("three panels are not static");
    println!("wrapper: {}", layout.wrapper_classes.join(" "));
    host.sync(&mut carousel);
    print!("{}", host.render());

    for control in [Control::Next, Control::Page(0), Control::Prev] {
        let response = carousel.click(control);
        println!("{control:?}: {:?}", response.plan);
        host.sync(&mut carousel);
        print!("{}", host.render());

        // A second click while sliding is dropped.
        let again = carousel.click(Control::Next);
        println!("  click during transition accepted: {}", again.plan.is_some());

        if let Some(event) = host.listener() {
            carousel.notify_transition_end(event);
        }
        host.sync(&mut carousel);
        print!("{}", host.render());
    }
}
