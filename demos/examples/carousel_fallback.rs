// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel fallback pipeline with autoplay.
//!
//! On a host without native transitions the carousel interpolates panel
//! opacity itself. A simulated clock ticks every 200ms; autoplay steps every
//! second and pauses while the pointer hovers.
//!
//! Run:
//! - `cargo run -p understory_demos --example carousel_fallback`

use understory_carousel::{Carousel, CarouselOptions, Easing};
use understory_demos::TextHost;

fn main() {
    let options = CarouselOptions::default()
        .with_interval(1_000)
        .with_interpolation(600, Easing::Smooth);
    let mut carousel = Carousel::new(3, options, &|_: &str| false);
    let mut host = TextHost::new(&carousel);
    host.sync(&mut carousel);

    for now in (0..=6_000).step_by(200) {
        match now {
            3_000 => {
                println!("t={now}: pointer enters");
                carousel.pointer_enter();
            }
            4_400 => {
                println!("t={now}: pointer leaves");
                carousel.pointer_leave();
            }
            _ => {}
        }
        carousel.advance(now);
        if carousel.is_transitioning() || now % 1_000 == 0 {
            println!("t={now} active={:?}", carousel.active_index());
            host.sync(&mut carousel);
            print!("{}", host.render());
        } else {
            host.sync(&mut carousel);
        }
    }
}
