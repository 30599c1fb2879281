// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel navigation with scroll requests, and a one-time-code input.
//!
//! Run:
//! - `cargo run -p trellis_demos --example carousel_otp`

use trellis_carousel::{Carousel, CarouselConfig, ScrollAlign};
use trellis_event_state::Key;
use trellis_otp::{OtpConfig, OtpInput};
use trellis_state::Controllable;

fn main() {
    println!("== carousel ==");
    let config = CarouselConfig {
        align: ScrollAlign::Center,
        gap: 16.0,
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(Controllable::uncontrolled(0), 600.0, config)
        .with_on_select(|index| println!("  on_select({index})"));

    // Three 280px cards: two per view, centered.
    let ids: Vec<_> = (0..3).map(|_| carousel.register_slide().0).collect();
    for id in &ids {
        carousel.set_slide_extent(*id, 280.0);
    }

    for key in [Key::ArrowRight, Key::ArrowRight, Key::ArrowRight, Key::ArrowLeft] {
        let request = carousel.handle_key(key);
        println!(
            "{key:?}: request={request:?} prev={} next={}",
            carousel.can_scroll_prev(),
            carousel.can_scroll_next()
        );
    }
    println!("go_to_slide(9): {:?}", carousel.go_to_slide(9));

    // Async content removes the last slide while it is current.
    carousel.go_to_slide(2);
    let request = carousel.unregister_slide(ids[2]);
    println!("after removing slide 2: index={} request={request:?}", carousel.current_index());

    println!("\n== otp ==");
    let mut otp = OtpInput::new(OtpConfig::default()).with_on_complete(|code| println!("  complete: {code}"));
    otp.focus(0);
    otp.input(0, '4');
    otp.input(1, '-');
    println!("typed: {:?} focus={:?}", otp.value(), otp.active_index());
    let filled = otp.paste(1, "29 17 8");
    println!("pasted {filled}: {:?} focus={:?}", otp.value(), otp.active_index());
    otp.key_down(5, Key::Backspace);
    println!("backspace: {:?} focus={:?}", otp.value(), otp.active_index());
    otp.input(5, 'Z');
}
