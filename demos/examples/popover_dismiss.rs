// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two popovers and a tooltip sharing one overlay environment.
//!
//! This example shows how to:
//! - build an `OverlayEnv` with a portal host and viewport,
//! - route every document event once through `OverlayEnv::dispatch`,
//! - apply each dismissal to the overlay it names,
//! - check that closing gives back every listener and portal.
//!
//! Run:
//! - `cargo run -p trellis_demos --example popover_dismiss`

use std::collections::HashMap;

use kurbo::{Rect, Size};
use trellis_dismiss::DocumentEvent;
use trellis_event_state::Key;
use trellis_float::{Align, Placement, Side};
use trellis_layer::PortalHost;
use trellis_overlay::{OverlayEnv, Popover, Tooltip, TooltipConfig};
use trellis_state::Controllable;

// Node ids of a tiny host tree; every node hangs off the root 0.
const SETTINGS_TRIGGER: u32 = 1;
const SETTINGS_CONTENT: u32 = 2;
const SETTINGS_FIELD: u32 = 3;
const SHARE_TRIGGER: u32 = 4;
const SHARE_CONTENT: u32 = 5;
const HELP_TRIGGER: u32 = 6;
const HELP_CONTENT: u32 = 7;
const BACKGROUND: u32 = 8;

fn main() {
    let rects: HashMap<u32, Rect> = [
        (SETTINGS_TRIGGER, Rect::new(20.0, 20.0, 120.0, 52.0)),
        (SETTINGS_CONTENT, Rect::new(0.0, 0.0, 240.0, 160.0)),
        (SHARE_TRIGGER, Rect::new(700.0, 20.0, 780.0, 52.0)),
        (SHARE_CONTENT, Rect::new(0.0, 0.0, 200.0, 120.0)),
        (HELP_TRIGGER, Rect::new(400.0, 560.0, 424.0, 584.0)),
        (HELP_CONTENT, Rect::new(0.0, 0.0, 90.0, 28.0)),
    ]
    .into_iter()
    .collect();
    let measure = |n: &u32| rects.get(n).copied();
    let parent = |n: &u32| match *n {
        0 => None,
        SETTINGS_FIELD => Some(SETTINGS_CONTENT),
        _ => Some(0),
    };

    let mut env = OverlayEnv::new(PortalHost::with_host("portal-root"), Size::new(800.0, 600.0));

    let mut settings = Popover::new(
        Controllable::uncontrolled(false),
        Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0),
        &mut env,
        &measure,
    );
    settings.set_trigger(Some(SETTINGS_TRIGGER), &mut env);
    settings.set_content(Some(SETTINGS_CONTENT), &mut env, &measure);

    // The share popover near the right edge gets clamped into the viewport.
    let mut share = Popover::new(
        Controllable::uncontrolled(false),
        Placement::new(Side::Bottom, Align::Center).with_side_offset(4.0),
        &mut env,
        &measure,
    );
    share.set_trigger(Some(SHARE_TRIGGER), &mut env);
    share.set_content(Some(SHARE_CONTENT), &mut env, &measure);

    let mut help = Tooltip::new(
        Controllable::uncontrolled(false),
        TooltipConfig::default(),
        Placement::new(Side::Top, Align::Center).with_side_offset(6.0),
        &mut env,
        &measure,
    );
    help.set_trigger(Some(HELP_TRIGGER), &mut env);
    help.set_content(Some(HELP_CONTENT), &mut env, &measure);

    settings.toggle(&mut env, &measure);
    share.toggle(&mut env, &measure);
    println!("settings at {:?}", settings.position());
    println!("share at {:?} (clamped)", share.position());

    help.pointer_enter(0, &mut env, &measure);
    println!("tooltip deadline: {:?}", help.next_deadline());
    help.tick(700, &mut env, &measure);
    println!("tooltip open: {} at {:?}", help.is_open(), help.position());
    println!(
        "open overlays hold {} listeners and {} portals",
        env.listener_count(),
        env.portals().len()
    );

    let events = [
        ("press inside settings", DocumentEvent::PointerDown { target: Some(SETTINGS_FIELD) }),
        (
            "escape in settings",
            DocumentEvent::KeyDown {
                key: Key::Escape,
                focused: Some(SETTINGS_FIELD),
            },
        ),
        ("press on background", DocumentEvent::PointerDown { target: Some(BACKGROUND) }),
    ];
    for (label, event) in &events {
        println!("\n== {label} ==");
        for dismissal in env.dispatch(event, &parent) {
            println!("  {} closes: {:?}", dismissal.key, dismissal.reason);
            if dismissal.key == settings.id() {
                settings.apply_dismissal(dismissal.reason, &mut env, &measure);
            } else if dismissal.key == share.id() {
                share.apply_dismissal(dismissal.reason, &mut env, &measure);
            } else if dismissal.key == help.id() {
                help.apply_dismissal(dismissal.reason, &mut env, &measure);
            }
        }
        println!(
            "  open: settings={} share={} tooltip={}",
            settings.is_open(),
            share.is_open(),
            help.is_open()
        );
    }

    println!(
        "\nafter closing: {} listeners, {} portals",
        env.listener_count(),
        env.portals().len()
    );
}
