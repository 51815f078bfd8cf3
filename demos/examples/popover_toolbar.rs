// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A toolbar with two popover triggers.
//!
//! Lays out two buttons, marks them as popover sources, selects one, and prints the
//! overlay each frame until the entrance settles. Then taps the backdrop to dismiss.
//!
//! Run:
//! - `cargo run -p tether_demos --example popover_toolbar`

use std::time::Duration;

use kurbo::{Point, Rect, Size};
use tether_geometry::Anchor;
use tether_popover::overlay::TapOutcome;
use tether_popover::{PopoverSource, Selection, attach_matched_popover};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Tool {
    Share,
    Sort,
}

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    let screen = Rect::new(0.0, 0.0, 390.0, 844.0);
    let selection: Selection<Tool> = Selection::new(None);
    let mut popover = attach_matched_popover(
        selection.clone(),
        |tool| match tool {
            Tool::Share => Anchor::BOTTOM,
            Tool::Sort => Anchor::BOTTOM_TRAILING,
        },
        |tool| match tool {
            Tool::Share => Size::new(220.0, 140.0),
            Tool::Sort => Size::new(160.0, 200.0),
        },
    );

    // Layout pass: both toolbar buttons publish their frames.
    let share = PopoverSource::new(Tool::Share);
    let sort = PopoverSource::new(Tool::Sort).with_anchor(Anchor::BOTTOM_TRAILING);
    share.mark(Some(popover.scope()), Rect::new(290.0, 50.0, 334.0, 94.0));
    sort.mark(Some(popover.scope()), Rect::new(16.0, 50.0, 60.0, 94.0));

    selection.set(Some(Tool::Share));
    println!("== Share ==");
    while popover.is_animating() {
        popover.advance(FRAME);
        if let Some(o) = popover.render(screen) {
            println!(
                "  {:?} frame={:?} opacity={:.2} scale={:.2}",
                o.popover.key, o.popover.frame, o.popover.appearance.opacity, o.popover.appearance.scale
            );
        }
    }
    let o = popover.render(screen).expect("share popover is shown");
    assert!(o.popover.matched);
    assert_eq!(o.popover.anchor, Anchor::TOP);
    assert_eq!(o.popover.frame.y0, 94.0);

    println!("== Dismiss ==");
    let outcome = popover.tap(Point::new(200.0, 600.0));
    println!("  tap -> {outcome:?}, selection = {:?}", selection.get());
    assert_eq!(outcome, TapOutcome::Dismissed);
    while popover.is_animating() {
        popover.advance(FRAME);
    }
    assert!(popover.render(screen).is_none());
}
