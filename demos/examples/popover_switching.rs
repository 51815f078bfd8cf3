// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hide-then-show sequencing with the bare presenter.
//!
//! Feeds a script of selection values into a `Presenter` and settles each one,
//! printing every transition. Switching between two popovers always passes through none.
//!
//! Run:
//! - `cargo run -p tether_demos --example popover_switching`

use tether_popover::presenter::{Presenter, Transition};

fn main() {
    let script = [Some("info"), Some("info"), Some("help"), None, Some("info")];

    let mut presenter: Presenter<&str> = Presenter::new();
    presenter.appear(None);

    let mut all: Vec<Transition<&str>> = Vec::new();
    for selection in script {
        println!("== select {selection:?} ==");
        let mut queue: Vec<Transition<&str>> = presenter.update(selection.as_ref()).into_iter().collect();
        while let Some(t) = queue.pop() {
            println!("  {:?}: {:?} -> {:?}", t.id, t.from, t.to);
            // Pretend the animation finished right away.
            queue.extend(presenter.complete(t.id));
            all.push(t);
        }
        assert_eq!(presenter.presented().copied(), selection);
    }

    let steps: Vec<_> = all.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(
        steps,
        vec![
            (None, Some("info")),
            (Some("info"), None),
            (None, Some("help")),
            (Some("help"), None),
            (None, Some("info")),
        ]
    );
}
