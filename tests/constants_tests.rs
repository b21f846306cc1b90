// Host-side tests for page-facing constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use bubble_core::constants::{DEFAULT_POPULATION, POP_DURATION_MS};
use constants::*;

#[test]
fn selectors_are_non_empty_lists() {
    for sel in [AUTO_MOUNT_SELECTOR, OBSTACLE_SELECTOR, INTERACTIVE_SELECTOR] {
        assert!(!sel.trim().is_empty());
        assert!(
            sel.split(',').all(|part| !part.trim().is_empty()),
            "dangling comma in selector list: {sel}"
        );
    }
}

#[test]
fn interactive_selector_covers_native_controls() {
    let parts: Vec<&str> = INTERACTIVE_SELECTOR.split(',').map(str::trim).collect();
    for tag in ["button", "a", "input", "select", "textarea"] {
        assert!(parts.contains(&tag), "{tag} missing from interactive selector");
    }
}

#[test]
fn obstacle_and_interactive_lists_do_not_overlap() {
    let interactive: Vec<&str> = INTERACTIVE_SELECTOR.split(',').map(str::trim).collect();
    for part in OBSTACLE_SELECTOR.split(',').map(str::trim) {
        assert!(!interactive.contains(&part), "{part} is in both lists");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn population_cap_and_pop_duration_are_sane() {
    assert!(MAX_POPULATION >= DEFAULT_POPULATION);
    assert!(POP_DURATION_MS > 0.0 && POP_DURATION_MS < 1000.0);
    assert_ne!(BUBBLE_CLASS, POPPING_CLASS);
    assert!(REDUCED_MOTION_QUERY.contains("reduce"));
}
