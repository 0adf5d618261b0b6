// Host-side tests for the message overlay state machine.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod message {
    include!("../src/core/message.rs");
}

use message::{resolve_hit, HitTarget, MessageBoard, DISMISS_WINDOW_SEC};

fn board() -> MessageBoard {
    MessageBoard::new(vec![
        "first".to_string(),
        "second".to_string(),
        "third".to_string(),
    ])
}

#[test]
fn subject_wins_hit_resolution() {
    assert_eq!(resolve_hit(Some(4.2)), HitTarget::Subject);
    assert_eq!(resolve_hit(None), HitTarget::Background);
}

#[test]
fn first_subject_click_opens_at_message_zero() {
    let mut b = board();
    assert!(!b.is_open());
    b.click(HitTarget::Subject, 1.0);
    assert!(b.is_open());
    assert_eq!(b.message_index(), 0);
    assert_eq!(b.current_message(), Some("first"));
    assert_eq!(b.deadline(), Some(1.0 + DISMISS_WINDOW_SEC));
}

#[test]
fn repeat_clicks_cycle_through_messages() {
    let mut b = board();
    b.click(HitTarget::Subject, 0.0);
    b.click(HitTarget::Subject, 0.5);
    assert_eq!(b.current_message(), Some("second"));
    b.click(HitTarget::Subject, 1.0);
    assert_eq!(b.current_message(), Some("third"));
    b.click(HitTarget::Subject, 1.5);
    assert_eq!(b.current_message(), Some("first"));
}

#[test]
fn each_click_rearms_the_dismiss_timer() {
    let mut b = board();
    b.click(HitTarget::Subject, 0.0);
    let g0 = b.timer_generation();
    b.click(HitTarget::Subject, 3.0);
    assert_eq!(b.deadline(), Some(3.0 + DISMISS_WINDOW_SEC));
    assert_ne!(b.timer_generation(), g0);
}

#[test]
fn background_click_closes_an_open_overlay() {
    let mut b = board();
    b.click(HitTarget::Subject, 0.0);
    b.click(HitTarget::Background, 1.0);
    assert!(!b.is_open());
    assert_eq!(b.current_message(), None);
    assert_eq!(b.deadline(), None);
}

#[test]
fn background_click_while_closed_is_a_no_op() {
    let mut b = board();
    b.click(HitTarget::Background, 1.0);
    assert!(!b.is_open());
    assert_eq!(b.timer_generation(), 0);
}

#[test]
fn timer_poll_closes_at_the_deadline() {
    let mut b = board();
    b.click(HitTarget::Subject, 0.0);
    assert!(!b.timer_poll(DISMISS_WINDOW_SEC - 0.01));
    assert!(b.is_open());
    assert!(b.timer_poll(DISMISS_WINDOW_SEC));
    assert!(!b.is_open());
}

#[test]
fn reopening_after_close_restarts_at_message_zero() {
    let mut b = board();
    b.click(HitTarget::Subject, 0.0);
    b.click(HitTarget::Subject, 1.0);
    b.click(HitTarget::Background, 2.0);
    b.click(HitTarget::Subject, 3.0);
    assert_eq!(b.message_index(), 0);
}

#[test]
fn stale_timer_fire_is_discarded() {
    let mut b = board();
    b.click(HitTarget::Subject, 0.0);
    let stale = b.timer_generation();
    // Re-arm before the first deadline: the old generation lost the race.
    b.click(HitTarget::Subject, 4.0);
    assert!(!b.fire(stale));
    assert!(b.is_open(), "stale fire must not close a re-armed overlay");
    assert!(b.fire(b.timer_generation()));
    assert!(!b.is_open());
}

#[test]
fn fire_on_a_closed_board_does_nothing() {
    let mut b = board();
    assert!(!b.fire(0));
    assert!(!b.is_open());
}

#[test]
fn countdown_runs_from_one_to_zero() {
    let mut b = board();
    b.click(HitTarget::Subject, 10.0);
    assert!((b.countdown(10.0) - 1.0).abs() < 1e-6);
    let half = b.countdown(10.0 + DISMISS_WINDOW_SEC / 2.0);
    assert!((half - 0.5).abs() < 1e-6);
    assert_eq!(b.countdown(10.0 + DISMISS_WINDOW_SEC + 1.0), 0.0);
    b.click(HitTarget::Background, 11.0);
    assert_eq!(b.countdown(11.0), 0.0);
}

#[test]
fn empty_message_list_never_opens() {
    let mut b = MessageBoard::new(vec![]);
    b.click(HitTarget::Subject, 0.0);
    assert!(!b.is_open());
    assert_eq!(b.current_message(), None);
}
