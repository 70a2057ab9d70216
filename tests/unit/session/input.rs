use super::*;

#[test]
fn exit_keys() {
    assert!(Key::Escape.is_exit());
    assert!(Key::Char('q').is_exit());
    assert!(Key::Char('Q').is_exit());
    assert!(!Key::Char('w').is_exit());
    assert!(!Key::Other.is_exit());
    assert!(InputEvent::Quit.is_exit());
    assert!(!InputEvent::KeyDown(Key::Char(' ')).is_exit());
}

#[test]
fn frame_budget_quits_on_nth_poll() {
    let mut budget = FrameBudget::frames(3);
    let mut out = Vec::new();
    budget.poll(&mut out);
    budget.poll(&mut out);
    assert!(out.is_empty());
    budget.poll(&mut out);
    assert_eq!(out, vec![InputEvent::Quit]);
}

#[test]
fn zero_frame_budget_quits_immediately() {
    let mut out = Vec::new();
    FrameBudget::frames(0).poll(&mut out);
    assert_eq!(out, vec![InputEvent::Quit]);
}

#[test]
fn scripted_input_replays_batches_in_order() {
    let mut input = ScriptedInput::new([
        vec![InputEvent::KeyDown(Key::Other)],
        vec![],
        vec![InputEvent::KeyDown(Key::Escape), InputEvent::Quit],
    ]);
    let mut out = Vec::new();
    input.poll(&mut out);
    assert_eq!(out, vec![InputEvent::KeyDown(Key::Other)]);
    out.clear();
    input.poll(&mut out);
    assert!(out.is_empty());
    input.poll(&mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(input.remaining(), 0);
    out.clear();
    input.poll(&mut out);
    assert!(out.is_empty());
}
