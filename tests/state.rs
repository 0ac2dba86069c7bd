// Native tests for the mask state machine: clamp invariants, cycling, reset,
// forced round-trips. No browser APIs involved.

use bosskey::{Action, DEFAULT_OPACITY, MAX_RADIUS, MaskState, OPACITY_STEP, ShroudMode};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn defaults_match_session_start() {
    let st = MaskState::default();
    assert_eq!(st.mode, ShroudMode::Shade);
    assert_eq!(st.radius, 0.0);
    assert!(approx(st.opacity, DEFAULT_OPACITY));
    assert!(!st.forced);
    assert!(!st.disabled);
}

#[test]
fn radius_stays_clamped_for_any_delta_sequence() {
    let mut st = MaskState::default();
    for delta in [10.0, 10_000.0, -25_000.0, 499.0, 3.0, -1.5, 1e9, -1e9, 0.0, 250.0] {
        st.adjust_radius(delta);
        assert!(
            (0.0..=MAX_RADIUS).contains(&st.radius),
            "radius {} escaped clamp after delta {delta}",
            st.radius
        );
    }
}

#[test]
fn radius_uses_raw_delta_then_clamps() {
    let mut st = MaskState::default();
    st.adjust_radius(10.0);
    assert_eq!(st.radius, 10.0);
    st.radius = 495.0;
    st.adjust_radius(20.0);
    assert_eq!(st.radius, MAX_RADIUS);
}

#[test]
fn opacity_moves_in_fixed_ticks_sign_only() {
    let mut st = MaskState::default();
    st.step_opacity(250.0); // magnitude ignored
    assert!(approx(st.opacity, DEFAULT_OPACITY + OPACITY_STEP));
    st.step_opacity(-0.001);
    assert!(approx(st.opacity, DEFAULT_OPACITY));
    st.step_opacity(0.0);
    assert!(approx(st.opacity, DEFAULT_OPACITY));
}

#[test]
fn opacity_stays_clamped_at_both_ends() {
    let mut st = MaskState::default();
    for _ in 0..200 {
        st.step_opacity(1.0);
        assert!((0.0..=1.0).contains(&st.opacity));
    }
    assert!(approx(st.opacity, 1.0));
    for _ in 0..200 {
        st.step_opacity(-1.0);
        assert!((0.0..=1.0).contains(&st.opacity));
    }
    assert!(approx(st.opacity, 0.0));
}

#[test]
fn cycling_has_period_two() {
    for start in [ShroudMode::Shade, ShroudMode::Clip] {
        let mut st = MaskState { mode: start, ..Default::default() };
        st.apply(Action::CycleNext);
        st.apply(Action::CyclePrev);
        assert_eq!(st.mode, start);
        st.apply(Action::CycleNext);
        st.apply(Action::CycleNext);
        assert_eq!(st.mode, start);
        st.apply(Action::CyclePrev);
        st.apply(Action::CyclePrev);
        assert_eq!(st.mode, start);
    }
}

#[test]
fn cycling_preserves_radius_and_opacity() {
    let mut st = MaskState { radius: 123.0, opacity: 0.5, ..Default::default() };
    st.apply(Action::CycleNext);
    assert_eq!(st.radius, 123.0);
    assert!(approx(st.opacity, 0.5));
}

#[test]
fn reset_restores_defaults_from_any_state() {
    let mut st = MaskState {
        mode: ShroudMode::Clip,
        radius: 444.0,
        opacity: 0.1,
        forced: true,
        disabled: true,
    };
    st.apply(Action::Reset);
    assert_eq!(st.mode, ShroudMode::Shade);
    assert_eq!(st.radius, 0.0);
    assert!(approx(st.opacity, DEFAULT_OPACITY));
    assert!(!st.disabled);
}

#[test]
fn resume_normal_disables_and_cycling_re_enables() {
    let mut st = MaskState::default();
    st.apply(Action::ResumeNormal);
    assert!(st.disabled);
    st.apply(Action::CycleNext);
    assert!(!st.disabled);
    st.apply(Action::ResumeNormal);
    st.apply(Action::CyclePrev);
    assert!(!st.disabled);
}

#[test]
fn forced_round_trip_preserves_user_settings() {
    let mut st = MaskState { radius: 300.0, opacity: 0.4, ..Default::default() };
    st.set_forced(true);
    assert_eq!(st.radius, 300.0);
    assert!(approx(st.opacity, 0.4));
    st.set_forced(false);
    assert_eq!(st.radius, 300.0);
    assert!(approx(st.opacity, 0.4));
}

#[test]
fn none_action_changes_nothing() {
    let mut st = MaskState { mode: ShroudMode::Clip, radius: 42.0, ..Default::default() };
    let before = st;
    st.apply(Action::None);
    assert_eq!(st, before);
}

#[test]
fn revealing_requires_both_radius_and_opacity() {
    let mut st = MaskState::default();
    assert!(!st.revealing()); // radius 0
    st.radius = 50.0;
    assert!(st.revealing());
    st.opacity = 0.0;
    assert!(!st.revealing());
}
