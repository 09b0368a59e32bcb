use super::*;
use crate::foundation::error::SpriteError;

fn anim(name: &str, loop_mode: LoopMode, count: u32) -> AnimationMetadata {
    AnimationMetadata {
        name: name.to_string(),
        frames: (0..count)
            .map(|i| Frame {
                x: i * 4,
                y: 0,
                width: 4,
                height: 4,
            })
            .collect(),
        loop_mode,
        transition_to: None,
        frame_width: 4,
        frame_height: 4,
    }
}

fn run(state: &mut PlaybackState, ticks: usize) -> Vec<usize> {
    (0..ticks)
        .map(|_| {
            state.tick();
            state.frame_index()
        })
        .collect()
}

#[test]
fn loop_wraps_after_frame_count_ticks() {
    let mut s = PlaybackState::new(anim("Run", LoopMode::Loop, 5));
    assert_eq!(run(&mut s, 5), vec![1, 2, 3, 4, 0]);
}

#[test]
fn pingpong_bounces_inside_bounds() {
    let mut s = PlaybackState::new(anim("Sway", LoopMode::PingPong, 5));
    assert_eq!(run(&mut s, 8), vec![1, 2, 3, 4, 3, 2, 1, 0]);
    assert_eq!(s.direction(), Direction::Backward);
    assert_eq!(run(&mut s, 2), vec![1, 2]);
    assert_eq!(s.direction(), Direction::Forward);
}

#[test]
fn pingpong_single_frame_holds() {
    let mut s = PlaybackState::new(anim("Still", LoopMode::PingPong, 1));
    assert_eq!(run(&mut s, 3), vec![0, 0, 0]);
}

#[test]
fn once_emits_a_single_transition_and_clamps() {
    let mut a = anim("Attack", LoopMode::Once, 3);
    a.transition_to = Some("Idle".to_string());
    let mut s = PlaybackState::new(a);

    assert_eq!(s.tick(), None);
    assert_eq!(s.tick(), None);
    assert_eq!(s.frame_index(), 2);
    assert_eq!(
        s.tick(),
        Some(TransitionEvent {
            target: "Idle".to_string()
        })
    );
    assert_eq!(s.frame_index(), 2);
    for _ in 0..4 {
        assert_eq!(s.tick(), None);
        assert_eq!(s.frame_index(), 2);
    }
}

#[test]
fn once_without_target_just_holds() {
    let mut s = PlaybackState::new(anim("Die", LoopMode::Once, 2));
    assert!((0..5).all(|_| s.tick().is_none()));
    assert_eq!(s.frame_index(), 1);
}

#[test]
fn transition_on_loop_mode_is_inert() {
    let mut a = anim("Run", LoopMode::Loop, 2);
    a.transition_to = Some("Idle".to_string());
    let mut s = PlaybackState::new(a);
    assert!((0..6).all(|_| s.tick().is_none()));
}

#[test]
fn next_frame_is_pure() {
    for current in 0..4 {
        for dir in [Direction::Forward, Direction::Backward] {
            for mode in [LoopMode::Loop, LoopMode::Once, LoopMode::PingPong] {
                assert_eq!(
                    next_frame(current, dir, mode, 4),
                    next_frame(current, dir, mode, 4)
                );
                let (next, _) = next_frame(current, dir, mode, 4);
                assert!(next < 4);
            }
        }
    }
}

#[test]
fn paused_state_does_not_move() {
    let mut s = PlaybackState::new(anim("Run", LoopMode::Loop, 3));
    s.tick();
    s.pause();
    assert_eq!(run(&mut s, 4), vec![1, 1, 1, 1]);
    s.play();
    assert_eq!(run(&mut s, 1), vec![2]);
}

#[test]
fn zero_frames_never_advance() {
    let mut s = PlaybackState::new(anim("Empty", LoopMode::Loop, 0));
    assert_eq!(s.tick(), None);
    assert_eq!(s.frame_index(), 0);
    assert_eq!(s.visible_frame(), None);
    assert!(matches!(
        s.current_frame().unwrap_err(),
        SpriteError::State(StateError::EmptyAnimation { .. })
    ));
}

#[test]
fn rebinding_identical_identity_keeps_position() {
    let a = anim("Run", LoopMode::Loop, 4);
    let mut s = PlaybackState::new(a.clone());
    run(&mut s, 2);
    let mut same = a.clone();
    same.transition_to = Some("Idle".to_string());
    assert!(!s.bind(same));
    assert_eq!(s.frame_index(), 2);
}

#[test]
fn rebinding_new_identity_resets_even_with_equal_frames() {
    let a = anim("Run", LoopMode::PingPong, 4);
    let mut s = PlaybackState::new(a.clone());
    run(&mut s, 5);
    assert_eq!(s.direction(), Direction::Backward);

    let renamed = AnimationMetadata {
        name: "Walk".to_string(),
        ..a
    };
    assert!(s.bind(renamed));
    assert_eq!(s.frame_index(), 0);
    assert_eq!(s.direction(), Direction::Forward);
}

#[test]
fn reset_rearms_the_transition() {
    let mut a = anim("Hit", LoopMode::Once, 1);
    a.transition_to = Some("Idle".to_string());
    let mut s = PlaybackState::new(a);
    assert!(s.tick().is_some());
    assert!(s.tick().is_none());
    s.reset();
    assert!(s.tick().is_some());
}

#[test]
fn next_frame_without_frames_stays_put() {
    for mode in [LoopMode::Loop, LoopMode::Once, LoopMode::PingPong] {
        assert_eq!(next_frame(0, Direction::Forward, mode, 0), (0, Direction::Forward));
        assert_eq!(
            next_frame(3, Direction::Backward, mode, 0),
            (3, Direction::Backward)
        );
    }
}
