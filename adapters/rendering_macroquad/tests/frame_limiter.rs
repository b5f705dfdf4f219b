use std::time::{Duration, Instant};

use adventure_rendering_macroquad::FrameLimiter;

#[test]
fn sixty_fps_budget_is_one_sixtieth_of_a_second() {
    let limiter = FrameLimiter::new(60);

    assert_eq!(limiter.frame_budget(), Some(Duration::from_secs(1) / 60));
}

#[test]
fn remaining_time_never_exceeds_the_budget() {
    let limiter = FrameLimiter::default();
    let budget = limiter.frame_budget().expect("default limiter is capped");

    for millis in 0..40 {
        let elapsed = Duration::from_millis(millis);
        let remaining = limiter.remaining(elapsed);

        assert!(remaining <= budget);
        assert_eq!(remaining, budget.saturating_sub(elapsed));
    }
}

#[test]
fn slow_frames_do_not_sleep() {
    let limiter = FrameLimiter::new(60);

    assert_eq!(limiter.remaining(Duration::from_millis(50)), Duration::ZERO);
}

#[test]
fn zero_target_disables_the_cap() {
    let limiter = FrameLimiter::new(0);

    assert_eq!(limiter.frame_budget(), None);
    assert_eq!(limiter.remaining(Duration::ZERO), Duration::ZERO);
}

#[test]
fn waiting_paces_consecutive_frames() {
    let mut limiter = FrameLimiter::new(100);
    limiter.wait();

    let start = Instant::now();
    for _ in 0..3 {
        limiter.wait();
    }

    assert!(start.elapsed() >= Duration::from_millis(25));
}
