use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::schedule::FrameClock;

fn frames(len: usize) -> Playback<FrameClock> {
    Playback::new(len, FrameClock::new())
}

fn tick(p: &mut Playback<FrameClock>, n: usize) {
    for _ in 0..n {
        p.advance(Duration::ZERO);
    }
}

#[test]
fn start_arms_one_tick_and_advances_by_step() {
    let mut p = frames(10);
    p.set_step(3);
    assert!(p.start().is_changed());
    assert_eq!(p.state(), PlaybackState::Animating);
    assert!(p.pending_tick().is_some());
    tick(&mut p, 2);
    assert_eq!(p.reveal(), 6);
}

#[test]
fn reaching_len_completes_and_cancels() {
    let mut p = frames(10);
    p.set_step(4);
    p.start();
    tick(&mut p, 3);
    assert_eq!(p.reveal(), 10);
    assert_eq!(p.state(), PlaybackState::Completed);
    assert_eq!(p.pending_tick(), None);
    assert_eq!(p.source().armed(), None);
    tick(&mut p, 5);
    assert_eq!(p.reveal(), 10);
}

#[test]
fn reset_is_idle_zero_from_every_state() {
    let mut p = frames(20);
    assert_eq!(p.reset(), Transition::Changed {
        from: PlaybackState::Idle,
        to: PlaybackState::Idle
    });

    p.start();
    tick(&mut p, 3);
    p.reset();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Idle, 0));
    assert_eq!(p.source().armed(), None);

    p.start();
    tick(&mut p, 2);
    p.pause();
    p.reset();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Idle, 0));

    p.show_all();
    p.reset();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Idle, 0));
}

#[test]
fn show_all_is_completed_full_from_every_state() {
    let mut p = frames(20);
    p.show_all();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Completed, 20));

    p.start();
    tick(&mut p, 1);
    p.show_all();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Completed, 20));
    assert_eq!(p.source().armed(), None);

    p.start();
    p.pause();
    p.show_all();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Completed, 20));

    p.show_all();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Completed, 20));
}

#[test]
fn pause_freezes_reveal_until_resume() {
    let mut p = frames(100);
    p.set_step(5);
    p.start();
    tick(&mut p, 4);
    assert!(p.pause().is_changed());
    assert_eq!(p.reveal(), 20);
    tick(&mut p, 50);
    assert_eq!(p.reveal(), 20);
    assert_eq!(p.state(), PlaybackState::Paused);
}

#[test]
fn resume_continues_from_paused_reveal() {
    let mut p = frames(100);
    p.set_step(10);
    p.start();
    tick(&mut p, 4);
    p.pause();
    assert_eq!(p.reveal(), 40);
    assert!(p.resume().is_changed());
    tick(&mut p, 1);
    assert_eq!(p.reveal(), 50);
}

#[test]
fn start_from_pause_starts_over() {
    let mut p = frames(100);
    p.set_step(10);
    p.start();
    tick(&mut p, 4);
    p.pause();
    p.start();
    assert_eq!(p.reveal(), 0);
    tick(&mut p, 1);
    assert_eq!(p.reveal(), 10);
}

#[test]
fn invalid_operations_are_ignored() {
    let mut p = frames(10);
    assert!(!p.pause().is_changed());
    assert!(!p.resume().is_changed());
    p.start();
    assert_eq!(p.start(), Transition::Ignored {
        state: PlaybackState::Animating
    });
    assert!(!p.resume().is_changed());
}

#[test]
fn step_is_fixed_for_running_session() {
    let mut p = frames(100);
    p.set_step(2);
    p.start();
    tick(&mut p, 1);
    p.set_step(10);
    tick(&mut p, 1);
    assert_eq!(p.reveal(), 4);
    p.pause();
    p.resume();
    tick(&mut p, 1);
    assert_eq!(p.reveal(), 14);
}

#[test]
fn step_is_clamped() {
    let mut p = frames(10);
    assert_eq!(p.set_step(0), MIN_STEP);
    assert_eq!(p.set_step(500), MAX_STEP);
    assert_eq!(p.set_step(7), 7);
}

#[test]
fn stale_handle_is_a_no_op() {
    let mut p = frames(100);
    p.start();
    let first = p.pending_tick().unwrap();
    p.pause();
    assert!(!p.on_tick(first));
    p.resume();
    assert!(!p.on_tick(first));
    let second = p.pending_tick().unwrap();
    assert_ne!(first, second);
    assert!(p.on_tick(second));
    assert_eq!(p.reveal(), 1);
}

#[test]
fn empty_path_completes_immediately() {
    let mut p = frames(0);
    p.start();
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Completed, 0));
    assert_eq!(p.pending_tick(), None);
    assert_eq!(p.progress(), 0.0);
}

#[test]
fn load_replaces_length_and_resets() {
    let mut p = frames(10);
    p.start();
    tick(&mut p, 3);
    p.load(4);
    assert_eq!((p.state(), p.reveal(), p.len()), (PlaybackState::Idle, 0, 4));
    assert_eq!(p.source().armed(), None);
}

#[test]
fn interval_clock_catch_up_stops_at_completion() {
    let clock = IntervalClock::new(Duration::from_millis(10)).unwrap();
    let mut p = Playback::new(5, clock);
    p.start();
    let applied = p.advance(Duration::from_millis(200));
    assert_eq!(applied, 5);
    assert_eq!((p.state(), p.reveal()), (PlaybackState::Completed, 5));
}

#[test]
fn progress_is_fraction_of_len() {
    let mut p = frames(8);
    p.set_step(2);
    p.start();
    tick(&mut p, 1);
    assert!((p.progress() - 0.25).abs() < 1e-12);
}

#[derive(Default)]
struct Log {
    cancelled: Vec<TaskHandle>,
    armed: Option<TaskHandle>,
}

struct RecordingSource {
    inner: FrameClock,
    log: Rc<RefCell<Log>>,
}

impl TickSource for RecordingSource {
    fn arm(&mut self) -> TaskHandle {
        let h = self.inner.arm();
        self.log.borrow_mut().armed = Some(h);
        h
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.inner.cancel(handle);
        self.log.borrow_mut().cancelled.push(handle);
    }

    fn armed(&self) -> Option<TaskHandle> {
        self.inner.armed()
    }

    fn poll(&mut self, elapsed: Duration) -> Vec<TaskHandle> {
        self.inner.poll(elapsed)
    }
}

#[test]
fn drop_cancels_pending_tick() {
    let log = Rc::new(RefCell::new(Log::default()));
    {
        let mut p = Playback::new(
            10,
            RecordingSource {
                inner: FrameClock::new(),
                log: Rc::clone(&log),
            },
        );
        p.start();
    }
    let log = log.borrow();
    let armed = log.armed.unwrap();
    assert_eq!(log.cancelled, vec![armed]);
}

#[test]
fn restart_cancels_previous_session_before_arming() {
    let log = Rc::new(RefCell::new(Log::default()));
    let mut p = Playback::new(
        10,
        RecordingSource {
            inner: FrameClock::new(),
            log: Rc::clone(&log),
        },
    );
    p.start();
    let first = p.pending_tick().unwrap();
    p.pause();
    p.start();
    assert_eq!(log.borrow().cancelled, vec![first]);
    assert_ne!(p.pending_tick(), Some(first));
}

#[test]
fn teardown_pauses_a_running_session_and_allows_restart() {
    let mut p = frames(10);
    p.start();
    tick(&mut p, 3);
    p.teardown();
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.pending_tick(), None);
    assert_eq!(p.reveal(), 3);

    assert!(p.resume().is_changed());
    assert_eq!(p.state(), PlaybackState::Animating);
    tick(&mut p, 1);
    assert_eq!(p.reveal(), 4);

    p.teardown();
    assert!(p.start().is_changed());
    assert_eq!(p.reveal(), 0);
    assert!(p.pending_tick().is_some());
    tick(&mut p, 2);
    assert_eq!(p.reveal(), 2);
}

#[test]
fn teardown_keeps_settled_states() {
    let mut p = frames(4);
    p.teardown();
    assert_eq!(p.state(), PlaybackState::Idle);
    p.show_all();
    p.teardown();
    assert_eq!(p.state(), PlaybackState::Completed);
    assert_eq!(p.reveal(), 4);
}
