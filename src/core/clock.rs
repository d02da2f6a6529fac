//! Playback clock with wall-clock-delta timing.
//!
//! **Architecture**: the clock does not own a timer thread. The host
//! loop calls `tick()` once per frame; the clock advances by the
//! elapsed wall-clock delta since the previous tick, not since
//! `play()`. Delayed frames therefore never accumulate drift against a
//! stored origin, and pausing clears the reference timestamp so paused
//! time is never integrated.
//!
//! **Used by**: host render loop (tick), transport controls
//! (play/pause/toggle/seek), UI (playhead position).

use std::time::Instant;

use log::trace;

use super::events::{SessionEvent, SessionEventEmitter};

/// Two-state playback clock: paused or playing, with a continuous
/// position in seconds.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    current_time: f64,
    playing: bool,
    /// Timestamp of the previous tick (runtime-only; None while paused)
    last_tick: Option<Instant>,
    events: SessionEventEmitter,
}

impl PlaybackClock {
    pub fn new(events: SessionEventEmitter) -> Self {
        Self {
            current_time: 0.0,
            playing: false,
            last_tick: None,
            events,
        }
    }

    /// Current playback position in seconds (always >= 0).
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start playback. No-op if already playing.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.last_tick = Some(Instant::now());
        trace!("Playback started at {:.3}s", self.current_time);
        self.notify();
    }

    /// Stop playback. No-op if already paused.
    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.last_tick = None;
        trace!("Playback paused at {:.3}s", self.current_time);
        self.notify();
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jump to a position. Legal in either state and does not change
    /// play/pause state; negative times clamp to 0.
    pub fn seek(&mut self, time: f64) {
        self.current_time = time.max(0.0);
        self.notify();
    }

    /// Advance by the wall-clock delta since the previous tick.
    ///
    /// Call once per host frame. Returns the new position while
    /// playing, None while paused.
    pub fn tick(&mut self) -> Option<f64> {
        if !self.playing {
            return None;
        }
        let now = Instant::now();
        if let Some(last) = self.last_tick {
            self.current_time += now.duration_since(last).as_secs_f64();
        }
        self.last_tick = Some(now);
        self.notify();
        Some(self.current_time)
    }

    fn notify(&self) {
        self.events.emit(SessionEvent::PlaybackChanged {
            playing: self.playing,
            time: self.current_time,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn clock() -> PlaybackClock {
        PlaybackClock::new(SessionEventEmitter::dummy())
    }

    #[test]
    fn test_starts_paused_at_zero() {
        let c = clock();
        assert!(!c.is_playing());
        assert_eq!(c.current_time(), 0.0);
    }

    #[test]
    fn test_play_pause_are_idempotent() {
        let mut c = clock();
        c.play();
        assert!(c.is_playing());
        c.play();
        assert!(c.is_playing());
        c.pause();
        assert!(!c.is_playing());
        c.pause();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut c = clock();
        c.toggle();
        assert!(c.is_playing());
        c.toggle();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_seek_clamps_negative_and_keeps_state() {
        let mut c = clock();
        c.seek(-3.0);
        assert_eq!(c.current_time(), 0.0);
        c.seek(12.5);
        assert_eq!(c.current_time(), 12.5);
        assert!(!c.is_playing());

        c.play();
        c.seek(1.0);
        assert!(c.is_playing());
        assert_eq!(c.current_time(), 1.0);
    }

    #[test]
    fn test_tick_advances_only_while_playing() {
        let mut c = clock();
        assert!(c.tick().is_none());
        assert_eq!(c.current_time(), 0.0);

        c.play();
        sleep(Duration::from_millis(15));
        let t = c.tick().unwrap();
        assert!(t > 0.0);

        sleep(Duration::from_millis(15));
        let t2 = c.tick().unwrap();
        assert!(t2 > t);

        c.pause();
        let frozen = c.current_time();
        sleep(Duration::from_millis(15));
        assert!(c.tick().is_none());
        assert_eq!(c.current_time(), frozen);
    }

    #[test]
    fn test_pause_clears_tick_reference() {
        let mut c = clock();
        c.play();
        sleep(Duration::from_millis(10));
        c.tick();
        c.pause();
        let at_pause = c.current_time();

        // Paused wall time must not be integrated after resuming.
        sleep(Duration::from_millis(30));
        c.play();
        let resumed = c.tick().unwrap();
        assert!(resumed - at_pause < 0.025);
    }
}
