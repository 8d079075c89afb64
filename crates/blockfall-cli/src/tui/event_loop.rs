use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Ticks fire every `tick_interval` while one is set. Rendering happens only
/// after a tick or a terminal event marked the state dirty.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // first frame
        }
    }

    /// Sets the tick interval; `None` stops ticking.
    ///
    /// Switching ticks on, or to a different interval, restarts the countdown
    /// so the next tick is a full interval away.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.set_tick_interval_at(interval, Instant::now());
    }

    fn set_tick_interval_at(&mut self, interval: Option<Duration>, now: Instant) {
        if interval != self.tick_interval {
            self.last_tick = now;
        }
        self.tick_interval = interval;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Time until the next tick; `None` waits for terminal input indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.set_tick_interval_at(Some(MS_500), now);
        assert!(events.due_event(now).unwrap().is_render());
        assert!(events.due_event(now).is_none());
    }

    #[test]
    fn test_tick_after_interval_then_render() {
        let mut events = EventLoop::new();
        let start = Instant::now();
        events.set_tick_interval_at(Some(MS_500), start);
        events.due_event(start);

        let early = start + Duration::from_millis(499);
        assert!(events.due_event(early).is_none());
        assert_eq!(events.timeout(early), Some(Duration::from_millis(1)));

        let due = start + MS_500;
        assert!(events.due_event(due).unwrap().is_tick());
        assert!(events.due_event(due).unwrap().is_render());
        assert_eq!(events.timeout(due), Some(MS_500));
    }

    #[test]
    fn test_no_interval_never_ticks() {
        let mut events = EventLoop::new();
        let start = Instant::now();
        events.set_tick_interval_at(None, start);
        events.due_event(start);
        assert!(events.due_event(start + Duration::from_secs(60)).is_none());
        assert_eq!(events.timeout(start), None);
    }

    #[test]
    fn test_changing_interval_restarts_countdown() {
        let mut events = EventLoop::new();
        let start = Instant::now();
        events.set_tick_interval_at(Some(MS_500), start);
        events.due_event(start);

        // Paused for a long time, then resumed.
        let resumed = start + Duration::from_secs(10);
        events.set_tick_interval_at(None, start + Duration::from_millis(100));
        events.set_tick_interval_at(Some(MS_500), resumed);
        assert!(events.due_event(resumed).is_none());
        assert!(events.due_event(resumed + MS_500).unwrap().is_tick());
    }

    #[test]
    fn test_same_interval_keeps_phase() {
        let mut events = EventLoop::new();
        let start = Instant::now();
        events.set_tick_interval_at(Some(MS_500), start);
        events.due_event(start);

        events.set_tick_interval_at(Some(MS_500), start + Duration::from_millis(300));
        assert!(events.due_event(start + MS_500).unwrap().is_tick());
    }
}
