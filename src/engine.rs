//! The countdown state machine.
//!
//! `TimerEngine` owns the remaining time, the current session type and
//! whether it is running. It persists a [`TimerSnapshot`] after every state
//! change so a relaunch can work out how much time passed while the process
//! was gone, and it reports each expiry to a [`SessionObserver`] exactly once
//! before moving on to the other session.

use std::{rc::Rc, time::Instant};

use crate::{
    clock::Clock,
    error::Result,
    session::SessionType,
    snapshot::{TIMER_STATE_KEY, TimerSnapshot},
    store::{KeyValueStore, load_record, save_record},
    ticker::TickTask,
};

/// Receives session completions. Sound, notifications and stats live on the
/// other side of this trait; the engine never looks at them.
pub trait SessionObserver {
    fn on_session_end(&mut self, completed: SessionType) -> Result<()>;
}

pub struct TimerEngine<O: SessionObserver> {
    time_left: u32,
    session_type: SessionType,
    is_active: bool,
    tick_task: Option<TickTask>,
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    observer: O,
}

impl<O: SessionObserver> TimerEngine<O> {
    /// A fresh engine: idle, work session, full duration.
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>, observer: O) -> Self {
        let engine = Self {
            time_left: SessionType::Work.nominal_duration(),
            session_type: SessionType::Work,
            is_active: false,
            tick_task: None,
            store,
            clock,
            observer,
        };
        engine.persist();
        engine
    }

    /// Rebuilds the engine from the stored snapshot, charging the time that
    /// passed since it was written. If the running session ran out while the
    /// process was gone, the expiry fires now.
    pub fn restore(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>, observer: O) -> Self {
        let Some(snap) = load_record::<TimerSnapshot>(store.as_ref(), TIMER_STATE_KEY) else {
            return Self::new(store, clock, observer);
        };

        let mut engine = Self {
            time_left: snap.time_left,
            session_type: snap.session_type,
            is_active: snap.is_active,
            tick_task: None,
            store,
            clock,
            observer,
        };

        if !snap.is_active {
            tracing::info!(
                session = ?snap.session_type,
                time_left = snap.time_left,
                "restored paused timer"
            );
            engine.persist();
            return engine;
        }

        let elapsed = snap.elapsed_secs(engine.clock.now_ms());
        let remaining = i64::from(snap.time_left) - elapsed;
        if remaining > 0 {
            tracing::info!(
                session = ?snap.session_type,
                elapsed,
                remaining,
                "resuming running timer"
            );
            engine.time_left = remaining as u32;
            engine.tick_task = Some(TickTask::start(Instant::now()));
            engine.persist();
        } else {
            tracing::info!(
                session = ?snap.session_type,
                elapsed,
                "session ran out while closed"
            );
            engine.time_left = 0;
            engine.expire();
        }
        engine
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Fraction of the current session already used, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.session_type.nominal_duration());
        (1.0 - f64::from(self.time_left) / total).clamp(0.0, 1.0)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            time_left: self.time_left,
            session_type: self.session_type,
            is_active: self.is_active,
            saved_at_epoch_ms: self.clock.now_ms(),
        }
    }

    pub fn start(&mut self) {
        if self.is_active {
            return;
        }
        // A snapshot restored while paused can sit at zero; starting it
        // completes the session straight away.
        if self.time_left == 0 {
            self.expire();
            return;
        }
        self.is_active = true;
        self.tick_task = Some(TickTask::start(Instant::now()));
        tracing::debug!(session = ?self.session_type, time_left = self.time_left, "started");
        self.persist();
    }

    pub fn pause(&mut self) {
        if !self.is_active {
            return;
        }
        self.stop_ticking();
        tracing::debug!(session = ?self.session_type, time_left = self.time_left, "paused");
        self.persist();
    }

    pub fn reset(&mut self) {
        self.stop_ticking();
        self.time_left = self.session_type.nominal_duration();
        tracing::debug!(session = ?self.session_type, "reset");
        self.persist();
    }

    /// Jumps to `next` at its full duration and always leaves it running.
    pub fn switch_session(&mut self, next: SessionType) {
        self.session_type = next;
        self.time_left = next.nominal_duration();
        self.is_active = true;
        self.tick_task = Some(TickTask::start(Instant::now()));
        tracing::info!(session = ?next, "session started");
        self.persist();
    }

    /// One second of countdown. Ignored while idle.
    pub fn tick(&mut self) {
        if !self.is_active {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.expire();
        } else {
            self.persist();
        }
    }

    /// Runs every tick whose deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) {
        loop {
            let due = match self.tick_task.as_mut() {
                Some(task) => task.take_due(now),
                None => false,
            };
            if !due {
                break;
            }
            self.tick();
        }
    }

    /// When the run loop next has to call [`poll`](Self::poll), if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tick_task.as_ref().map(TickTask::next_due)
    }

    fn expire(&mut self) {
        let completed = self.session_type;
        self.time_left = 0;
        self.stop_ticking();
        self.persist();

        tracing::info!(session = ?completed, "session complete");
        if let Err(e) = self.observer.on_session_end(completed) {
            tracing::warn!(error = %e, "session end handler failed");
        }

        self.switch_session(completed.other());
    }

    fn stop_ticking(&mut self) {
        self.is_active = false;
        if let Some(task) = self.tick_task.take() {
            task.cancel();
        }
    }

    fn persist(&self) {
        save_record(self.store.as_ref(), TIMER_STATE_KEY, &self.snapshot());
    }
}
