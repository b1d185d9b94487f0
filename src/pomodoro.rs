use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

/// Interval lengths supplied at construction; fixed for the lifetime of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
    pub cycles_before_long_break: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            cycles_before_long_break: 4,
        }
    }
}

/// The authoritative timer state. One instance per process, mutated only by
/// the transition methods below; everything else reads snapshots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pomodoro {
    pub phase: Phase,
    /// Seconds left in the current phase. Never exceeds `session_start_time`.
    pub time_remaining: u32,
    pub status: TimerStatus,
    /// Completed work sessions, cumulative across resets.
    pub sessions_completed: u32,
    /// Position toward the next long break, in `1..=cycles_before_long_break`.
    pub current_cycle: u32,
    /// The duration the current phase began with, for progress computation.
    pub session_start_time: u32,
    /// Latched by a work-session completion so the fully grown garden can
    /// stay on screen through the following break.
    pub was_work_completed: bool,
    #[serde(skip)]
    durations: Durations,
}

impl Pomodoro {
    pub fn new(durations: Durations) -> Self {
        Self {
            phase: Phase::Work,
            time_remaining: durations.work_secs,
            status: TimerStatus::Idle,
            sessions_completed: 0,
            current_cycle: 1,
            session_start_time: durations.work_secs,
            was_work_completed: false,
            durations,
        }
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    pub fn is_idle(&self) -> bool {
        self.status == TimerStatus::Idle
    }

    /// True once the countdown has hit zero but the phase has not advanced
    /// yet. The driver renders this frame before calling `complete_session`.
    pub fn session_finished(&self) -> bool {
        self.time_remaining == 0 && !self.is_running()
    }

    pub fn start(&mut self) {
        self.status = TimerStatus::Running;
    }

    pub fn pause(&mut self) {
        self.status = TimerStatus::Paused;
    }

    /// Back to a fresh work phase. Keeps `sessions_completed` and
    /// `current_cycle` so progress toward the long break survives.
    pub fn reset(&mut self) {
        self.enter_work();
    }

    /// Advance the countdown by one second. No-op unless Running with time
    /// left; stops exactly at zero without advancing the phase.
    pub fn on_tick(&mut self) {
        if !self.is_running() || self.time_remaining == 0 {
            return;
        }

        self.time_remaining -= 1;

        if self.time_remaining == 0 {
            self.status = TimerStatus::Idle;
        }
    }

    /// Advance past a finished phase: work rolls into a short break, or a
    /// long break every `cycles_before_long_break` sessions; breaks roll
    /// back into work. Callers invoke this after observing
    /// `session_finished()`.
    pub fn complete_session(&mut self) {
        if !self.session_finished() {
            return;
        }

        match self.phase {
            Phase::Work => {
                self.sessions_completed += 1;
                self.current_cycle += 1;

                let next_phase = if self.current_cycle > self.durations.cycles_before_long_break {
                    self.current_cycle = 1;
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };

                let next_duration = match next_phase {
                    Phase::LongBreak => self.durations.long_break_secs,
                    _ => self.durations.short_break_secs,
                };

                self.phase = next_phase;
                self.time_remaining = next_duration;
                self.session_start_time = next_duration;
                self.status = TimerStatus::Idle;
                self.was_work_completed = true;
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.enter_work();
            }
        }
    }

    /// Cut a break short and line up the next work session. No-op while
    /// already on the work phase.
    pub fn skip_break(&mut self) {
        if !self.phase.is_break() {
            return;
        }
        self.enter_work();
    }

    /// Debug/testing override: force a work phase of the given length.
    /// Zero is rejected; a countdown has to have somewhere to go.
    pub fn set_time(&mut self, seconds: u32) {
        if seconds == 0 {
            return;
        }

        self.phase = Phase::Work;
        self.time_remaining = seconds;
        self.session_start_time = seconds;
        self.status = TimerStatus::Idle;
        self.was_work_completed = false;
    }

    fn enter_work(&mut self) {
        self.phase = Phase::Work;
        self.time_remaining = self.durations.work_secs;
        self.session_start_time = self.durations.work_secs;
        self.status = TimerStatus::Idle;
        self.was_work_completed = false;
    }
}
