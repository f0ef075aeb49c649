use tracing::info;

/// Observable mode of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Running,
    Ended,
}

/// Session mode machine.
///
/// Pausing is a latch layered over the phase, so it can be toggled in any
/// phase (including before the first confirm) and resumes where it left
/// off. All mutation goes through the transition methods below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    paused: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::NotStarted,
            paused: false,
        }
    }
}

impl Session {
    pub fn state(&self) -> SessionState {
        match (self.paused, self.phase) {
            (true, _) => SessionState::Paused,
            (false, Phase::NotStarted) => SessionState::NotStarted,
            (false, Phase::Running) => SessionState::Running,
            (false, Phase::Ended) => SessionState::Ended,
        }
    }

    /// Simulation advances only in this state.
    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    /// NotStarted -> Running. Returns `true` if the transition happened, in
    /// which case the caller arms the character's physics.
    pub fn confirm(&mut self) -> bool {
        if self.paused || self.phase != Phase::NotStarted {
            return false;
        }
        self.phase = Phase::Running;
        info!("session started");
        true
    }

    /// Whether an impulse input should reach the character.
    pub fn accepts_impulse(&self) -> bool {
        self.is_running()
    }

    /// Running -> Ended. Already-ended sessions stay ended.
    pub fn end(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Ended;
        info!("session ended");
        true
    }

    /// Back to NotStarted from anywhere, pause latch included.
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_started() {
        assert_eq!(Session::default().state(), SessionState::NotStarted);
    }

    #[test]
    fn confirm_starts_only_when_unpaused() {
        let mut s = Session::default();
        s.toggle_pause();
        assert!(!s.confirm());
        assert_eq!(s.state(), SessionState::Paused);

        s.toggle_pause();
        assert_eq!(s.state(), SessionState::NotStarted);
        assert!(s.confirm());
        assert_eq!(s.state(), SessionState::Running);
        assert!(!s.confirm());
    }

    #[test]
    fn pause_round_trips_while_running() {
        let mut s = Session::default();
        s.confirm();
        s.toggle_pause();
        assert_eq!(s.state(), SessionState::Paused);
        assert!(!s.accepts_impulse());
        assert!(!s.is_running());
        s.toggle_pause();
        assert_eq!(s.state(), SessionState::Running);
        assert!(s.accepts_impulse());
    }

    #[test]
    fn impulse_rejected_before_start_and_after_end() {
        let mut s = Session::default();
        assert!(!s.accepts_impulse());
        s.confirm();
        s.end();
        assert!(!s.accepts_impulse());
    }

    #[test]
    fn end_only_from_running_and_idempotent() {
        let mut s = Session::default();
        assert!(!s.end());
        assert_eq!(s.state(), SessionState::NotStarted);

        s.confirm();
        assert!(s.end());
        assert!(!s.end());
        assert_eq!(s.state(), SessionState::Ended);
        assert!(!s.confirm());
    }

    #[test]
    fn restart_returns_to_initial_from_any_state() {
        let mut s = Session::default();
        s.confirm();
        s.end();
        s.toggle_pause();
        s.restart();
        assert_eq!(s, Session::default());

        let mut running = Session::default();
        running.confirm();
        running.restart();
        assert_eq!(running, Session::default());
    }
}
