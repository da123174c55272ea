/// A cancellable deferred completion: "resume this agent at `now + duration`".
///
/// Nothing blocks while a completion is pending; the owning agent polls it with its own clock
/// each tick. Cancelling drops the pending completion so it never fires.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Suspension {
    /// Agent-clock time the pending completion is due at.
    due: Option<f64>,
}

impl Suspension {
    /// Schedules a completion, replacing any pending one.
    pub fn schedule(&mut self, now: f64, duration: f32) {
        self.due = Some(now + f64::from(duration.max(0.0)));
    }

    /// Drops the pending completion; returns `false` if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Fires (at most once) when `now` has reached the due time.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
