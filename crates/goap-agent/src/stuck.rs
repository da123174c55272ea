use goap_nav::Vec3;

/// Liveness check: how long an agent has stayed within `tolerance` of one spot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StuckMonitor {
    last_position: Option<Vec3>,
    elapsed: f32,
}

impl StuckMonitor {
    /// Feeds one tick's position; returns the accumulated motionless time.
    pub fn observe(&mut self, position: Vec3, dt_seconds: f32, tolerance: f32) -> f32 {
        match self.last_position {
            Some(last) if last.distance(position) <= tolerance => {
                self.elapsed += dt_seconds.max(0.0);
            }
            _ => {
                self.last_position = Some(position);
                self.elapsed = 0.0;
            }
        }
        self.elapsed
    }

    pub fn reset(&mut self, position: Option<Vec3>) {
        self.last_position = position;
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Effective threshold: while an action is current its duration is added to the base, so
    /// time spent on the action is not mistaken for being stuck.
    pub fn threshold_for(base: f32, action_duration: Option<f32>) -> f32 {
        base + action_duration.map_or(0.0, |d| d.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_only_while_motionless() {
        let mut m = StuckMonitor::default();
        assert_eq!(m.observe(Vec3::ZERO, 1.0, 0.1), 0.0);
        assert_eq!(m.observe(Vec3::ground(0.05, 0.0), 1.0, 0.1), 1.0);
        assert_eq!(m.observe(Vec3::ground(0.0, 0.05), 1.0, 0.1), 2.0);
        assert_eq!(m.observe(Vec3::ground(1.0, 0.0), 1.0, 0.1), 0.0);
    }

    #[test]
    fn current_action_extends_the_threshold() {
        assert_eq!(StuckMonitor::threshold_for(10.0, None), 10.0);
        assert_eq!(StuckMonitor::threshold_for(10.0, Some(5.0)), 15.0);
        assert_eq!(StuckMonitor::threshold_for(10.0, Some(12.0)), 22.0);
        assert_eq!(StuckMonitor::threshold_for(10.0, Some(-1.0)), 10.0);
    }
}
