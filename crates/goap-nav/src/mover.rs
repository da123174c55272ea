use crate::{NavPath, Navigator, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// No destination, or movement halted.
    Idle,
    Moving,
    Arrived,
    /// The navigator has no path to the destination; the mover stays put.
    Blocked,
}

/// Kinematic path follower for one agent.
///
/// The host owns one `Mover` per agent and calls [`step`](Self::step) once per tick; this is the
/// host-side half of the [`NavWorld`](crate::NavWorld) contract.
#[derive(Debug, Clone)]
pub struct Mover {
    pub position: Vec3,
    pub speed: f32,
    destination: Option<Vec3>,
    stopped: bool,
    path: Option<NavPath>,
    next_index: usize,
}

impl Mover {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            speed,
            destination: None,
            stopped: false,
            path: None,
            next_index: 1,
        }
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn move_to(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.stopped = false;
        self.path = None;
        self.next_index = 1;
    }

    pub fn halt(&mut self) {
        self.stopped = true;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    pub fn step(&mut self, navigator: &dyn Navigator, dt_seconds: f32) -> MoveStatus {
        if self.stopped {
            return MoveStatus::Idle;
        }
        let Some(goal) = self.destination else {
            return MoveStatus::Idle;
        };

        if self.position.distance(goal) <= f32::EPSILON {
            return MoveStatus::Arrived;
        }

        if self.path.is_none() {
            self.path = navigator.find_path(self.position, goal);
            self.next_index = 1;
        }
        let Some(path) = &self.path else {
            return MoveStatus::Blocked;
        };
        if path.points.len() < 2 {
            return MoveStatus::Blocked;
        }

        let mut remaining = self.speed.max(0.0) * dt_seconds.max(0.0);
        let mut current = self.position;
        while self.next_index < path.points.len() && remaining > 0.0 {
            let target = path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        self.position = current;
        if self.next_index >= path.points.len() {
            MoveStatus::Arrived
        } else {
            MoveStatus::Moving
        }
    }
}
