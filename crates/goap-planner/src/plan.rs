use std::collections::VecDeque;

use goap_core::{ActionRef, Effect};

/// An ordered, non-repeating action sequence and its summed planning cost.
#[derive(Debug, Clone)]
pub struct Plan<E: Effect> {
    pub steps: Vec<ActionRef<E>>,
    pub cost: f32,
}

impl<E: Effect> Plan<E> {
    pub fn empty() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn into_queue(self) -> VecDeque<ActionRef<E>> {
        self.steps.into()
    }
}
