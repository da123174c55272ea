use goap_core::{Action, Effect, FactSet, WorldView};

/// Hand-off passed to listeners when an action's timed execution starts.
pub struct ActionStarted<'a, E: Effect, W: WorldView> {
    pub agent: W::Agent,
    pub action: &'a Action<E>,
    pub target: Option<W::Entity>,
    pub after_effects: &'a FactSet<E>,
}

/// Handle returned by [`Agent::subscribe`](crate::Agent::subscribe), used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

pub(crate) type ListenerFn<E, W> = Box<dyn FnMut(&mut W, &ActionStarted<'_, E, W>)>;

/// Registered action-start callbacks, invoked synchronously in registration order.
pub(crate) struct Listeners<E: Effect, W: WorldView> {
    next_id: u64,
    entries: Vec<(ListenerId, ListenerFn<E, W>)>,
}

impl<E: Effect, W: WorldView> Default for Listeners<E, W> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E: Effect, W: WorldView> Listeners<E, W> {
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&mut W, &ActionStarted<'_, E, W>) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(lid, _)| *lid != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn notify(&mut self, world: &mut W, event: &ActionStarted<'_, E, W>) {
        for (_, listener) in self.entries.iter_mut() {
            listener(world, event);
        }
    }
}
