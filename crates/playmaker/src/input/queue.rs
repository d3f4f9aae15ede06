use glam::Vec3;

/// Pointer events the whiteboard understands.
/// Positions are in the active render space (screen pixels or world meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { pos: Vec3 },
    /// A touch/cursor moved while down.
    PointerMove { pos: Vec3 },
    /// A touch/click ended.
    PointerUp { pos: Vec3 },
}

impl InputEvent {
    pub fn position(&self) -> Vec3 {
        match *self {
            InputEvent::PointerDown { pos }
            | InputEvent::PointerMove { pos }
            | InputEvent::PointerUp { pos } => pos,
        }
    }
}

/// A queue of input events.
/// The host writes events into the queue; the runner drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { pos: Vec3::new(10.0, 20.0, 0.0) });
        q.push(InputEvent::PointerUp { pos: Vec3::new(30.0, 20.0, 0.0) });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
        assert_eq!(events[1].position(), Vec3::new(30.0, 20.0, 0.0));
    }

    #[test]
    fn iter_keeps_events() {
        let mut q = InputQueue::default();
        q.push(InputEvent::PointerMove { pos: Vec3::ONE });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
