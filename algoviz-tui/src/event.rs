use std::sync::mpsc::{channel, Receiver, Sender};

/// Messages from background work to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The array changed and should be drawn again
    Redraw,
    /// Text for the status line
    Status(String),
}

/// Collects events from the sort thread and the panels
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Get a sender for publishing events
    pub fn sender(&self) -> Sender<AppEvent> {
        self.sender.clone()
    }

    /// Take everything that is pending without blocking
    pub fn drain(&self) -> Vec<AppEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn drains_events_from_other_threads() {
        let bus = EventBus::new();
        let tx = bus.sender();
        thread::spawn(move || {
            tx.send(AppEvent::Redraw).unwrap();
            tx.send(AppEvent::Status("done".into())).unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(bus.drain(), vec![AppEvent::Redraw, AppEvent::Status("done".into())]);
        assert!(bus.drain().is_empty());
    }
}
