use super::Event;

/// Receiver of controller events.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // a dropped receiver only means nobody listens anymore
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: Fn(Event),
{
    fn send(&self, event: Event) {
        (self.0)(event);
    }
}
