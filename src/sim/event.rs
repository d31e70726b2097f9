//! Reflection events and the sink that receives them

/// Emitted when a ball reflects off a true wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionEvent {
    /// Ordinary ball: trigger the sample on this channel
    Voice { channel: u8 },
    /// Lead ball: play the next pitch of the region's sequence
    Sequence { pitch: u8 },
}

/// Receives reflection events. Regions call it, never the reverse.
pub trait EventSink {
    fn emit(&mut self, event: ReflectionEvent);
}

/// Records every event in order
impl EventSink for Vec<ReflectionEvent> {
    fn emit(&mut self, event: ReflectionEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: ReflectionEvent) {
        (**self).emit(event);
    }
}

/// Discards events
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: ReflectionEvent) {}
}
