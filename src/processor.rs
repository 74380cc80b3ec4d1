use crate::event::MidiEvent;

/// Turns one incoming event into the events to write to the outputs.
///
/// Implementations are driven from a single forwarding thread, one event at a
/// time in arrival order, so they may keep mutable state without locking.
pub trait EventProcessor: Send {
    fn process(&mut self, event: MidiEvent) -> Vec<MidiEvent>;
}
