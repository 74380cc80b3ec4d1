//! MIDI thru: every input event goes unmodified to all outputs.

use crate::event::MidiEvent;
use crate::processor::EventProcessor;

/// Number of output ports the thru fanout opens.
pub const MAX_PORT: usize = 8;

#[derive(Debug, Default)]
pub struct ThruProcessor;

impl EventProcessor for ThruProcessor {
    fn process(&mut self, event: MidiEvent) -> Vec<MidiEvent> {
        log::debug!("Forwarding event {} to all outputs", event);
        vec![event]
    }
}
