use std::sync::mpsc::Receiver;
use std::thread;

use crate::event::MidiEvent;
use crate::io::output::MidiSink;
use crate::processor::EventProcessor;

/// Run `processor` over every event from `rx` until the channel closes,
/// writing each produced event to every sink. Returns the number of messages
/// successfully written.
pub fn forward_events(
    rx: Receiver<MidiEvent>,
    processor: &mut dyn EventProcessor,
    sinks: &mut [Box<dyn MidiSink>],
) -> usize {
    let mut written = 0;
    for event in rx {
        for out in processor.process(event) {
            let bytes = out.to_bytes();
            for sink in sinks.iter_mut() {
                match sink.send(&bytes) {
                    Ok(()) => written += 1,
                    Err(err) => log::error!("Error sending MIDI message to output: {}", err),
                }
            }
        }
    }
    written
}

/// Spawn a forwarding thread that owns the processor and the output sinks.
/// The thread exits once every sender of `rx` is dropped.
pub fn spawn_forwarder(
    mut processor: Box<dyn EventProcessor>,
    mut sinks: Vec<Box<dyn MidiSink>>,
    rx: Receiver<MidiEvent>,
) -> thread::JoinHandle<usize> {
    thread::spawn(move || {
        let written = forward_events(rx, processor.as_mut(), &mut sinks);
        log::debug!("Forwarder stopped after {} messages", written);
        written
    })
}
