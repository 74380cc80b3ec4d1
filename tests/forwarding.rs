use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};

use pimidi_tools::chord::ChordProcessor;
use pimidi_tools::dx7::Dx7Controller;
use pimidi_tools::general::config::{Config, Settings};
use pimidi_tools::general::forwarder::{forward_events, spawn_forwarder};
use pimidi_tools::io::output::MidiSink;
use pimidi_tools::thru::ThruProcessor;
use pimidi_tools::{Error, EventProcessor, MidiEvent, Result};

#[derive(Clone, Default)]
struct RecordingSink {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingSink {
    fn messages(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

impl MidiSink for RecordingSink {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.sent.lock().unwrap().push(bytes.to_vec());
        Ok(())
    }
}

struct FailingSink;

impl MidiSink for FailingSink {
    fn send(&mut self, _bytes: &[u8]) -> Result<()> {
        Err(Error::Midi("port gone".into()))
    }
}

fn run(processor: &mut dyn EventProcessor, sinks: &[RecordingSink], input: &[&[u8]]) -> usize {
    let (tx, rx) = channel();
    for bytes in input {
        tx.send(MidiEvent::from_bytes(bytes).unwrap()).unwrap();
    }
    drop(tx);
    let mut boxed: Vec<Box<dyn MidiSink>> = sinks
        .iter()
        .map(|s| Box::new(s.clone()) as Box<dyn MidiSink>)
        .collect();
    forward_events(rx, processor, &mut boxed)
}

#[test]
fn chord_expands_and_passes_through() {
    let sink = RecordingSink::default();
    let mut chord = ChordProcessor::new(&[0, 4, 0, 7]);
    run(
        &mut chord,
        &[sink.clone()],
        &[&[0x90, 60, 100], &[0xE0, 0, 64], &[0x80, 60, 0]],
    );
    assert_eq!(
        sink.messages(),
        vec![
            vec![0x90, 60, 100],
            vec![0x90, 64, 100],
            vec![0x90, 67, 100],
            vec![0xE0, 0, 64],
            vec![0x80, 60, 0],
            vec![0x80, 64, 0],
            vec![0x80, 67, 0],
        ]
    );
}

#[test]
fn dx7_turns_knobs_into_sysex() {
    let settings: Settings = [
        ("DX7_DEVICE_ID", "2"),
        ("DX7_BANK_CONTROL_0", "20"),
        ("DX7_BANK_CONTROL_1", "21"),
        ("DX7_PARAM_134", "1:74"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let config = Config::from_settings(&settings).unwrap();
    let mut dx7 = Dx7Controller::from_config(&config).unwrap();

    let sink = RecordingSink::default();
    run(
        &mut dx7,
        &[sink.clone()],
        &[
            &[0xB0, 21, 127], // slot 1 of OP1 1/3 -> OP1 EG rate 1
            &[0xB0, 20, 127], // select MISC 3/3
            &[0xB0, 21, 0],   // slot 1 of MISC 3/3 -> VOICE NAME CHAR 10
            &[0xB1, 74, 127], // direct -> ALGORITHM
            &[0xB0, 74, 127], // wrong channel, ignored
            &[0x90, 60, 1],   // passthrough
        ],
    );

    assert_eq!(
        sink.messages(),
        vec![
            vec![0xF0, 0x43, 0x12, 0x00, 105, 99, 0xF7],
            vec![0xF0, 0x43, 0x12, 0x01, 154 & 0x7F, 0, 0xF7],
            vec![0xF0, 0x43, 0x12, 0x01, 134 & 0x7F, 31, 0xF7],
            vec![0x90, 60, 1],
        ]
    );
    assert_eq!(dx7.current_bank_index(), 23);
}

#[test]
fn thru_fans_out_to_every_sink() {
    let sinks: Vec<RecordingSink> = (0..8).map(|_| RecordingSink::default()).collect();
    let written = run(
        &mut ThruProcessor,
        &sinks,
        &[&[0xB3, 7, 100], &[0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7]],
    );
    assert_eq!(written, 16);
    for sink in &sinks {
        assert_eq!(
            sink.messages(),
            vec![vec![0xB3, 7, 100], vec![0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7]]
        );
    }
}

#[test]
fn failing_sink_does_not_stop_forwarding() {
    let good = RecordingSink::default();
    let sinks: Vec<Box<dyn MidiSink>> = vec![Box::new(FailingSink), Box::new(good.clone())];
    let (tx, rx) = channel();
    let handle = spawn_forwarder(Box::new(ThruProcessor), sinks, rx);
    tx.send(MidiEvent::from_bytes(&[0x90, 1, 2]).unwrap()).unwrap();
    tx.send(MidiEvent::from_bytes(&[0x80, 1, 2]).unwrap()).unwrap();
    drop(tx);
    assert_eq!(handle.join().unwrap(), 2);
    assert_eq!(good.messages().len(), 2);
}
