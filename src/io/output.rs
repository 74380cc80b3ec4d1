use midir::{MidiOutput, MidiOutputConnection};

use super::input::match_port_name;
use crate::error::{Error, Result};

/// Destination for outgoing MIDI bytes.
pub trait MidiSink: Send {
    fn send(&mut self, bytes: &[u8]) -> Result<()>;
}

impl MidiSink for MidiOutputConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        MidiOutputConnection::send(self, bytes).map_err(|e| Error::Midi(e.to_string()))
    }
}

/// Names of all output ports currently visible.
pub fn list_output_ports() -> Result<Vec<String>> {
    let midi_out = MidiOutput::new("pimidi-tools list").map_err(|e| Error::Midi(e.to_string()))?;
    Ok(midi_out
        .ports()
        .iter()
        .filter_map(|p| midi_out.port_name(p).ok())
        .collect())
}

/// Open the output port called `wanted`, returning the connection and the
/// actual port name.
pub fn open_output(wanted: &str) -> Result<(MidiOutputConnection, String)> {
    let midi_out =
        MidiOutput::new("pimidi-tools output").map_err(|e| Error::Midi(e.to_string()))?;

    let ports = midi_out.ports();
    let names: Vec<String> = ports
        .iter()
        .map(|p| midi_out.port_name(p).unwrap_or_default())
        .collect();
    let idx = match_port_name(&names, wanted).ok_or_else(|| {
        Error::invalid(format!(
            "no output port matching '{}' (available: {})",
            wanted,
            names.join(", ")
        ))
    })?;
    let name = names[idx].clone();
    log::debug!("Output '{}' resolved to port '{}'", wanted, name);

    let conn = midi_out
        .connect(&ports[idx], "pimidi-tools-out")
        .map_err(|e| Error::Midi(e.to_string()))?;
    Ok((conn, name))
}
