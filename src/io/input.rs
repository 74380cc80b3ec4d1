use std::sync::mpsc::Sender;

use midir::{Ignore, MidiInput, MidiInputConnection};

use crate::error::{Error, Result};
use crate::event::MidiEvent;

/// Index of the port called `wanted`.
///
/// An exact name match wins. Next, `client:N` with a numeric `N` is taken as
/// an ALSA address and matched against names of the form
/// `"{client}:{port name} {client id}:{port id}"`, either by client name and
/// port id or by the numeric `client id:port id` pair. Otherwise the first
/// name containing `wanted` (case-insensitive) is used.
pub fn match_port_name(names: &[String], wanted: &str) -> Option<usize> {
    if let Some(i) = names.iter().position(|n| n == wanted) {
        return Some(i);
    }
    if let Some(i) = names.iter().position(|n| matches_alsa_address(n, wanted)) {
        return Some(i);
    }
    let wanted = wanted.to_lowercase();
    names.iter().position(|n| n.to_lowercase().contains(&wanted))
}

fn matches_alsa_address(name: &str, wanted: &str) -> bool {
    let Some((client, port)) = wanted.rsplit_once(':') else {
        return false;
    };
    if client.is_empty() || port.parse::<u32>().is_err() {
        return false;
    }
    let Some((_, address)) = name.rsplit_once(' ') else {
        return false;
    };
    if address == wanted {
        return true;
    }
    let Some((_, port_id)) = address.rsplit_once(':') else {
        return false;
    };
    port_id == port && name.split_once(':').map(|(c, _)| c) == Some(client)
}

/// Names of all input ports currently visible.
pub fn list_input_ports() -> Result<Vec<String>> {
    let midi_in = MidiInput::new("pimidi-tools list").map_err(|e| Error::Midi(e.to_string()))?;
    Ok(midi_in
        .ports()
        .iter()
        .filter_map(|p| midi_in.port_name(p).ok())
        .collect())
}

/// Open the input port called `wanted` and forward every parsed event to `tx`.
///
/// Returns the connection (dropping it closes the port) and the actual port
/// name.
pub fn open_input(wanted: &str, tx: Sender<MidiEvent>) -> Result<(MidiInputConnection<()>, String)> {
    let mut midi_in =
        MidiInput::new("pimidi-tools input").map_err(|e| Error::Midi(e.to_string()))?;
    midi_in.ignore(Ignore::None);

    let ports = midi_in.ports();
    let names: Vec<String> = ports
        .iter()
        .map(|p| midi_in.port_name(p).unwrap_or_default())
        .collect();
    let idx = match_port_name(&names, wanted).ok_or_else(|| {
        Error::invalid(format!(
            "no input port matching '{}' (available: {})",
            wanted,
            names.join(", ")
        ))
    })?;
    let name = names[idx].clone();
    log::debug!("Input '{}' resolved to port '{}'", wanted, name);

    let conn = midi_in
        .connect(
            &ports[idx],
            "pimidi-tools-in",
            move |_stamp, message, _| {
                if let Some(event) = MidiEvent::from_bytes(message) {
                    log::trace!("[MIDI IN] {}", event);
                    let _ = tx.send(event);
                }
            },
            (),
        )
        .map_err(|e| Error::Midi(e.to_string()))?;

    Ok((conn, name))
}
