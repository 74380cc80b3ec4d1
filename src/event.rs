//! MIDI events as seen by the processors.
//!
//! Only the message kinds the scripts act on get their own variant. Anything
//! else travels as [`MidiEvent::Other`] with its raw bytes so it can be passed
//! through untouched.

use std::fmt;

/// A single MIDI message received from or written to a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiEvent {
    /// Note on (channel 0-15, note 0-127, velocity 0-127).
    NoteOn { channel: u8, note: u8, velocity: u8 },
    /// Note off (channel 0-15, note 0-127, release velocity 0-127).
    NoteOff { channel: u8, note: u8, velocity: u8 },
    /// Control change (channel, controller number, value).
    ControlChange { channel: u8, control: u8, value: u8 },
    /// Complete system exclusive message, including the `0xF0`/`0xF7` framing.
    SysEx(Vec<u8>),
    /// Any other message, kept verbatim.
    Other(Vec<u8>),
}

impl MidiEvent {
    /// Parse a raw MIDI buffer as delivered by the input callback.
    ///
    /// Returns `None` for an empty buffer. Truncated channel messages are kept
    /// as [`MidiEvent::Other`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let status = *bytes.first()?;
        let channel = status & 0x0F;

        let event = match status & 0xF0 {
            0x90 if bytes.len() >= 3 => MidiEvent::NoteOn {
                channel,
                note: bytes[1],
                velocity: bytes[2],
            },
            0x80 if bytes.len() >= 3 => MidiEvent::NoteOff {
                channel,
                note: bytes[1],
                velocity: bytes[2],
            },
            0xB0 if bytes.len() >= 3 => MidiEvent::ControlChange {
                channel,
                control: bytes[1],
                value: bytes[2],
            },
            _ if status == 0xF0 => MidiEvent::SysEx(bytes.to_vec()),
            _ => MidiEvent::Other(bytes.to_vec()),
        };
        Some(event)
    }

    /// Serialize back to wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => vec![0x90 | (channel & 0x0F), *note, *velocity],
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => vec![0x80 | (channel & 0x0F), *note, *velocity],
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => vec![0xB0 | (channel & 0x0F), *control, *value],
            MidiEvent::SysEx(bytes) | MidiEvent::Other(bytes) => bytes.clone(),
        }
    }
}

impl fmt::Display for MidiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => write!(f, "NoteOn(ch={}, note={}, vel={})", channel, note, velocity),
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => write!(f, "NoteOff(ch={}, note={}, vel={})", channel, note, velocity),
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => write!(f, "ControlChange(ch={}, cc={}, value={})", channel, control, value),
            MidiEvent::SysEx(bytes) => write!(f, "SysEx({:02X?})", bytes),
            MidiEvent::Other(bytes) => write!(f, "Other({:02X?})", bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_on() {
        let msg = MidiEvent::from_bytes(&[0x93, 60, 100]).unwrap();
        assert_eq!(
            msg,
            MidiEvent::NoteOn {
                channel: 3,
                note: 60,
                velocity: 100
            }
        );
    }

    #[test]
    fn test_note_on_velocity_zero_stays_note_on() {
        let msg = MidiEvent::from_bytes(&[0x90, 60, 0]).unwrap();
        assert!(matches!(msg, MidiEvent::NoteOn { velocity: 0, .. }));
        assert_eq!(msg.to_bytes(), vec![0x90, 60, 0]);
    }

    #[test]
    fn test_parse_cc() {
        let msg = MidiEvent::from_bytes(&[0xB1, 7, 64]).unwrap();
        assert_eq!(
            msg,
            MidiEvent::ControlChange {
                channel: 1,
                control: 7,
                value: 64
            }
        );
    }

    #[test]
    fn test_sysex_and_other_are_kept_verbatim() {
        let sysex = [0xF0, 0x43, 0x10, 0x00, 0x01, 0x20, 0xF7];
        assert_eq!(
            MidiEvent::from_bytes(&sysex).unwrap(),
            MidiEvent::SysEx(sysex.to_vec())
        );

        let bend = [0xE0, 0x00, 0x40];
        let msg = MidiEvent::from_bytes(&bend).unwrap();
        assert_eq!(msg, MidiEvent::Other(bend.to_vec()));
        assert_eq!(msg.to_bytes(), bend.to_vec());
    }

    #[test]
    fn test_truncated_and_empty() {
        assert_eq!(MidiEvent::from_bytes(&[]), None);
        assert_eq!(
            MidiEvent::from_bytes(&[0x90, 60]),
            Some(MidiEvent::Other(vec![0x90, 60]))
        );
    }

    #[test]
    fn test_note_off_roundtrip() {
        let bytes = [0x8F, 0, 127];
        assert_eq!(MidiEvent::from_bytes(&bytes).unwrap().to_bytes(), bytes.to_vec());
    }
}
