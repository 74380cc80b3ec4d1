//! MIDI scripts for Pimidi boards: a chord generator, a DX7 SysEx parameter
//! programmer and a MIDI thru fanout.
//!
//! Each tool is an [`EventProcessor`] driven by a forwarding thread that owns
//! the output ports. Port names and tool settings come from a [`Config`]
//! resolved once at startup.

pub mod chord;
pub mod dx7;
pub mod error;
pub mod event;
pub mod general;
pub mod io;
pub mod processor;
pub mod thru;

pub use error::{Error, Result};
pub use event::MidiEvent;
pub use general::config::Config;
pub use processor::EventProcessor;
