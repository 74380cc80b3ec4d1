//! DX7 CC-to-SysEx parameter programmer.
//!
//! Designed for eight CC knobs laid out 4x2: the top left knob selects a bank
//! of parameters and the other seven edit the parameters of that bank. CC
//! numbers can also be bound straight to parameters, see [`direct`].

pub mod bank;
pub mod catalog;
pub mod controller;
pub mod direct;
pub mod rescale;
pub mod sysex;

pub use catalog::{ControlBank, ParameterDescriptor, ParameterId};
pub use controller::{Dx7Controller, ParameterChange};
