//! Logical port ids to port names.
//!
//! Scripts refer to ports by number. Each number resolves to the name given
//! by `PORT_IN_{id}` / `PORT_OUT_{id}` when configured, otherwise to
//! `pimidi{id / 2}:{id % 2}` for the eight ports of up to four stacked Pimidi
//! boards: 0 => `pimidi0:0`, 1 => `pimidi0:1`, 2 => `pimidi1:0`, ...

use std::fmt;

use crate::error::{Error, Result};
use crate::general::config::Config;

/// Ports that resolve without an explicit override.
pub const DEFAULT_PORT_COUNT: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "IN"),
            Direction::Output => write!(f, "OUT"),
        }
    }
}

/// Resolve a logical port id to a port name.
pub fn resolve_port(config: &Config, id: i64, direction: Direction) -> Result<String> {
    if id < 0 {
        return Err(Error::invalid(format!("port id must be 0 or greater, got {}", id)));
    }

    let overrides = match direction {
        Direction::Input => &config.input_ports,
        Direction::Output => &config.output_ports,
    };
    if let Some(name) = u32::try_from(id).ok().and_then(|id| overrides.get(&id)) {
        return Ok(name.clone());
    }

    if id >= DEFAULT_PORT_COUNT {
        return Err(Error::invalid(format!(
            "port id must be between 0 and {}, or set PORT_{}_{}",
            DEFAULT_PORT_COUNT - 1,
            direction,
            id
        )));
    }

    Ok(format!("pimidi{}:{}", id / 2, id % 2))
}

pub fn input_port_name(config: &Config, id: i64) -> Result<String> {
    resolve_port(config, id, Direction::Input)
}

pub fn output_port_name(config: &Config, id: i64) -> Result<String> {
    resolve_port(config, id, Direction::Output)
}
