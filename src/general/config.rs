//! Startup configuration.
//!
//! Settings come from a `KEY=VALUE` file (by default `/etc/pimidipy.conf`)
//! and from the process environment, the environment taking precedence. They
//! are resolved once into a [`Config`] which is then handed to the processors.
//!
//! ```text
//! DX7_DEVICE_ID=0
//! DX7_BANK_CONTROL_0=30     # CC for bank select, _1.._7 for the slots
//! DX7_PARAM_134=0:74,75     # [channel:]cc list driving parameter 134
//! CHORD_SEMITONES=0,4,7
//! PORT_IN_0=pimidi0:0
//! PORT_OUT_3=pimidi3:1
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::chord::DEFAULT_SEMITONES;
use crate::dx7::bank::BANK_CONTROL_COUNT;
use crate::dx7::catalog::{ParameterId, PARAMETER_COUNT};
use crate::dx7::direct::parse_mapping_list;
use crate::dx7::sysex::MAX_DEVICE_ID;
use crate::error::{Error, Result};

/// Config file read when no other path is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pimidipy.conf";

/// Raw key/value settings before interpretation.
pub type Settings = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// DX7 device id 0-15 (devices 1-16).
    pub device_id: u8,
    /// CC number of each bank role, indexed by role (0 = bank select).
    pub bank_controls: [u8; BANK_CONTROL_COUNT],
    /// `(channel, cc)` controls bound to each parameter.
    pub direct_mappings: BTreeMap<ParameterId, Vec<(u8, u8)>>,
    /// Chord offsets as configured, duplicates included.
    pub semitones: Vec<i32>,
    /// `PORT_IN_{id}` overrides.
    pub input_ports: BTreeMap<u32, String>,
    /// `PORT_OUT_{id}` overrides.
    pub output_ports: BTreeMap<u32, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_id: 0,
            bank_controls: [0, 1, 2, 3, 4, 5, 6, 7],
            direct_mappings: BTreeMap::new(),
            semitones: DEFAULT_SEMITONES.to_vec(),
            input_ports: BTreeMap::new(),
            output_ports: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Read the config file (a missing file is not an error), overlay the
    /// process environment and resolve.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let mut settings = match std::fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("Loaded settings from {}", path.display());
                parse_settings(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config file at {}, using environment only", path.display());
                Settings::new()
            }
            Err(e) => return Err(e.into()),
        };
        settings.extend(env_settings());
        Self::from_settings(&settings)
    }

    /// Interpret raw settings. Unknown keys are ignored.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut config = Config::default();

        if let Some(v) = settings.get("DX7_DEVICE_ID") {
            config.device_id = parse_u8(v, "DX7_DEVICE_ID", MAX_DEVICE_ID)?;
        }

        for (role, cc) in config.bank_controls.iter_mut().enumerate() {
            let key = format!("DX7_BANK_CONTROL_{}", role);
            if let Some(v) = settings.get(&key) {
                *cc = parse_u8(v, &key, 127)?;
            }
        }

        for id in 0..PARAMETER_COUNT {
            let key = format!("DX7_PARAM_{}", id);
            if let Some(v) = settings.get(&key) {
                let controls = parse_mapping_list(v)
                    .map_err(|e| match e {
                        Error::InvalidArgument(msg) => Error::invalid(format!("{}: {}", key, msg)),
                        other => other,
                    })?;
                if !controls.is_empty() {
                    config.direct_mappings.insert(id as ParameterId, controls);
                }
            }
        }

        if let Some(v) = settings
            .get("CHORD_SEMITONES")
            .or_else(|| settings.get("SEMITONES"))
        {
            config.semitones = parse_semitones(v)?;
        }

        for (key, value) in settings {
            if let Some(id) = key.strip_prefix("PORT_IN_").and_then(|s| s.parse::<u32>().ok()) {
                config.input_ports.insert(id, value.clone());
            } else if let Some(id) = key.strip_prefix("PORT_OUT_").and_then(|s| s.parse::<u32>().ok()) {
                config.output_ports.insert(id, value.clone());
            }
        }

        Ok(config)
    }
}

/// Process environment as settings. Entries that are not valid Unicode
/// cannot name a setting and are skipped.
fn env_settings() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped and
/// surrounding quotes on values are removed.
pub fn parse_settings(text: &str) -> Settings {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Parse a comma separated list of signed semitone offsets.
pub fn parse_semitones(list: &str) -> Result<Vec<i32>> {
    list.split(',')
        .map(str::trim)
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| Error::invalid(format!("semitone offset '{}' is not an integer", s)))
        })
        .collect()
}

fn parse_u8(text: &str, key: &str, max: u8) -> Result<u8> {
    match text.trim().parse::<u8>() {
        Ok(v) if v <= max => Ok(v),
        _ => Err(Error::invalid(format!(
            "{}='{}' must be a number between 0 and {}",
            key, text, max
        ))),
    }
}
