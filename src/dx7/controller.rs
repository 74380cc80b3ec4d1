//! CC to DX7 SysEx mapping engine.

use super::bank::{describe_bank, BankControls, BankRole, BankSelector};
use super::catalog::{self, ParameterId};
use super::direct::DirectMapping;
use super::rescale::rescale;
use super::sysex::{self, MAX_DEVICE_ID};
use crate::error::{Error, Result};
use crate::event::MidiEvent;
use crate::general::config::Config;
use crate::processor::EventProcessor;

/// A resolved parameter write, value already inside the parameter's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterChange {
    pub parameter: ParameterId,
    pub value: u8,
}

impl ParameterChange {
    fn rescaled(parameter: ParameterId, raw: u8) -> Option<Self> {
        let p = catalog::lookup(parameter).ok()?;
        Some(Self {
            parameter,
            value: rescale(raw, p.min, p.max),
        })
    }
}

/// Maps incoming control changes onto DX7 parameters and passes every other
/// event through.
///
/// Each instance owns its own bank selection, so several controllers can live
/// in one process.
#[derive(Debug)]
pub struct Dx7Controller {
    device_id: u8,
    bank_controls: BankControls,
    direct: DirectMapping,
    selector: BankSelector,
}

impl Dx7Controller {
    pub fn new(device_id: u8, bank_controls: BankControls, direct: DirectMapping) -> Result<Self> {
        if device_id > MAX_DEVICE_ID {
            return Err(Error::out_of_range(
                "device id",
                device_id as i64,
                0,
                MAX_DEVICE_ID as i64,
            ));
        }
        Ok(Self {
            device_id,
            bank_controls,
            direct,
            selector: BankSelector::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut direct = DirectMapping::new();
        for (&parameter, controls) in &config.direct_mappings {
            catalog::lookup(parameter)?;
            for &(channel, cc) in controls {
                direct.assign(channel, cc, parameter);
            }
        }
        if direct.is_empty() {
            log::debug!("No direct parameter mappings configured");
        }
        Self::new(
            config.device_id,
            BankControls::from_ccs(config.bank_controls),
            direct,
        )
    }

    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    pub fn current_bank_index(&self) -> usize {
        self.selector.current_index()
    }

    /// Resolve a control change to parameter writes.
    ///
    /// Bank-relative results come first, then direct assignments. A slot
    /// beyond the end of the current bank and an unmapped control both yield
    /// nothing.
    pub fn handle_control_change(&mut self, channel: u8, cc: u8, raw: u8) -> Vec<ParameterChange> {
        let mut changes = Vec::new();

        match self.bank_controls.role_for(cc) {
            Some(BankRole::Select) => {
                if let Some(bank) = self.selector.select(raw) {
                    log::info!("{}", describe_bank(bank));
                }
            }
            Some(BankRole::Slot(slot)) => {
                let bank = self.selector.current_bank();
                if let Some(&parameter) = bank.parameters.get(slot) {
                    changes.extend(ParameterChange::rescaled(parameter, raw));
                } else {
                    log::debug!("Bank {} has no slot {}", bank.name, slot + 1);
                }
            }
            None => {}
        }

        for &parameter in self.direct.targets(channel, cc) {
            changes.extend(ParameterChange::rescaled(parameter, raw));
        }

        changes
    }

    fn parameter_change_event(&self, change: ParameterChange) -> Result<MidiEvent> {
        let msg = sysex::build_parameter_change(self.device_id, change.parameter, change.value)?;
        Ok(MidiEvent::SysEx(msg.to_vec()))
    }
}

impl EventProcessor for Dx7Controller {
    fn process(&mut self, event: MidiEvent) -> Vec<MidiEvent> {
        match event {
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => self
                .handle_control_change(channel, control, value)
                .into_iter()
                .filter_map(|change| match self.parameter_change_event(change) {
                    Ok(msg) => {
                        if let Ok(p) = catalog::lookup(change.parameter) {
                            log::info!("Setting {} to {}", p.name, change.value);
                        }
                        Some(msg)
                    }
                    Err(e) => {
                        log::error!("Dropping parameter change {:?}: {}", change, e);
                        None
                    }
                })
                .collect(),
            other => vec![other],
        }
    }
}
