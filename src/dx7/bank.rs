//! Bank-relative knob mapping.
//!
//! Eight physical controls are laid out 4x2. Control 0 picks the bank, controls
//! 1-7 address the parameters of the current bank by position.

use std::collections::HashMap;

use super::catalog::{self, ControlBank};
use super::rescale::rescale;

/// Number of physical controls used for bank-relative mapping.
pub const BANK_CONTROL_COUNT: usize = 8;

/// What a bank-role control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankRole {
    /// Selects the current bank.
    Select,
    /// Addresses the parameter at this 0-based position in the current bank.
    Slot(usize),
}

impl BankRole {
    fn from_index(index: usize) -> Self {
        match index {
            0 => BankRole::Select,
            i => BankRole::Slot(i - 1),
        }
    }
}

/// CC number to bank role assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankControls {
    roles: HashMap<u8, BankRole>,
}

impl BankControls {
    /// Build from the CC number of each role, indexed by role (0 = select).
    ///
    /// If a CC number appears twice, the higher role wins.
    pub fn from_ccs(ccs: [u8; BANK_CONTROL_COUNT]) -> Self {
        let roles = ccs
            .iter()
            .enumerate()
            .map(|(index, &cc)| (cc, BankRole::from_index(index)))
            .collect();
        Self { roles }
    }

    /// Role of a CC number, if it is one of the bank controls.
    pub fn role_for(&self, cc: u8) -> Option<BankRole> {
        self.roles.get(&cc).copied()
    }
}

impl Default for BankControls {
    /// CC `i` drives role `i`.
    fn default() -> Self {
        Self::from_ccs([0, 1, 2, 3, 4, 5, 6, 7])
    }
}

/// Tracks which bank the slot controls currently address.
#[derive(Debug, Default)]
pub struct BankSelector {
    current: usize,
}

impl BankSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_bank(&self) -> &'static ControlBank {
        &catalog::all_banks()[self.current]
    }

    /// Handle a bank-select control value.
    ///
    /// Returns the newly selected bank, or `None` when the value maps to the
    /// bank that is already selected.
    pub fn select(&mut self, raw: u8) -> Option<&'static ControlBank> {
        let banks = catalog::all_banks();
        let index = rescale(raw, 0, (banks.len() - 1) as u8) as usize;
        if index == self.current {
            return None;
        }
        self.current = index;
        Some(&banks[index])
    }
}

/// Render the knob layout of a bank, two rows of four, each label padded to
/// the longest parameter name.
pub fn describe_bank(bank: &ControlBank) -> String {
    let width = catalog::longest_name_len();
    let labels = std::iter::once("Bank select").chain(
        bank.parameters
            .iter()
            .filter_map(|&id| catalog::lookup(id).ok())
            .map(|p| p.name),
    );

    let mut out = format!("Switched to bank {}, controls:\n", bank.name);
    for (i, label) in labels.enumerate() {
        if i > 0 {
            out.push(if i % 4 == 0 { '\n' } else { ' ' });
        }
        out.push_str(&format!("[{:<width$}]", label, width = width));
    }
    out
}
