//! DX7 voice parameter table and control bank layout.
//!
//! Parameter numbering follows the DX7 single-voice parameter change SysEx
//! format: ids 0-125 are the six operators (OP6 first, 21 parameters each),
//! followed by the pitch EG, global voice settings, the voice name and the
//! operator on/off mask. The ids are fixed by the device and must not be
//! renumbered.

use serde::Serialize;

use crate::error::{Error, Result};

/// DX7 parameter id as used on the wire.
pub type ParameterId = u8;

/// Number of parameters addressable through parameter change messages.
pub const PARAMETER_COUNT: usize = 156;

/// Maximum number of parameters in one bank (one per physical knob).
pub const BANK_SLOTS: usize = 7;

/// Immutable description of one DX7 parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub id: ParameterId,
    /// Inclusive lower bound.
    pub min: u8,
    /// Inclusive upper bound.
    pub max: u8,
    pub name: &'static str,
}

/// A named group of up to [`BANK_SLOTS`] parameters. The order of
/// `parameters` is the physical knob order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBank {
    pub name: &'static str,
    pub parameters: &'static [ParameterId],
}

const fn param(id: ParameterId, min: u8, max: u8, name: &'static str) -> ParameterDescriptor {
    ParameterDescriptor { id, min, max, name }
}

const fn bank(name: &'static str, parameters: &'static [ParameterId]) -> ControlBank {
    ControlBank { name, parameters }
}

static PARAMETERS: [ParameterDescriptor; PARAMETER_COUNT] = [
    param(0, 0, 99, "OP6 EG rate 1"),
    param(1, 0, 99, "OP6 EG rate 2"),
    param(2, 0, 99, "OP6 EG rate 3"),
    param(3, 0, 99, "OP6 EG rate 4"),
    param(4, 0, 99, "OP6 EG level 1"),
    param(5, 0, 99, "OP6 EG level 2"),
    param(6, 0, 99, "OP6 EG level 3"),
    param(7, 0, 99, "OP6 EG level 4"),
    param(8, 0, 99, "OP6 KBD LEV SCL BRK PT"),
    param(9, 0, 99, "OP6 KBD LEV SCL LFT DEPTH"),
    param(10, 0, 99, "OP6 KBD LEV SCL RHT DEPTH"),
    param(11, 0, 3, "OP6 KBD LEV SCL LFT CURVE"),
    param(12, 0, 3, "OP6 KBD LEV SCL RHT CURVE"),
    param(13, 0, 7, "OP6 KBD RATE SCALING"),
    param(14, 0, 3, "OP6 AMP MOD SENSITIVITY"),
    param(15, 0, 7, "OP6 KEY VEL SENSITIVITY"),
    param(16, 0, 99, "OP6 OPERATOR OUTPUT LEVEL"),
    param(17, 0, 1, "OP6 OSC MODE (fixed/ratio)"),
    param(18, 0, 31, "OP6 OSC FREQ COARSE"),
    param(19, 0, 99, "OP6 OSC FREQ FINE"),
    param(20, 0, 14, "OP6 OSC DETUNE"),
    param(21, 0, 99, "OP5 EG rate 1"),
    param(22, 0, 99, "OP5 EG rate 2"),
    param(23, 0, 99, "OP5 EG rate 3"),
    param(24, 0, 99, "OP5 EG rate 4"),
    param(25, 0, 99, "OP5 EG level 1"),
    param(26, 0, 99, "OP5 EG level 2"),
    param(27, 0, 99, "OP5 EG level 3"),
    param(28, 0, 99, "OP5 EG level 4"),
    param(29, 0, 99, "OP5 KBD LEV SCL BRK PT"),
    param(30, 0, 99, "OP5 KBD LEV SCL LFT DEPTH"),
    param(31, 0, 99, "OP5 KBD LEV SCL RHT DEPTH"),
    param(32, 0, 3, "OP5 KBD LEV SCL LFT CURVE"),
    param(33, 0, 3, "OP5 KBD LEV SCL RHT CURVE"),
    param(34, 0, 7, "OP5 KBD RATE SCALING"),
    param(35, 0, 3, "OP5 AMP MOD SENSITIVITY"),
    param(36, 0, 7, "OP5 KEY VEL SENSITIVITY"),
    param(37, 0, 99, "OP5 OPERATOR OUTPUT LEVEL"),
    param(38, 0, 1, "OP5 OSC MODE (fixed/ratio)"),
    param(39, 0, 31, "OP5 OSC FREQ COARSE"),
    param(40, 0, 99, "OP5 OSC FREQ FINE"),
    param(41, 0, 14, "OP5 OSC DETUNE"),
    param(42, 0, 99, "OP4 EG rate 1"),
    param(43, 0, 99, "OP4 EG rate 2"),
    param(44, 0, 99, "OP4 EG rate 3"),
    param(45, 0, 99, "OP4 EG rate 4"),
    param(46, 0, 99, "OP4 EG level 1"),
    param(47, 0, 99, "OP4 EG level 2"),
    param(48, 0, 99, "OP4 EG level 3"),
    param(49, 0, 99, "OP4 EG level 4"),
    param(50, 0, 99, "OP4 KBD LEV SCL BRK PT"),
    param(51, 0, 99, "OP4 KBD LEV SCL LFT DEPTH"),
    param(52, 0, 99, "OP4 KBD LEV SCL RHT DEPTH"),
    param(53, 0, 3, "OP4 KBD LEV SCL LFT CURVE"),
    param(54, 0, 3, "OP4 KBD LEV SCL RHT CURVE"),
    param(55, 0, 7, "OP4 KBD RATE SCALING"),
    param(56, 0, 3, "OP4 AMP MOD SENSITIVITY"),
    param(57, 0, 7, "OP4 KEY VEL SENSITIVITY"),
    param(58, 0, 99, "OP4 OPERATOR OUTPUT LEVEL"),
    param(59, 0, 1, "OP4 OSC MODE (fixed/ratio)"),
    param(60, 0, 31, "OP4 OSC FREQ COARSE"),
    param(61, 0, 99, "OP4 OSC FREQ FINE"),
    param(62, 0, 14, "OP4 OSC DETUNE"),
    param(63, 0, 99, "OP3 EG rate 1"),
    param(64, 0, 99, "OP3 EG rate 2"),
    param(65, 0, 99, "OP3 EG rate 3"),
    param(66, 0, 99, "OP3 EG rate 4"),
    param(67, 0, 99, "OP3 EG level 1"),
    param(68, 0, 99, "OP3 EG level 2"),
    param(69, 0, 99, "OP3 EG level 3"),
    param(70, 0, 99, "OP3 EG level 4"),
    param(71, 0, 99, "OP3 KBD LEV SCL BRK PT"),
    param(72, 0, 99, "OP3 KBD LEV SCL LFT DEPTH"),
    param(73, 0, 99, "OP3 KBD LEV SCL RHT DEPTH"),
    param(74, 0, 3, "OP3 KBD LEV SCL LFT CURVE"),
    param(75, 0, 3, "OP3 KBD LEV SCL RHT CURVE"),
    param(76, 0, 7, "OP3 KBD RATE SCALING"),
    param(77, 0, 3, "OP3 AMP MOD SENSITIVITY"),
    param(78, 0, 7, "OP3 KEY VEL SENSITIVITY"),
    param(79, 0, 99, "OP3 OPERATOR OUTPUT LEVEL"),
    param(80, 0, 1, "OP3 OSC MODE (fixed/ratio)"),
    param(81, 0, 31, "OP3 OSC FREQ COARSE"),
    param(82, 0, 99, "OP3 OSC FREQ FINE"),
    param(83, 0, 14, "OP3 OSC DETUNE"),
    param(84, 0, 99, "OP2 EG rate 1"),
    param(85, 0, 99, "OP2 EG rate 2"),
    param(86, 0, 99, "OP2 EG rate 3"),
    param(87, 0, 99, "OP2 EG rate 4"),
    param(88, 0, 99, "OP2 EG level 1"),
    param(89, 0, 99, "OP2 EG level 2"),
    param(90, 0, 99, "OP2 EG level 3"),
    param(91, 0, 99, "OP2 EG level 4"),
    param(92, 0, 99, "OP2 KBD LEV SCL BRK PT"),
    param(93, 0, 99, "OP2 KBD LEV SCL LFT DEPTH"),
    param(94, 0, 99, "OP2 KBD LEV SCL RHT DEPTH"),
    param(95, 0, 3, "OP2 KBD LEV SCL LFT CURVE"),
    param(96, 0, 3, "OP2 KBD LEV SCL RHT CURVE"),
    param(97, 0, 7, "OP2 KBD RATE SCALING"),
    param(98, 0, 3, "OP2 AMP MOD SENSITIVITY"),
    param(99, 0, 7, "OP2 KEY VEL SENSITIVITY"),
    param(100, 0, 99, "OP2 OPERATOR OUTPUT LEVEL"),
    param(101, 0, 1, "OP2 OSC MODE (fixed/ratio)"),
    param(102, 0, 31, "OP2 OSC FREQ COARSE"),
    param(103, 0, 99, "OP2 OSC FREQ FINE"),
    param(104, 0, 14, "OP2 OSC DETUNE"),
    param(105, 0, 99, "OP1 EG rate 1"),
    param(106, 0, 99, "OP1 EG rate 2"),
    param(107, 0, 99, "OP1 EG rate 3"),
    param(108, 0, 99, "OP1 EG rate 4"),
    param(109, 0, 99, "OP1 EG level 1"),
    param(110, 0, 99, "OP1 EG level 2"),
    param(111, 0, 99, "OP1 EG level 3"),
    param(112, 0, 99, "OP1 EG level 4"),
    param(113, 0, 99, "OP1 KBD LEV SCL BRK PT"),
    param(114, 0, 99, "OP1 KBD LEV SCL LFT DEPTH"),
    param(115, 0, 99, "OP1 KBD LEV SCL RHT DEPTH"),
    param(116, 0, 3, "OP1 KBD LEV SCL LFT CURVE"),
    param(117, 0, 3, "OP1 KBD LEV SCL RHT CURVE"),
    param(118, 0, 7, "OP1 KBD RATE SCALING"),
    param(119, 0, 3, "OP1 AMP MOD SENSITIVITY"),
    param(120, 0, 7, "OP1 KEY VEL SENSITIVITY"),
    param(121, 0, 99, "OP1 OPERATOR OUTPUT LEVEL"),
    param(122, 0, 1, "OP1 OSC MODE (fixed/ratio)"),
    param(123, 0, 31, "OP1 OSC FREQ COARSE"),
    param(124, 0, 99, "OP1 OSC FREQ FINE"),
    param(125, 0, 14, "OP1 OSC DETUNE"),
    param(126, 0, 99, "PITCH EG RATE 1"),
    param(127, 0, 99, "PITCH EG RATE 2"),
    param(128, 0, 99, "PITCH EG RATE 3"),
    param(129, 0, 99, "PITCH EG RATE 4"),
    param(130, 0, 99, "PITCH EG LEVEL 1"),
    param(131, 0, 99, "PITCH EG LEVEL 2"),
    param(132, 0, 99, "PITCH EG LEVEL 3"),
    param(133, 0, 99, "PITCH EG LEVEL 4"),
    param(134, 0, 31, "ALGORITHM #"),
    param(135, 0, 7, "FEEDBACK"),
    param(136, 0, 1, "OSCILLATOR SYNC"),
    param(137, 0, 99, "LFO SPEED"),
    param(138, 0, 99, "LFO DELAY"),
    param(139, 0, 99, "LFO PITCH MOD DEPTH"),
    param(140, 0, 99, "LFO AMP MOD DEPTH"),
    param(141, 0, 1, "LFO SYNC"),
    param(142, 0, 5, "LFO WAVEFORM"),
    param(143, 0, 7, "PITCH MOD SENSITIVITY"),
    param(144, 0, 48, "TRANSPOSE"),
    param(145, 0, 127, "VOICE NAME CHAR 1"),
    param(146, 0, 127, "VOICE NAME CHAR 2"),
    param(147, 0, 127, "VOICE NAME CHAR 3"),
    param(148, 0, 127, "VOICE NAME CHAR 4"),
    param(149, 0, 127, "VOICE NAME CHAR 5"),
    param(150, 0, 127, "VOICE NAME CHAR 6"),
    param(151, 0, 127, "VOICE NAME CHAR 7"),
    param(152, 0, 127, "VOICE NAME CHAR 8"),
    param(153, 0, 127, "VOICE NAME CHAR 9"),
    param(154, 0, 127, "VOICE NAME CHAR 10"),
    param(155, 0, 63, "OPERATOR ON/OFF"),
];

static CONTROL_BANKS: [ControlBank; 24] = [
    bank("OP1 1/3", &[105, 106, 107, 108, 109, 110, 111]),
    bank("OP1 2/3", &[112, 113, 114, 115, 116, 117, 118]),
    bank("OP1 3/3", &[119, 120, 121, 122, 123, 124, 125]),
    bank("OP2 1/3", &[84, 85, 86, 87, 88, 89, 90]),
    bank("OP2 2/3", &[91, 92, 93, 94, 95, 96, 97]),
    bank("OP2 3/3", &[98, 99, 100, 101, 102, 103, 104]),
    bank("OP3 1/3", &[63, 64, 65, 66, 67, 68, 69]),
    bank("OP3 2/3", &[70, 71, 72, 73, 74, 75, 76]),
    bank("OP3 3/3", &[77, 78, 79, 80, 81, 82, 83]),
    bank("OP4 1/3", &[42, 43, 44, 45, 46, 47, 48]),
    bank("OP4 2/3", &[49, 50, 51, 52, 53, 54, 55]),
    bank("OP4 3/3", &[56, 57, 58, 59, 60, 61, 62]),
    bank("OP5 1/3", &[21, 22, 23, 24, 25, 26, 27]),
    bank("OP5 2/3", &[28, 29, 30, 31, 32, 33, 34]),
    bank("OP5 3/3", &[35, 36, 37, 38, 39, 40, 41]),
    bank("OP6 1/3", &[0, 1, 2, 3, 4, 5, 6]),
    bank("OP6 2/3", &[7, 8, 9, 10, 11, 12, 13]),
    bank("OP6 3/3", &[14, 15, 16, 17, 18, 19, 20]),
    bank("PITCH EG Rate", &[126, 127, 128, 129]),
    bank("PITCH EG Level", &[130, 131, 132, 133]),
    bank("LFO", &[137, 138, 139, 140, 141, 142]),
    bank("MISC 1/3", &[134, 135, 136, 143, 144, 145, 146]),
    bank("MISC 2/3", &[147, 148, 149, 150, 151, 152, 153]),
    bank("MISC 3/3", &[154, 155]),
];

/// Look up a parameter by id.
pub fn lookup(id: ParameterId) -> Result<&'static ParameterDescriptor> {
    PARAMETERS.get(id as usize).ok_or_else(|| {
        Error::out_of_range("parameter id", id as i64, 0, PARAMETER_COUNT as i64 - 1)
    })
}

/// Look up a parameter by its exact label.
pub fn find_by_name(name: &str) -> Option<&'static ParameterDescriptor> {
    PARAMETERS.iter().find(|p| p.name == name)
}

/// The full parameter table in id order.
pub fn all_parameters() -> &'static [ParameterDescriptor] {
    &PARAMETERS
}

/// The control banks in bank-select order.
pub fn all_banks() -> &'static [ControlBank] {
    &CONTROL_BANKS
}

/// Length of the longest parameter label, used to align console output.
pub fn longest_name_len() -> usize {
    PARAMETERS.iter().map(|p| p.name.len()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_match_positions() {
        for (i, p) in all_parameters().iter().enumerate() {
            assert_eq!(p.id as usize, i);
            assert!(p.min <= p.max, "{} has min > max", p.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = all_parameters().iter().map(|p| p.name).collect();
        assert_eq!(names.len(), PARAMETER_COUNT);
    }

    #[test]
    fn test_known_entries() {
        let p = lookup(20).unwrap();
        assert_eq!((p.min, p.max, p.name), (0, 14, "OP6 OSC DETUNE"));

        let p = lookup(134).unwrap();
        assert_eq!((p.min, p.max, p.name), (0, 31, "ALGORITHM #"));

        let p = lookup(144).unwrap();
        assert_eq!((p.min, p.max), (0, 48));

        let p = lookup(155).unwrap();
        assert_eq!((p.min, p.max, p.name), (0, 63, "OPERATOR ON/OFF"));
    }

    #[test]
    fn test_lookup_out_of_range() {
        assert!(matches!(lookup(156), Err(Error::OutOfRange { .. })));
        assert!(matches!(lookup(255), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_operator_blocks_repeat() {
        // OP5..OP1 repeat the OP6 layout 21 ids apart.
        for op in 1..6u8 {
            for offset in 0..21u8 {
                let base = lookup(offset).unwrap();
                let other = lookup(op * 21 + offset).unwrap();
                assert_eq!((base.min, base.max), (other.min, other.max));
                assert_eq!(&base.name[3..], &other.name[3..]);
            }
        }
    }

    #[test]
    fn test_banks_reference_valid_parameters() {
        assert_eq!(all_banks().len(), 24);
        for bank in all_banks() {
            assert!(!bank.parameters.is_empty() && bank.parameters.len() <= BANK_SLOTS);
            for &id in bank.parameters {
                assert!(lookup(id).is_ok(), "bank {} references {}", bank.name, id);
            }
        }
        assert_eq!(all_banks()[0].name, "OP1 1/3");
        assert_eq!(all_banks()[23].parameters, &[154, 155]);
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find_by_name("LFO WAVEFORM").map(|p| p.id), Some(142));
        assert!(find_by_name("nope").is_none());
    }
}
