//! DX7 single parameter change messages.
//!
//! Layout: `F0 43 1n gg pp vv F7` where `n` is the device id, `gg` carries
//! bit 7 of the parameter number (parameter group) and `pp` the low 7 bits.

use super::catalog::{self, ParameterId};
use crate::error::{Error, Result};

/// Yamaha manufacturer id.
pub const YAMAHA_ID: u8 = 0x43;

/// Length of a parameter change message.
pub const PARAMETER_CHANGE_LEN: usize = 7;

/// Highest DX7 device id (devices 1-16 are addressed as 0-15).
pub const MAX_DEVICE_ID: u8 = 15;

/// Build a parameter change message, validating every field first.
pub fn build_parameter_change(
    device_id: u8,
    parameter_id: ParameterId,
    value: u8,
) -> Result<[u8; PARAMETER_CHANGE_LEN]> {
    if device_id > MAX_DEVICE_ID {
        return Err(Error::out_of_range(
            "device id",
            device_id as i64,
            0,
            MAX_DEVICE_ID as i64,
        ));
    }
    let param = catalog::lookup(parameter_id)?;
    if value < param.min || value > param.max {
        return Err(Error::out_of_range(
            format!("value for '{}'", param.name),
            value as i64,
            param.min as i64,
            param.max as i64,
        ));
    }

    Ok([
        0xF0,
        YAMAHA_ID,
        0x10 | device_id,
        (parameter_id & 0x80) >> 7,
        parameter_id & 0x7F,
        value,
        0xF7,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_operator_parameter() {
        let msg = build_parameter_change(0, 16, 99).unwrap();
        assert_eq!(msg, [0xF0, 0x43, 0x10, 0x00, 0x10, 99, 0xF7]);
    }

    #[test]
    fn test_high_parameter_sets_group_bit() {
        // 134 = 0b1000_0110
        let msg = build_parameter_change(5, 134, 31).unwrap();
        assert_eq!(msg, [0xF0, 0x43, 0x15, 0x01, 0x06, 31, 0xF7]);
    }

    #[test]
    fn test_rejects_bad_device() {
        assert!(matches!(
            build_parameter_change(16, 0, 0),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_parameter() {
        assert!(matches!(
            build_parameter_change(0, 200, 0),
            Err(Error::OutOfRange { .. })
        ));
        assert!(build_parameter_change(0, 156, 0).is_err());
    }

    #[test]
    fn test_rejects_value_outside_parameter_range() {
        // OP6 OSC MODE is 0-1.
        assert!(build_parameter_change(0, 17, 2).is_err());
        assert!(build_parameter_change(0, 17, 1).is_ok());
        // Voice name characters go up to 127.
        assert!(build_parameter_change(0, 145, 127).is_ok());
    }

    proptest! {
        #[test]
        fn prop_valid_messages_are_framed(device in 0u8..=15, id in 0u8..156, raw in 0u8..=127) {
            let p = catalog::lookup(id).unwrap();
            let value = p.min + raw % (p.max - p.min + 1);
            let msg = build_parameter_change(device, id, value).unwrap();
            prop_assert_eq!(msg.len(), PARAMETER_CHANGE_LEN);
            prop_assert_eq!(msg[0], 0xF0);
            prop_assert_eq!(msg[6], 0xF7);
            prop_assert_eq!(msg[2] & 0x0F, device);
            prop_assert_eq!(((msg[3] as u16) << 7) | msg[4] as u16, id as u16);
        }
    }
}
