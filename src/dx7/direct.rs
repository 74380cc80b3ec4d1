//! Direct `(channel, cc)` to parameter assignments.

use std::collections::HashMap;

use super::catalog::ParameterId;
use crate::error::{Error, Result};

/// Parse a `[channel:]cc` list such as `"0:74,75,3:20"`. A bare CC number
/// listens on channel 0.
pub fn parse_mapping_list(list: &str) -> Result<Vec<(u8, u8)>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (channel, cc) = match entry.split_once(':') {
                Some((channel, cc)) => (channel.trim(), cc.trim()),
                None => ("0", entry),
            };
            Ok((parse_bounded(channel, "channel", 15)?, parse_bounded(cc, "CC id", 127)?))
        })
        .collect()
}

fn parse_bounded(text: &str, what: &str, max: u8) -> Result<u8> {
    match text.parse::<u8>() {
        Ok(v) if v <= max => Ok(v),
        _ => Err(Error::invalid(format!(
            "{} '{}' is not a number between 0 and {}",
            what, text, max
        ))),
    }
}

/// Many-to-many table of direct parameter assignments.
#[derive(Debug, Clone, Default)]
pub struct DirectMapping {
    targets: HashMap<(u8, u8), Vec<ParameterId>>,
}

impl DirectMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `(channel, cc)` drive `parameter`. A parameter already assigned to
    /// the same control is not added twice.
    pub fn assign(&mut self, channel: u8, cc: u8, parameter: ParameterId) {
        let targets = self.targets.entry((channel, cc)).or_default();
        if !targets.contains(&parameter) {
            targets.push(parameter);
        }
    }

    /// Parameters driven by `(channel, cc)`, in assignment order.
    pub fn targets(&self, channel: u8, cc: u8) -> &[ParameterId] {
        self.targets
            .get(&(channel, cc))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_list() {
        assert_eq!(
            parse_mapping_list("74, 2:75,15:127").unwrap(),
            vec![(0, 74), (2, 75), (15, 127)]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_mapping_list("16:1"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(parse_mapping_list("0:128").is_err());
        assert!(parse_mapping_list("abc").is_err());
        assert!(parse_mapping_list("-1").is_err());
    }

    #[test]
    fn test_one_control_many_parameters() {
        let mut mapping = DirectMapping::new();
        mapping.assign(0, 20, 16);
        mapping.assign(0, 20, 37);
        mapping.assign(0, 20, 16);
        assert_eq!(mapping.targets(0, 20), &[16, 37]);
        assert!(mapping.targets(1, 20).is_empty());
    }

    #[test]
    fn test_one_parameter_many_controls() {
        let mut mapping = DirectMapping::new();
        for (ch, cc) in parse_mapping_list("1,2:1").unwrap() {
            mapping.assign(ch, cc, 134);
        }
        assert_eq!(mapping.targets(0, 1), &[134]);
        assert_eq!(mapping.targets(2, 1), &[134]);
    }
}
