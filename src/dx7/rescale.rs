/// Map a 0-127 controller value linearly onto `min..=max`.
///
/// The result is truncated, not rounded, so that existing controller setups
/// land on the same parameter values. `0` maps to `min` and `127` to `max`.
/// Raw values above 127 are treated as 127.
pub fn rescale(raw: u8, min: u8, max: u8) -> u8 {
    let raw = raw.min(127);
    let scaled = min as f64 + (raw as f64 / 127.0) * (max as f64 - min as f64);
    scaled as u8
}
