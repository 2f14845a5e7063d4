pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u8, y: u8) -> u8 {
    mul_div255_u16(u16::from(x), u16::from(y)) as u8
}

/// Rounded integer division for non-negative numerators and positive denominators.
pub(crate) fn div_round_u32(num: u32, den: u32) -> u32 {
    (num + den / 2) / den
}

/// Rounds and clamps a weighted channel sum into a byte.
pub(crate) fn channel_from_f64(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// `offset * num / den` with 64-bit intermediates, floored towards zero.
pub(crate) fn scale_i32(offset: i32, num: i32, den: i32) -> i32 {
    debug_assert!(den > 0);
    ((i64::from(offset) * i64::from(num)) / i64::from(den)) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
