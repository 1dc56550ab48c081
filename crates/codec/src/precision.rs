//! IEEE 754 binary16 conversion.
//!
//! Conversion goes straight from binary64 to binary16 so there is a single
//! rounding step (round to nearest, ties to even). Widening back to binary64
//! is exact.
//!
//! ```text
//! binary16: [sign:1][exponent:5, bias 15][mantissa:10]
//! binary64: [sign:1][exponent:11, bias 1023][mantissa:52]
//! ```

/// Largest finite binary16 value.
pub const F16_MAX: f64 = 65504.0;

/// Smallest positive normal binary16 value (2^-14).
pub const F16_MIN_POSITIVE: f64 = 6.103_515_625e-5;

/// Bit pattern of positive infinity.
pub const F16_INFINITY_BITS: u16 = 0x7c00;

const F16_EXP_MASK: u16 = 0x7c00;
const F16_MANT_MASK: u16 = 0x03ff;
const F16_QUIET_NAN_BITS: u16 = 0x7e00;

const F64_MANT_BITS: u32 = 52;
const F64_MANT_MASK: u64 = (1 << F64_MANT_BITS) - 1;
const F64_EXP_BIAS: i32 = 1023;
const F16_EXP_BIAS: i32 = 15;

/// Shift that drops the low binary64 mantissa bits a normal half cannot hold.
const NORMAL_SHIFT: u32 = F64_MANT_BITS - 10;

/// Convert a binary64 value to binary16 bits.
///
/// Values beyond the binary16 range become infinity, values below half the
/// smallest subnormal become signed zero, NaN stays NaN.
pub fn f64_to_f16_bits(value: f64) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 48) & 0x8000) as u16;
    let exp = ((bits >> F64_MANT_BITS) & 0x7ff) as i32;
    let mant = bits & F64_MANT_MASK;

    if exp == 0x7ff {
        return if mant == 0 {
            sign | F16_INFINITY_BITS
        } else {
            sign | F16_QUIET_NAN_BITS
        };
    }

    let unbiased = exp - F64_EXP_BIAS;

    if unbiased > F16_EXP_BIAS {
        return sign | F16_INFINITY_BITS;
    }

    if unbiased >= 1 - F16_EXP_BIAS {
        // Normal range. A rounding carry out of the mantissa bumps the
        // exponent, and out of exponent 30 yields the infinity pattern.
        let half_exp = (unbiased + F16_EXP_BIAS) as u64;
        let rounded = round_shift(mant, NORMAL_SHIFT);
        return sign | ((half_exp << 10) + rounded) as u16;
    }

    // Subnormal range: value = m * 2^-24. Anything under 2^-25 rounds to zero.
    if unbiased < -25 {
        return sign;
    }
    let significand = mant | (1 << F64_MANT_BITS);
    let shift = (28 - unbiased) as u32;
    sign | round_shift(significand, shift) as u16
}

/// Widen binary16 bits to binary64. Exact for every input.
pub fn f16_bits_to_f64(bits: u16) -> f64 {
    let negative = bits & 0x8000 != 0;
    let exp = (bits & F16_EXP_MASK) >> 10;
    let mant = bits & F16_MANT_MASK;

    match exp {
        0 => {
            let magnitude = f64::from(mant) * 2f64.powi(-24);
            if negative {
                -magnitude
            } else {
                magnitude
            }
        }
        0x1f => match (mant, negative) {
            (0, false) => f64::INFINITY,
            (0, true) => f64::NEG_INFINITY,
            _ => f64::NAN,
        },
        _ => {
            let exp64 = u64::from(exp) + (F64_EXP_BIAS - F16_EXP_BIAS) as u64;
            let sign64 = if negative { 1u64 << 63 } else { 0 };
            f64::from_bits(sign64 | (exp64 << F64_MANT_BITS) | (u64::from(mant) << NORMAL_SHIFT))
        }
    }
}

/// True when the bit pattern is infinity or NaN.
pub fn is_f16_non_finite(bits: u16) -> bool {
    bits & F16_EXP_MASK == F16_EXP_MASK
}

/// Round `value >> shift` to nearest, ties to even.
fn round_shift(value: u64, shift: u32) -> u64 {
    let truncated = value >> shift;
    let remainder = value & ((1u64 << shift) - 1);
    let halfway = 1u64 << (shift - 1);
    if remainder > halfway || (remainder == halfway && truncated & 1 == 1) {
        truncated + 1
    } else {
        truncated
    }
}
