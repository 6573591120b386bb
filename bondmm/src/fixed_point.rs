//! 60.18-decimal fixed-point arithmetic: every quantity is stored as an `i128`
//! equal to the real number times `SCALE` (10^18). Values are non-negative by
//! construction of the callers in this crate; operators that would produce a
//! negative or out-of-range result fail with [`Error::Overflow`] rather than
//! wrapping, the same posture `rwa-lending`'s `rounding` helpers take toward
//! its own checked `i128` arithmetic.

use uint::construct_uint;

use crate::common::error::Error;

construct_uint! {
    // 256 bits is enough headroom for an i128 * i128 product (max ~2^254)
    // without a second widening step.
    struct U256(4);
}

pub type Fp = i128;

pub const SCALE: Fp = 1_000_000_000_000_000_000;

/// ln(2) * SCALE, used to undo the power-of-two range reduction in `ln`.
const LN2: Fp = 693_147_180_559_945_309;

const TAYLOR_TERMS: i128 = 24;

fn to_u256(x: Fp) -> Result<U256, Error> {
    if x < 0 {
        return Err(Error::Overflow);
    }
    Ok(U256::from(x as u128))
}

fn from_u256(x: U256) -> Result<Fp, Error> {
    if x > U256::from(i128::MAX as u128) {
        return Err(Error::Overflow);
    }
    Ok(x.as_u128() as i128)
}

/// `floor(a * b / SCALE)`.
pub fn mul(a: Fp, b: Fp) -> Result<Fp, Error> {
    let wide = to_u256(a)?.checked_mul(to_u256(b)?).ok_or(Error::Overflow)?;
    from_u256(wide / U256::from(SCALE as u128))
}

/// `mul` for a signed left-hand side, needed by the rate curve's exponent
/// calculations where `r` (and so `-r`) may be negative. `b` stays
/// non-negative (time ratios, `κ`).
pub fn mul_signed(a: Fp, b: Fp) -> Result<Fp, Error> {
    if a < 0 {
        mul(-a, b).map(|v| -v)
    } else {
        mul(a, b)
    }
}

/// `floor(a * SCALE / b)`.
pub fn div(a: Fp, b: Fp) -> Result<Fp, Error> {
    if b == 0 {
        return Err(Error::DivByZero);
    }
    let wide = to_u256(a)?
        .checked_mul(U256::from(SCALE as u128))
        .ok_or(Error::Overflow)?;
    from_u256(wide / to_u256(b)?)
}

pub fn add(a: Fp, b: Fp) -> Result<Fp, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

/// Saturates at zero instead of failing, matching the pool's "release
/// never underflows `L`" rounding policy.
pub fn sub_saturating(a: Fp, b: Fp) -> Fp {
    if b >= a { 0 } else { a - b }
}

pub fn sub(a: Fp, b: Fp) -> Result<Fp, Error> {
    if b > a {
        return Err(Error::Overflow);
    }
    Ok(a - b)
}

/// Subtraction that permits a negative result (for rates, which are signed),
/// failing only on genuine `i128` overflow.
pub fn sub_signed(a: Fp, b: Fp) -> Result<Fp, Error> {
    a.checked_sub(b).ok_or(Error::Overflow)
}

pub fn fp_from_u64(x: u64) -> Result<Fp, Error> {
    (x as i128).checked_mul(SCALE).ok_or(Error::Overflow)
}

/// `e^x` for `x >= 0`, domain `x ∈ [0, ~133.08 * SCALE]` per the analytic
/// bound of this pricing engine's reference implementation. This type's
/// representable range is tighter (an `i128`-backed 60.18 value, matching
/// every other fixed-point quantity in this codebase): any input whose
/// result would not fit surfaces `Overflow`, which in practice only happens
/// far outside the rates/maturities this pool ever evaluates (see
/// `DESIGN.md`). Negative exponents are the caller's responsibility
/// (`1 / exp(|x|)`), per the component contract.
pub fn exp(x: Fp) -> Result<Fp, Error> {
    if x < 0 {
        return Err(Error::Overflow);
    }
    if x == 0 {
        return Ok(SCALE);
    }

    // Range-reduce: find k with reduced = x / 2^k < SCALE, then
    // e^x = (e^reduced)^(2^k).
    let mut reduced = x;
    let mut k: u32 = 0;
    while reduced >= SCALE {
        reduced /= 2;
        k += 1;
    }

    let mut term = SCALE;
    let mut sum = SCALE;
    for i in 1..=TAYLOR_TERMS {
        term = mul(term, reduced)?;
        term /= i;
        sum = add(sum, term)?;
        if term == 0 {
            break;
        }
    }

    let mut result = sum;
    for _ in 0..k {
        result = mul(result, result)?;
    }
    Ok(result)
}

/// `ln(x)` for `x >= SCALE` (argument >= 1). For `x < SCALE` callers compute
/// `-ln(1/x)`, per the component contract.
pub fn ln(x: Fp) -> Result<Fp, Error> {
    if x < SCALE {
        return Err(Error::Overflow);
    }

    // Reduce x to a mantissa m in [SCALE, 2*SCALE) and a power-of-two count n,
    // so that ln(x) = n*ln(2) + ln(m).
    let mut m = x;
    let mut n: i128 = 0;
    while m >= 2 * SCALE {
        m /= 2;
        n += 1;
    }

    // ln(m) via the fast-converging atanh series: with u = (m-1)/(m+1),
    // ln(m) = 2*(u + u^3/3 + u^5/5 + ...).
    let u = div(sub(m, SCALE)?, add(m, SCALE)?)?;
    let u2 = mul(u, u)?;
    let mut term = u;
    let mut sum = u;
    for k in 1..TAYLOR_TERMS {
        term = mul(term, u2)?;
        let denom = 2 * k + 1;
        sum = add(sum, term / denom)?;
    }
    let ln_m = sum.checked_mul(2).ok_or(Error::Overflow)?;

    let n_term = n.checked_mul(LN2).ok_or(Error::Overflow)?;
    add(ln_m, n_term)
}

/// `base^exponent = exp(exponent * ln(base))` for `base >= SCALE`; for
/// `base < SCALE`, `pow(base, e) = 1 / pow(1/base, e)`.
pub fn pow(base: Fp, exponent: Fp) -> Result<Fp, Error> {
    if base == 0 {
        return Ok(if exponent == 0 { SCALE } else { 0 });
    }
    if base >= SCALE {
        let ln_base = ln(base)?;
        let arg = mul(exponent, ln_base)?;
        exp(arg)
    } else {
        let inv_base = div(SCALE, base)?;
        let inv_result = pow(inv_base, exponent)?;
        div(SCALE, inv_result)
    }
}
