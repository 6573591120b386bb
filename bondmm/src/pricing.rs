//! Pure, deterministic pricing functions for the BondMM invariant
//! `K·x^α + y^α = C`. Nothing here touches storage or the environment beyond
//! reading the ledger clock's `u64` seconds, already resolved by the caller.

use crate::common::error::Error;
use crate::common::types::{KAPPA, MIN_TIME, SECONDS_PER_YEAR};
use crate::fixed_point::{self, Fp, SCALE};

/// Which side of `X ± Δx` (or `y ± Δy`) a delta solver is asked to evaluate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Add,
    Remove,
}

fn apply_side(value: Fp, delta: Fp, side: Side) -> Result<Fp, Error> {
    match side {
        Side::Add => fixed_point::add(value, delta),
        Side::Remove => fixed_point::sub(value, delta),
    }
}

fn t_over_year(t: u64) -> Result<Fp, Error> {
    fixed_point::div(fixed_point::fp_from_u64(t)?, fixed_point::fp_from_u64(SECONDS_PER_YEAR)?)
}

/// `e^{-exponent}`, routing through `exp`'s non-negative-only domain.
fn exp_neg(exponent: Fp) -> Result<Fp, Error> {
    if exponent >= 0 {
        fixed_point::div(SCALE, fixed_point::exp(exponent)?)
    } else {
        fixed_point::exp(-exponent)
    }
}

/// `α(t) = 1 / (1 + κ·t/Y)`.
pub fn alpha(t: u64) -> Result<Fp, Error> {
    if t < MIN_TIME {
        return Err(Error::TimeTooSmall);
    }
    let t_over_y = t_over_year(t)?;
    let kt_over_y = fixed_point::mul(KAPPA, t_over_y)?;
    let denom = fixed_point::add(SCALE, kt_over_y)?;
    fixed_point::div(SCALE, denom)
}

/// `K(t, r*) = e^{-t/Y · r* · α(t)}`.
pub fn k_factor(t: u64, r_star: Fp) -> Result<Fp, Error> {
    if t < MIN_TIME {
        return Err(Error::TimeTooSmall);
    }
    let a = alpha(t)?;
    let t_over_y = t_over_year(t)?;
    let exponent = fixed_point::mul(fixed_point::mul(t_over_y, r_star)?, a)?;
    exp_neg(exponent)
}

/// `p(t, r) = 1` at `t = 0`; else `e^{-r·t/Y}`.
pub fn price(t: u64, r: Fp) -> Result<Fp, Error> {
    if t == 0 {
        return Ok(SCALE);
    }
    let t_over_y = t_over_year(t)?;
    let exponent = fixed_point::mul_signed(r, t_over_y)?;
    exp_neg(exponent)
}

/// `r(X, y, r*)`: `r* + κ·ln(X/y)` when `X ≥ y`, `r* − κ·ln(y/X)` otherwise.
pub fn rate(x: Fp, y: Fp, r_star: Fp) -> Result<Fp, Error> {
    if x <= 0 || y <= 0 {
        return Err(Error::InvalidTrade);
    }
    if x >= y {
        let ratio = fixed_point::div(x, y)?;
        let ln_ratio = fixed_point::ln(ratio)?;
        fixed_point::add(r_star, fixed_point::mul(KAPPA, ln_ratio)?)
    } else {
        let ratio = fixed_point::div(y, x)?;
        let ln_ratio = fixed_point::ln(ratio)?;
        fixed_point::sub_signed(r_star, fixed_point::mul(KAPPA, ln_ratio)?)
    }
}

/// `C(X, y, t, r*) = K·X^α + y^α`.
pub fn invariant_c(x: Fp, y: Fp, t: u64, r_star: Fp) -> Result<Fp, Error> {
    let a = alpha(t)?;
    let k = k_factor(t, r_star)?;
    let x_pow = fixed_point::pow(x, a)?;
    let y_pow = fixed_point::pow(y, a)?;
    fixed_point::add(fixed_point::mul(k, x_pow)?, y_pow)
}

/// `Δy(Δx, X, y, t, r*, side)`: with `x' = X ± Δx`, `y' = (C − K·x'^α)^{1/α}`.
pub fn delta_y(delta_x: Fp, x: Fp, y: Fp, t: u64, r_star: Fp, side: Side) -> Result<Fp, Error> {
    let a = alpha(t)?;
    let k = k_factor(t, r_star)?;
    let c = invariant_c(x, y, t, r_star)?;

    let x_prime = apply_side(x, delta_x, side)?;
    if x_prime <= 0 {
        return Err(Error::InvalidTrade);
    }
    let x_prime_pow = fixed_point::pow(x_prime, a)?;
    let remainder = fixed_point::sub_signed(c, fixed_point::mul(k, x_prime_pow)?)?;
    if remainder <= 0 {
        return Err(Error::InvalidTrade);
    }
    let inv_alpha = fixed_point::div(SCALE, a)?;
    let y_prime = fixed_point::pow(remainder, inv_alpha)?;
    if y_prime == 0 {
        return Err(Error::InvalidTrade);
    }
    Ok(if y_prime >= y { y_prime - y } else { y - y_prime })
}

/// `Δx(Δy, X, y, t, r*, side)`: with `y' = y ± Δy`, `x' = ((C − y'^α)/K)^{1/α}`.
pub fn delta_x(delta_y: Fp, x: Fp, y: Fp, t: u64, r_star: Fp, side: Side) -> Result<Fp, Error> {
    let a = alpha(t)?;
    let k = k_factor(t, r_star)?;
    let c = invariant_c(x, y, t, r_star)?;

    let y_prime = apply_side(y, delta_y, side)?;
    if y_prime <= 0 {
        return Err(Error::InvalidTrade);
    }
    let y_prime_pow = fixed_point::pow(y_prime, a)?;
    let remainder = fixed_point::sub_signed(c, y_prime_pow)?;
    if remainder <= 0 {
        return Err(Error::InvalidTrade);
    }
    let ratio = fixed_point::div(remainder, k)?;
    let inv_alpha = fixed_point::div(SCALE, a)?;
    let x_prime = fixed_point::pow(ratio, inv_alpha)?;
    if x_prime == 0 {
        return Err(Error::InvalidTrade);
    }
    Ok(if x_prime >= x { x_prime - x } else { x - x_prime })
}
