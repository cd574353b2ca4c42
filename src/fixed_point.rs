//! 18-decimal fixed point arithmetic with explicit rounding directions.
//!
//! The rounding direction of every operation is part of its contract: callers
//! pick the `_down` or `_up` variant to keep the overall result conservative
//! for the pool, and may rely on the choice for monotonicity downstream.

use crate::ensure;
use crate::transcendental;
use crate::types::Ufixed18;
use crate::MathError::{self, DivByZero, Overflow, Underflow};
use lazy_static::lazy_static;
use primitive_types::U256;

lazy_static! {
    /// Fixed point one, `10^18`.
    pub static ref ONE: U256 = U256::from(1_000_000_000_000_000_000u128);
    static ref TWO: U256 = *ONE * U256::from(2u8);
    static ref FOUR: U256 = *ONE * U256::from(4u8);
    /// Upper bound of the relative error of [`transcendental::pow`], in raw units.
    static ref MAX_POW_RELATIVE_ERROR: U256 = U256::from(10_000u128);
}

pub fn add(a: Ufixed18, b: Ufixed18) -> Result<Ufixed18, MathError> {
    a.checked_add(b).ok_or(Overflow)
}

pub fn sub(a: Ufixed18, b: Ufixed18) -> Result<Ufixed18, MathError> {
    a.checked_sub(b).ok_or(Underflow)
}

/// `a * b / 10^18`, rounded down.
pub fn mul_down(a: Ufixed18, b: Ufixed18) -> Result<Ufixed18, MathError> {
    let product = a.checked_mul(b).ok_or(Overflow)?;
    Ok(product / *ONE)
}

/// `a * b / 10^18`, rounded up.
pub fn mul_up(a: Ufixed18, b: Ufixed18) -> Result<Ufixed18, MathError> {
    let product = a.checked_mul(b).ok_or(Overflow)?;
    if product.is_zero() {
        Ok(U256::zero())
    } else {
        Ok((product - U256::one()) / *ONE + U256::one())
    }
}

/// `a * 10^18 / b`, rounded down.
pub fn div_down(a: Ufixed18, b: Ufixed18) -> Result<Ufixed18, MathError> {
    ensure!(!b.is_zero(), DivByZero);
    if a.is_zero() {
        return Ok(U256::zero());
    }
    let a_inflated = a.checked_mul(*ONE).ok_or(Overflow)?;
    Ok(a_inflated / b)
}

/// `a * 10^18 / b`, rounded up.
pub fn div_up(a: Ufixed18, b: Ufixed18) -> Result<Ufixed18, MathError> {
    ensure!(!b.is_zero(), DivByZero);
    if a.is_zero() {
        return Ok(U256::zero());
    }
    let a_inflated = a.checked_mul(*ONE).ok_or(Overflow)?;
    Ok((a_inflated - U256::one()) / b + U256::one())
}

/// `1 - x` for `x` below one, zero otherwise.
pub fn complement(x: Ufixed18) -> Ufixed18 {
    if x < *ONE {
        *ONE - x
    } else {
        U256::zero()
    }
}

/// `x^y` rounded down: the raw power minus its maximum relative error.
///
/// Exponents of exactly one, two and four are served by multiplication chains
/// and carry no error margin. When the raw power is smaller than the error
/// margin the result clamps to zero; the envelope is a conservative band, not
/// the true value.
pub fn pow_down(x: Ufixed18, y: Ufixed18) -> Result<Ufixed18, MathError> {
    if y == *ONE {
        return Ok(x);
    }
    if y == *TWO {
        return mul_down(x, x);
    }
    if y == *FOUR {
        let square = mul_down(x, x)?;
        return mul_down(square, square);
    }

    let raw = transcendental::pow(x, y)?;
    let max_error = add(mul_up(raw, *MAX_POW_RELATIVE_ERROR)?, U256::one())?;

    if raw < max_error {
        Ok(U256::zero())
    } else {
        Ok(raw - max_error)
    }
}

/// `x^y` rounded up: the raw power plus its maximum relative error.
///
/// Exponents of exactly one, two and four are served by multiplication chains
/// and carry no error margin.
pub fn pow_up(x: Ufixed18, y: Ufixed18) -> Result<Ufixed18, MathError> {
    if y == *ONE {
        return Ok(x);
    }
    if y == *TWO {
        return mul_up(x, x);
    }
    if y == *FOUR {
        let square = mul_up(x, x)?;
        return mul_up(square, square);
    }

    let raw = transcendental::pow(x, y)?;
    let max_error = add(mul_up(raw, *MAX_POW_RELATIVE_ERROR)?, U256::one())?;

    add(raw, max_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(units: u128) -> U256 {
        U256::from(units)
    }

    #[test]
    fn mul_rounding_works() {
        let cases = vec![
            (fixed(6_000_000_000_000_000_000), fixed(7_000_000_000_000_000_000), Ok(fixed(42_000_000_000_000_000_000)), "Exact product"),
            (fixed(1), fixed(1), Ok(fixed(0)), "Truncated to zero"),
            (fixed(0), fixed(1_000_000_000_000_000_000), Ok(fixed(0)), "Zero operand"),
            (U256::MAX, fixed(2), Err(Overflow), "Product exceeds 256 bits"),
        ];
        for case in cases {
            assert_eq!(mul_down(case.0, case.1), case.2, "{}", case.3);
        }

        assert_eq!(mul_up(fixed(1), fixed(1)), Ok(fixed(1)), "Sub-unit product rounds up");
        assert_eq!(mul_up(fixed(0), fixed(5)), Ok(fixed(0)), "Zero product stays zero");
        assert_eq!(
            mul_up(fixed(6_000_000_000_000_000_000), fixed(7_000_000_000_000_000_000)),
            Ok(fixed(42_000_000_000_000_000_000)),
            "Exact product is direction independent"
        );
    }

    #[test]
    fn div_rounding_works() {
        let cases = vec![
            (fixed(6_000_000_000_000_000_000), fixed(3_000_000_000_000_000_000), Ok(fixed(2_000_000_000_000_000_000)), "Exact quotient"),
            (fixed(0), fixed(3), Ok(fixed(0)), "Zero numerator"),
            (fixed(1), fixed(0), Err(DivByZero), "Zero divisor"),
            (fixed(1), fixed(3), Ok(fixed(333_333_333_333_333_333)), "Truncated quotient"),
        ];
        for case in cases {
            assert_eq!(div_down(case.0, case.1), case.2, "{}", case.3);
        }

        assert_eq!(div_up(fixed(1), fixed(3)), Ok(fixed(333_333_333_333_333_334)), "Rounded up quotient");
        assert_eq!(div_up(fixed(1), fixed(0)), Err(DivByZero), "Zero divisor rounds nowhere");
        assert_eq!(div_up(fixed(0), fixed(3)), Ok(fixed(0)), "Zero numerator rounds nowhere");
    }

    #[test]
    fn complement_works() {
        assert_eq!(complement(fixed(0)), *ONE);
        assert_eq!(complement(fixed(300_000_000_000_000_000)), fixed(700_000_000_000_000_000));
        assert_eq!(complement(*ONE), fixed(0));
        assert_eq!(complement(*ONE + U256::one()), fixed(0));
    }

    #[test]
    fn pow_fast_paths_are_exact() {
        let two = fixed(2_000_000_000_000_000_000);
        let four = fixed(4_000_000_000_000_000_000);
        let sixteen = fixed(16_000_000_000_000_000_000);

        assert_eq!(pow_down(two, *ONE), Ok(two));
        assert_eq!(pow_up(two, *ONE), Ok(two));
        assert_eq!(pow_down(two, two), Ok(four));
        assert_eq!(pow_up(two, two), Ok(four));
        assert_eq!(pow_down(two, four), Ok(sixteen));
        assert_eq!(pow_up(two, four), Ok(sixteen));
    }

    #[test]
    fn pow_envelope_brackets_the_raw_power() {
        let x = fixed(1_500_000_000_000_000_000);
        let y = fixed(10_000_000_000_000_000_000);

        let raw = transcendental::pow(x, y).unwrap();
        let down = pow_down(x, y).unwrap();
        let up = pow_up(x, y).unwrap();

        assert!(down < raw);
        assert!(raw < up);
        // The envelope is symmetric around the raw power.
        assert_eq!(raw - down, up - raw);
    }

    #[test]
    fn pow_down_clamps_to_zero() {
        // 0.5^59 is a single raw unit, smaller than its own error margin.
        let x = fixed(500_000_000_000_000_000);
        let y = fixed(59_000_000_000_000_000_000);
        assert_eq!(pow_down(x, y), Ok(fixed(0)));
        assert_eq!(pow_up(x, y), Ok(fixed(3)));
    }
}
