use crate::ensure;
use crate::MathError::{self, DivByZero, Overflow};
use core::convert::TryFrom;
use primitive_types::{U256, U512};

/// Computes `a * b / c` rounded down, carrying the product at 512 bits so the
/// intermediate cannot overflow.
pub fn mul_div(a: U256, b: U256, c: U256) -> Result<U256, MathError> {
    ensure!(!c.is_zero(), DivByZero);

    let product = a.full_mul(b);
    let quotient = product
        .checked_div(U512::from(c))
        .expect("divisor checked to be non-zero; qed");

    U256::try_from(quotient).map_err(|_| Overflow)
}
