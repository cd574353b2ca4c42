//! Natural logarithm, natural exponent and arbitrary-base power over signed
//! 18-decimal fixed point values.
//!
//! The algorithms decompose their argument against precomputed powers of two
//! in the exponent and finish with a short Taylor series, carrying
//! intermediates at 20 (or, close to one, 36) decimals. Term counts, operand
//! order and truncating division all follow the reference tables exactly, so
//! results are bit-identical across platforms.

use crate::ensure;
use crate::support::i256::I256;
use crate::types::{Sfixed18, Ufixed18};
use crate::MathError::{self, DomainError, Overflow, Underflow};
use lazy_static::lazy_static;
use primitive_types::U256;

const ONE_18: I256 = I256::from_i128(1_000_000_000_000_000_000);
const ONE_20: I256 = I256::from_i128(100_000_000_000_000_000_000);
const ONE_36: I256 = I256::from_i128(1_000_000_000_000_000_000_000_000_000_000_000_000);
const HUNDRED: I256 = I256::from_i128(100);

/// Largest argument accepted by [`exp`], `130.0`.
pub const MAX_NATURAL_EXPONENT: I256 = I256::from_i128(130_000_000_000_000_000_000);
/// Smallest argument accepted by [`exp`], `-41.0`.
pub const MIN_NATURAL_EXPONENT: I256 = I256::from_i128(-41_000_000_000_000_000_000);

// Arguments between these bounds are evaluated with 36 decimals of precision,
// where the series converges quickly enough to pay for the wider intermediates.
const LN_36_LOWER_BOUND: I256 = I256::from_i128(900_000_000_000_000_000);
const LN_36_UPPER_BOUND: I256 = I256::from_i128(1_100_000_000_000_000_000);

lazy_static! {
    // Exponents above this bound could overflow the signed product with the
    // logarithm even before the natural-exponent domain check.
    static ref MILD_EXPONENT_BOUND: U256 =
        (U256::one() << 254) / U256::from(100_000_000_000_000_000_000u128);
}

// Decomposition table: `x_n = 2^(7 - n)` and `a_n = e^(x_n)`. The first two
// entries hold 18-decimal x with integer a, the remaining ones 20 decimals.
const X0: I256 = I256::from_i128(128_000_000_000_000_000_000); // 2^7
const A0: I256 = I256::from_raw(U256([
    0x0262_8270_0000_0000,
    0xf53a_2717_2fa9_ec63,
    0x0195_e54c_5dd4_2177,
    0,
])); // e^(2^7) = 38877084059945950922200000000000000000000000000000000000 (no decimals)
const X1: I256 = I256::from_i128(64_000_000_000_000_000_000); // 2^6
const A1: I256 = I256::from_i128(6_235_149_080_811_616_882_910_000_000); // e^(2^6) (no decimals)
const X2: I256 = I256::from_i128(3_200_000_000_000_000_000_000); // 2^5
const A2: I256 = I256::from_i128(7_896_296_018_268_069_516_100_000_000_000_000); // e^(2^5)
const X3: I256 = I256::from_i128(1_600_000_000_000_000_000_000); // 2^4
const A3: I256 = I256::from_i128(888_611_052_050_787_263_676_000_000); // e^(2^4)
const X4: I256 = I256::from_i128(800_000_000_000_000_000_000); // 2^3
const A4: I256 = I256::from_i128(298_095_798_704_172_827_474_000); // e^(2^3)
const X5: I256 = I256::from_i128(400_000_000_000_000_000_000); // 2^2
const A5: I256 = I256::from_i128(5_459_815_003_314_423_907_810); // e^(2^2)
const X6: I256 = I256::from_i128(200_000_000_000_000_000_000); // 2^1
const A6: I256 = I256::from_i128(738_905_609_893_065_022_723); // e^(2^1)
const X7: I256 = I256::from_i128(100_000_000_000_000_000_000); // 2^0
const A7: I256 = I256::from_i128(271_828_182_845_904_523_536); // e^(2^0)
const X8: I256 = I256::from_i128(50_000_000_000_000_000_000); // 2^-1
const A8: I256 = I256::from_i128(164_872_127_070_012_814_685); // e^(2^-1)
const X9: I256 = I256::from_i128(25_000_000_000_000_000_000); // 2^-2
const A9: I256 = I256::from_i128(128_402_541_668_774_148_407); // e^(2^-2)
const X10: I256 = I256::from_i128(12_500_000_000_000_000_000); // 2^-3
const A10: I256 = I256::from_i128(113_314_845_306_682_631_683); // e^(2^-3)
const X11: I256 = I256::from_i128(6_250_000_000_000_000_000); // 2^-4
const A11: I256 = I256::from_i128(106_449_445_891_785_942_956); // e^(2^-4)

const DECOMPOSITION_20: [(I256, I256); 10] = [
    (X2, A2),
    (X3, A3),
    (X4, A4),
    (X5, A5),
    (X6, A6),
    (X7, A7),
    (X8, A8),
    (X9, A9),
    (X10, A10),
    (X11, A11),
];

/// Natural logarithm of an 18-decimal fixed point argument.
///
/// Arguments close to one are routed through the 36-decimal series, where the
/// 18-decimal one would lose most significant digits.
pub fn ln(a: Sfixed18) -> Result<Sfixed18, MathError> {
    ensure!(a > I256::ZERO, DomainError);

    if LN_36_LOWER_BOUND < a && a < LN_36_UPPER_BOUND {
        ln_36(a)?.checked_div(ONE_18).ok_or(Overflow)
    } else {
        ln_plain(a)
    }
}

fn ln_plain(a: I256) -> Result<I256, MathError> {
    if a < ONE_18 {
        // ln(a) = -ln(1/a); the reciprocal is above one and hits the branch below.
        let reciprocal = ONE_36.checked_div(a).ok_or(Overflow)?;
        return ln_plain(reciprocal)?.checked_neg().ok_or(Overflow);
    }

    // Peel off e^(2^7) and e^(2^6); their a_n carry no decimals, so plain
    // integer division keeps `a` at 18 decimals.
    let mut a = a;
    let mut sum = I256::ZERO;
    if a >= A0.checked_mul(ONE_18).ok_or(Overflow)? {
        a = a.checked_div(A0).ok_or(Overflow)?;
        sum = sum.checked_add(X0).ok_or(Overflow)?;
    }
    if a >= A1.checked_mul(ONE_18).ok_or(Overflow)? {
        a = a.checked_div(A1).ok_or(Overflow)?;
        sum = sum.checked_add(X1).ok_or(Overflow)?;
    }

    // The remaining terms work at 20 decimals.
    sum = sum.checked_mul(HUNDRED).ok_or(Overflow)?;
    a = a.checked_mul(HUNDRED).ok_or(Overflow)?;

    for &(x_n, a_n) in DECOMPOSITION_20.iter() {
        if a >= a_n {
            a = a.checked_mul(ONE_20).ok_or(Overflow)?.checked_div(a_n).ok_or(Overflow)?;
            sum = sum.checked_add(x_n).ok_or(Overflow)?;
        }
    }

    // ln(a) = 2 * (z + z^3/3 + z^5/5 + ... + z^11/11), z = (a - 1) / (a + 1).
    let z = a
        .checked_sub(ONE_20)
        .ok_or(Overflow)?
        .checked_mul(ONE_20)
        .ok_or(Overflow)?
        .checked_div(a.checked_add(ONE_20).ok_or(Overflow)?)
        .ok_or(Overflow)?;
    let z_squared = z.checked_mul(z).ok_or(Overflow)?.checked_div(ONE_20).ok_or(Overflow)?;

    let mut num = z;
    let mut series_sum = num;
    for i in [3i128, 5, 7, 9, 11] {
        num = num.checked_mul(z_squared).ok_or(Overflow)?.checked_div(ONE_20).ok_or(Overflow)?;
        series_sum = series_sum
            .checked_add(num.checked_div(I256::from_i128(i)).ok_or(Overflow)?)
            .ok_or(Overflow)?;
    }
    series_sum = series_sum.checked_mul(I256::from_i128(2)).ok_or(Overflow)?;

    // Both the decomposition sum and the series are at 20 decimals.
    sum.checked_add(series_sum).ok_or(Overflow)?.checked_div(HUNDRED).ok_or(Overflow)
}

/// 36-decimal natural logarithm for arguments close to one.
fn ln_36(x: I256) -> Result<I256, MathError> {
    let x = x.checked_mul(ONE_18).ok_or(Overflow)?;

    let z = x
        .checked_sub(ONE_36)
        .ok_or(Overflow)?
        .checked_mul(ONE_36)
        .ok_or(Overflow)?
        .checked_div(x.checked_add(ONE_36).ok_or(Overflow)?)
        .ok_or(Overflow)?;
    let z_squared = z.checked_mul(z).ok_or(Overflow)?.checked_div(ONE_36).ok_or(Overflow)?;

    let mut num = z;
    let mut series_sum = num;
    for i in [3i128, 5, 7, 9, 11, 13, 15] {
        num = num.checked_mul(z_squared).ok_or(Overflow)?.checked_div(ONE_36).ok_or(Overflow)?;
        series_sum = series_sum
            .checked_add(num.checked_div(I256::from_i128(i)).ok_or(Overflow)?)
            .ok_or(Overflow)?;
    }

    series_sum.checked_mul(I256::from_i128(2)).ok_or(Overflow)
}

/// Natural exponent of an 18-decimal fixed point argument in
/// `[MIN_NATURAL_EXPONENT, MAX_NATURAL_EXPONENT]`.
pub fn exp(x: Sfixed18) -> Result<Sfixed18, MathError> {
    ensure!(x >= MIN_NATURAL_EXPONENT, Underflow);
    ensure!(x <= MAX_NATURAL_EXPONENT, Overflow);

    if x < I256::ZERO {
        // e^x = 1 / e^(-x), evaluated at 36 decimals so the 18-decimal
        // quotient keeps its full precision.
        let positive = exp(x.checked_neg().ok_or(Overflow)?)?;
        return ONE_36.checked_div(positive).ok_or(Overflow);
    }

    // At most one of the integer-scale factors applies: x <= 130 < 2^7 + 2^6.
    let mut x = x;
    let first_a_n = if x >= X0 {
        x = x.checked_sub(X0).ok_or(Overflow)?;
        A0
    } else if x >= X1 {
        x = x.checked_sub(X1).ok_or(Overflow)?;
        A1
    } else {
        I256::ONE
    };

    // The rest of the decomposition and the series work at 20 decimals.
    let mut x = x.checked_mul(HUNDRED).ok_or(Overflow)?;
    let mut product = ONE_20;
    for &(x_n, a_n) in DECOMPOSITION_20[..8].iter() {
        if x >= x_n {
            x = x.checked_sub(x_n).ok_or(Overflow)?;
            product = product.checked_mul(a_n).ok_or(Overflow)?.checked_div(ONE_20).ok_or(Overflow)?;
        }
    }

    // e^x = 1 + x + x^2/2! + ... + x^12/12! on the remainder.
    let mut series_sum = ONE_20.checked_add(x).ok_or(Overflow)?;
    let mut term = x;
    for i in 2i128..=12 {
        term = term
            .checked_mul(x)
            .ok_or(Overflow)?
            .checked_div(ONE_20)
            .ok_or(Overflow)?
            .checked_div(I256::from_i128(i))
            .ok_or(Overflow)?;
        series_sum = series_sum.checked_add(term).ok_or(Overflow)?;
    }

    product
        .checked_mul(series_sum)
        .ok_or(Overflow)?
        .checked_div(ONE_20)
        .ok_or(Overflow)?
        .checked_mul(first_a_n)
        .ok_or(Overflow)?
        .checked_div(HUNDRED)
        .ok_or(Overflow)
}

/// `x^y` for unsigned 18-decimal fixed point base and exponent, via
/// `exp(ln(x) * y)`.
///
/// The product `ln(x) * y` must stay within the natural-exponent domain;
/// anything outside fails with `DomainError` instead of wrapping.
pub fn pow(x: Ufixed18, y: Ufixed18) -> Result<Ufixed18, MathError> {
    if y.is_zero() {
        // x^0 = 1
        return Ok(ONE_18.into_raw());
    }
    if x.is_zero() {
        // 0^y = 0
        return Ok(U256::zero());
    }

    let x_int = I256::try_from_unsigned(x).ok_or(Overflow)?;
    ensure!(y < *MILD_EXPONENT_BOUND, Overflow);
    let y_int = I256::try_from_unsigned(y).ok_or(Overflow)?;

    let logx_times_y = if LN_36_LOWER_BOUND < x_int && x_int < LN_36_UPPER_BOUND {
        // Split the 36-decimal logarithm into 18-decimal halves so the
        // multiplication keeps the extra precision without overflowing.
        let ln_36_x = ln_36(x_int)?;
        let high = ln_36_x.checked_div(ONE_18).ok_or(Overflow)?;
        let low = ln_36_x.checked_rem(ONE_18).ok_or(Overflow)?;
        high.checked_mul(y_int)
            .ok_or(Overflow)?
            .checked_add(low.checked_mul(y_int).ok_or(Overflow)?.checked_div(ONE_18).ok_or(Overflow)?)
            .ok_or(Overflow)?
    } else {
        ln_plain(x_int)?.checked_mul(y_int).ok_or(Overflow)?
    };
    let logx_times_y = logx_times_y.checked_div(ONE_18).ok_or(Overflow)?;

    ensure!(
        MIN_NATURAL_EXPONENT <= logx_times_y && logx_times_y <= MAX_NATURAL_EXPONENT,
        DomainError
    );

    exp(logx_times_y)?.to_unsigned().ok_or(Overflow)
}
