use primitive_types::U256;
use proptest::prelude::*;

// ----- Macros

/// Asserts that two expressions `$x` and `$y` are approximately equal to each other up to a delta `$z`.
#[macro_export]
macro_rules! assert_approx_eq {
    ( $x:expr, $y:expr, $z:expr, $r:expr) => {{
        let diff = if $x >= $y { $x - $y } else { $y - $x };
        assert!(
            diff <= $z,
            "\n{}\n    left: {:?}\n   right: {:?}\n    diff: {:?}\nmax_diff: {:?}\n",
            $r,
            $x,
            $y,
            diff,
            $z
        );
    }};
}
pub(crate) use assert_approx_eq;

// ----- Constants

/// Smallest pool balance exercised by the property tests, one token.
pub const MIN_POOL_BALANCE: u128 = 1_000_000_000_000_000_000;
/// Biggest pool balance exercised by the property tests, a million tokens.
pub const MAX_POOL_BALANCE: u128 = 1_000_000_000_000_000_000_000_000;

// ----- Property Test Strategies

/// Generates a pool balance in 18-decimal fixed point.
pub fn pool_balance() -> impl Strategy<Value = U256> {
    (MIN_POOL_BALANCE..MAX_POOL_BALANCE).prop_map(U256::from)
}

/// Generates a whole-percent weight between 1% and 99%; the complement to one
/// hundred percent is the weight of the other pool token.
pub fn weight_percent() -> impl Strategy<Value = u64> {
    1..100u64
}

/// Converts a whole-percent weight to 18-decimal fixed point.
pub fn percent(value: u64) -> U256 {
    U256::from(value) * U256::from(10_000_000_000_000_000u128)
}

/// Generates a swap fee between zero and ten percent.
pub fn swap_fee() -> impl Strategy<Value = U256> {
    (0..100_000_000_000_000_000u128).prop_map(U256::from)
}
