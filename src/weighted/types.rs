use lazy_static::lazy_static;
use primitive_types::U256;

/// Upper bound on the number of tokens a pool can hold. Implied by
/// [`MIN_WEIGHT`]: more than a hundred tokens cannot each carry one percent.
pub const MAX_TOKENS: usize = 100;

lazy_static! {
    /// Smallest allowed normalized weight, one percent.
    pub static ref MIN_WEIGHT: U256 = U256::from(10_000_000_000_000_000u128);
    /// Swapped-in amounts may not exceed this share of the input balance.
    pub static ref MAX_IN_RATIO: U256 = U256::from(300_000_000_000_000_000u128);
    /// Swapped-out amounts may not exceed this share of the output balance.
    pub static ref MAX_OUT_RATIO: U256 = U256::from(300_000_000_000_000_000u128);
    /// A single join may not grow the invariant beyond this ratio.
    pub static ref MAX_INVARIANT_RATIO: U256 = U256::from(3_000_000_000_000_000_000u128);
    /// A single exit may not shrink the invariant below this ratio.
    pub static ref MIN_INVARIANT_RATIO: U256 = U256::from(700_000_000_000_000_000u128);
}
