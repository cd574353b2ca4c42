use crate::support::i256::I256;
use primitive_types::U256;

/// Unsigned 18-decimal fixed point value: the integer `x` represents `x / 10^18`.
pub type Ufixed18 = U256;
/// Signed 18-decimal fixed point value.
pub type Sfixed18 = I256;
/// Normalized pool weight. The weights of a pool sum to [`crate::fixed_point::ONE`].
pub type Weight = Ufixed18;
