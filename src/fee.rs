//! Swap-fee helpers and the protocol-fee share of pool ownership.

use crate::fixed_point::{complement, div_up, mul_up, sub};
use crate::support::u256::mul_div;
use crate::types::Ufixed18;
use crate::MathError;

/// Calculating the amount left after charging the swap fee on an incoming amount.
/// Formula : AMOUNT - AMOUNT * FEE, with the fee rounded up
///
/// Returns MathError in case of error
pub fn subtract_swap_fee_amount(amount: Ufixed18, fee_percentage: Ufixed18) -> Result<Ufixed18, MathError> {
    let fee_amount = mul_up(amount, fee_percentage)?;
    sub(amount, fee_amount)
}

/// Calculating the gross amount whose net part after fees equals `amount`.
/// Formula : AMOUNT / ( 1 - FEE ), rounded up
///
/// Returns MathError in case of error
pub fn add_swap_fee_amount(amount: Ufixed18, fee_percentage: Ufixed18) -> Result<Ufixed18, MathError> {
    div_up(amount, complement(fee_percentage))
}

/// Calculating the pool shares to mint so their owner ends up holding
/// `ownership_percentage` of the enlarged supply.
/// Formula : SUPPLY * PCT / ( 1 - PCT ), rounded down
///
/// Returns MathError in case of error
pub fn calculate_bpt_for_ownership(
    total_supply: Ufixed18,
    ownership_percentage: Ufixed18,
) -> Result<Ufixed18, MathError> {
    mul_div(total_supply, ownership_percentage, complement(ownership_percentage))
}
