use crate::ensure;
use crate::fixed_point::{add, complement, div_down, div_up, mul_down, mul_up, pow_down, pow_up, sub, ONE};
use crate::types::{Ufixed18, Weight};
use crate::weighted::types::{
    MAX_INVARIANT_RATIO, MAX_IN_RATIO, MAX_OUT_RATIO, MAX_TOKENS, MIN_INVARIANT_RATIO, MIN_WEIGHT,
};
use crate::MathError::{
    self, MaxInRatio, MaxInvariantRatio, MaxOutRatio, MinInvariantRatio, Overflow, WeightOutOfRange, ZeroInvariant,
};
use primitive_types::U256;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Checks that every weight is at least one percent and that the weights sum
/// to exactly one.
///
/// The per-formula routines trust pre-validated weights; caller-facing APIs
/// run this guard when a pool is configured.
pub fn verify_weights(normalized_weights: &[Weight]) -> Result<(), MathError> {
    ensure!(normalized_weights.len() <= MAX_TOKENS, WeightOutOfRange);

    let mut sum = U256::zero();
    for &weight in normalized_weights {
        ensure!(weight >= *MIN_WEIGHT, WeightOutOfRange);
        sum = add(sum, weight)?;
    }
    ensure!(sum == *ONE, WeightOutOfRange);
    Ok(())
}

/// Calculating the invariant preserved by fee-less swaps.
/// Formula : V = product( balance_i ^ weight_i )
///
/// Every factor rounds down, so the result underestimates the true invariant.
///
/// Returns MathError in case of error
pub fn calculate_invariant(normalized_weights: &[Weight], balances: &[Ufixed18]) -> Result<Ufixed18, MathError> {
    ensure!(normalized_weights.len() == balances.len(), WeightOutOfRange);

    let mut invariant = *ONE;
    for (&weight, &balance) in normalized_weights.iter().zip(balances) {
        invariant = mul_down(invariant, pow_down(balance, weight)?)?;
    }

    ensure!(!invariant.is_zero(), ZeroInvariant);
    Ok(invariant)
}

/// Calculating the fee-less spot price of the out token in terms of the in token.
/// Formula : ( BALANCE_IN / WEIGHT_IN ) / ( BALANCE_OUT / WEIGHT_OUT )
///
/// Returns MathError in case of error
pub fn calculate_spot_price(
    balance_in: Ufixed18,
    weight_in: Weight,
    balance_out: Ufixed18,
    weight_out: Weight,
) -> Result<Ufixed18, MathError> {
    let numerator = div_down(balance_in, weight_in)?;
    let denominator = div_up(balance_out, weight_out)?;
    div_down(numerator, denominator)
}

/// Calculating the amount received from the pool given the amount sent to it.
/// Formula : AMOUNT_OUT = BALANCE_OUT * ( 1 - ( BALANCE_IN / ( BALANCE_IN + AMOUNT_IN ) ) ^ ( WEIGHT_IN / WEIGHT_OUT ) )
///
/// - `balance_in` - pool balance of the token being sent
/// - `weight_in` - normalized weight of the token being sent
/// - `balance_out` - pool balance of the token being received
/// - `weight_out` - normalized weight of the token being received
/// - `amount_in` - amount sent, at most thirty percent of `balance_in`
///
/// The power rounds up and the final multiplication down, so the amount out is
/// never overestimated.
///
/// Returns MathError in case of error
pub fn calculate_out_given_in(
    balance_in: Ufixed18,
    weight_in: Weight,
    balance_out: Ufixed18,
    weight_out: Weight,
    amount_in: Ufixed18,
) -> Result<Ufixed18, MathError> {
    ensure!(amount_in <= mul_down(balance_in, *MAX_IN_RATIO)?, MaxInRatio);

    let denominator = add(balance_in, amount_in)?;
    let base = div_up(balance_in, denominator)?;
    let exponent = div_down(weight_in, weight_out)?;
    let power = pow_up(base, exponent)?;

    mul_down(balance_out, complement(power))
}

/// Calculating the amount to send to the pool given the amount received from it.
/// Formula : AMOUNT_IN = BALANCE_IN * ( ( BALANCE_OUT / ( BALANCE_OUT - AMOUNT_OUT ) ) ^ ( WEIGHT_OUT / WEIGHT_IN ) - 1 )
///
/// - `balance_in` - pool balance of the token being sent
/// - `weight_in` - normalized weight of the token being sent
/// - `balance_out` - pool balance of the token being received
/// - `weight_out` - normalized weight of the token being received
/// - `amount_out` - amount received, at most thirty percent of `balance_out`
///
/// Every step rounds against the caller, so the amount in is never
/// underestimated.
///
/// Returns MathError in case of error
pub fn calculate_in_given_out(
    balance_in: Ufixed18,
    weight_in: Weight,
    balance_out: Ufixed18,
    weight_out: Weight,
    amount_out: Ufixed18,
) -> Result<Ufixed18, MathError> {
    ensure!(amount_out <= mul_down(balance_out, *MAX_OUT_RATIO)?, MaxOutRatio);

    let base = div_up(balance_out, sub(balance_out, amount_out)?)?;
    let exponent = div_up(weight_out, weight_in)?;
    let power = pow_up(base, exponent)?;

    let ratio = sub(power, *ONE)?;
    mul_up(balance_in, ratio)
}

/// Calculating the pool shares minted for an exact-amounts join.
///
/// Amounts that grow a balance beyond the weighted average ratio are partly
/// taxable: the excess pays the swap fee before the invariant ratio is folded.
///
/// Returns MathError in case of error
pub fn calculate_bpt_out_given_exact_tokens_in(
    balances: &[Ufixed18],
    normalized_weights: &[Weight],
    amounts_in: &[Ufixed18],
    bpt_total_supply: Ufixed18,
    swap_fee_percentage: Ufixed18,
) -> Result<Ufixed18, MathError> {
    ensure!(balances.len() == normalized_weights.len(), WeightOutOfRange);
    ensure!(balances.len() == amounts_in.len(), WeightOutOfRange);

    let mut balance_ratios_with_fee = Vec::with_capacity(balances.len());
    let mut invariant_ratio_with_fees = U256::zero();
    for i in 0..balances.len() {
        let balance_ratio = div_down(add(balances[i], amounts_in[i])?, balances[i])?;
        invariant_ratio_with_fees = add(invariant_ratio_with_fees, mul_down(balance_ratio, normalized_weights[i])?)?;
        balance_ratios_with_fee.push(balance_ratio);
    }

    let mut invariant_ratio = *ONE;
    for i in 0..balances.len() {
        let amount_in_without_fee = if balance_ratios_with_fee[i] > invariant_ratio_with_fees {
            let non_taxable_amount = mul_down(balances[i], sub(invariant_ratio_with_fees, *ONE)?)?;
            let taxable_amount = sub(amounts_in[i], non_taxable_amount)?;
            let swap_fee = mul_up(taxable_amount, swap_fee_percentage)?;
            add(non_taxable_amount, sub(taxable_amount, swap_fee)?)?
        } else {
            amounts_in[i]
        };

        let balance_ratio = div_down(add(balances[i], amount_in_without_fee)?, balances[i])?;
        invariant_ratio = mul_down(invariant_ratio, pow_down(balance_ratio, normalized_weights[i])?)?;
    }

    if invariant_ratio > *ONE {
        mul_down(bpt_total_supply, sub(invariant_ratio, *ONE)?)
    } else {
        Ok(U256::zero())
    }
}

/// Calculating the single-token deposit buying an exact amount of pool shares.
///
/// The balance has to grow by the invariant ratio raised to `1 / weight`; the
/// portion exceeding proportional participation pays the swap fee on top.
///
/// Returns MathError in case of error
pub fn calculate_token_in_given_exact_bpt_out(
    balance: Ufixed18,
    normalized_weight: Weight,
    bpt_amount_out: Ufixed18,
    bpt_total_supply: Ufixed18,
    swap_fee_percentage: Ufixed18,
) -> Result<Ufixed18, MathError> {
    let invariant_ratio = div_up(add(bpt_total_supply, bpt_amount_out)?, bpt_total_supply)?;
    ensure!(invariant_ratio <= *MAX_INVARIANT_RATIO, MaxInvariantRatio);

    let balance_ratio = pow_up(invariant_ratio, div_up(*ONE, normalized_weight)?)?;
    let amount_in_without_fee = mul_up(balance, sub(balance_ratio, *ONE)?)?;

    let taxable_percentage = complement(normalized_weight);
    let taxable_amount = mul_up(amount_in_without_fee, taxable_percentage)?;
    let non_taxable_amount = sub(amount_in_without_fee, taxable_amount)?;

    let taxable_amount_plus_fees = div_up(taxable_amount, complement(swap_fee_percentage))?;
    add(non_taxable_amount, taxable_amount_plus_fees)
}

/// Calculating the proportional deposits buying an exact amount of pool shares.
/// Formula : AMOUNT_IN_i = BALANCE_i * BPT_OUT / BPT_SUPPLY, rounded up
///
/// Returns MathError in case of error
pub fn calculate_all_tokens_in_given_exact_bpt_out(
    balances: &[Ufixed18],
    bpt_amount_out: Ufixed18,
    bpt_total_supply: Ufixed18,
) -> Result<Vec<Ufixed18>, MathError> {
    let bpt_ratio = div_up(bpt_amount_out, bpt_total_supply)?;
    balances.iter().map(|&balance| mul_up(balance, bpt_ratio)).collect()
}

/// Calculating the pool shares burned by an exact-amounts exit.
///
/// Mirrors the exact-amounts join: tokens withdrawn in larger proportion than
/// the weighted average pay the swap fee on the excess.
///
/// Returns MathError in case of error
pub fn calculate_bpt_in_given_exact_tokens_out(
    balances: &[Ufixed18],
    normalized_weights: &[Weight],
    amounts_out: &[Ufixed18],
    bpt_total_supply: Ufixed18,
    swap_fee_percentage: Ufixed18,
) -> Result<Ufixed18, MathError> {
    ensure!(balances.len() == normalized_weights.len(), WeightOutOfRange);
    ensure!(balances.len() == amounts_out.len(), WeightOutOfRange);

    let mut balance_ratios_without_fee = Vec::with_capacity(balances.len());
    let mut invariant_ratio_without_fees = U256::zero();
    for i in 0..balances.len() {
        let balance_ratio = div_up(sub(balances[i], amounts_out[i])?, balances[i])?;
        invariant_ratio_without_fees =
            add(invariant_ratio_without_fees, mul_up(balance_ratio, normalized_weights[i])?)?;
        balance_ratios_without_fee.push(balance_ratio);
    }

    let mut invariant_ratio = *ONE;
    for i in 0..balances.len() {
        let amount_out_with_fee = if invariant_ratio_without_fees > balance_ratios_without_fee[i] {
            let non_taxable_amount = mul_down(balances[i], complement(invariant_ratio_without_fees))?;
            let taxable_amount = sub(amounts_out[i], non_taxable_amount)?;
            let taxable_amount_plus_fees = div_up(taxable_amount, complement(swap_fee_percentage))?;
            add(non_taxable_amount, taxable_amount_plus_fees)?
        } else {
            amounts_out[i]
        };

        let balance_ratio = div_down(sub(balances[i], amount_out_with_fee)?, balances[i])?;
        invariant_ratio = mul_down(invariant_ratio, pow_down(balance_ratio, normalized_weights[i])?)?;
    }

    mul_up(bpt_total_supply, complement(invariant_ratio))
}

/// Calculating the single-token withdrawal paid for by an exact amount of pool shares.
///
/// Returns MathError in case of error
pub fn calculate_token_out_given_exact_bpt_in(
    balance: Ufixed18,
    normalized_weight: Weight,
    bpt_amount_in: Ufixed18,
    bpt_total_supply: Ufixed18,
    swap_fee_percentage: Ufixed18,
) -> Result<Ufixed18, MathError> {
    let invariant_ratio = div_up(sub(bpt_total_supply, bpt_amount_in)?, bpt_total_supply)?;
    ensure!(invariant_ratio >= *MIN_INVARIANT_RATIO, MinInvariantRatio);

    let balance_ratio = pow_up(invariant_ratio, div_down(*ONE, normalized_weight)?)?;
    // Rounding the ratio up can push it above one; the complement absorbs that.
    let amount_out_without_fee = mul_down(balance, complement(balance_ratio))?;

    let taxable_percentage = complement(normalized_weight);
    let taxable_amount = mul_up(amount_out_without_fee, taxable_percentage)?;
    let non_taxable_amount = sub(amount_out_without_fee, taxable_amount)?;

    let taxable_amount_minus_fees = mul_down(taxable_amount, complement(swap_fee_percentage))?;
    add(non_taxable_amount, taxable_amount_minus_fees)
}

/// Calculating the proportional withdrawals paid for by an exact amount of pool shares.
/// Formula : AMOUNT_OUT_i = BALANCE_i * BPT_IN / BPT_SUPPLY, rounded down
///
/// Returns MathError in case of error
pub fn calculate_tokens_out_given_exact_bpt_in(
    balances: &[Ufixed18],
    bpt_amount_in: Ufixed18,
    bpt_total_supply: Ufixed18,
) -> Result<Vec<Ufixed18>, MathError> {
    let bpt_ratio = div_down(bpt_amount_in, bpt_total_supply)?;
    balances.iter().map(|&balance| mul_down(balance, bpt_ratio)).collect()
}

/// Calculating the pool shares minted when a token joins the pool, so that the
/// new token holds exactly `new_weight` of the enlarged pool.
/// Formula : BPT_OUT = BPT_SUPPLY * ( 1 / ( 1 - NEW_WEIGHT ) - 1 ), rounded down
///
/// Returns MathError in case of error
pub fn calculate_bpt_out_add_token(bpt_total_supply: Ufixed18, new_weight: Weight) -> Result<Ufixed18, MathError> {
    ensure!(new_weight < *ONE, Overflow);

    let weight_sum_ratio = div_down(*ONE, complement(new_weight))?;
    mul_down(bpt_total_supply, sub(weight_sum_ratio, *ONE)?)
}
