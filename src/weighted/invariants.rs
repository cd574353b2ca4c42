use crate::fixed_point::mul_down;
use crate::test_utils::{percent, pool_balance, swap_fee, weight_percent};
use crate::weighted::*;
use primitive_types::U256;
use proptest::prelude::*;

fn amount_percent() -> impl Strategy<Value = u64> {
    1..=30u64
}

fn take_percent(balance: U256, share: u64) -> U256 {
    balance * U256::from(share) / U256::from(100u64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]
    #[test]
    fn swap_round_trip_is_tight_and_never_underprices_the_pool(
        balance_in in pool_balance(),
        balance_out in pool_balance(),
        weight in weight_percent(),
        share in amount_percent(),
    ) {
        let weight_in = percent(weight);
        let weight_out = percent(100 - weight);
        let amount_in = take_percent(balance_in, share);

        let amount_out =
            calculate_out_given_in(balance_in, weight_in, balance_out, weight_out, amount_in).unwrap();
        prop_assume!(!amount_out.is_zero());
        prop_assume!(amount_out <= mul_down(balance_out, *MAX_OUT_RATIO).unwrap());

        let round_trip =
            calculate_in_given_out(balance_in, weight_in, balance_out, weight_out, amount_out).unwrap();

        // The quoted price of buying back the granted output may deviate from the
        // original input only within the power envelope.
        let tolerance = amount_in / U256::from(100_000_000u64);
        prop_assert!(
            round_trip + tolerance >= amount_in,
            "round trip underprices the pool: {} for {}",
            round_trip,
            amount_in
        );
        prop_assert!(
            round_trip <= amount_in + tolerance,
            "round trip overshoots the envelope: {} for {}",
            round_trip,
            amount_in
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]
    #[test]
    fn joins_never_shrink_the_invariant(
        balance_a in pool_balance(),
        balance_b in pool_balance(),
        weight in weight_percent(),
        share_a in 0..=25u64,
        share_b in 0..=25u64,
        fee in swap_fee(),
    ) {
        let weights = vec![percent(weight), percent(100 - weight)];
        let balances = vec![balance_a, balance_b];
        let amounts_in = vec![take_percent(balance_a, share_a), take_percent(balance_b, share_b)];
        let supply = balance_a;

        let invariant_before = calculate_invariant(&weights, &balances).unwrap();
        calculate_bpt_out_given_exact_tokens_in(&balances, &weights, &amounts_in, supply, fee).unwrap();

        let balances_after: Vec<U256> =
            balances.iter().zip(&amounts_in).map(|(&b, &a)| b + a).collect();
        let invariant_after = calculate_invariant(&weights, &balances_after).unwrap();

        prop_assert!(
            invariant_after >= invariant_before,
            "join shrank the invariant: {} -> {}",
            invariant_before,
            invariant_after
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]
    #[test]
    fn exits_never_grow_the_invariant(
        balance_a in pool_balance(),
        balance_b in pool_balance(),
        weight in weight_percent(),
        share_a in 0..=20u64,
        share_b in 0..=20u64,
        fee in swap_fee(),
    ) {
        let weights = vec![percent(weight), percent(100 - weight)];
        let balances = vec![balance_a, balance_b];
        let amounts_out = vec![take_percent(balance_a, share_a), take_percent(balance_b, share_b)];
        let supply = balance_a;

        let invariant_before = calculate_invariant(&weights, &balances).unwrap();
        calculate_bpt_in_given_exact_tokens_out(&balances, &weights, &amounts_out, supply, fee).unwrap();

        let balances_after: Vec<U256> =
            balances.iter().zip(&amounts_out).map(|(&b, &a)| b - a).collect();
        let invariant_after = calculate_invariant(&weights, &balances_after).unwrap();

        prop_assert!(
            invariant_after <= invariant_before,
            "exit grew the invariant: {} -> {}",
            invariant_before,
            invariant_after
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]
    #[test]
    fn proportional_join_takes_the_same_share_of_every_balance(
        balance_a in pool_balance(),
        balance_b in pool_balance(),
        balance_c in pool_balance(),
        supply in pool_balance(),
        share in 1..=100u64,
    ) {
        let balances = vec![balance_a, balance_b, balance_c];
        let bpt_amount_out = take_percent(supply, share);

        let amounts_in =
            calculate_all_tokens_in_given_exact_bpt_out(&balances, bpt_amount_out, supply).unwrap();

        let bpt_ratio = crate::fixed_point::div_up(bpt_amount_out, supply).unwrap();
        for (&balance, &amount) in balances.iter().zip(&amounts_in) {
            let realized_ratio = crate::fixed_point::div_down(amount, balance).unwrap();
            let difference = if realized_ratio >= bpt_ratio {
                realized_ratio - bpt_ratio
            } else {
                bpt_ratio - realized_ratio
            };
            prop_assert!(
                difference <= U256::from(2u8),
                "per-token deposit ratio drifts from the share ratio: {} vs {}",
                realized_ratio,
                bpt_ratio
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]
    #[test]
    fn fee_less_join_and_proportional_exit_cancel_out(
        balance_a in pool_balance(),
        balance_b in pool_balance(),
        weight in weight_percent(),
        supply in pool_balance(),
        share in 1..=20u64,
    ) {
        let weights = vec![percent(weight), percent(100 - weight)];
        let balances = vec![balance_a, balance_b];
        // A balanced deposit: the same share of every balance.
        let amounts_in = vec![take_percent(balance_a, share), take_percent(balance_b, share)];

        let bpt_out =
            calculate_bpt_out_given_exact_tokens_in(&balances, &weights, &amounts_in, supply, U256::zero())
                .unwrap();

        let balances_after: Vec<U256> =
            balances.iter().zip(&amounts_in).map(|(&b, &a)| b + a).collect();
        let amounts_out =
            calculate_tokens_out_given_exact_bpt_in(&balances_after, bpt_out, supply + bpt_out).unwrap();

        for (&deposited, &withdrawn) in amounts_in.iter().zip(&amounts_out) {
            let tolerance = deposited / U256::from(1_000_000_000u64) + U256::from(2u8);
            let difference = if withdrawn >= deposited {
                withdrawn - deposited
            } else {
                deposited - withdrawn
            };
            prop_assert!(
                difference <= tolerance,
                "fee-less round trip is lossy: deposited {}, withdrawn {}",
                deposited,
                withdrawn
            );
        }
    }
}
