use crate::fixed_point::{complement, div_down, div_up, mul_down, mul_up, pow_down, pow_up, ONE};
use crate::support::i256::I256;
use crate::test_utils::assert_approx_eq;
use crate::transcendental::{exp, ln, pow};
use approx::assert_relative_eq;
use primitive_types::U256;
use proptest::prelude::*;

fn fixed_value() -> impl Strategy<Value = U256> {
    (1u128..1_000_000_000_000_000_000_000_000).prop_map(U256::from)
}

fn to_f64(value: U256) -> f64 {
    value.to_string().parse::<f64>().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]
    #[test]
    fn mul_rounds_in_the_stated_direction(a in fixed_value(), b in fixed_value()) {
        let down = mul_down(a, b).unwrap();
        let up = mul_up(a, b).unwrap();

        prop_assert!(down <= up);
        prop_assert!(up - down <= U256::one());
    }

    #[test]
    fn div_rounds_in_the_stated_direction(a in fixed_value(), b in fixed_value()) {
        let down = div_down(a, b).unwrap();
        let up = div_up(a, b).unwrap();

        prop_assert!(down <= up);
        prop_assert!(up - down <= U256::one());
    }

    #[test]
    fn complement_is_an_involution_below_one(x in 0u128..=1_000_000_000_000_000_000) {
        let x = U256::from(x);
        prop_assert_eq!(complement(complement(x)), x);
    }

    #[test]
    fn exp_and_ln_are_inverse(x in -5_000_000_000_000_000_000i128..=125_000_000_000_000_000_000) {
        let x = I256::from_i128(x);
        let round_trip = ln(exp(x).unwrap()).unwrap();

        let difference = round_trip.checked_sub(x).unwrap().unsigned_abs();
        prop_assert!(
            difference <= U256::from(1_000u64),
            "ln(exp({:?})) drifted to {:?}",
            x,
            round_trip
        );
    }

    #[test]
    fn pow_with_zero_exponent_is_one(x in fixed_value()) {
        prop_assert_eq!(pow(x, U256::zero()), Ok(*ONE));
    }

    #[test]
    fn pow_fast_paths_match_the_multiplication_chains(x in fixed_value()) {
        prop_assert_eq!(pow_down(x, *ONE), Ok(x));
        prop_assert_eq!(pow_up(x, *ONE), Ok(x));
        prop_assert_eq!(pow_down(x, (*ONE * U256::from(2u8))), mul_down(x, x));
        prop_assert_eq!(pow_up(x, (*ONE * U256::from(2u8))), mul_up(x, x));

        let square_down = mul_down(x, x).unwrap();
        prop_assert_eq!(pow_down(x, (*ONE * U256::from(4u8))), mul_down(square_down, square_down));
        let square_up = mul_up(x, x).unwrap();
        prop_assert_eq!(pow_up(x, (*ONE * U256::from(4u8))), mul_up(square_up, square_up));
    }

    #[test]
    fn pow_envelope_brackets_the_true_power(
        base in 500_000_000_000_000_000u128..2_000_000_000_000_000_000,
        exponent in 10_000_000_000_000_000u128..20_000_000_000_000_000_000,
    ) {
        let x = U256::from(base);
        let y = U256::from(exponent);

        let raw = pow(x, y).unwrap();
        let down = pow_down(x, y).unwrap();
        let up = pow_up(x, y).unwrap();
        prop_assert!(down <= raw);
        prop_assert!(raw <= up);

        // The raw power agrees with the floating point reference well inside
        // the envelope width.
        let reference = (base as f64 / 1e18).powf(exponent as f64 / 1e18) * 1e18;
        assert_relative_eq!(to_f64(raw), reference, max_relative = 1e-9);
        prop_assert!(to_f64(down) <= reference * (1.0 + 1e-9));
        prop_assert!(to_f64(up) >= reference * (1.0 - 1e-9));
    }

    #[test]
    fn sub_fee_then_add_fee_round_trips(
        amount in fixed_value(),
        fee in 0u128..100_000_000_000_000_000,
    ) {
        let fee = U256::from(fee);
        let net = crate::fee::subtract_swap_fee_amount(amount, fee).unwrap();
        let gross = crate::fee::add_swap_fee_amount(net, fee).unwrap();

        // Both helpers round in the pool's favor, so the gross amount may only
        // exceed the original by the accumulated rounding.
        assert_approx_eq!(gross, amount, U256::from(2u8), "fee round trip drifted");
        prop_assert!(gross + U256::from(2u8) >= amount);
    }
}
