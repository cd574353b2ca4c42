use crate::weighted::*;
use crate::MathError::{
    DivByZero, MaxInRatio, MaxInvariantRatio, MaxOutRatio, MinInvariantRatio, Overflow, Underflow, WeightOutOfRange,
    ZeroInvariant,
};
use primitive_types::U256;

fn fixed(units: u128) -> U256 {
    U256::from(units)
}

fn tokens(amount: u128) -> U256 {
    U256::from(amount) * U256::from(1_000_000_000_000_000_000u128)
}

fn percent(value: u128) -> U256 {
    U256::from(value) * U256::from(10_000_000_000_000_000u128)
}

#[test]
fn verify_weights_should_work() {
    let cases = vec![
        (vec![percent(50), percent(50)], Ok(()), "Two-token 50/50"),
        (vec![percent(80), percent(20)], Ok(()), "Two-token 80/20"),
        (vec![percent(1); 100], Ok(()), "A hundred one-percent tokens"),
        (vec![percent(50), percent(49)], Err(WeightOutOfRange), "Sum below one"),
        (vec![percent(50), percent(51)], Err(WeightOutOfRange), "Sum above one"),
        (vec![], Err(WeightOutOfRange), "No tokens"),
        (
            vec![percent(1) - U256::one(), percent(99) + U256::one()],
            Err(WeightOutOfRange),
            "Weight below one percent",
        ),
    ];

    for case in cases {
        assert_eq!(verify_weights(&case.0), case.1, "{}", case.2);
    }
}

#[test]
fn invariant_should_work() {
    let cases = vec![
        (
            vec![percent(50), percent(50)],
            vec![tokens(100), tokens(100)],
            Ok(fixed(99_999_999_999_997_999_760)),
            "Two-token 50/50",
        ),
        (
            vec![percent(80), percent(20)],
            vec![tokens(80), tokens(20)],
            Ok(fixed(60_628_662_660_414_710_574)),
            "Two-token 80/20",
        ),
        (
            vec![percent(50), percent(50)],
            vec![tokens(0), tokens(100)],
            Err(ZeroInvariant),
            "Zero balance",
        ),
        (
            vec![percent(50)],
            vec![tokens(100), tokens(100)],
            Err(WeightOutOfRange),
            "One weight short",
        ),
    ];

    for case in cases {
        assert_eq!(calculate_invariant(&case.0, &case.1), case.2, "{}", case.3);
    }
}

#[test]
fn spot_price_should_work() {
    let cases = vec![
        (
            tokens(100),
            percent(50),
            tokens(200),
            percent(50),
            Ok(fixed(500_000_000_000_000_000)),
            "Out token twice as abundant",
        ),
        (
            tokens(100),
            percent(50),
            tokens(0),
            percent(50),
            Err(DivByZero),
            "Zero out balance",
        ),
        (tokens(100), percent(0), tokens(100), percent(50), Err(DivByZero), "Zero in weight"),
        (tokens(100), percent(50), tokens(100), percent(0), Err(DivByZero), "Zero out weight"),
    ];

    for case in cases {
        assert_eq!(calculate_spot_price(case.0, case.1, case.2, case.3), case.4, "{}", case.5);
    }
}

#[test]
fn out_given_in_should_work() {
    let cases = vec![
        (
            tokens(100),
            percent(50),
            tokens(100),
            percent(50),
            tokens(10),
            Ok(fixed(9_090_909_090_909_090_900)),
            "Equal weights take the unit-exponent fast path",
        ),
        (
            tokens(80),
            percent(80),
            tokens(20),
            percent(20),
            tokens(8),
            Ok(fixed(6_339_730_892_698_586_120)),
            "80/20 pool",
        ),
        (
            tokens(100),
            percent(50),
            tokens(100),
            percent(50),
            tokens(30),
            Ok(fixed(23_076_923_076_923_076_900)),
            "Thirty percent in is the limit",
        ),
        (
            tokens(100),
            percent(50),
            tokens(100),
            percent(50),
            tokens(30) + U256::one(),
            Err(MaxInRatio),
            "Above thirty percent in",
        ),
    ];

    for case in cases {
        assert_eq!(
            calculate_out_given_in(case.0, case.1, case.2, case.3, case.4),
            case.5,
            "{}",
            case.6
        );
    }
}

#[test]
fn in_given_out_should_work() {
    let cases = vec![
        (
            tokens(100),
            percent(50),
            tokens(100),
            percent(50),
            fixed(9_090_909_090_909_090_900),
            Ok(tokens(10)),
            "Inverse of the equal-weight swap",
        ),
        (
            tokens(80),
            percent(80),
            tokens(20),
            percent(20),
            tokens(5),
            Ok(fixed(5_965_594_545_884_213_200)),
            "80/20 pool",
        ),
        (
            tokens(100),
            percent(50),
            tokens(100),
            percent(50),
            tokens(30),
            Ok(fixed(42_857_142_857_142_857_200)),
            "Thirty percent out is the limit",
        ),
        (
            tokens(100),
            percent(50),
            tokens(100),
            percent(50),
            tokens(30) + U256::one(),
            Err(MaxOutRatio),
            "Above thirty percent out",
        ),
    ];

    for case in cases {
        assert_eq!(
            calculate_in_given_out(case.0, case.1, case.2, case.3, case.4),
            case.5,
            "{}",
            case.6
        );
    }
}

#[test]
fn bpt_out_given_exact_tokens_in_should_work() {
    let balances = vec![tokens(100), tokens(200)];
    let weights = vec![percent(50), percent(50)];
    let supply = tokens(100);
    let one_percent_fee = percent(1);

    let cases = vec![
        (
            vec![tokens(10), tokens(20)],
            one_percent_fee,
            Ok(fixed(9_999_999_999_997_799_100)),
            "Proportional join pays no fee",
        ),
        (
            vec![tokens(10), tokens(20)],
            fixed(0),
            Ok(fixed(9_999_999_999_997_799_100)),
            "Proportional join, explicit zero fee",
        ),
        (
            vec![tokens(20), tokens(0)],
            one_percent_fee,
            Ok(fixed(9_498_858_441_535_911_400)),
            "Single-sided join pays the fee on the excess",
        ),
        (
            vec![tokens(20), tokens(0)],
            fixed(0),
            Ok(fixed(9_544_511_501_031_031_400)),
            "Single-sided join without fee",
        ),
        (
            vec![tokens(0), tokens(0)],
            one_percent_fee,
            Ok(fixed(0)),
            "Empty join mints nothing",
        ),
        (
            vec![tokens(10)],
            one_percent_fee,
            Err(WeightOutOfRange),
            "One amount short",
        ),
    ];

    for case in cases {
        assert_eq!(
            calculate_bpt_out_given_exact_tokens_in(&balances, &weights, &case.0, supply, case.1),
            case.2,
            "{}",
            case.3
        );
    }
}

#[test]
fn token_in_given_exact_bpt_out_should_work() {
    let cases = vec![
        (
            tokens(100),
            percent(50),
            tokens(10),
            tokens(100),
            percent(1),
            Ok(fixed(21_106_060_606_060_606_061)),
            "Ten percent of the supply",
        ),
        (
            tokens(100),
            percent(50),
            tokens(200),
            tokens(100),
            percent(1),
            Ok(fixed(804_040_404_040_404_040_405)),
            "Tripling the invariant is the limit",
        ),
        (
            tokens(100),
            percent(50),
            tokens(200) + U256::one(),
            tokens(100),
            percent(1),
            Err(MaxInvariantRatio),
            "Beyond triple the invariant",
        ),
    ];

    for case in cases {
        assert_eq!(
            calculate_token_in_given_exact_bpt_out(case.0, case.1, case.2, case.3, case.4),
            case.5,
            "{}",
            case.6
        );
    }
}

#[test]
fn all_tokens_in_given_exact_bpt_out_should_work() {
    let balances = vec![tokens(100), tokens(200)];
    assert_eq!(
        calculate_all_tokens_in_given_exact_bpt_out(&balances, tokens(10), tokens(100)),
        Ok(vec![tokens(10), tokens(20)]),
        "Ten percent of the supply takes ten percent of each balance"
    );
}

#[test]
fn bpt_in_given_exact_tokens_out_should_work() {
    let balances = vec![tokens(100), tokens(200)];
    let weights = vec![percent(50), percent(50)];
    let supply = tokens(100);
    let one_percent_fee = percent(1);

    let cases = vec![
        (
            vec![tokens(10), tokens(20)],
            one_percent_fee,
            Ok(fixed(10_000_000_000_001_800_200)),
            "Proportional exit pays no fee",
        ),
        (
            vec![tokens(20), tokens(0)],
            one_percent_fee,
            Ok(fixed(10_613_765_098_318_017_000)),
            "Single-sided exit pays the fee on the excess",
        ),
        (
            vec![tokens(20), tokens(0)],
            fixed(0),
            Ok(fixed(10_557_280_900_010_201_300)),
            "Single-sided exit without fee",
        ),
        (
            vec![tokens(100), tokens(0)],
            one_percent_fee,
            Err(Underflow),
            "Draining a balance entirely",
        ),
    ];

    for case in cases {
        assert_eq!(
            calculate_bpt_in_given_exact_tokens_out(&balances, &weights, &case.0, supply, case.1),
            case.2,
            "{}",
            case.3
        );
    }
}

#[test]
fn token_out_given_exact_bpt_in_should_work() {
    let cases = vec![
        (
            tokens(100),
            percent(50),
            tokens(10),
            tokens(100),
            percent(1),
            Ok(fixed(18_905_000_000_000_000_000)),
            "Ten percent of the supply",
        ),
        (
            tokens(100),
            percent(50),
            tokens(30),
            tokens(100),
            percent(1),
            Ok(fixed(50_745_000_000_000_000_000)),
            "Shrinking the invariant to seventy percent is the limit",
        ),
        (
            tokens(100),
            percent(50),
            tokens(30) + U256::one(),
            tokens(100),
            percent(1),
            Err(MinInvariantRatio),
            "Below seventy percent of the invariant",
        ),
    ];

    for case in cases {
        assert_eq!(
            calculate_token_out_given_exact_bpt_in(case.0, case.1, case.2, case.3, case.4),
            case.5,
            "{}",
            case.6
        );
    }
}

#[test]
fn tokens_out_given_exact_bpt_in_should_work() {
    let balances = vec![tokens(100), tokens(200)];
    assert_eq!(
        calculate_tokens_out_given_exact_bpt_in(&balances, tokens(10), tokens(100)),
        Ok(vec![tokens(10), tokens(20)]),
        "Ten percent of the supply returns ten percent of each balance"
    );
}

#[test]
fn bpt_out_add_token_should_work() {
    let cases = vec![
        (
            tokens(100),
            percent(50),
            Ok(tokens(100)),
            "A half-weight token doubles the supply",
        ),
        (
            tokens(100),
            percent(99),
            Ok(tokens(9_900)),
            "A dominant new token mints many shares",
        ),
        (tokens(100), percent(100), Err(Overflow), "Full weight is unreachable"),
        (tokens(100), percent(101), Err(Overflow), "Weight above one"),
    ];

    for case in cases {
        assert_eq!(calculate_bpt_out_add_token(case.0, case.1), case.2, "{}", case.3);
    }
}
