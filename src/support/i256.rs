use core::cmp::Ordering;
use core::fmt;
use primitive_types::U256;

/// Signed 256-bit integer stored as two's complement over [`U256`], covering
/// `[-2^255, 2^255 - 1]`.
///
/// Division truncates toward zero and the remainder takes the dividend's sign,
/// for both positive and negative operands.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct I256(U256);

impl I256 {
    pub const ZERO: I256 = I256(U256([0, 0, 0, 0]));
    pub const ONE: I256 = I256(U256([1, 0, 0, 0]));
    /// `-2^255`
    pub const MIN: I256 = I256(U256([0, 0, 0, 0x8000_0000_0000_0000]));
    /// `2^255 - 1`
    pub const MAX: I256 = I256(U256([u64::MAX, u64::MAX, u64::MAX, 0x7fff_ffff_ffff_ffff]));

    /// Reinterprets raw two's complement bits.
    pub const fn from_raw(bits: U256) -> Self {
        I256(bits)
    }

    pub const fn from_i128(value: i128) -> Self {
        let extension = if value < 0 { u64::MAX } else { 0 };
        I256(U256([value as u64, (value >> 64) as u64, extension, extension]))
    }

    /// Parses a decimal string with an optional leading minus sign.
    pub fn from_dec_str(value: &str) -> Option<Self> {
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let magnitude = U256::from_dec_str(digits).ok()?;
        Self::from_sign_magnitude(negative, magnitude)
    }

    /// The value as two's complement bits.
    pub fn into_raw(self) -> U256 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.bit(255)
    }

    /// Magnitude of the value. Total, since `|MIN| = 2^255` fits `U256`.
    pub fn unsigned_abs(self) -> U256 {
        if self.is_negative() {
            (!self.0).overflowing_add(U256::one()).0
        } else {
            self.0
        }
    }

    /// `None` if the value is negative.
    pub fn to_unsigned(self) -> Option<U256> {
        if self.is_negative() {
            None
        } else {
            Some(self.0)
        }
    }

    /// `None` if the value exceeds `2^255 - 1`.
    pub fn try_from_unsigned(value: U256) -> Option<Self> {
        if value > Self::MAX.0 {
            None
        } else {
            Some(I256(value))
        }
    }

    fn from_sign_magnitude(negative: bool, magnitude: U256) -> Option<Self> {
        if negative {
            if magnitude > Self::MIN.unsigned_abs() {
                None
            } else {
                Some(I256((!magnitude).overflowing_add(U256::one()).0))
            }
        } else if magnitude > Self::MAX.0 {
            None
        } else {
            Some(I256(magnitude))
        }
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        let (bits, _) = self.0.overflowing_add(other.0);
        let result = I256(bits);
        // Two's complement addition overflows exactly when both operands share a
        // sign the result does not.
        if self.is_negative() == other.is_negative() && result.is_negative() != self.is_negative() {
            None
        } else {
            Some(result)
        }
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        let (bits, _) = self.0.overflowing_sub(other.0);
        let result = I256(bits);
        if self.is_negative() != other.is_negative() && result.is_negative() != self.is_negative() {
            None
        } else {
            Some(result)
        }
    }

    pub fn checked_neg(self) -> Option<Self> {
        if self == Self::MIN {
            None
        } else {
            Some(I256((!self.0).overflowing_add(U256::one()).0))
        }
    }

    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let magnitude = self.unsigned_abs().checked_mul(other.unsigned_abs())?;
        Self::from_sign_magnitude(self.is_negative() != other.is_negative(), magnitude)
    }

    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.0.is_zero() {
            return None;
        }
        let quotient = self.unsigned_abs() / other.unsigned_abs();
        Self::from_sign_magnitude(self.is_negative() != other.is_negative(), quotient)
    }

    pub fn checked_rem(self, other: Self) -> Option<Self> {
        if other.0.is_zero() {
            return None;
        }
        let remainder = self.unsigned_abs() % other.unsigned_abs();
        Self::from_sign_magnitude(self.is_negative(), remainder)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl Ord for I256 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // Same sign: two's complement bits order like the values.
            _ => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.unsigned_abs())
    }
}

impl fmt::Debug for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[test]
fn sign_handling_works() {
    let minus_two = I256::from_i128(-2);
    assert!(minus_two.is_negative());
    assert_eq!(minus_two.unsigned_abs(), U256::from(2u8));
    assert_eq!(minus_two.checked_neg(), Some(I256::from_i128(2)));
    assert_eq!(minus_two.to_unsigned(), None);
    assert_eq!(I256::from_i128(2).to_unsigned(), Some(U256::from(2u8)));
    assert_eq!(I256::MIN.unsigned_abs(), U256::one() << 255);
}

#[test]
fn arithmetic_works() {
    type Op = fn(I256, I256) -> Option<I256>;

    let cases: Vec<(i128, i128, Op, Option<i128>, &str)> = vec![
        (7, 5, I256::checked_add, Some(12), "simple add"),
        (-7, 5, I256::checked_add, Some(-2), "mixed add"),
        (-7, -5, I256::checked_add, Some(-12), "negative add"),
        (7, 5, I256::checked_sub, Some(2), "simple sub"),
        (5, 7, I256::checked_sub, Some(-2), "sub below zero"),
        (-7, -5, I256::checked_sub, Some(-2), "negative sub"),
        (7, -5, I256::checked_mul, Some(-35), "mixed mul"),
        (-7, -5, I256::checked_mul, Some(35), "negative mul"),
        (7, 2, I256::checked_div, Some(3), "truncating div"),
        (-7, 2, I256::checked_div, Some(-3), "truncation toward zero"),
        (7, -2, I256::checked_div, Some(-3), "negative divisor"),
        (-7, -2, I256::checked_div, Some(3), "both negative"),
        (7, 2, I256::checked_rem, Some(1), "positive rem"),
        (-7, 2, I256::checked_rem, Some(-1), "rem takes dividend sign"),
        (7, -2, I256::checked_rem, Some(1), "rem ignores divisor sign"),
        (7, 0, I256::checked_div, None, "division by zero"),
    ];

    for case in cases {
        let (a, b) = (I256::from_i128(case.0), I256::from_i128(case.1));
        assert_eq!(case.2(a, b), case.3.map(I256::from_i128), "{}", case.4);
    }
}

#[test]
fn overflow_is_detected() {
    assert_eq!(I256::MAX.checked_add(I256::ONE), None);
    assert_eq!(I256::MIN.checked_sub(I256::ONE), None);
    assert_eq!(I256::MIN.checked_neg(), None);
    assert_eq!(I256::MIN.checked_div(I256::from_i128(-1)), None);
    assert_eq!(I256::MAX.checked_mul(I256::from_i128(2)), None);
    // MIN is representable as a product of negative sign and 2^255 magnitude.
    assert_eq!(
        I256::from_i128(2).checked_mul(I256::MIN.checked_div(I256::from_i128(2)).unwrap()),
        Some(I256::MIN)
    );
}

#[test]
fn ordering_is_sign_aware() {
    assert!(I256::from_i128(-1) < I256::ZERO);
    assert!(I256::from_i128(-2) < I256::from_i128(-1));
    assert!(I256::from_i128(1) > I256::from_i128(-100));
    assert!(I256::MIN < I256::MAX);
}

#[test]
fn decimal_parsing_works() {
    assert_eq!(I256::from_dec_str("0"), Some(I256::ZERO));
    assert_eq!(I256::from_dec_str("-42"), Some(I256::from_i128(-42)));
    assert_eq!(
        I256::from_dec_str("57896044618658097711785492504343953926634992332820282019728792003956564819967"),
        Some(I256::MAX)
    );
    assert_eq!(
        I256::from_dec_str("-57896044618658097711785492504343953926634992332820282019728792003956564819968"),
        Some(I256::MIN)
    );
    assert_eq!(
        I256::from_dec_str("57896044618658097711785492504343953926634992332820282019728792003956564819968"),
        None
    );
}
