use core::cmp::Ordering;

/// The number of bits in one mantissa limb.
pub const LIMB_BITS: usize = 32;

/// The bias of the 31-bit exponent field.
pub(crate) const EXPONENT_BIAS: i64 = (1 << 30) - 1;

/// The sign bit of the packed sign/exponent word.
pub(crate) const SIGN_BIT: u32 = 0x8000_0000;

/// The exponent field of the packed sign/exponent word. A field of all ones
/// marks a non-finite value, a field of zero marks a zero.
pub(crate) const EXPONENT_MASK: u32 = 0x7fff_ffff;

/// Declare the different categories of the number. These categories are
/// derived from the sign/exponent word and the mantissa payload, and can be
/// accessed by the predicates: is_inf, is_zero, is_nan, is_normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Infinity,
    NaN,
    Normal,
    Zero,
}

/// This is the main data structure of this library. It represents a binary
/// floating-point number with `LIMBS` 32-bit limbs of mantissa and a single
/// 32-bit word that packs the sign and a biased exponent.
///
/// The value of a normal number is `(-1)^sign * 1.mantissa * 2^(exp - bias)`.
/// The leading `1.` is implicit, and `mantissa[0]` holds the bits right after
/// the binary point.
#[derive(Clone, Copy)]
pub struct Real<const LIMBS: usize> {
    // The sign bit and the biased exponent.
    signexp: u32,
    // The fraction bits, most significant limb first.
    mantissa: [u32; LIMBS],
}

/// 128 bits of mantissa.
pub type Real128 = Real<4>;
/// 256 bits of mantissa.
pub type Real256 = Real<8>;
/// 512 bits of mantissa.
pub type Real512 = Real<16>;

impl<const LIMBS: usize> Real<LIMBS> {
    /// The number of mantissa bits (not counting the implicit bit).
    pub const TOTAL_BITS: usize = LIMBS * LIMB_BITS;

    /// The number of decimal digits that are needed for representing this
    /// type accurately.
    // We convert from bits to base-10 digits: log(2)/log(10) ==> 59/196.
    pub const DECIMAL_DIGITS: usize = 2 + (Self::TOTAL_BITS * 59) / 196;

    // The conversion from native doubles fills two limbs.
    const VALID_LAYOUT: () = assert!(LIMBS >= 2, "Real needs two limbs");

    /// Create a number from the raw sign/exponent word and mantissa.
    pub(crate) const fn from_raw(signexp: u32, mantissa: [u32; LIMBS]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_LAYOUT;
        Real { signexp, mantissa }
    }

    /// Create a finite number from the sign, the unbiased exponent and the
    /// fraction bits. Exponents that don't fit in the exponent field saturate
    /// to infinity or flush to zero.
    pub(crate) fn from_parts(sign: bool, exp: i64, mantissa: [u32; LIMBS]) -> Self {
        let biased = exp.saturating_add(EXPONENT_BIAS);
        if biased >= EXPONENT_MASK as i64 {
            return Self::inf(sign);
        }
        if biased <= 0 {
            return Self::zero(sign);
        }
        Self::from_raw(Self::sign_word(sign) | biased as u32, mantissa)
    }

    fn sign_word(sign: bool) -> u32 {
        if sign {
            SIGN_BIT
        } else {
            0
        }
    }

    /// Returns a new zero.
    pub const fn zero(sign: bool) -> Self {
        Self::from_raw(if sign { SIGN_BIT } else { 0 }, [0; LIMBS])
    }

    /// Returns a new one.
    pub const fn one(sign: bool) -> Self {
        let sign = if sign { SIGN_BIT } else { 0 };
        Self::from_raw(sign | EXPONENT_BIAS as u32, [0; LIMBS])
    }

    /// Returns a new infinity.
    pub const fn inf(sign: bool) -> Self {
        let sign = if sign { SIGN_BIT } else { 0 };
        Self::from_raw(sign | EXPONENT_MASK, [0; LIMBS])
    }

    /// Returns a new NaN. The payload is a non-zero top limb.
    pub const fn nan(sign: bool) -> Self {
        let sign = if sign { SIGN_BIT } else { 0 };
        let mut mantissa = [0; LIMBS];
        mantissa[0] = 0xffff_ffff;
        Self::from_raw(sign | EXPONENT_MASK, mantissa)
    }

    /// Returns the largest finite number.
    pub const fn max_value() -> Self {
        Self::from_raw(EXPONENT_MASK - 1, [u32::MAX; LIMBS])
    }

    /// Returns the smallest positive number, 2^(1-bias).
    pub const fn min_positive() -> Self {
        Self::from_raw(1, [0; LIMBS])
    }

    /// Returns true if the number is negative (including -0, -inf).
    pub fn is_negative(&self) -> bool {
        self.signexp & SIGN_BIT != 0
    }

    /// Returns the sign bit.
    pub fn get_sign(&self) -> bool {
        self.is_negative()
    }

    /// Returns a copy of this number with the sign `sign`.
    pub fn with_sign(&self, sign: bool) -> Self {
        Self::from_raw(
            (self.signexp & EXPONENT_MASK) | Self::sign_word(sign),
            self.mantissa,
        )
    }

    /// Returns the number with the sign flipped.
    pub fn neg(&self) -> Self {
        Self::from_raw(self.signexp ^ SIGN_BIT, self.mantissa)
    }

    /// Returns the biased exponent field.
    pub(crate) fn exponent_field(&self) -> u32 {
        self.signexp & EXPONENT_MASK
    }

    /// Returns the packed sign/exponent word.
    pub fn get_signexp(&self) -> u32 {
        self.signexp
    }

    /// Returns the unbiased exponent. This is only meaningful for normal
    /// numbers.
    pub fn get_exp(&self) -> i64 {
        self.exponent_field() as i64 - EXPONENT_BIAS
    }

    /// Returns the fraction bits, most significant limb first.
    pub fn get_mantissa(&self) -> &[u32; LIMBS] {
        &self.mantissa
    }

    fn has_payload(&self) -> bool {
        self.mantissa.iter().any(|limb| *limb != 0)
    }

    /// Returns the kind of value this number holds.
    pub fn get_category(&self) -> Category {
        match self.exponent_field() {
            0 => Category::Zero,
            EXPONENT_MASK if self.has_payload() => Category::NaN,
            EXPONENT_MASK => Category::Infinity,
            _ => Category::Normal,
        }
    }

    /// Returns true if the number is +-inf.
    pub fn is_inf(&self) -> bool {
        self.get_category() == Category::Infinity
    }

    /// Returns true if the number is a +-NaN.
    pub fn is_nan(&self) -> bool {
        self.get_category() == Category::NaN
    }

    /// Returns true if the number is a +-zero.
    pub fn is_zero(&self) -> bool {
        self.get_category() == Category::Zero
    }

    /// Returns true if this number is normal (not Zero, Nan, Inf).
    pub fn is_normal(&self) -> bool {
        self.get_category() == Category::Normal
    }

    /// Returns true if the number is zero or normal.
    pub fn is_finite(&self) -> bool {
        self.exponent_field() != EXPONENT_MASK
    }

    /// Compare the absolute values of two finite numbers.
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.exponent_field()
            .cmp(&other.exponent_field())
            .then_with(|| self.mantissa.cmp(&other.mantissa))
    }
}

impl<const LIMBS: usize> Default for Real<LIMBS> {
    fn default() -> Self {
        Self::zero(false)
    }
}

impl<const LIMBS: usize> PartialEq for Real<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        match (self.get_category(), other.get_category()) {
            (Category::NaN, _) | (_, Category::NaN) => false,
            (Category::Zero, Category::Zero) => true,
            _ => self.signexp == other.signexp && self.mantissa == other.mantissa,
        }
    }
}

impl<const LIMBS: usize> PartialOrd for Real<LIMBS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let bool_to_ord = |ord: bool| -> Option<Ordering> {
            if ord {
                Some(Ordering::Less)
            } else {
                Some(Ordering::Greater)
            }
        };

        match (self.get_category(), other.get_category()) {
            (Category::NaN, _) | (_, Category::NaN) => None,
            (Category::Zero, Category::Zero) => Some(Ordering::Equal),
            (Category::Zero, _) => bool_to_ord(!other.is_negative()),
            (_, Category::Zero) => bool_to_ord(self.is_negative()),
            _ => {
                if self.is_negative() != other.is_negative() {
                    return bool_to_ord(self.is_negative());
                }
                // Infinity has the largest exponent field, so it sorts after
                // every normal number of the same sign.
                let ord = self.cmp_magnitude(other);
                if self.is_negative() {
                    Some(ord.reverse())
                } else {
                    Some(ord)
                }
            }
        }
    }
}

#[test]
fn test_comparisons() {
    use super::utils;
    use super::Real128;

    // Compare a bunch of special values, using the <,>,== operators and check
    // that they match the comparison on doubles.
    for first in utils::get_special_test_values() {
        for second in utils::get_special_test_values() {
            let is_less = first < second;
            let is_eq = first == second;
            let is_gt = first > second;
            let first = Real128::from_f64(first);
            let second = Real128::from_f64(second);
            assert_eq!(is_less, first < second, "<");
            assert_eq!(is_eq, first == second, "==");
            assert_eq!(is_gt, first > second, ">");
        }
    }
}

#[test]
fn test_categories() {
    use super::Real256;
    assert!(Real256::zero(true).is_zero());
    assert!(Real256::zero(true).is_negative());
    assert!(Real256::inf(false).is_inf());
    assert!(!Real256::inf(false).is_nan());
    assert!(Real256::nan(false).is_nan());
    assert!(!Real256::nan(false).is_finite());
    assert!(Real256::one(false).is_normal());
    assert!(Real256::max_value().is_normal());
    assert!(Real256::min_positive().is_normal());
    assert_eq!(Real256::one(true).get_exp(), 0);
    assert_eq!(Real256::default(), Real256::zero(true));
    assert!(Real256::nan(false) != Real256::nan(false));
    assert!(Real256::max_value() < Real256::inf(false));
    assert!(Real256::max_value().neg() > Real256::inf(true));
    assert!(Real256::min_positive() > Real256::zero(false));
}

#[test]
fn test_ordering_of_limbs() {
    use super::Real128;
    // Values that only differ in their lowest limb.
    let a = Real128::from_raw(EXPONENT_BIAS as u32, [0, 0, 0, 1]);
    let b = Real128::from_raw(EXPONENT_BIAS as u32, [0, 0, 0, 2]);
    assert!(a < b);
    assert!(b.neg() < a.neg());
    assert!(a != b);
    assert!(a == a.with_sign(false));
    assert!(Real128::one(false) < a);
}
