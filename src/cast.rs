use super::real::{Category, Real, EXPONENT_BIAS, EXPONENT_MASK, SIGN_BIT};

/// The exponent bias of IEEE double precision.
const F64_BIAS: i64 = 1023;

impl<const LIMBS: usize> Real<LIMBS> {
    /// Load the double `val`. Denormal inputs are flushed to a signed zero.
    /// NaN and Inf keep their payload, so they stay NaN and Inf.
    pub fn from_f64(val: f64) -> Self {
        let bits = val.to_bits();
        let sign = ((bits >> 63) as u32) << 31;
        let exponent = ((bits >> 52) & 0x7ff) as i64;

        let mut mantissa = [0; LIMBS];
        if exponent == 0 {
            return Self::from_raw(sign, mantissa);
        }

        // The 52 fraction bits fill the top limb and the first 20 bits of the
        // second limb.
        mantissa[0] = (bits >> 20) as u32;
        mantissa[1] = (bits << 12) as u32;

        let exponent = if exponent == 0x7ff {
            EXPONENT_MASK
        } else {
            (exponent - F64_BIAS + EXPONENT_BIAS) as u32
        };
        Self::from_raw(sign | exponent, mantissa)
    }

    /// Load the float `val`.
    pub fn from_f32(val: f32) -> Self {
        Self::from_f64(val as f64)
    }

    /// Load the integer `val`. The number is loaded exactly, by loading the
    /// two 32-bit halves (which are exact as doubles) and adding them.
    pub fn from_u64(val: u64) -> Self {
        let high = Self::from_f64((val >> 32) as f64);
        let low = Self::from_f64((val & 0xffff_ffff) as f64);
        high.ldexp(32) + low
    }

    /// Load the integer `val`.
    pub fn from_i64(val: i64) -> Self {
        let magnitude = Self::from_u64(val.unsigned_abs());
        if val < 0 {
            return magnitude.neg();
        }
        magnitude
    }

    /// Convert to the nearest double. Values below the double range flush to
    /// zero and values above it saturate to infinity. The result is rounded by
    /// looking at the first discarded bit only, so exact ties round away from
    /// zero instead of to even.
    pub fn as_f64(&self) -> f64 {
        let sign = ((self.get_signexp() & SIGN_BIT) as u64) << 32;
        let inf = sign | (0x7ff << 52);
        match self.get_category() {
            Category::Zero => return f64::from_bits(sign),
            Category::NaN => return f64::NAN,
            Category::Infinity => return f64::from_bits(inf),
            Category::Normal => {}
        }

        let exponent = self.get_exp() + F64_BIAS;
        if exponent <= 0 {
            return f64::from_bits(sign);
        }
        if exponent >= 0x7ff {
            return f64::from_bits(inf);
        }

        let mantissa = self.get_mantissa();
        let m0 = mantissa[0] as u64;
        let m1 = mantissa[1] as u64;
        let mut bits = sign | ((exponent as u64) << 52) | (m0 << 20) | (m1 >> 12);
        // A carry out of the fraction bumps the exponent, which is the right
        // result (and may produce infinity).
        bits += (m1 >> 11) & 1;
        f64::from_bits(bits)
    }

    /// Convert to a float, through a double.
    pub fn as_f32(&self) -> f32 {
        self.as_f64() as f32
    }

    /// Convert to an integer, through a double. The value is truncated toward
    /// zero and saturates at the bounds of the type. NaN converts to zero.
    pub fn as_i64(&self) -> i64 {
        self.as_f64() as i64
    }

    /// See `as_i64`.
    pub fn as_u64(&self) -> u64 {
        self.as_f64() as u64
    }

    /// See `as_i64`.
    pub fn as_i32(&self) -> i32 {
        self.as_f64() as i32
    }

    /// See `as_i64`.
    pub fn as_u32(&self) -> u32 {
        self.as_f64() as u32
    }

    /// Returns false for zero and NaN, and true for everything else.
    pub fn as_bool(&self) -> bool {
        !matches!(self.get_category(), Category::Zero | Category::NaN)
    }
}

macro_rules! declare_from_native {
    ($native:ty, $ctor:ident) => {
        impl<const LIMBS: usize> From<$native> for Real<LIMBS> {
            fn from(val: $native) -> Self {
                Self::$ctor(val.into())
            }
        }
    };
}

declare_from_native!(f64, from_f64);
declare_from_native!(f32, from_f32);
declare_from_native!(i32, from_f64);
declare_from_native!(u32, from_f64);
declare_from_native!(u8, from_f64);
declare_from_native!(i64, from_i64);
declare_from_native!(u64, from_u64);

impl<const LIMBS: usize> From<bool> for Real<LIMBS> {
    fn from(val: bool) -> Self {
        Self::from_f64(if val { 1. } else { 0. })
    }
}

macro_rules! declare_into_native {
    ($native:ty, $method:ident) => {
        impl<const LIMBS: usize> From<Real<LIMBS>> for $native {
            fn from(val: Real<LIMBS>) -> Self {
                val.$method()
            }
        }

        impl<const LIMBS: usize> From<&Real<LIMBS>> for $native {
            fn from(val: &Real<LIMBS>) -> Self {
                val.$method()
            }
        }
    };
}

declare_into_native!(f64, as_f64);
declare_into_native!(f32, as_f32);
declare_into_native!(i64, as_i64);
declare_into_native!(u64, as_u64);
declare_into_native!(i32, as_i32);
declare_into_native!(u32, as_u32);
declare_into_native!(bool, as_bool);

#[test]
fn test_round_trip_native_float_cast() {
    use super::utils;
    use super::Real128;

    for val in utils::get_special_test_values() {
        let r = Real128::from_f64(val);
        let back = r.as_f64();
        if val.is_nan() {
            assert!(back.is_nan());
            assert!(r.is_nan());
            continue;
        }
        assert_eq!(back.to_bits(), val.to_bits());
    }

    let mut lfsr = utils::Lfsr::new();
    for _ in 0..5000 {
        let val = f64::from_bits(lfsr.get64());
        if !val.is_normal() {
            continue;
        }
        assert_eq!(Real128::from_f64(val).as_f64(), val);
    }
}

#[test]
fn test_cast_easy_ctor() {
    use super::Real256;
    let values = [0x345_u64, 0x1, 0x0, 0xffff_ffff, u64::MAX, 1 << 53];
    for v in values {
        let f = Real256::from_u64(v);
        assert_eq!(f.as_f64(), v as f64);
    }
    assert_eq!(Real256::from(12345678.0f32).as_f32(), 12345678.0f32);
    assert_eq!(Real256::from(-1.5f32).as_f32(), -1.5f32);
    assert_eq!(Real256::from(-7i32).as_i32(), -7);
    assert_eq!(Real256::from(7u32).as_u32(), 7);
    assert_eq!(f64::from(Real256::from(1.5)), 1.5);
}

#[test]
fn test_cast_from_integers() {
    use super::Real512;
    // Integers above 2^53 are loaded exactly.
    let big = Real512::from_u64(u64::MAX);
    let one = Real512::from_u64(1);
    let two_64 = Real512::from_u64(1 << 32) * Real512::from_u64(1 << 32);
    assert_eq!(big + one, two_64);

    let v = Real512::from_i64(-0x1234_5678_9abc_def1);
    // The double conversion keeps 53 bits, and rounds the rest up.
    assert_eq!(v.as_i64(), -0x1234_5678_9abc_df00);
    assert!(v.is_negative());
    assert!(Real512::from_i64(0).is_zero());
    assert_eq!(Real512::from_i64(i64::MIN).as_i64(), i64::MIN);
}

#[test]
fn test_cast_zero_nan_inf() {
    use super::Real128;
    let nan = f64::NAN;
    let inf = f64::INFINITY;
    let zero = 0.0;

    assert!(Real128::from_f64(nan).is_nan());
    assert!(Real128::from_f64(inf).is_inf());
    assert!(!Real128::from_f64(inf).is_negative());
    assert!(Real128::from_f64(-inf).is_negative());
    assert!(Real128::from_f64(zero).is_zero());
    assert!(Real128::from_f64(-zero).is_negative());

    assert!(Real128::nan(false).as_f64().is_nan());
    assert_eq!(Real128::inf(true).as_f64(), f64::NEG_INFINITY);
    assert_eq!(Real128::zero(true).as_f64().to_bits(), (-0.0f64).to_bits());

    // Denormals are flushed to zero.
    assert!(Real128::from_f64(f64::from_bits(1)).is_zero());
    // Out of range values saturate.
    assert_eq!(Real128::max_value().as_f64(), f64::INFINITY);
    assert_eq!(Real128::min_positive().as_f64(), 0.0);
    assert_eq!(Real128::nan(false).as_i64(), 0);
    assert_eq!(Real128::inf(false).as_i64(), i64::MAX);
}

#[test]
fn test_cast_rounding() {
    use super::Real128;
    // 1 + 2^-53 is exactly half way between two doubles, and rounds up.
    let one = Real128::one(false);
    let half_ulp = Real128::one(false).ldexp(-53);
    assert_eq!((one + half_ulp).as_f64(), 1.0 + f64::EPSILON);
    // Anything below the half way point is truncated.
    let quarter_ulp = Real128::one(false).ldexp(-54);
    assert_eq!((one + quarter_ulp).as_f64(), 1.0);
    // Rounding up the largest mantissa carries into the exponent.
    let below_two = Real128::from_f64(2.0).next_down();
    assert_eq!(below_two.as_f64(), 2.0);
}

#[test]
fn test_cast_bool() {
    use super::Real128;
    assert!(!Real128::from_f64(0.0).as_bool());
    assert!(!Real128::from_f64(-0.0).as_bool());
    assert!(Real128::from_f64(1234.0).as_bool());
    assert!(Real128::from_f64(-1234.0).as_bool());
    assert!(Real128::inf(true).as_bool());
    assert!(!Real128::nan(false).as_bool());
    assert!(bool::from(Real128::from(true)));
    assert!(!bool::from(Real128::from(false)));
}
