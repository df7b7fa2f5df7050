//! Rounding to integers, and the round-to-nearest remainder.

use crate::real::{Real, LIMB_BITS};
use crate::utils::mask;

impl<const LIMBS: usize> Real<LIMBS> {
    /// Round toward zero, by clearing the mantissa bits below the unit
    /// position.
    pub fn trunc(&self) -> Self {
        if !self.is_normal() {
            return *self;
        }
        let exp = self.get_exp();
        if exp < 0 {
            return Self::zero(self.is_negative());
        }
        if exp as usize >= Self::TOTAL_BITS {
            return *self;
        }

        // Keep the first 'exp' fraction bits.
        let mut mantissa = *self.get_mantissa();
        let mut keep = exp as usize;
        for limb in mantissa.iter_mut() {
            if keep >= LIMB_BITS {
                keep -= LIMB_BITS;
                continue;
            }
            *limb &= !mask(LIMB_BITS - keep);
            keep = 0;
        }
        Self::from_parts(self.is_negative(), exp, mantissa)
    }

    /// Round toward negative infinity.
    pub fn floor(&self) -> Self {
        let t = self.trunc();
        if self.is_negative() && t != *self {
            return t - 1;
        }
        t
    }

    /// Round toward positive infinity.
    pub fn ceil(&self) -> Self {
        let t = self.trunc();
        if !self.is_negative() && t != *self {
            return t + 1;
        }
        t
    }

    /// Round to the nearest integer. Halfway cases round away from zero.
    pub fn round(&self) -> Self {
        if !self.is_normal() {
            return *self;
        }
        if self.is_negative() {
            return self.neg().round().neg();
        }
        (*self + Self::from_f64(0.5)).floor()
    }

    /// Returns `x - round(x / y) * y`. The result is in the range
    /// [-|y|/2, |y|/2]. Unlike the `%` operator, which truncates the quotient,
    /// the quotient is rounded to the nearest integer.
    pub fn fmod(&self, y: &Self) -> Self {
        if self.is_nan() || y.is_nan() || self.is_inf() || y.is_zero() {
            return Self::nan(self.is_negative());
        }
        if self.is_zero() || y.is_inf() {
            return *self;
        }
        let q = (*self / *y).round();
        *self - q * *y
    }
}

#[test]
fn test_round_special_values() {
    use crate::utils;
    use crate::Real128;

    for v in utils::get_special_test_values() {
        let r = Real128::from_f64(v);
        for (res, expected) in [
            (r.trunc(), v.trunc()),
            (r.floor(), v.floor()),
            (r.ceil(), v.ceil()),
            (r.round(), v.round()),
        ] {
            let res = res.as_f64();
            assert_eq!(res.is_nan(), expected.is_nan());
            if !expected.is_nan() {
                assert_eq!(res, expected, "value {}", v);
                assert_eq!(res.is_sign_negative(), expected.is_sign_negative());
            }
        }
    }
}

#[test]
fn test_round_random_values() {
    use crate::utils::Lfsr;
    use crate::Real128;

    let mut lfsr = Lfsr::new();
    for _ in 0..2000 {
        let v = lfsr.get_in_range(-1e6, 1e6);
        // Shift some of the values to have a short fraction.
        let v = if lfsr.get() & 1 == 0 { (v * 4.0).trunc() / 4.0 } else { v };
        let r = Real128::from_f64(v);
        assert_eq!(r.trunc().as_f64(), v.trunc(), "trunc {}", v);
        assert_eq!(r.floor().as_f64(), v.floor(), "floor {}", v);
        assert_eq!(r.ceil().as_f64(), v.ceil(), "ceil {}", v);
        assert_eq!(r.round().as_f64(), v.round(), "round {}", v);
    }
}

#[test]
fn test_round_large_values() {
    use crate::Real256;
    // Values with a fraction in the lowest limb.
    let big = Real256::one(false).ldexp(200);
    let x = big + Real256::from_f64(0.5);
    assert_eq!(x.trunc(), big);
    assert_eq!(x.floor(), big);
    assert_eq!(x.ceil(), big + 1);
    assert_eq!(x.round(), big + 1);
    assert_eq!(x.neg().floor(), (big + 1).neg());
    // Numbers above 2^TOTAL_BITS are integers.
    let huge = Real256::one(false).ldexp(300) + Real256::one(false).ldexp(100);
    assert_eq!(huge.trunc(), huge);
    assert_eq!(huge.round(), huge);
}

#[test]
fn test_round_ties() {
    use crate::Real128;
    let cases = [(0.5, 1.0), (1.5, 2.0), (2.5, 3.0), (-0.5, -1.0), (-2.5, -3.0), (0.49, 0.0)];
    for (v, expected) in cases {
        assert_eq!(Real128::from_f64(v).round().as_f64(), expected);
    }
}

#[test]
fn test_fmod() {
    use crate::Real128;

    fn fmod(a: f64, b: f64) -> f64 {
        Real128::from_f64(a).fmod(&Real128::from_f64(b)).as_f64()
    }

    // The remainder is relative to the nearest multiple.
    assert_eq!(fmod(7.0, 4.0), -1.0);
    assert_eq!(fmod(5.0, 4.0), 1.0);
    assert_eq!(fmod(-7.0, 4.0), 1.0);
    assert_eq!(fmod(6.0, 4.0), -2.0);
    assert_eq!(fmod(1.0, 0.25), 0.0);
    assert_eq!(fmod(10.0, -3.0), 1.0);
    let pi = std::f64::consts::PI;
    assert!((fmod(100.0, pi) - (100.0 - 32.0 * pi)).abs() < 1e-12);

    // Special values.
    assert!(fmod(1.0, 0.0).is_nan());
    assert!(fmod(f64::INFINITY, 2.0).is_nan());
    assert!(fmod(f64::NAN, 2.0).is_nan());
    assert_eq!(fmod(3.0, f64::INFINITY), 3.0);
    assert_eq!(fmod(0.0, 3.0), 0.0);

    // The truncating remainder is the % operator.
    let a = Real128::from_f64(7.0);
    let b = Real128::from_f64(4.0);
    assert_eq!((a % b).as_f64(), 3.0);
}
