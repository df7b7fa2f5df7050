//! This module contains the implementation of the utility functions and of
//! the algebraic functions: sqrt, cbrt, powi and pow.

use crate::real::{Category, Real};

impl<const LIMBS: usize> Real<LIMBS> {
    /// Returns the absolute value of this number.
    pub fn abs(&self) -> Self {
        self.with_sign(false)
    }

    /// Same as `abs`.
    pub fn fabs(&self) -> Self {
        self.abs()
    }

    /// Returns this number with the sign of `sign`.
    pub fn copysign(&self, sign: &Self) -> Self {
        self.with_sign(sign.is_negative())
    }

    /// Returns the greater of self and `other`.
    pub fn max(&self, other: &Self) -> Self {
        if self.is_nan() {
            return *other;
        } else if other.is_nan() {
            return *self;
        } else if self.get_sign() != other.get_sign() {
            // Handle (+-)0.
            return if self.get_sign() { *other } else { *self };
        }
        if self > other {
            *self
        } else {
            *other
        }
    }

    /// Returns the smaller of self and `other`.
    pub fn min(&self, other: &Self) -> Self {
        if self.is_nan() {
            return *other;
        } else if other.is_nan() {
            return *self;
        } else if self.get_sign() != other.get_sign() {
            return if self.get_sign() { *self } else { *other };
        }
        if self > other {
            *other
        } else {
            *self
        }
    }

    /// Restrict this number to the range [lo, hi].
    pub fn clamp(&self, lo: &Self, hi: &Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Convert radians to degrees.
    pub fn degrees(&self) -> Self {
        *self * (Self::frac_1_pi() * 180)
    }

    /// Convert degrees to radians.
    pub fn radians(&self) -> Self {
        *self * (Self::pi() / 180)
    }

    /// Multiply the number by 2^exp, by adjusting the exponent. Results that
    /// leave the exponent range saturate to infinity or flush to zero.
    pub fn ldexp(&self, exp: i64) -> Self {
        if !self.is_normal() {
            return *self;
        }
        Self::from_parts(
            self.is_negative(),
            self.get_exp().saturating_add(exp),
            *self.get_mantissa(),
        )
    }

    /// Split the number into a fraction in [0.5, 1) and a power of two, such
    /// that self = fraction * 2^exp. Zero and non-finite values are returned
    /// unchanged, with an exponent of zero.
    pub fn frexp(&self) -> (Self, i64) {
        if !self.is_normal() {
            return (*self, 0);
        }
        let exp = self.get_exp() + 1;
        (self.ldexp(-exp), exp)
    }

    /// Returns the unit in the last place of this number: 2^(exp - TOTAL_BITS).
    /// The ulp of zero is the smallest positive number.
    pub fn ulp(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Infinity => self.abs(),
            Category::Zero => Self::min_positive(),
            Category::Normal => Self::from_parts(
                false,
                self.get_exp() - Self::TOTAL_BITS as i64,
                [0; LIMBS],
            ),
        }
    }

    /// Add one to the last place of the mantissa.
    fn increment_magnitude(&self) -> Self {
        let mut mantissa = *self.get_mantissa();
        for limb in mantissa.iter_mut().rev() {
            let (val, carry) = limb.overflowing_add(1);
            *limb = val;
            if !carry {
                return Self::from_parts(self.is_negative(), self.get_exp(), mantissa);
            }
        }
        // The mantissa wrapped around to 1.000..0.
        Self::from_parts(self.is_negative(), self.get_exp() + 1, mantissa)
    }

    /// Subtract one from the last place of the mantissa.
    fn decrement_magnitude(&self) -> Self {
        let mut mantissa = *self.get_mantissa();
        for limb in mantissa.iter_mut().rev() {
            let (val, borrow) = limb.overflowing_sub(1);
            *limb = val;
            if !borrow {
                return Self::from_parts(self.is_negative(), self.get_exp(), mantissa);
            }
        }
        // The mantissa wrapped around to 1.111..1 of the previous binade.
        Self::from_parts(self.is_negative(), self.get_exp() - 1, mantissa)
    }

    /// Returns the smallest number that is greater than self.
    pub fn next_up(&self) -> Self {
        match self.get_category() {
            Category::NaN => *self,
            Category::Infinity => {
                if self.is_negative() {
                    Self::max_value().neg()
                } else {
                    *self
                }
            }
            Category::Zero => Self::min_positive(),
            Category::Normal => {
                if self.is_negative() {
                    self.decrement_magnitude()
                } else {
                    self.increment_magnitude()
                }
            }
        }
    }

    /// Returns the largest number that is smaller than self.
    pub fn next_down(&self) -> Self {
        self.neg().next_up().neg()
    }

    /// Returns the next number after self in the direction of `target`.
    pub fn next_after(&self, target: &Self) -> Self {
        if self.is_nan() || target.is_nan() {
            return Self::nan(false);
        }
        if self == target {
            return *target;
        }
        if self < target {
            self.next_up()
        } else {
            self.next_down()
        }
    }

    /// Returns the fractional part and the integral part of the number. Both
    /// parts carry the sign of the number.
    pub fn modf(&self) -> (Self, Self) {
        let absx = self.abs();
        let integral = absx.floor();
        (
            (absx - integral).copysign(self),
            integral.copysign(self),
        )
    }

    /// Returns `self - floor(self)`, which is in [0, 1).
    pub fn fract(&self) -> Self {
        *self - self.floor()
    }

    /// Returns true if the number is an integer.
    pub fn is_integer(&self) -> bool {
        match self.get_category() {
            Category::Zero => true,
            Category::NaN | Category::Infinity => false,
            Category::Normal => self.trunc() == *self,
        }
    }

    /// Returns true if the number is an odd integer.
    pub fn is_odd_integer(&self) -> bool {
        if !self.is_normal() || !self.is_integer() {
            return false;
        }
        // Inspect the bit of the unit position.
        match self.get_exp() {
            0 => true,
            exp if exp < 0 || exp as usize > Self::TOTAL_BITS => false,
            exp => {
                let bit = exp as usize - 1;
                let limb = self.get_mantissa()[bit / 32];
                (limb >> (31 - bit % 32)) & 1 == 1
            }
        }
    }
}

#[cfg(test)]
fn check_unary_op<F, G>(op: F, native: G, values: &[f64])
where
    F: Fn(&crate::Real128) -> crate::Real128,
    G: Fn(f64) -> f64,
{
    for &v in values {
        let expected = native(v);
        let res = op(&crate::Real128::from_f64(v)).as_f64();
        assert_eq!(res.is_nan(), expected.is_nan(), "value {}", v);
        if !expected.is_nan() {
            assert_eq!(res, expected, "value {}", v);
        }
    }
}

#[test]
fn test_min_max() {
    use crate::utils;
    use crate::Real128;

    fn check(v0: f64, v1: f64) {
        // Min.
        let correct = v0.min(v1);
        let test = Real128::from_f64(v0).min(&Real128::from_f64(v1)).as_f64();
        assert_eq!(test.is_nan(), correct.is_nan());
        if !correct.is_nan() {
            assert_eq!(correct, test);
        }
        // Max.
        let correct = v0.max(v1);
        let test = Real128::from_f64(v0).max(&Real128::from_f64(v1)).as_f64();
        assert_eq!(test.is_nan(), correct.is_nan());
        if !correct.is_nan() {
            assert_eq!(correct, test);
        }
    }

    // Test a bunch of special values (Inf, Epsilon, Nan, (+-)Zeros).
    for v0 in utils::get_special_test_values() {
        for v1 in utils::get_special_test_values() {
            check(v0, v1);
        }
    }

    let mut lfsr = utils::Lfsr::new();
    for _ in 0..100 {
        let v0 = f64::from_bits(lfsr.get64());
        let v1 = f64::from_bits(lfsr.get64());
        if v0.is_normal() && v1.is_normal() {
            check(v0, v1);
        }
    }
}

#[test]
fn test_clamp_copysign() {
    use crate::Real256;
    let lo = Real256::from(-2);
    let hi = Real256::from(3);
    assert_eq!(Real256::from(5).clamp(&lo, &hi), hi);
    assert_eq!(Real256::from(-5).clamp(&lo, &hi), lo);
    assert_eq!(Real256::from(1).clamp(&lo, &hi).as_f64(), 1.0);

    let x = Real256::from(1.5);
    assert!(x.copysign(&Real256::zero(true)).is_negative());
    assert!(!x.neg().copysign(&hi).is_negative());
    assert_eq!(x.neg().abs(), x);
    assert_eq!(x.neg().fabs(), x);
}

#[test]
fn test_abs() {
    use crate::utils;
    check_unary_op(|x| x.abs(), f64::abs, &utils::get_special_test_values());
}

#[test]
fn test_ldexp_frexp() {
    use crate::Real128;
    let x = Real128::from_f64(12.0);
    assert_eq!(x.ldexp(1).as_f64(), 24.0);
    assert_eq!(x.ldexp(-3).as_f64(), 1.5);
    let (frac, exp) = x.frexp();
    assert_eq!(frac.as_f64(), 0.75);
    assert_eq!(exp, 4);
    assert_eq!(frac.ldexp(exp), x);

    let (frac, exp) = Real128::from_f64(-0.1).frexp();
    assert_eq!(frac.as_f64(), -0.8);
    assert_eq!(exp, -3);

    // Zero and non-finite values don't change.
    assert_eq!(Real128::zero(false).frexp().1, 0);
    assert!(Real128::inf(true).ldexp(-4).is_inf());
    assert!(Real128::zero(true).ldexp(4).is_negative());

    // Saturation at both ends of the exponent range.
    assert!(Real128::max_value().ldexp(1).is_inf());
    assert!(Real128::min_positive().ldexp(-1).is_zero());
    assert!(Real128::one(true).ldexp(1 << 40).is_negative());

    // Shifts at the limits of i64 saturate instead of wrapping.
    let two = Real128::from(2);
    assert_eq!(two.ldexp(i64::MAX), Real128::inf(false));
    assert_eq!(two.neg().ldexp(i64::MAX), Real128::inf(true));
    let tiny = two.ldexp(i64::MIN);
    assert!(tiny.is_zero() && !tiny.is_negative());
    assert!(Real128::max_value().ldexp(i64::MIN).is_zero());
    assert!(Real128::min_positive().ldexp(i64::MAX).is_inf());
}

#[test]
fn test_ulp_next() {
    use crate::Real128;
    let one = Real128::one(false);
    let bits = Real128::TOTAL_BITS as i64;
    assert_eq!(one.ulp(), one.ldexp(-bits));
    assert_eq!(Real128::from(3).ulp(), one.ldexp(1 - bits));
    assert_eq!(Real128::from(-3).ulp(), one.ldexp(1 - bits));

    // Stepping around one crosses a binade boundary on the way down.
    let up = one.next_up();
    assert_eq!(up - one, one.ulp());
    let down = one.next_down();
    assert_eq!(one - down, one.ulp().ldexp(-1));
    assert_eq!(down.next_up(), one);
    assert_eq!(up.next_down(), one);
    assert!(down < one && one < up);

    // Negative numbers step the other way.
    let m = one.neg();
    assert!(m.next_up() > m);
    assert!(m.next_down() < m);
    assert_eq!(m.next_up().next_down(), m);

    // Special values.
    assert_eq!(Real128::zero(false).next_up(), Real128::min_positive());
    assert_eq!(Real128::zero(false).next_down(), Real128::min_positive().neg());
    assert_eq!(Real128::max_value().next_up(), Real128::inf(false));
    assert_eq!(Real128::inf(false).next_down(), Real128::max_value());
    assert_eq!(Real128::min_positive().next_down(), Real128::zero(false));
    assert!(Real128::nan(false).next_up().is_nan());
    assert!(Real128::nan(false).ulp().is_nan());
}

#[test]
fn test_next_after() {
    use crate::Real256;
    let a = Real256::from(2);
    let b = Real256::from(3);
    assert_eq!(a.next_after(&b), a.next_up());
    assert_eq!(b.next_after(&a), b.next_down());
    assert_eq!(a.next_after(&a), a);
    assert!(a.next_after(&Real256::nan(false)).is_nan());
    // The step is a single ulp of the number.
    assert_eq!(a.next_after(&b) - a, a.ulp());
}

#[test]
fn test_modf_fract() {
    use crate::Real128;
    let (frac, int) = Real128::from_f64(3.75).modf();
    assert_eq!(frac.as_f64(), 0.75);
    assert_eq!(int.as_f64(), 3.0);
    let (frac, int) = Real128::from_f64(-3.75).modf();
    assert_eq!(frac.as_f64(), -0.75);
    assert_eq!(int.as_f64(), -3.0);

    assert_eq!(Real128::from_f64(2.25).fract().as_f64(), 0.25);
    assert_eq!(Real128::from_f64(-2.25).fract().as_f64(), 0.75);
    assert!(Real128::from_f64(7.0).fract().is_zero());
}

#[test]
fn test_integer_predicates() {
    use crate::Real128;
    assert!(Real128::from(7).is_integer());
    assert!(Real128::from(7).is_odd_integer());
    assert!(!Real128::from(8).is_odd_integer());
    assert!(Real128::from(-1).is_odd_integer());
    assert!(!Real128::from(2.5).is_integer());
    assert!(!Real128::from(0.5).is_odd_integer());
    assert!(Real128::zero(false).is_integer());
    assert!(!Real128::zero(false).is_odd_integer());
    assert!(!Real128::inf(false).is_integer());
    // Huge numbers are even integers.
    let huge = Real128::one(false).ldexp(500);
    assert!(huge.is_integer());
    assert!(!huge.is_odd_integer());
    // A large odd integer, with the unit bit in the last limb.
    let odd = Real128::one(false).ldexp(Real128::TOTAL_BITS as i64) - 1;
    assert!(odd.is_odd_integer());
}

#[test]
fn test_degrees_radians() {
    use crate::Real256;
    let pi = Real256::pi();
    assert_eq!(pi.degrees().as_f64(), 180.0);
    assert_eq!(Real256::from(90).radians().as_f64(), std::f64::consts::FRAC_PI_2);
    assert_eq!(Real256::from(45).radians().degrees().as_f64(), 45.0);
}

impl<const LIMBS: usize> Real<LIMBS> {
    /// Calculates the square root of the number.
    pub fn sqrt(&self) -> Self {
        match self.get_category() {
            // (+/-) zero and NaN pass through.
            Category::Zero | Category::NaN => return *self,
            _ if self.is_negative() => return Self::nan(true),
            Category::Infinity => return *self,
            Category::Normal => {}
        }

        // Use the native float to approximate 1/sqrt(x). Split the exponent
        // into an even part and a parity bit that moves into the seed, so the
        // seed is in the range [1, 4).
        let exp = self.get_exp();
        let parity = exp.rem_euclid(2);
        let half = exp.div_euclid(2);
        let seed = f32::from_bits(
            ((127 + parity as u32) << 23) | (self.get_mantissa()[0] >> 9),
        );
        let v = (1.0 / seed.sqrt()).to_bits();
        let mut mantissa = [0; LIMBS];
        mantissa[0] = v << 9;
        let mut r = Self::from_parts(false, -half + ((v >> 23) as i64 - 127), mantissa);

        // Newton-Raphson for the inverse square root: r = r * (3 - x*r*r) / 2.
        let three = Self::from_u64(3);
        for _ in 0..Self::newton_steps() {
            r = (r * (three - *self * r * r)).ldexp(-1);
        }

        Self::polish(*self * r, self, |c| c * c)
    }

    /// Calculates the cube root of the number.
    pub fn cbrt(&self) -> Self {
        if !self.is_normal() {
            return *self;
        }
        let x = self.abs();

        // Seed the iteration with the native cube root of a float in the range
        // [1, 8), built from the top mantissa bits and the exponent modulo 3.
        let exp = x.get_exp();
        let rem = exp.rem_euclid(3);
        let third = exp.div_euclid(3);
        let seed = f32::from_bits(
            ((127 + rem as u32) << 23) | (x.get_mantissa()[0] >> 9),
        );
        let v = seed.cbrt().to_bits();
        let mut mantissa = [0; LIMBS];
        mantissa[0] = v << 9;
        let mut r = Self::from_parts(false, third + ((v >> 23) as i64 - 127), mantissa);

        // Newton-Raphson for r^3 = x: r = (x / r^2 + 2r) / 3.
        for _ in 0..Self::newton_steps() {
            r = (x / (r * r) + r + r) / 3;
        }

        let r = Self::polish(r, &x, |c| c * c * c);
        r.with_sign(self.is_negative())
    }

    /// Return this number raised to the power of `n`, by repeated squaring.
    /// Negative powers are computed from the reciprocal.
    pub fn powi(&self, n: i64) -> Self {
        let mut val = if n < 0 { self.recip() } else { *self };
        let mut n = n.unsigned_abs();
        let mut elem = Self::one(false);
        // Each bit of 'n' selects one of the squares x, x^2, x^4, x^8 ...
        while n > 0 {
            if n & 1 == 1 {
                elem *= val;
            }
            val = val * val;
            n >>= 1;
        }
        elem
    }

    /// Return this number raised to the power of `y`.
    ///
    /// Integer powers are computed by repeated squaring, and keep the sign of
    /// a negative base for odd powers. Other powers are computed as
    /// e^(y * log(x)), and a negative base with a non-integer power is NaN.
    pub fn pow(&self, y: &Self) -> Self {
        if y.is_zero() {
            return Self::one(false);
        }
        if self.is_nan() || y.is_nan() {
            return Self::nan(false);
        }

        // Integers below 2^53 convert to i64 exactly.
        if y.is_integer() && y.get_exp() < 53 {
            return self.powi(y.as_i64());
        }

        if self.is_zero() {
            return if y.is_negative() {
                Self::inf(false)
            } else {
                Self::zero(false)
            };
        }

        if self.is_negative() {
            if !y.is_integer() {
                return Self::nan(false);
            }
            let res = self.neg().pow(y);
            return if y.is_odd_integer() { res.neg() } else { res };
        }

        (*y * self.log()).exp()
    }

    /// Franke's bivariate test function, used for testing interpolation
    /// methods.
    pub fn franke(x: &Self, y: &Self) -> Self {
        let nx = *x * 9;
        let ny = *y * 9;

        let a = nx - 2;
        let b = ny - 2;
        let c = nx + 1;
        let d = ny + 1;
        let e = nx - 7;
        let f = ny - 3;
        let g = nx - 4;
        let h = ny - 7;

        let quarter = Self::from_f64(0.25);
        let t0 = (-(a * a + b * b) * quarter).exp() * 0.75;
        let t1 = (-(c * c / 49 + d * d / 10)).exp() * 0.75;
        let t2 = (-(e * e + f * f) * quarter).exp() / 2;
        let t3 = (-(g * g + h * h)).exp() / 5;
        t0 + t1 + t2 - t3
    }

    /// The peaks function of Matlab:
    /// 3(1-x)^2 e^(-x^2-(y+1)^2) - 10(x/5-x^3-y^5) e^(-x^2-y^2) - e^(-(x+1)^2-y^2)/3
    pub fn peaks(x: &Self, y: &Self) -> Self {
        let one = Self::one(false);
        let x2 = *x * *x;
        let y2 = *y * *y;
        let first = (x2 - *x - *x + one) * 3 * (-x2 - y2 - *y - *y - one).exp();
        let second = (*x / 5 - x2 * *x - y2 * y2 * *y) * 10 * (-x2 - y2).exp();
        let third = (-x2 - *x - *x - one - y2).exp() / 3;
        first - second - third
    }
}

#[test]
fn test_sqrt() {
    use crate::utils;

    // Try a few perfect squares.
    for i in 0..256 {
        let v = crate::Real128::from_u64(i * i);
        assert_eq!(v.sqrt().as_f64(), (i) as f64);
    }

    // Test the category and value of the different special values (inf, zero,
    // correct sign, etc).
    for v_f64 in utils::get_special_test_values() {
        let vf = crate::Real128::from_f64(v_f64);
        assert_eq!(vf.sqrt().is_inf(), v_f64.sqrt().is_infinite());
        assert_eq!(vf.sqrt().is_nan(), v_f64.sqrt().is_nan());
        if !v_f64.sqrt().is_nan() {
            assert_eq!(vf.sqrt().is_negative(), v_f64.sqrt().is_sign_negative());
        }
    }

    // Test precomputed values.
    fn check(inp: f64, res: f64) {
        assert_eq!(crate::Real128::from_f64(inp).sqrt().as_f64(), res);
    }
    check(2.0, 1.4142135623730951);
    check(1.5, 1.224744871391589);
    check(2.3, 1.51657508881031);
    check(6.7, 2.588435821108957);
    check(7.9, 2.8106938645110393);
    check(11.45, 3.383784863137726);
    check(1049.3, 32.39290045673589);
    check(90210.7, 300.35096137685326);
    check(199120056003.73413, 446228.70369770494);
    check(0.6666666666666666, 0.816496580927726);
    check(0.4347826086956522, 0.6593804733957871);
    check(0.14925373134328357, 0.3863337046431279);
    check(0.12658227848101264, 0.35578403348241);
    check(0.08733624454148473, 0.29552706228277087);
    check(0.0009530162965786716, 0.030870962028719993);
    check(1.1085159520988087e-5, 0.00332943831914455);
    check(5.0120298432056786e-8, 0.0002238756316173263);
}

#[test]
fn test_sqrt_of_square() {
    use crate::utils::Lfsr;
    use crate::{Real128, Real512};

    let mut lfsr = Lfsr::new();
    for _ in 0..300 {
        let v = f64::from_bits(lfsr.get64());
        if !v.is_normal() {
            continue;
        }
        let a = Real128::from_f64(v);
        assert_eq!((a * a).sqrt(), a.abs());
    }

    // Values with a full mantissa.
    let third = Real512::one(false) / 3;
    assert_eq!((third * third).sqrt(), third);
    let x = Real512::from(2).sqrt();
    assert_eq!((x * x).sqrt(), x);
}

#[test]
fn test_cbrt() {
    use crate::Real256;
    for i in -20..20 {
        let v = Real256::from(i * i * i);
        assert_eq!(v.cbrt().as_f64(), i as f64);
    }
    for v in [2.0, 0.001, 1e-100, 12345.678, -7.5, 1e300] {
        let res = Real256::from_f64(v).cbrt().as_f64();
        let expected = f64::cbrt(v);
        assert!((res - expected).abs() <= expected.abs() * f64::EPSILON);
    }
    assert!(Real256::zero(true).cbrt().is_negative());
    assert!(Real256::inf(true).cbrt().is_inf());
    assert!(Real256::nan(false).cbrt().is_nan());
}

#[test]
fn test_powi() {
    use crate::Real128;
    assert_eq!(Real128::from_f64(2.).powi(0).as_f64(), 1.);
    assert_eq!(Real128::from_f64(2.).powi(1).as_f64(), 2.);
    assert_eq!(Real128::from_f64(2.).powi(3).as_f64(), 8.);
    assert_eq!(Real128::from_f64(2.).powi(5).as_f64(), 32.);
    assert_eq!(Real128::from_f64(2.).powi(10).as_f64(), 1024.);
    assert_eq!(Real128::from_f64(2.).powi(-2).as_f64(), 0.25);
    assert_eq!(Real128::from_f64(-3.).powi(3).as_f64(), -27.);
    assert_eq!(Real128::from_f64(-3.).powi(4).as_f64(), 81.);
    assert_eq!(Real128::from_f64(0.3).powi(3).as_f64(), 0.026999999999999996);
    assert!(Real128::zero(false).powi(-1).is_inf());
}

#[test]
fn test_pow() {
    use crate::Real256;

    fn my_pow(a: f64, b: f64) -> f64 {
        Real256::from_f64(a).pow(&Real256::from_f64(b)).as_f64()
    }

    fn check(a: f64, b: f64) {
        let expected = a.powf(b);
        let res = my_pow(a, b);
        if expected == 0.0 || !expected.is_finite() {
            assert_eq!(res, expected, "{}^{}", a, b);
            return;
        }
        assert!(
            (res - expected).abs() <= expected.abs() * 2. * f64::EPSILON,
            "{}^{}: {} != {}",
            a,
            b,
            res,
            expected
        );
    }

    check(1.24, 1.2);
    check(0.94, 13.);
    check(0.11, -8.);
    check(40.0, 3.1);
    check(2.0, 0.5);
    check(10.0, -2.5);
    check(1e10, 0.1);

    for i in 0..30 {
        for j in -10..10 {
            check(i as f64, j as f64);
        }
    }
    // Positive integer powers are exact.
    assert_eq!(my_pow(29.0, 9.0), 29f64.powi(9));
    assert_eq!(my_pow(3.0, 33.0), 3f64.powi(33));

    // Negative bases.
    assert_eq!(my_pow(-2.0, 3.0), -8.0);
    assert_eq!(my_pow(-2.0, 4.0), 16.0);
    assert_eq!(my_pow(-2.0, -1.0), -0.5);
    assert!(my_pow(-2.0, 0.5).is_nan());
    assert_eq!(my_pow(-2.0, 1e20), f64::INFINITY);

    // Zero and special values.
    assert_eq!(my_pow(0.0, 2.5), 0.0);
    assert_eq!(my_pow(0.0, -2.5), f64::INFINITY);
    assert_eq!(my_pow(f64::NAN, 0.0), 1.0);
    assert!(my_pow(f64::NAN, 2.0).is_nan());
    assert_eq!(my_pow(f64::INFINITY, 0.5), f64::INFINITY);
    assert_eq!(my_pow(f64::INFINITY, -0.5), 0.0);
}

#[test]
fn test_test_surfaces() {
    use crate::Real256;

    fn franke(x: f64, y: f64) -> f64 {
        let e = |v: f64| v.exp();
        let (x, y) = (9. * x, 9. * y);
        0.75 * e(-((x - 2.) * (x - 2.) + (y - 2.) * (y - 2.)) / 4.)
            + 0.75 * e(-((x + 1.) * (x + 1.) / 49. + (y + 1.) * (y + 1.) / 10.))
            + 0.5 * e(-((x - 7.) * (x - 7.) + (y - 3.) * (y - 3.)) / 4.)
            - 0.2 * e(-((x - 4.) * (x - 4.) + (y - 7.) * (y - 7.)))
    }

    fn peaks(x: f64, y: f64) -> f64 {
        3. * (1. - x).powi(2) * (-x * x - (y + 1.).powi(2)).exp()
            - 10. * (x / 5. - x.powi(3) - y.powi(5)) * (-x * x - y * y).exp()
            - (-(x + 1.).powi(2) - y * y).exp() / 3.
    }

    for (x, y) in [(0.0, 0.0), (0.25, 0.75), (0.5, 0.5), (1.0, 0.1), (-1.5, 2.0)] {
        let rx = Real256::from_f64(x);
        let ry = Real256::from_f64(y);
        let f = Real256::franke(&rx, &ry).as_f64();
        assert!((f - franke(x, y)).abs() < 1e-12, "franke({}, {})", x, y);
        let p = Real256::peaks(&rx, &ry).as_f64();
        assert!((p - peaks(x, y)).abs() < 1e-12, "peaks({}, {})", x, y);
    }
}
