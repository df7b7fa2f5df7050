//! This module contains the implementation of the trigonometric functions and
//! of their inverses.

use crate::real::{Category, Real};

impl<const LIMBS: usize> Real<LIMBS> {
    /// Computes the Taylor series sin(x) = x - x^3/3! + x^5/5! - x^7/7! ...
    /// for x in the range [0, pi/4].
    fn sin_taylor(x: &Self) -> Self {
        let mx2 = (*x * *x).neg();
        Self::sum_series(*x, |term, k| *term * mx2 / ((2 * k) * (2 * k + 1)))
    }

    /// Computes the Taylor series cos(x) = 1 - x^2/2! + x^4/4! - x^6/6! ...
    /// for x in the range [0, pi/4].
    fn cos_taylor(x: &Self) -> Self {
        let mx2 = (*x * *x).neg();
        Self::sum_series(Self::one(false), |term, k| {
            *term * mx2 / ((2 * k - 1) * (2 * k))
        })
    }

    /// Reduces |x| modulo 2*pi and folds the result into [0, pi/2]. Returns
    /// the folded value, and whether the reduced angle was negative (sine
    /// changes sign) or past pi/2 (cosine changes sign).
    fn fold_angle(&self) -> (Self, bool, bool) {
        let mut val = self.abs().fmod(&Self::tau());
        let negative = val.is_negative();
        if negative {
            val = val.neg();
        }
        let pi_2 = Self::pi_2();
        let past_pi_2 = val > pi_2;
        if past_pi_2 {
            val = Self::pi() - val;
        }
        debug_assert!(val <= pi_2);
        (val, negative, past_pi_2)
    }

    /// Returns true if the argument has no fractional bits left after the
    /// reduction modulo 2*pi.
    fn too_large_for_reduction(&self) -> bool {
        self.get_exp() >= Self::TOTAL_BITS as i64
    }

    /// Computes the sine of the number (in radians).
    ///
    /// Arguments of 2^TOTAL_BITS or more have no fractional bits left after
    /// the reduction modulo 2*pi, and return NaN.
    pub fn sin(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Zero => return *self,
            Category::Infinity => return Self::nan(self.is_negative()),
            Category::Normal => {}
        }
        if self.too_large_for_reduction() {
            return Self::nan(self.is_negative());
        }

        // sin(-x) = -sin(x) and sin(pi-x) = sin(x).
        let (val, negative, _) = self.fold_angle();
        let res = if val <= Self::pi_4() {
            Self::sin_taylor(&val)
        } else {
            Self::cos_taylor(&(Self::pi_2() - val))
        };
        if negative ^ self.is_negative() {
            res.neg()
        } else {
            res
        }
    }

    /// Computes the cosine of the number (in radians).
    pub fn cos(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Infinity => return Self::nan(false),
            Category::Zero => return Self::one(false),
            Category::Normal => {}
        }
        if self.too_large_for_reduction() {
            return Self::nan(false);
        }

        // cos(-x) = cos(x) and cos(pi-x) = -cos(x).
        let (val, _, past_pi_2) = self.fold_angle();
        let res = if val <= Self::pi_4() {
            Self::cos_taylor(&val)
        } else {
            Self::sin_taylor(&(Self::pi_2() - val))
        };
        if past_pi_2 {
            res.neg()
        } else {
            res
        }
    }

    /// Computes the tangent of the number (in radians).
    pub fn tan(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Zero => return *self,
            Category::Infinity => return Self::nan(self.is_negative()),
            Category::Normal => {}
        }

        // Reduce the argument to [-pi/2, pi/2].
        let y = self.fmod(&Self::pi());

        // Near zero sin/cos is accurate. Near the poles use the cotangent of
        // the distance to the pole.
        if y.abs() <= Self::pi_4() {
            return y.sin() / y.cos();
        }
        let pi_2 = Self::pi_2();
        let y = if y.is_negative() {
            pi_2.neg() - y
        } else {
            pi_2 - y
        };
        y.cos() / y.sin()
    }
}

#[test]
fn test_sin_known_value() {
    use crate::Real256;
    // Verify the results with:
    // from mpmath import mp
    // mp.dps = 1000
    // mp.sin(801./10000)
    let res = Real256::from_f64(801. / 10000.).sin().to_string_with_digits(16);
    assert_eq!(res, "8.001437374006335e-2");
    let res = Real256::from_f64(90210. / 10000.).sin().to_string_with_digits(16);
    assert_eq!(res, "3.928952872542333e-1");
    let res = Real256::from_f64(95051.).sin().to_string_with_digits(16);
    assert_eq!(res, "-8.559198239971503e-1");
}

#[test]
fn test_sin() {
    use crate::utils::{self, near_f64};
    use crate::Real128;

    for i in -100..100 {
        let f0 = i as f64;
        let r0 = f0.sin();
        let r1 = Real128::from_f64(f0).sin().as_f64();
        assert!(near_f64(r0, r1), "sin({})", f0);
    }

    for i in -300..300 {
        let f0 = (i as f64) / 100.;
        let r0 = f0.sin();
        let r1 = Real128::from_f64(f0).sin().as_f64();
        assert!(near_f64(r0, r1), "sin({})", f0);
    }

    // Test non-normal values.
    for v in utils::get_special_test_values() {
        if v.is_normal() {
            continue;
        }
        let r0 = v.sin();
        let r1 = Real128::from_f64(v).sin().as_f64();
        assert_eq!(r0.is_nan(), r1.is_nan());
        if !r0.is_nan() {
            assert_eq!(r0, r1);
        }
    }

    // The reduction has no bits left for very large arguments.
    assert!(Real128::from_f64(1e300).sin().is_nan());
}

#[test]
fn test_cos() {
    use crate::utils::near_f64;
    use crate::Real128;

    for i in -300..300 {
        let f0 = (i as f64) / 100.;
        let r0 = f0.cos();
        let r1 = Real128::from_f64(f0).cos().as_f64();
        assert!(near_f64(r0, r1), "cos({})", f0);
    }
    assert_eq!(Real128::zero(true).cos(), Real128::one(false));
    assert!(Real128::inf(false).cos().is_nan());
    assert!(Real128::nan(false).cos().is_nan());
}

#[test]
fn test_sin_cos_identity() {
    use crate::utils::{near, Lfsr};
    use crate::{Real128, Real256};

    // Each of s*s, c*c and their sum truncates, so the identity holds to a
    // few ulps and not to one.
    let one = Real128::one(false);
    let mut lfsr = Lfsr::new();
    let range = 4. * std::f64::consts::PI;
    for _ in 0..200 {
        let v = lfsr.get_in_range(-range, range);
        let x = Real128::from_f64(v);
        let s = x.sin();
        let c = x.cos();
        assert!(near(&(s * s + c * c), &one, Real128::TOTAL_BITS - 2), "{}", v);
    }

    let one = Real256::one(false);
    for _ in 0..100 {
        let v = lfsr.get_in_range(-range, range);
        let x = Real256::from_f64(v);
        let (s, c) = (x.sin(), x.cos());
        assert!(near(&(s * s + c * c), &one, Real256::TOTAL_BITS - 2), "{}", v);
    }

    // Both sides of the switch between the two series at pi/4.
    let pi_4 = Real256::pi_4();
    for x in [pi_4.next_down(), pi_4, pi_4.next_up(), Real256::pi_2()] {
        let (s, c) = (x.sin(), x.cos());
        assert!(near(&(s * s + c * c), &one, Real256::TOTAL_BITS - 2));
    }
}

#[test]
fn test_tan() {
    use crate::utils::near_f64;
    use crate::Real128;

    for i in -150..150 {
        let f0 = (i as f64) / 50.;
        let r0 = f0.tan();
        let r1 = Real128::from_f64(f0).tan().as_f64();
        assert!(near_f64(r0, r1), "tan({}) {} {}", f0, r0, r1);
    }
    // Close to the pole.
    let x = Real128::pi_2() - Real128::one(false).ldexp(-40);
    assert!(x.tan().as_f64() > 1e12);
    assert!(Real128::inf(false).tan().is_nan());
    assert!(Real128::zero(true).tan().is_negative());
}

impl<const LIMBS: usize> Real<LIMBS> {
    /// Computes asin(x) or acos(x). In [-0.5, 0.5] use the Taylor series of
    /// asin around zero:
    /// asin(x) = x + (2!/(4 * 1!^2 * 3)) x^3 + (4!/(16 * 2!^2 * 5)) x^5 ...
    /// Outside of this range use asin(x) = pi/2 - 2*asin(sqrt((1-x)/2)), which
    /// also keeps the precision of acos near 1.
    fn asin_acos(&self, is_asin: bool) -> Self {
        match self.get_category() {
            Category::NaN => return *self,
            Category::Infinity => return Self::nan(self.is_negative()),
            Category::Zero | Category::Normal => {}
        }
        let one = Self::one(false);
        let mut absx = self.abs();
        if absx > one {
            return Self::nan(self.is_negative());
        }

        let around_zero = absx < Self::from_f64(0.5);
        if !around_zero {
            absx = ((one - absx) / 2).sqrt();
        }

        let x2 = absx * absx;
        let mut ret = absx;
        let mut xn = absx;
        let mut fact1 = Self::from_u64(2);
        let mut fact2 = one;
        for i in 1..Self::TOTAL_BITS as i64 {
            xn *= x2;
            let term = (fact1 * xn / (fact2 * (2 * i + 1))).ldexp(-2 * i);
            let next = ret + term;
            if next == ret {
                break;
            }
            ret = next;
            fact1 *= (2 * i + 1) * (2 * i + 2);
            fact2 *= (i + 1) * (i + 1);
        }

        let negative = self.is_negative();
        if negative {
            ret = ret.neg();
        }

        if around_zero {
            return if is_asin { ret } else { Self::pi_2() - ret };
        }
        let adjust = if negative {
            Self::pi()
        } else {
            Self::zero(false)
        };
        if is_asin {
            Self::pi_2() - adjust - ret.ldexp(1)
        } else {
            adjust + ret.ldexp(1)
        }
    }

    /// Computes the arcsine of the number. The result is in [-pi/2, pi/2].
    pub fn asin(&self) -> Self {
        self.asin_acos(true)
    }

    /// Computes the arccosine of the number. The result is in [0, pi].
    pub fn acos(&self) -> Self {
        self.asin_acos(false)
    }

    /// Computes the arctangent of the number. A different Taylor series is
    /// used depending on the magnitude of x, to help with convergence.
    ///
    /// If |x| < 0.5, evaluate atan(y) near 0:
    ///  atan(y) = y - y^3/3 + y^5/5 - y^7/7 + y^9/9 ...
    ///
    /// If 0.5 <= |x| < 1.5, evaluate atan(1+y) near 0:
    ///  atan(1+y) = pi/4 + y/(1*2^1) - y^2/(2*2^1) + y^3/(3*2^2)
    ///                   - y^5/(5*2^3) + y^6/(6*2^3) - y^7/(7*2^4) ...
    ///
    /// If 1.5 <= |x| < 2, evaluate atan(sqrt(3)+2y) near 0:
    ///  atan(sqrt(3)+2y) = pi/3 + 1/2 y - sqrt(3)/2 y^2/2 + y^3/3
    ///                     - sqrt(3)/2 y^4/4 + 1/2 y^5/5 - 1/2 y^7/7 ...
    ///
    /// If |x| >= 2, evaluate atan(y) near infinity:
    ///  atan(y) = pi/2 - y^-1 + y^-3/3 - y^-5/5 + y^-7/7 ...
    pub fn atan(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Zero => return *self,
            Category::Infinity => return Self::pi_2().with_sign(self.is_negative()),
            Category::Normal => {}
        }
        let absx = self.abs();
        let steps = Self::TOTAL_BITS as i64;

        if absx < Self::from_f64(0.5) {
            let mx2 = (*self * *self).neg();
            let mut ret = *self;
            let mut xn = *self;
            for i in 1..steps {
                xn *= mx2;
                let next = ret + xn / (2 * i + 1);
                if next == ret {
                    break;
                }
                ret = next;
            }
            return ret;
        }

        let mut ret = Self::zero(false);
        if absx < Self::from_f64(1.5) {
            let y = Self::one(false) - absx;
            let my2 = (y * y).neg();
            let mut yn = y;
            for k in 0..steps {
                let i = 2 * k;
                let mut next = ret + (yn / (2 * i + 1)).ldexp(-i - 1);
                yn *= y;
                next += (yn / (2 * i + 2)).ldexp(-i - 1);
                yn *= y;
                next += (yn / (2 * i + 3)).ldexp(-i - 2);
                if next == ret {
                    break;
                }
                ret = next;
                yn *= my2;
            }
            ret = Self::pi_4() - ret;
        } else if absx < Self::from_u64(2) {
            let sqrt3 = Self::sqrt3();
            let half_sqrt3 = sqrt3.ldexp(-1);
            let y = (absx - sqrt3).ldexp(-1);
            let my2 = (y * y).neg();
            let mut yn = y;
            for k in 0..steps {
                let i = 6 * k + 1;
                let mut next = ret + (yn / i).ldexp(-1);
                yn *= y;
                next -= half_sqrt3 * yn / (i + 1);
                yn *= y;
                next += yn / (i + 2);
                yn *= y;
                next -= half_sqrt3 * yn / (i + 3);
                yn *= y;
                next += (yn / (i + 4)).ldexp(-1);
                if next == ret {
                    break;
                }
                ret = next;
                yn *= my2;
            }
            ret = Self::pi_3() + ret;
        } else {
            let y = absx.recip();
            let my2 = (y * y).neg();
            let mut yn = y;
            ret = y;
            for i in 1..steps {
                yn *= my2;
                let next = ret + yn / (2 * i + 1);
                if next == ret {
                    break;
                }
                ret = next;
            }
            ret = Self::pi_2() - ret;
        }

        ret.with_sign(self.is_negative())
    }

    /// Computes the four quadrant arctangent of y/x (self is y). The result is
    /// in [-pi, pi].
    pub fn atan2(&self, x: &Self) -> Self {
        let y = self;
        if y.is_nan() || x.is_nan() {
            return Self::nan(false);
        }
        let sign = y.is_negative();

        if y.is_zero() {
            // atan2(+-0, +x) = +-0 and atan2(+-0, -x) = +-pi.
            return if x.is_negative() {
                Self::pi().with_sign(sign)
            } else {
                *y
            };
        }
        if x.is_zero() {
            return Self::pi_2().with_sign(sign);
        }

        match (y.is_inf(), x.is_inf()) {
            (true, true) => {
                let angle = if x.is_negative() {
                    Self::pi_4() * 3
                } else {
                    Self::pi_4()
                };
                return angle.with_sign(sign);
            }
            (true, false) => return Self::pi_2().with_sign(sign),
            (false, true) => {
                return if x.is_negative() {
                    Self::pi().with_sign(sign)
                } else {
                    Self::zero(sign)
                };
            }
            (false, false) => {}
        }

        let ret = (*y / *x).atan();
        if !x.is_negative() {
            return ret;
        }
        // Move the angle into the second or third quadrant.
        if sign {
            ret - Self::pi()
        } else {
            ret + Self::pi()
        }
    }
}

#[test]
fn test_asin_acos() {
    use crate::utils::near_f64;
    use crate::Real128;

    for i in -100..=100 {
        let v = i as f64 / 100.;
        let x = Real128::from_f64(v);
        assert!(near_f64(x.asin().as_f64(), v.asin()), "asin({})", v);
        assert!(near_f64(x.acos().as_f64(), v.acos()), "acos({})", v);
    }

    assert_eq!(Real128::one(false).asin(), Real128::pi_2());
    assert!(Real128::one(false).acos().is_zero());
    assert_eq!(Real128::one(true).acos(), Real128::pi());
    assert!(Real128::zero(true).asin().is_negative());
    assert!(Real128::from_f64(1.0001).asin().is_nan());
    assert!(Real128::from_f64(-1.0001).acos().is_nan());
    assert!(Real128::inf(false).asin().is_nan());
}

#[test]
fn test_atan() {
    use crate::utils::near_f64;
    use crate::Real128;

    for i in -400..400 {
        let v = i as f64 / 80.;
        let r = Real128::from_f64(v).atan().as_f64();
        assert!(near_f64(r, v.atan()), "atan({}) = {}", v, r);
    }
    for v in [1e-30, 0.4999, 0.5, 1.4999, 1.5, 1.9999, 2.0, 1e10, -1e30] {
        let r = Real128::from_f64(v).atan().as_f64();
        assert!(near_f64(r, v.atan()), "atan({}) = {}", v, r);
    }
    assert_eq!(Real128::inf(true).atan(), Real128::pi_2().neg());
    assert!(Real128::zero(true).atan().is_negative());
    assert!(Real128::nan(false).atan().is_nan());
}

#[test]
fn test_atan2() {
    use crate::utils::near_f64;
    use crate::Real128;

    let values = [-3.0, -1.0, -0.25, 0.5, 1.0, 2.0, 100.0];
    for y in values {
        for x in values {
            let r = Real128::from_f64(y).atan2(&Real128::from_f64(x)).as_f64();
            assert!(near_f64(r, y.atan2(x)), "atan2({}, {})", y, x);
        }
    }

    // Zeros, infinities and the axes.
    let special = [0.0, -0.0, 1.0, -1.0, f64::INFINITY, f64::NEG_INFINITY];
    for y in special {
        for x in special {
            let r = Real128::from_f64(y).atan2(&Real128::from_f64(x)).as_f64();
            let expected = y.atan2(x);
            assert!(near_f64(r, expected), "atan2({}, {})", y, x);
            assert_eq!(r.is_sign_negative(), expected.is_sign_negative());
        }
    }
    assert!(Real128::nan(false).atan2(&Real128::one(false)).is_nan());
}
