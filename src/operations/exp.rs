//! This module contains the implementation of log- and exp-related methods,
//! and of the hyperbolic functions.

use crate::real::{Category, Real};

impl<const LIMBS: usize> Real<LIMBS> {
    /// Computes n!. The odd parts of the factors are multiplied in native
    /// integers for as long as they fit, and the powers of two are collected
    /// in the exponent.
    pub(crate) fn fast_fact(n: u64) -> Self {
        let mut ret = Self::one(false);
        let mut multiplier: u64 = 1;
        let mut exponent: i64 = 0;
        for i in 2..=n {
            let zeros = i.trailing_zeros();
            exponent += zeros as i64;
            let odd = i >> zeros;
            match multiplier.checked_mul(odd) {
                Some(m) => multiplier = m,
                None => {
                    ret = ret * Self::from_u64(multiplier);
                    multiplier = odd;
                }
            }
        }
        (ret * Self::from_u64(multiplier)).ldexp(exponent)
    }

    /// Sums a power series that starts with `first`, where `next(term, k)`
    /// computes term k from term k-1. Terms are generated until they drop
    /// below the last bit of `first`, and are then added from the smallest
    /// up, so that the truncation of each partial sum stays below the bits
    /// that the larger terms contribute.
    pub(crate) fn sum_series<F>(first: Self, mut next: F) -> Self
    where
        F: FnMut(&Self, i64) -> Self,
    {
        if first.is_zero() {
            return first;
        }
        let limit = first.abs().ulp().ldexp(-4);
        let mut terms = vec![first];
        let mut term = first;
        for k in 1..Self::TOTAL_BITS as i64 {
            term = next(&term, k);
            if term.abs() < limit {
                break;
            }
            terms.push(term);
        }
        terms
            .iter()
            .rev()
            .fold(Self::zero(false), |sum, term| sum + *term)
    }

    /// Computes log(x) for x in the range [0.5, 2]. With the substitutions
    /// y = sqrt(x) and z = (y - 1)/(y + 1):
    /// log(x) = 2 log(y) = 4 z (1 + z^2/3 + z^4/5 + z^6/7 ...)
    pub(crate) fn fast_log(x: &Self) -> Self {
        let one = Self::one(false);
        let y = x.sqrt();
        let z = (y - one) / (y + one);
        let z2 = z * z;
        let mut zn = one;
        let sum = Self::sum_series(one, |_, k| {
            zn *= z2;
            zn / (2 * k + 1)
        });
        (z * sum).ldexp(2)
    }

    /// Computes the Taylor series of e^x - y, for x in the range [-1, 1]. The
    /// value y is either 0 or 1, and drops the leading term of the series.
    pub(crate) fn fast_exp_sub(x: &Self, y: &Self) -> Self {
        // e^x = 1 + x + x^2/2! + ..., and e^x - 1 = x + x^2/2! + ...
        let (first, offset) = if y.is_zero() {
            (Self::one(false), 0)
        } else {
            (*x, 1)
        };
        Self::sum_series(first, |term, k| *term * *x / (k + offset))
    }

    /// Computes the natural logarithm of the number.
    pub fn log(&self) -> Self {
        match self.get_category() {
            Category::NaN => return *self,
            Category::Zero => return Self::inf(true),
            _ if self.is_negative() => return Self::nan(true),
            Category::Infinity => return *self,
            Category::Normal => {}
        }

        // Split x = 2^e * m, and fold m into [sqrt(1/2), sqrt(2)), so that the
        // result doesn't cancel when x is just below a power of two.
        let (m, e) = self.split_for_log();
        Self::from_i64(e) * Self::ln2() + Self::fast_log(&m)
    }

    /// Returns m and e, where x = m * 2^e, and m is in [sqrt(1/2), sqrt(2)).
    fn split_for_log(&self) -> (Self, i64) {
        let mut e = self.get_exp();
        let mut m = Self::from_parts(false, 0, *self.get_mantissa());
        if m > Self::sqrt2() {
            m = m.ldexp(-1);
            e += 1;
        }
        (m, e)
    }

    /// Computes the base-2 logarithm of the number.
    pub fn log2(&self) -> Self {
        if !self.is_normal() || self.is_negative() {
            return self.log();
        }
        let (m, e) = self.split_for_log();
        Self::from_i64(e) + Self::fast_log(&m) * Self::log2e()
    }

    /// Computes the base-10 logarithm of the number.
    pub fn log10(&self) -> Self {
        self.log() * Self::log10e()
    }

    /// Returns the result of exponentiation when the argument is out of the
    /// range of the computation: zero, infinity, NaN or a number so large that
    /// the result saturates.
    fn exp_special_case(&self) -> Option<Self> {
        match self.get_category() {
            Category::NaN => Some(*self),
            Category::Zero => Some(Self::one(false)),
            Category::Infinity | Category::Normal if self.get_exp() > 40 => {
                if self.is_negative() {
                    Some(Self::zero(false))
                } else {
                    Some(Self::inf(false))
                }
            }
            _ => None,
        }
    }

    /// Computes the exponential function `e^self`.
    pub fn exp(&self) -> Self {
        if let Some(val) = self.exp_special_case() {
            return val;
        }
        // Find an integer e0 close to x/log(2). Then exp(x) = 2^e0 * exp(x0),
        // where x0 = x - e0*log(2) is in [-log(2)/2, log(2)/2].
        let ln2 = Self::ln2();
        let e0 = (*self / ln2).round();
        let x0 = *self - e0 * ln2;
        Self::fast_exp_sub(&x0, &Self::zero(false)).ldexp(e0.as_i64())
    }

    /// Computes `2^self`.
    pub fn exp2(&self) -> Self {
        if let Some(val) = self.exp_special_case() {
            return val;
        }
        let e0 = self.round();
        let x0 = (*self - e0) * Self::ln2();
        Self::fast_exp_sub(&x0, &Self::zero(false)).ldexp(e0.as_i64())
    }

    /// Computes `e^self - 1`, without losing precision near zero.
    pub fn exp_m1(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Zero => *self,
            Category::Infinity if self.is_negative() => Self::one(true),
            Category::Infinity => *self,
            Category::Normal => {
                if self.abs() < Self::from_f64(0.5) {
                    Self::fast_exp_sub(self, &Self::one(false))
                } else {
                    self.exp() - 1
                }
            }
        }
    }

    /// Computes the hyperbolic sine of the number.
    pub fn sinh(&self) -> Self {
        if !self.is_normal() {
            return *self;
        }
        // Near zero (e^x - 1) - (e^-x - 1) keeps the low bits that
        // e^x - e^-x would cancel.
        let (x1, x2) = if self.abs() < Self::from_f64(0.5) {
            (self.exp_m1(), self.neg().exp_m1())
        } else {
            (self.exp(), self.neg().exp())
        };
        (x1 - x2) / 2
    }

    /// Computes the hyperbolic cosine of the number.
    pub fn cosh(&self) -> Self {
        match self.get_category() {
            Category::NaN => *self,
            Category::Infinity => self.abs(),
            Category::Zero => Self::one(false),
            Category::Normal => (self.exp() + self.neg().exp()) / 2,
        }
    }

    /// Computes the hyperbolic tangent of the number. The result saturates to
    /// +-1 for large inputs.
    pub fn tanh(&self) -> Self {
        match self.get_category() {
            Category::NaN | Category::Zero => return *self,
            Category::Infinity => return Self::one(self.is_negative()),
            Category::Normal => {}
        }
        let ret = if self.abs() < Self::from_f64(0.5) {
            let x1 = self.exp_m1();
            let x2 = self.neg().exp_m1();
            (x1 - x2) / (x1 + x2 + 2)
        } else {
            // tanh(|x|) = (1 - e^(-2|x|)) / (1 + e^(-2|x|)), which can't
            // overflow.
            let t = self.abs().ldexp(1).neg().exp();
            let one = Self::one(false);
            (one - t) / (one + t)
        };
        ret.with_sign(self.is_negative())
    }
}

#[test]
fn test_fast_fact() {
    use crate::Real256;
    let mut expected: u64 = 1;
    for i in 1..=20 {
        expected *= i;
        assert_eq!(Real256::fast_fact(i).as_u64(), expected);
    }
    assert_eq!(Real256::fast_fact(0), Real256::one(false));
    // 30! is exact in 256 bits.
    let mut fact = Real256::one(false);
    for i in 2..=30i64 {
        fact *= i;
    }
    assert_eq!(Real256::fast_fact(30), fact);
}

#[test]
fn test_log() {
    use crate::utils::near_f64;
    use crate::Real128;

    let x = Real128::from_f64(0.1).log();
    assert!(near_f64(x.as_f64(), -2.3025850929940455));

    for x in [
        0.1, 0.5, 0.999, 1.001, 2.3, 4.5, 9.8, 11.2, 15.2, 91.2, 102.2, 192.4,
        1024.2, 90210.2, 1e-200, 1e200,
    ] {
        let lhs = Real128::from_f64(x).log().as_f64();
        assert!(near_f64(lhs, x.ln()), "log({}) = {}", x, lhs);
    }

    assert!(Real128::one(false).log().is_zero());
    assert_eq!(Real128::zero(false).log(), Real128::inf(true));
    assert_eq!(Real128::zero(true).log(), Real128::inf(true));
    assert!(Real128::from(-2).log().is_nan());
    assert!(Real128::inf(true).log().is_nan());
    assert_eq!(Real128::inf(false).log(), Real128::inf(false));
    assert!(Real128::nan(false).log().is_nan());
}

#[test]
fn test_log2_log10() {
    use crate::utils::near_f64;
    use crate::Real256;

    // Powers of two and ten are exact after the conversion to double.
    for i in -40..40 {
        let x = Real256::one(false).ldexp(i);
        assert_eq!(x.log2().as_f64(), i as f64);
    }
    for i in -20..20 {
        let x = Real256::from(10).powi(i);
        assert_eq!(x.log10().as_f64(), i as f64);
    }
    for x in [0.3, 3.0, 17.5, 1e-3, 123456.789] {
        assert!(near_f64(Real256::from_f64(x).log2().as_f64(), x.log2()));
        assert!(near_f64(Real256::from_f64(x).log10().as_f64(), x.log10()));
    }
    assert!(Real256::from(-1).log2().is_nan());
    assert!(Real256::zero(false).log10().is_inf());
}

#[test]
fn test_exp() {
    use crate::utils::near_f64;
    use crate::Real128;

    assert!(near_f64(Real128::from_f64(2.51).exp().as_f64(), 12.30493006051041));

    for x in [
        0.000003, 0.001, 0.12, 0.13, 0.5, 1.2, 2.3, 4.5, 9.8, 5.0, 11.2, 15.2,
        25.0, 34.001, 54., 89.1, 91.2, 102.2, 150., 192.4, 212., 256., 102.3,
        -0.5, -3.7, -100.25, -700.5,
    ] {
        let lhs = Real128::from_f64(x).exp().as_f64();
        assert!(near_f64(lhs, x.exp()), "exp({}) = {}", x, lhs);
    }

    assert_eq!(Real128::zero(true).exp(), Real128::one(false));
    assert_eq!(Real128::inf(false).exp(), Real128::inf(false));
    assert!(Real128::inf(true).exp().is_zero());
    assert!(Real128::nan(false).exp().is_nan());
    // Results beyond the double range are still finite.
    let big = Real128::from(100_000).exp();
    assert!(big.is_normal());
    assert_eq!(big.get_exp(), 144269);
    assert!(Real128::one(false).ldexp(50).exp().is_inf());
    assert!(Real128::one(true).ldexp(50).exp().is_zero());
}

#[test]
fn test_exp2() {
    use crate::utils::near_f64;
    use crate::Real256;

    for i in -50..50 {
        assert_eq!(Real256::from(i).exp2(), Real256::one(false).ldexp(i as i64));
    }
    for x in [0.5, -0.5, 3.3, -7.9, 100.01] {
        assert!(near_f64(Real256::from_f64(x).exp2().as_f64(), x.exp2()));
    }
    assert!(Real256::inf(true).exp2().is_zero());
}

#[test]
fn test_exp_m1() {
    use crate::utils::near_f64;
    use crate::Real128;

    for x in [1e-20, -1e-20, 1e-5, 0.3, -0.3, 0.75, -2.0, 10.0] {
        let lhs = Real128::from_f64(x).exp_m1().as_f64();
        assert!(near_f64(lhs, x.exp_m1()), "exp_m1({}) = {}", x, lhs);
    }
    assert!(Real128::zero(true).exp_m1().is_negative());
    assert_eq!(Real128::inf(true).exp_m1(), Real128::one(true));
}

#[test]
fn test_exp_log_identities() {
    use crate::utils::{near, Lfsr};
    use crate::{Real128, Real512};

    let mut lfsr = Lfsr::new();
    for _ in 0..50 {
        let v = lfsr.get_in_range(0.5, 1000.);
        let x = Real128::from_f64(v);
        assert!(near(&x.log().exp(), &x, Real128::TOTAL_BITS - 5), "{}", v);

        let v = lfsr.get_in_range(0.5, 20.);
        let v = if lfsr.get() & 1 == 0 { -v } else { v };
        let x = Real128::from_f64(v);
        assert!(near(&x.exp().log(), &x, Real128::TOTAL_BITS - 5), "{}", v);
    }

    for v in [0.7, 3.0, 42.5] {
        let x = Real512::from_f64(v);
        assert!(near(&x.log().exp(), &x, Real512::TOTAL_BITS - 5));
        assert!(near(&x.exp().log(), &x, Real512::TOTAL_BITS - 5));
    }
}

#[test]
fn test_hyperbolic() {
    use crate::utils::near_f64;
    use crate::Real128;

    for x in [1e-10, 0.001, 0.3, -0.45, 0.5, 1.0, -2.5, 7.0, 20.0, -30.0] {
        let r = Real128::from_f64(x);
        assert!(near_f64(r.sinh().as_f64(), x.sinh()), "sinh({})", x);
        assert!(near_f64(r.cosh().as_f64(), x.cosh()), "cosh({})", x);
        assert!(near_f64(r.tanh().as_f64(), x.tanh()), "tanh({})", x);
    }

    // Special values.
    assert!(Real128::zero(true).sinh().is_negative());
    assert_eq!(Real128::zero(true).cosh(), Real128::one(false));
    assert_eq!(Real128::inf(true).sinh(), Real128::inf(true));
    assert_eq!(Real128::inf(true).cosh(), Real128::inf(false));
    assert_eq!(Real128::inf(true).tanh(), Real128::one(true));
    assert_eq!(Real128::from(1000).tanh(), Real128::one(false));
    assert_eq!(Real128::from(-1000).tanh(), Real128::one(true));
    assert!(Real128::nan(false).tanh().is_nan());
}
