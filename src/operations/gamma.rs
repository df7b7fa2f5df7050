//! This module contains the implementation of the gamma function.

use crate::real::{Category, Real};

impl<const LIMBS: usize> Real<LIMBS> {
    /// Computes the gamma function, using Spouge's approximation:
    ///
    /// gamma(x) = (x+a-1)^(x-1/2) e^-(x+a-1) (c0 + sum(ck / (x+k-1)))
    ///
    /// where ck = (-1)^(k-1) (a-k)^(k-1/2) e^(a-k) / (k-1)!.
    ///
    /// The terms of the sum alternate in sign and cancel, so the result is
    /// accurate to roughly 0.6 * TOTAL_BITS bits for moderate inputs, and
    /// loses more bits for large inputs. Negative numbers use the reflection
    /// formula gamma(x) = pi / (sin(pi x) gamma(1 - x)).
    pub fn gamma(&self) -> Self {
        match self.get_category() {
            Category::NaN => return *self,
            Category::Zero => return Self::inf(self.is_negative()),
            Category::Infinity if self.is_negative() => return Self::nan(true),
            Category::Infinity => return *self,
            Category::Normal => {}
        }

        if !self.is_negative() {
            return Self::spouge(self);
        }

        // The poles at zero and at the negative integers.
        if self.is_integer() {
            return Self::nan(true);
        }
        let pi = Self::pi();
        let s = (pi * *self).sin();
        pi / (s * Self::spouge(&(Self::one(false) - *self)))
    }

    /// Evaluates Spouge's approximation for a positive x.
    fn spouge(x: &Self) -> Self {
        // The number of terms balances the truncation error of the
        // approximation against the cancellation in the sum.
        let a = (27 * Self::TOTAL_BITS as u64).div_ceil(128);
        let half = Self::from_f64(0.5);

        let mut sum = Self::tau().sqrt();
        for k in 1..a {
            let ak = Self::from_u64(a - k);
            let ck = ak.pow(&(Self::from_u64(k) - half)) * ak.exp()
                / (Self::fast_fact(k - 1) * (*x + (k - 1) as i64));
            if k % 2 == 1 {
                sum += ck;
            } else {
                sum -= ck;
            }
        }

        // (x+a-1)^(x-1/2) e^-(x+a-1), as a single exponent so that the
        // intermediate power can't overflow.
        let shifted = *x + (a - 1) as i64;
        let exponent = (*x - half) * shifted.log() - shifted;
        sum * exponent.exp()
    }
}

#[test]
fn test_gamma_factorials() {
    use crate::utils::near;
    use crate::{Real128, Real256};

    for n in 1..=21u64 {
        let g = Real128::from_u64(n).gamma();
        let expected = Real128::fast_fact(n - 1);
        assert!(near(&g, &expected, Real128::TOTAL_BITS * 3 / 5), "gamma({})", n);
    }
    for n in [1u64, 2, 5, 12, 20] {
        let g = Real256::from_u64(n).gamma();
        let expected = Real256::fast_fact(n - 1);
        assert!(near(&g, &expected, Real256::TOTAL_BITS * 3 / 5), "gamma({})", n);
    }
    // 10! as a native value.
    assert_eq!(Real256::from(11).gamma().as_f64(), 3628800.0);
}

#[test]
fn test_gamma_half_integers() {
    use crate::utils::near;
    use crate::Real256;

    let bits = Real256::TOTAL_BITS * 3 / 5;
    let sqrt_pi = Real256::pi().sqrt();
    let cases = [(0.5, 1.0), (1.5, 0.5), (2.5, 0.75), (-0.5, -2.0), (-1.5, 4.0 / 3.0)];
    for (x, ratio) in cases {
        let g = Real256::from_f64(x).gamma();
        // The ratio 4/3 is not exact in binary.
        let expected = if x == -1.5 {
            sqrt_pi * 4 / 3
        } else {
            sqrt_pi * ratio
        };
        assert!(near(&g, &expected, bits), "gamma({})", x);
    }
}

#[test]
fn test_gamma_native() {
    use crate::Real128;
    // Verify the results with:
    // from mpmath import mp
    // mp.gamma(0.1), mp.gamma(7.25), mp.gamma(-2.5)
    let cases = [
        (0.1, 9.513507698668731),
        (7.25, 1155.3810139199897),
        (-2.5, -0.9453087204829419),
    ];
    for (x, expected) in cases {
        let g = Real128::from_f64(x).gamma().as_f64();
        assert!(((g - expected) / expected).abs() < 1e-14, "gamma({}) = {}", x, g);
    }
}

#[test]
fn test_gamma_special_values() {
    use crate::Real128;
    assert_eq!(Real128::zero(false).gamma(), Real128::inf(false));
    assert_eq!(Real128::zero(true).gamma(), Real128::inf(true));
    assert_eq!(Real128::inf(false).gamma(), Real128::inf(false));
    assert!(Real128::inf(true).gamma().is_nan());
    assert!(Real128::nan(false).gamma().is_nan());
    assert!(Real128::from(-1).gamma().is_nan());
    assert!(Real128::from(-40).gamma().is_nan());
    // The result overflows the double range, but not the exponent field.
    let big = Real128::from(500).gamma();
    assert!(big.is_normal());
    assert!(big.as_f64().is_infinite());
}
