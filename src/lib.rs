//! Fixed-precision binary floating-point numbers with many limbs of mantissa.
//!
//! `Real<LIMBS>` stores a sign, a 31-bit exponent and `LIMBS` 32-bit limbs of
//! mantissa. The precision is part of the type, so numbers of different
//! precisions never mix. Arithmetic truncates toward zero, and invalid results
//! propagate as NaN values that the predicates detect.
//!
//! ```
//! use limbreal::Real256;
//!
//! let x = Real256::from(2).sqrt();
//! assert_eq!(x.as_f64(), std::f64::consts::SQRT_2);
//! assert_eq!(x.to_string_with_digits(10), "1.414213562");
//!
//! let y: Real256 = "0.25".parse().unwrap();
//! assert_eq!((y * 4).as_f64(), 1.0);
//! ```

mod arithmetic;
mod cast;
mod operations;
mod real;
mod string;
mod utils;

#[cfg(feature = "python")]
mod py;

pub use self::real::{Category, Real, Real128, Real256, Real512, LIMB_BITS};
pub use self::string::ParseRealError;

#[cfg(test)]
mod properties {
    use crate::Real128;
    use quickcheck::{quickcheck, TestResult};

    quickcheck! {
        fn round_trip_f64(a: f64) -> TestResult {
            if !a.is_normal() && a != 0.0 {
                return TestResult::discard();
            }
            let back = Real128::from_f64(a).as_f64();
            TestResult::from_bool(back == a && back.is_sign_negative() == a.is_sign_negative())
        }

        fn add_mul_commute(a: f64, b: f64) -> TestResult {
            if !a.is_finite() || !b.is_finite() {
                return TestResult::discard();
            }
            let (x, y) = (Real128::from_f64(a), Real128::from_f64(b));
            TestResult::from_bool(x + y == y + x && x * y == y * x)
        }

        fn identities(a: f64) -> TestResult {
            if !a.is_normal() {
                return TestResult::discard();
            }
            let x = Real128::from_f64(a);
            let zero = Real128::zero(false);
            let one = Real128::one(false);
            TestResult::from_bool(
                x + zero == x
                    && (x + x.neg()).is_zero()
                    && x * one == x
                    && x * x.recip() == one
                    && (x * x).sqrt() == x.abs(),
            )
        }

        fn ordering_matches_f64(a: f64, b: f64) -> TestResult {
            // Subnormal doubles flush to zero.
            if a.is_nan() || b.is_nan() || a.is_subnormal() || b.is_subnormal() {
                return TestResult::discard();
            }
            let (x, y) = (Real128::from_f64(a), Real128::from_f64(b));
            TestResult::from_bool((x < y) == (a < b) && (x == y) == (a == b))
        }

        fn addition_is_monotonic(a: f64, b: f64, c: f64) -> TestResult {
            if !a.is_finite() || !b.is_finite() || !c.is_finite() || a > b {
                return TestResult::discard();
            }
            let c = Real128::from_f64(c);
            let (x, y) = (Real128::from_f64(a) + c, Real128::from_f64(b) + c);
            TestResult::from_bool(x <= y)
        }
    }
}
