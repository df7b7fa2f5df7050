//! This file contains simple helper functions and test helpers.

use crate::real::{Real, LIMB_BITS};

/// Returns a limb mask with the lowest `b` bits set.
pub fn mask(b: usize) -> u32 {
    if b >= LIMB_BITS {
        return u32::MAX;
    }
    (1 << b) - 1
}

#[test]
fn test_masking() {
    assert_eq!(mask(0), 0x0);
    assert_eq!(mask(1), 0x1);
    assert_eq!(mask(8), 255);
    assert_eq!(mask(31), 0x7fff_ffff);
    assert_eq!(mask(32), u32::MAX);
    assert_eq!(mask(40), u32::MAX);
}

#[allow(dead_code)]
/// Returns list of interesting values that various tests use to catch edge cases.
pub fn get_special_test_values() -> [f64; 20] {
    [
        -f64::NAN,
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::EPSILON,
        -f64::EPSILON,
        0.000000000000000000000000000000000000001,
        f64::MIN,
        f64::MAX,
        std::f64::consts::PI,
        std::f64::consts::LN_2,
        std::f64::consts::SQRT_2,
        std::f64::consts::E,
        0.0,
        -0.0,
        10.,
        -10.,
        -0.00001,
        0.1,
        355. / 113.,
    ]
}

/// Returns true if `a` and `b` differ by at most 2^-`bits` relative to `b`.
/// Both values must be finite.
#[allow(dead_code)]
pub fn near<const LIMBS: usize>(a: &Real<LIMBS>, b: &Real<LIMBS>, bits: usize) -> bool {
    if b.is_zero() {
        return a.is_zero();
    }
    (*a - *b).abs() <= b.abs().ldexp(-(bits as i64))
}

/// Returns true if the doubles `a` and `b` are equal, both NaN, or one ulp
/// apart.
#[allow(dead_code)]
pub fn near_f64(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    (a - b).abs() <= b.abs() * f64::EPSILON
}

// Linear-feedback shift register. We use this as a random number generator for
// tests.
#[cfg(test)]
pub struct Lfsr {
    state: u32,
}

#[cfg(test)]
impl Default for Lfsr {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Lfsr {
    /// Generate a new LFSR number generator.
    pub fn new() -> Lfsr {
        Lfsr { state: 0x13371337 }
    }

    /// Generate a new LFSR number generator that starts with a specific state.
    pub fn new_with_seed(seed: u32) -> Lfsr {
        Lfsr {
            state: 0x13371337 ^ seed,
        }
    }

    pub fn next(&mut self) {
        let a = (self.state >> 24) & 1;
        let b = (self.state >> 23) & 1;
        let c = (self.state >> 22) & 1;
        let d = (self.state >> 17) & 1;
        let n = a ^ b ^ c ^ d ^ 1;
        self.state <<= 1;
        self.state |= n;
    }

    pub fn get(&mut self) -> u32 {
        let mut res: u32 = 0;
        for _ in 0..32 {
            self.next();
            res <<= 1;
            res ^= self.state & 0x1;
        }
        res
    }

    pub fn get64(&mut self) -> u64 {
        ((self.get() as u64) << 32) | self.get() as u64
    }

    /// Returns a double in the range [lo, hi).
    pub fn get_in_range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.get64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

// Implement `Iterator` for `Lfsr`.
#[cfg(test)]
impl Iterator for Lfsr {
    type Item = u64;
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.get64())
    }
}

#[test]
fn test_lfsr_balance() {
    let mut lfsr = Lfsr::new();

    // Count the number of items, and the number of 1s.
    let mut items = 0;
    let mut ones = 0;

    for _ in 0..10000 {
        let mut u = lfsr.get();
        for _ in 0..32 {
            items += 1;
            ones += u & 1;
            u >>= 1;
        }
    }
    // Make sure that we have around 50% 1s and 50% zeros.
    assert!((ones as f64) < (0.55 * items as f64));
    assert!((ones as f64) > (0.45 * items as f64));
}

#[test]
fn test_lfsr_range() {
    let mut lfsr = Lfsr::new_with_seed(7);
    for _ in 0..1000 {
        let v = lfsr.get_in_range(-4.0, 4.0);
        assert!((-4.0..4.0).contains(&v));
    }
}

#[test]
fn test_near() {
    use crate::Real128;
    let one = Real128::one(false);
    assert!(near(&one, &one, Real128::TOTAL_BITS));
    assert!(near(&(one + one.ulp()), &one, Real128::TOTAL_BITS));
    assert!(!near(&(one + one.ulp().ldexp(8)), &one, Real128::TOTAL_BITS));
    assert!(near(&(one + one.ulp().ldexp(8)), &one, Real128::TOTAL_BITS - 8));
    assert!(near(&Real128::zero(false), &Real128::zero(true), 10));

    assert!(near_f64(1.0, 1.0 + f64::EPSILON));
    assert!(!near_f64(1.0, 1.0 + 4.0 * f64::EPSILON));
    assert!(near_f64(f64::NAN, f64::NAN));
    assert!(near_f64(f64::INFINITY, f64::INFINITY));
    assert!(!near_f64(f64::INFINITY, f64::MAX));
}
