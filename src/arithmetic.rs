use core::cmp::Ordering;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub,
    SubAssign,
};

use super::real::{Category, Real, LIMB_BITS};

/// The maximal number of one-ulp corrections applied after a Newton-Raphson
/// refinement.
const POLISH_STEPS: usize = 16;

/// The sign combinations of a binary operation, left operand first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignPair {
    PosPos,
    PosNeg,
    NegPos,
    NegNeg,
}

impl SignPair {
    fn of<const LIMBS: usize>(a: &Real<LIMBS>, b: &Real<LIMBS>) -> Self {
        match (a.is_negative(), b.is_negative()) {
            (false, false) => SignPair::PosPos,
            (false, true) => SignPair::PosNeg,
            (true, false) => SignPair::NegPos,
            (true, true) => SignPair::NegNeg,
        }
    }
}

/// Returns limb `idx` of the significand `1.mantissa`. Limb zero holds the
/// implicit integer bit, and limbs past either end read as zero.
fn significand_limb<const LIMBS: usize>(mantissa: &[u32; LIMBS], idx: isize) -> u32 {
    if idx == 0 {
        1
    } else if idx > 0 && idx as usize <= LIMBS {
        mantissa[idx as usize - 1]
    } else {
        0
    }
}

/// Returns limb `idx` of the significand `1.mantissa` after shifting it right
/// by `shift` bits.
fn aligned_limb<const LIMBS: usize>(
    mantissa: &[u32; LIMBS],
    shift: usize,
    idx: usize,
) -> u32 {
    let limbs = (shift / LIMB_BITS) as isize;
    let bits = (shift % LIMB_BITS) as u32;
    let src = idx as isize - limbs;
    let hi = significand_limb(mantissa, src);
    if bits == 0 {
        return hi;
    }
    let lo = significand_limb(mantissa, src - 1);
    (hi >> bits) | (lo << (LIMB_BITS as u32 - bits))
}

/// Shift the mantissa right by one bit, and place `top` in the vacated most
/// significant bit.
fn shift_right_one<const LIMBS: usize>(mantissa: &mut [u32; LIMBS], mut top: u32) {
    for limb in mantissa.iter_mut() {
        let next = *limb & 1;
        *limb = (*limb >> 1) | (top << (LIMB_BITS - 1));
        top = next;
    }
}

/// Shift the mantissa, followed by the guard limb, left by `shift` bits.
fn shift_left<const LIMBS: usize>(
    mantissa: &mut [u32; LIMBS],
    guard: u32,
    shift: usize,
) {
    let src = *mantissa;
    let word = |k: usize| -> u32 {
        match k.cmp(&LIMBS) {
            Ordering::Less => src[k],
            Ordering::Equal => guard,
            Ordering::Greater => 0,
        }
    };
    let limbs = shift / LIMB_BITS;
    let bits = (shift % LIMB_BITS) as u32;
    for (i, limb) in mantissa.iter_mut().enumerate() {
        let hi = word(i + limbs);
        *limb = if bits == 0 {
            hi
        } else {
            (hi << bits) | (word(i + limbs + 1) >> (LIMB_BITS as u32 - bits))
        };
    }
}

/// Returns the number of zero bits before the first set bit of the mantissa
/// followed by the guard limb, or None if all of the bits are zero.
fn leading_zeros<const LIMBS: usize>(mantissa: &[u32; LIMBS], guard: u32) -> Option<usize> {
    let mut zeros = 0;
    for limb in mantissa.iter().chain(core::iter::once(&guard)) {
        if *limb != 0 {
            return Some(zeros + limb.leading_zeros() as usize);
        }
        zeros += LIMB_BITS;
    }
    None
}

/// Returns the sum of the partial products a[j] * b[k] that land in the
/// fraction limb `col` of the product (j + k + 1 == col).
fn column_sum<const LIMBS: usize>(a: &[u32; LIMBS], b: &[u32; LIMBS], col: usize) -> u128 {
    let mut sum = 0;
    for j in col.saturating_sub(LIMBS)..col.min(LIMBS) {
        sum += a[j] as u128 * b[col - 1 - j] as u128;
    }
    sum
}

impl<const LIMBS: usize> Real<LIMBS> {
    /// Add two positive normal numbers.
    fn add_normals(a: &Self, b: &Self) -> Self {
        // Make 'a' the operand with the larger exponent.
        let (a, b) = if a.exponent_field() < b.exponent_field() {
            (b, a)
        } else {
            (a, b)
        };

        let shift = (a.exponent_field() - b.exponent_field()) as usize;
        if shift > Self::TOTAL_BITS {
            // The smaller operand is lost entirely. No sticky bit is kept.
            return *a;
        }

        let mut mantissa = [0; LIMBS];
        let mut carry: u64 = 0;
        for i in (0..LIMBS).rev() {
            carry += a.get_mantissa()[i] as u64;
            carry += aligned_limb(b.get_mantissa(), shift, i + 1) as u64;
            mantissa[i] = carry as u32;
            carry >>= LIMB_BITS;
        }

        // The integer part is the implicit bit of 'a', the aligned integer
        // limb of 'b', and the carry out of the fraction: 1, 2 or 3.
        let integer = 1 + aligned_limb(b.get_mantissa(), shift, 0) as u64 + carry;
        let mut exp = a.get_exp();
        if integer > 1 {
            shift_right_one(&mut mantissa, (integer & 1) as u32);
            exp += 1;
        }
        Self::from_parts(false, exp, mantissa)
    }

    /// Subtract two positive normal numbers, where |a| >= |b|.
    fn sub_normals(a: &Self, b: &Self) -> Self {
        let shift = (a.exponent_field() - b.exponent_field()) as usize;
        if shift > Self::TOTAL_BITS {
            return *a;
        }

        // The guard limb catches the first limb of 'b' that is shifted out of
        // the mantissa, so that a cancellation can shift it back in.
        let diff = -(aligned_limb(b.get_mantissa(), shift, LIMBS + 1) as i64);
        let guard = diff as u32;
        let mut borrow = diff >> LIMB_BITS;

        let mut mantissa = [0; LIMBS];
        for i in (0..LIMBS).rev() {
            let diff = a.get_mantissa()[i] as i64
                - aligned_limb(b.get_mantissa(), shift, i + 1) as i64
                + borrow;
            mantissa[i] = diff as u32;
            borrow = diff >> LIMB_BITS;
        }

        let integer = 1 - aligned_limb(b.get_mantissa(), shift, 0) as i64 + borrow;
        debug_assert!(integer == 0 || integer == 1);
        if integer == 1 {
            return Self::from_parts(false, a.get_exp(), mantissa);
        }

        // The leading bits cancelled. Find the new leading one, and move it to
        // the implicit bit position.
        match leading_zeros(&mantissa, guard) {
            None => Self::zero(false),
            Some(zeros) => {
                let shift = zeros + 1;
                shift_left(&mut mantissa, guard, shift);
                Self::from_parts(false, a.get_exp() - shift as i64, mantissa)
            }
        }
    }

    /// Computes a - b, for two positive normal numbers.
    fn sub_positive(a: &Self, b: &Self) -> Self {
        match a.cmp_magnitude(b) {
            Ordering::Less => Self::sub_normals(b, a).neg(),
            Ordering::Equal => Self::zero(false),
            Ordering::Greater => Self::sub_normals(a, b),
        }
    }

    /// Computes a + b.
    pub fn add(a: &Self, b: &Self) -> Self {
        match (a.get_category(), b.get_category()) {
            (Category::NaN, _) => *a,
            (_, Category::NaN) => *b,

            (Category::Infinity, Category::Infinity) => {
                if a.is_negative() != b.is_negative() {
                    return Self::nan(false);
                }
                *a
            }
            (Category::Infinity, _) => *a,
            (_, Category::Infinity) => *b,

            (Category::Zero, Category::Zero) => {
                Self::zero(a.is_negative() && b.is_negative())
            }
            (Category::Zero, Category::Normal) => *b,
            (Category::Normal, Category::Zero) => *a,

            (Category::Normal, Category::Normal) => match SignPair::of(a, b) {
                SignPair::PosPos => Self::add_normals(a, b),
                SignPair::PosNeg => Self::sub_positive(a, &b.neg()),
                SignPair::NegPos => Self::sub_positive(b, &a.neg()),
                SignPair::NegNeg => Self::add_normals(&a.neg(), &b.neg()).neg(),
            },
        }
    }

    /// Computes a - b.
    pub fn sub(a: &Self, b: &Self) -> Self {
        Self::add(a, &b.neg())
    }

    /// Multiply two normal numbers.
    fn mul_normals(a: &Self, b: &Self) -> Self {
        let sign = a.is_negative() ^ b.is_negative();
        let am = a.get_mantissa();
        let bm = b.get_mantissa();

        // (1 + a) * (1 + b) = 1 + a + b + a*b. The columns of a*b below the
        // retained precision only contribute their carry.
        let mut acc: u128 = 0;
        for col in (LIMBS..2 * LIMBS).rev() {
            acc += column_sum(am, bm, col);
            acc >>= LIMB_BITS;
        }

        let mut mantissa = [0; LIMBS];
        for col in (0..LIMBS).rev() {
            acc += column_sum(am, bm, col);
            acc += am[col] as u128 + bm[col] as u128;
            mantissa[col] = acc as u32;
            acc >>= LIMB_BITS;
        }

        // The product of two numbers in [1, 2) is in [1, 4).
        let integer = 1 + acc as u32;
        let mut exp = a.get_exp() + b.get_exp();
        if integer > 1 {
            shift_right_one(&mut mantissa, integer & 1);
            exp += 1;
        }
        Self::from_parts(sign, exp, mantissa)
    }

    /// Computes a * b.
    pub fn mul(a: &Self, b: &Self) -> Self {
        let sign = a.is_negative() ^ b.is_negative();
        match (a.get_category(), b.get_category()) {
            (Category::NaN, _) => *a,
            (_, Category::NaN) => *b,
            (Category::Infinity, Category::Zero)
            | (Category::Zero, Category::Infinity) => Self::nan(sign),
            (Category::Infinity, _) | (_, Category::Infinity) => Self::inf(sign),
            (Category::Zero, _) | (_, Category::Zero) => Self::zero(sign),
            (Category::Normal, Category::Normal) => Self::mul_normals(a, b),
        }
    }

    /// Returns the number of Newton-Raphson iterations that bring a 23-bit
    /// seed to full precision: ceil(1 + log2(LIMBS)).
    pub(crate) fn newton_steps() -> usize {
        1 + (usize::BITS - (LIMBS - 1).leading_zeros()) as usize
    }

    /// Move `guess` one ulp at a time until the image under `f`, which must be
    /// increasing, is as close as possible to `target`.
    pub(crate) fn polish<F>(guess: Self, target: &Self, f: F) -> Self
    where
        F: Fn(&Self) -> Self,
    {
        let mut best = guess;
        let mut value = f(&best);
        let upward = value < *target;
        for _ in 0..POLISH_STEPS {
            if value == *target {
                break;
            }
            let next = if upward {
                best.next_up()
            } else {
                best.next_down()
            };
            let next_value = f(&next);
            let crossed = if upward {
                next_value > *target
            } else {
                next_value < *target
            };
            if crossed {
                let next_err = (next_value - *target).abs();
                let err = (value - *target).abs();
                return if next_err < err { next } else { best };
            }
            best = next;
            value = next_value;
        }
        best
    }

    /// Computes the reciprocal 1/x.
    pub fn recip(&self) -> Self {
        match self.get_category() {
            Category::NaN => return *self,
            Category::Zero => return Self::inf(self.is_negative()),
            Category::Infinity => return Self::zero(self.is_negative()),
            Category::Normal => {}
        }
        let x = self.abs();

        // Seed the iteration with the single precision reciprocal of the top
        // 23 bits of the mantissa.
        let seed = f32::from_bits(1.0f32.to_bits() | (x.get_mantissa()[0] >> 9));
        let v = (1.0 / seed).to_bits();
        let mut mantissa = [0; LIMBS];
        mantissa[0] = v << 9;
        let exp = -x.get_exp() + ((v >> 23) as i64 - 127);
        let mut r = Self::from_parts(false, exp, mantissa);

        // Newton-Raphson: r = r * (2 - x * r). Every step doubles the number
        // of correct bits.
        let two = Self::from_u64(2);
        for _ in 0..Self::newton_steps() {
            r = r * (two - x * r);
        }

        let one = Self::one(false);
        let r = Self::polish(r, &one, |c| x * c);
        r.with_sign(self.is_negative())
    }

    /// Computes a / b, as a * (1 / b).
    pub fn div(a: &Self, b: &Self) -> Self {
        Self::mul(a, &b.recip())
    }

    /// Computes the truncating remainder of a / b. The result has the sign of
    /// `a`, and the same magnitude as `a - trunc(a/b) * b`.
    pub fn rem(a: &Self, b: &Self) -> Self {
        if !a.is_finite() || b.is_nan() || b.is_zero() {
            return Self::nan(a.is_negative());
        }
        if b.is_inf() || a.is_zero() {
            return *a;
        }
        let q = Self::div(a, b).trunc();
        *a - q * *b
    }

    /// Multiply by 2^n, when `n` is a power of two integer, by adjusting the
    /// exponent.
    fn scale_by_pow2(&self, val: u64, divide: bool) -> Option<Self> {
        if !val.is_power_of_two() || !self.is_normal() {
            return None;
        }
        let log = val.trailing_zeros() as i64;
        Some(self.ldexp(if divide { -log } else { log }))
    }
}

impl<const LIMBS: usize> Neg for Real<LIMBS> {
    type Output = Self;
    fn neg(self) -> Self {
        Real::neg(&self)
    }
}

impl<const LIMBS: usize> Neg for &Real<LIMBS> {
    type Output = Real<LIMBS>;
    fn neg(self) -> Real<LIMBS> {
        Real::neg(self)
    }
}

macro_rules! declare_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        // Self + Self
        impl<const LIMBS: usize> $trait_name for Real<LIMBS> {
            type Output = Self;
            fn $func_name(self, rhs: Self) -> Self {
                Self::$func_impl_name(&self, &rhs)
            }
        }

        // Self + &Self
        impl<const LIMBS: usize> $trait_name<&Self> for Real<LIMBS> {
            type Output = Self;
            fn $func_name(self, rhs: &Self) -> Self {
                Self::$func_impl_name(&self, rhs)
            }
        }

        // &Self + &Self
        impl<const LIMBS: usize> $trait_name<Self> for &Real<LIMBS> {
            type Output = Real<LIMBS>;
            fn $func_name(self, rhs: Self) -> Real<LIMBS> {
                Real::$func_impl_name(self, rhs)
            }
        }

        // &Self + Self
        impl<const LIMBS: usize> $trait_name<Real<LIMBS>> for &Real<LIMBS> {
            type Output = Real<LIMBS>;
            fn $func_name(self, rhs: Real<LIMBS>) -> Real<LIMBS> {
                Real::$func_impl_name(self, &rhs)
            }
        }
    };
}

declare_operator!(Add, add, add);
declare_operator!(Sub, sub, sub);
declare_operator!(Mul, mul, mul);
declare_operator!(Div, div, div);
declare_operator!(Rem, rem, rem);

macro_rules! declare_assign_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        impl<const LIMBS: usize> $trait_name for Real<LIMBS> {
            fn $func_name(&mut self, rhs: Self) {
                *self = Self::$func_impl_name(self, &rhs);
            }
        }

        impl<const LIMBS: usize> $trait_name<&Real<LIMBS>> for Real<LIMBS> {
            fn $func_name(&mut self, rhs: &Self) {
                *self = Self::$func_impl_name(self, rhs);
            }
        }
    };
}

declare_assign_operator!(AddAssign, add_assign, add);
declare_assign_operator!(SubAssign, sub_assign, sub);
declare_assign_operator!(MulAssign, mul_assign, mul);
declare_assign_operator!(DivAssign, div_assign, div);
declare_assign_operator!(RemAssign, rem_assign, rem);

// Operators with a native right hand side: Real + 3, Real * 0.5, ...
macro_rules! declare_native_operators {
    ($native:ty) => {
        impl<const LIMBS: usize> Add<$native> for Real<LIMBS> {
            type Output = Self;
            fn add(self, rhs: $native) -> Self {
                Self::add(&self, &Self::from(rhs))
            }
        }

        impl<const LIMBS: usize> Sub<$native> for Real<LIMBS> {
            type Output = Self;
            fn sub(self, rhs: $native) -> Self {
                Self::sub(&self, &Self::from(rhs))
            }
        }

        impl<const LIMBS: usize> AddAssign<$native> for Real<LIMBS> {
            fn add_assign(&mut self, rhs: $native) {
                *self = *self + rhs;
            }
        }

        impl<const LIMBS: usize> SubAssign<$native> for Real<LIMBS> {
            fn sub_assign(&mut self, rhs: $native) {
                *self = *self - rhs;
            }
        }
    };
}

declare_native_operators!(i64);
declare_native_operators!(f64);

// Integer operands are i64 only, so integer literals infer to i64.
// Multiplication and division by a power of two only adjust the exponent.
impl<const LIMBS: usize> Mul<i64> for Real<LIMBS> {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        let sign = self.is_negative() ^ (rhs < 0);
        match self.scale_by_pow2(rhs.unsigned_abs(), false) {
            Some(val) => val.with_sign(sign),
            None => Self::mul(&self, &Self::from(rhs)),
        }
    }
}

impl<const LIMBS: usize> Div<i64> for Real<LIMBS> {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        let sign = self.is_negative() ^ (rhs < 0);
        match self.scale_by_pow2(rhs.unsigned_abs(), true) {
            Some(val) => val.with_sign(sign),
            None => Self::div(&self, &Self::from(rhs)),
        }
    }
}

impl<const LIMBS: usize> MulAssign<i64> for Real<LIMBS> {
    fn mul_assign(&mut self, rhs: i64) {
        *self = *self * rhs;
    }
}

impl<const LIMBS: usize> DivAssign<i64> for Real<LIMBS> {
    fn div_assign(&mut self, rhs: i64) {
        *self = *self / rhs;
    }
}

impl<const LIMBS: usize> Mul<f64> for Real<LIMBS> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::mul(&self, &Self::from(rhs))
    }
}

impl<const LIMBS: usize> Div<f64> for Real<LIMBS> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::div(&self, &Self::from(rhs))
    }
}

#[test]
fn test_addition() {
    use super::Real128;

    fn add_helper(a: f64, b: f64) -> f64 {
        let a = Real128::from_f64(a);
        let b = Real128::from_f64(b);
        let c = Real128::add(&a, &b);
        c.as_f64()
    }

    assert_eq!(add_helper(0., -4.), -4.);
    assert_eq!(add_helper(-4., 0.), -4.);
    assert_eq!(add_helper(1., 1.), 2.);
    assert_eq!(add_helper(8., 4.), 12.);
    assert_eq!(add_helper(128., 2.), 130.);
    assert_eq!(add_helper(128., -8.), 120.);
    assert_eq!(add_helper(64., -60.), 4.);
    assert_eq!(add_helper(69., -65.), 4.);
    assert_eq!(add_helper(69., 69.), 138.);
    assert_eq!(add_helper(-128., -8.), -136.);
    assert_eq!(add_helper(64., -65.), -1.);
    assert_eq!(add_helper(-64., -65.), -129.);
    assert_eq!(add_helper(-15., 15.), 0.);
    assert_eq!(add_helper(1., 0.125), 1.125);
    assert_eq!(add_helper(1., -0.125), 0.875);
    assert!((add_helper(3.13609818956293918, 0.00005972154828114) - 3.1361579).abs() < 1e-6);
    assert!((add_helper(0.10000000002, -2.0e-11) - 0.1).abs() < 1e-13);

    for i in -4..15 {
        for j in i..15 {
            assert_eq!(
                add_helper(f64::from(j), f64::from(i)),
                f64::from(i) + f64::from(j)
            );
        }
    }
}

// Pg 120.  Chapter 4. Basic Properties and Algorithms.
#[test]
fn test_addition_large_numbers() {
    use super::Real128;

    let one = Real128::from_i64(1);
    let mut a = Real128::from_i64(1);
    let mut steps = 0;
    while (a + one) - a == one {
        a = a + a;
        steps += 1;
    }
    // The loop stops when 1 falls off the end of the mantissa.
    assert_eq!(steps, Real128::TOTAL_BITS + 1);
    assert_eq!(a, Real128::one(false).ldexp(Real128::TOTAL_BITS as i64 + 1));
}

#[test]
fn test_add_special_values() {
    use super::utils::{self, near_f64};
    use super::Real128;

    // Test the addition of various irregular values.
    let values = utils::get_special_test_values();

    fn add_f64(a: f64, b: f64) -> f64 {
        let a = Real128::from_f64(a);
        let b = Real128::from_f64(b);
        (a + b).as_f64()
    }

    for v0 in values {
        for v1 in values {
            let r0 = add_f64(v0, v1);
            let r1 = v0 + v1;
            assert_eq!(r0.is_finite(), r1.is_finite());
            assert_eq!(r0.is_nan(), r1.is_nan());
            assert_eq!(r0.is_infinite(), r1.is_infinite());
            // The conversion to double rounds ties up, and the native
            // addition rounds them to even.
            assert!(near_f64(r0, r1), "{} + {} = {}", v0, v1, r0);
        }
    }

    // An exact tie: pi plus half of its ulp.
    let pi = std::f64::consts::PI;
    assert_eq!(pi + f64::EPSILON, pi);
    assert_eq!(add_f64(pi, f64::EPSILON), f64::from_bits(pi.to_bits() + 1));
    assert_eq!(add_f64(3.0, 4.0), 7.0);
}

/// Returns a random double with an exponent in the range [-128, 128), so that
/// sums of two of them are exact in 512 bits.
#[cfg(test)]
fn random_double(lfsr: &mut super::utils::Lfsr) -> f64 {
    let bits = lfsr.get64();
    let exponent = 1023 - 128 + ((bits >> 52) & 0xff);
    f64::from_bits((bits & 0x800f_ffff_ffff_ffff) | (exponent << 52))
}

#[test]
fn test_add_sub_exact_random_vals() {
    use super::utils::Lfsr;
    use super::Real512;

    let mut lfsr = Lfsr::new();
    for _ in 0..2000 {
        let a = Real512::from_f64(random_double(&mut lfsr));
        let b = Real512::from_f64(random_double(&mut lfsr));
        // Sums of doubles are exact at this precision.
        assert_eq!((a + b) - a, b);
        assert_eq!((a - b) + b, a);
        assert_eq!(a + b, b + a);
        assert!((a - a).is_zero());
        assert_eq!(a + (-a), Real512::zero(false));
    }
}

#[test]
fn test_sub_cancellation() {
    use super::Real256;

    // Operands that only differ in the lowest bit of the mantissa.
    let one = Real256::one(false);
    let up = one.next_up();
    let diff = up - one;
    assert_eq!(diff, one.ldexp(-(Real256::TOTAL_BITS as i64)));
    assert_eq!(one - up, diff.neg());

    // A difference in the lowest limb of a value with a full mantissa.
    let third = one / 3;
    let third_up = third.next_up();
    assert_eq!(third_up - third, third.ulp());
    assert!((third - third).is_zero());

    // Partial cancellation in the top limbs.
    let a = Real256::from_f64(1.0000001);
    let b = Real256::from_f64(1.0);
    assert_eq!((a - b).as_f64(), 1.0000001 - 1.0);
    assert_eq!(Real256::from(1.0f32) + Real256::from(1e20f32) - Real256::from(1e20f32), one);
}

#[test]
fn test_add_drops_tiny_operand() {
    use super::Real128;
    let one = Real128::one(false);
    // Half an ulp is dropped, without a sticky bit.
    let half_ulp = one.ulp().ldexp(-1);
    assert_eq!(one + half_ulp, one);
    assert_eq!(one - half_ulp, one);
    assert!(one + one.ulp() != one);
    let pi = Real128::pi();
    assert!((pi + pi.ulp() - pi).as_f64() != 0.0);
    assert_eq!((pi + pi.ulp() / 2 - pi).as_f64(), 0.0);
}

#[test]
fn test_mul_simple() {
    use super::Real128;

    fn mul_helper(a: f64, b: f64) -> f64 {
        let a = Real128::from_f64(a);
        let b = Real128::from_f64(b);
        (a * b).as_f64()
    }

    assert_eq!(mul_helper(1.25, 1.25), 1.25 * 1.25);
    assert_eq!(mul_helper(1.5, 1.5), 1.5 * 1.5);
    assert_eq!(mul_helper(-1.5, -1.5), 2.25);
    assert_eq!(mul_helper(1.99999, 1.99999), 1.99999 * 1.99999);
    assert_eq!(mul_helper(0.0, -3.0).to_bits(), (-0.0f64).to_bits());
    assert_eq!(mul_helper(-2.0, 3.0), -6.0);
    assert_eq!(mul_helper(1e300, 1e300), 1e300 * 1e300);
}

#[test]
fn test_mul_special_values() {
    use super::utils;
    use super::Real128;

    let values = utils::get_special_test_values();
    for v0 in values {
        for v1 in values {
            let r0 = (Real128::from_f64(v0) * Real128::from_f64(v1)).as_f64();
            let r1 = v0 * v1;
            assert_eq!(r0.is_nan(), r1.is_nan());
            assert_eq!(r0.is_infinite(), r1.is_infinite());
            if r1.is_infinite() || r1 == 0.0 {
                assert_eq!(r0.is_sign_negative(), r1.is_sign_negative());
            }
        }
    }
}

#[test]
fn test_mul_random_vals() {
    use super::utils::Lfsr;
    use super::Real512;

    let mut lfsr = Lfsr::new();
    for _ in 0..2000 {
        let v0 = random_double(&mut lfsr);
        let v1 = random_double(&mut lfsr);
        let a = Real512::from_f64(v0);
        let b = Real512::from_f64(v1);
        assert_eq!(a * b, b * a);
        assert_eq!(a * Real512::one(false), a);
        // The product of two doubles is exact, so its rounding matches the
        // native multiplication (ties are vanishingly rare).
        assert_eq!((a * b).as_f64(), v0 * v1);
    }
}

#[test]
fn test_div_simple() {
    use super::Real128;
    let one = Real128::one(false);
    let two = Real128::from_u64(2);
    assert_eq!((one / one).as_f32(), 1.0);
    assert_eq!((two / one).as_f32(), 2.0);
    assert_eq!((one / two).as_f32(), 0.5);
    assert_eq!((two / two).as_f32(), 1.0);
    assert_eq!((one / -two).as_f32(), -0.5);
    assert_eq!((Real128::from_f64(10.) / 4).as_f64(), 2.5);
    assert_eq!((Real128::from_f64(10.) / -5).as_f64(), -2.0);
}

#[test]
fn test_div_special_values() {
    use super::Real128;
    let one = Real128::one(false);
    let zero = Real128::zero(false);
    assert!((one / zero).is_inf());
    assert!(!(one / zero).is_negative());
    assert!((one / zero.neg()).is_negative());
    assert!((zero / zero).is_nan());
    assert!((one / Real128::inf(false)).is_zero());
    assert!((Real128::nan(false) / one).is_nan());
    assert!(one / zero != Real128::from_f64(1e300));
}

#[test]
fn test_reciprocal() {
    use super::utils::Lfsr;
    use super::{Real128, Real512};

    // The product with the reciprocal is exactly one.
    let mut lfsr = Lfsr::new();
    for _ in 0..200 {
        let a = Real512::from_f64(random_double(&mut lfsr));
        assert_eq!(a * a.recip(), Real512::one(false));
    }
    for v in [3.0, -7.0, 0.1, 1e-30, 123456789.0] {
        let a = Real128::from_f64(v);
        assert_eq!(a * a.recip(), Real128::one(false));
    }

    // Check that 1 / 3 * 3 does not differ from 1 by more than an ulp.
    let one = Real128::one(false);
    let three = Real128::from_u64(3);
    let a = one / three * three;
    let b = (one - a).ldexp(Real128::TOTAL_BITS as i64);
    assert!(b.abs().as_f64() <= 1.0);
}

#[test]
fn test_newton_steps() {
    assert_eq!(Real::<2>::newton_steps(), 2);
    assert_eq!(Real::<3>::newton_steps(), 3);
    assert_eq!(Real::<4>::newton_steps(), 3);
    assert_eq!(Real::<16>::newton_steps(), 5);
    assert_eq!(Real::<17>::newton_steps(), 6);
}

#[test]
fn test_operators() {
    use super::Real256;
    let a = Real256::from_f32(8.0);
    let b = Real256::from_f32(2.0);
    assert_eq!((a + b).as_f64(), 10.0);
    assert_eq!((a - b).as_f64(), 6.0);
    assert_eq!((a * b).as_f64(), 16.0);
    assert_eq!((a / b).as_f64(), 4.0);
    assert_eq!((&a + &b).as_f64(), 10.0);
    assert_eq!((a * 3).as_f64(), 24.0);
    assert_eq!((a * -4).as_f64(), -32.0);
    assert_eq!((a / 16).as_f64(), 0.5);
    assert_eq!((a / -16).as_f64(), -0.5);
    assert_eq!((a + 0.5).as_f64(), 8.5);
    assert_eq!((-a).as_f64(), -8.0);
    assert_eq!((Real256::from(7) % Real256::from(4)).as_f64(), 3.0);
    assert_eq!((Real256::from(-7) % Real256::from(4)).as_f64(), -3.0);

    let mut c = a;
    c += b;
    c *= 2;
    c -= 4;
    c /= b;
    assert_eq!(c.as_f64(), 8.0);
}

#[test]
fn test_famous_pentium4_bug() {
    // https://en.wikipedia.org/wiki/Pentium_FDIV_bug
    use super::Real128;

    let a = Real128::from_u64(4_195_835);
    let b = Real128::from_u64(3_145_727);
    let res = a / b;
    let result = res.to_string_with_digits(20);
    assert!(result.starts_with("1.333820449136241002"));
}
