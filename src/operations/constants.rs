//! This module contains the table of mathematical constants. Every precision
//! computes its own table the first time one of its constants is requested,
//! and keeps it for the lifetime of the process.

use std::any::Any;
use std::collections::HashMap;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::real::Real;

/// The constants of one precision.
#[derive(Debug)]
pub(crate) struct Constants<const LIMBS: usize> {
    pi: Real<LIMBS>,
    e: Real<LIMBS>,
    ln2: Real<LIMBS>,
    ln10: Real<LIMBS>,
    log2e: Real<LIMBS>,
    log10e: Real<LIMBS>,
    pi_2: Real<LIMBS>,
    pi_3: Real<LIMBS>,
    pi_4: Real<LIMBS>,
    tau: Real<LIMBS>,
    frac_1_pi: Real<LIMBS>,
    frac_2_pi: Real<LIMBS>,
    frac_2_sqrt_pi: Real<LIMBS>,
    sqrt2: Real<LIMBS>,
    sqrt3: Real<LIMBS>,
    sqrt1_2: Real<LIMBS>,
}

/// Maps the number of limbs to the leaked table of that precision.
type Registry = HashMap<usize, &'static (dyn Any + Send + Sync)>;

lazy_static! {
    static ref REGISTRY: RwLock<Registry> = RwLock::new(HashMap::new());
}

impl<const LIMBS: usize> Constants<LIMBS> {
    /// Returns the table of this precision, and builds it on first use.
    /// Lookups share a read lock. The table is built while the write lock is
    /// held, so it is computed only once.
    pub(crate) fn get() -> &'static Self {
        if let Some(table) = Self::lookup(&REGISTRY.read()) {
            return table;
        }

        let mut registry = REGISTRY.write();
        // Another thread may have built the table while we waited.
        if let Some(table) = Self::lookup(&registry) {
            return table;
        }
        let table: &'static Self = Box::leak(Box::new(Self::build()));
        registry.insert(LIMBS, table);
        tracing::debug!(
            limbs = LIMBS,
            bits = Real::<LIMBS>::TOTAL_BITS,
            "built constant table"
        );
        table
    }

    fn lookup(registry: &Registry) -> Option<&'static Self> {
        registry
            .get(&LIMBS)
            .copied()
            .and_then(|table| table.downcast_ref::<Self>())
    }

    /// Computes all of the constants. This must not call any of the constant
    /// accessors, because the registry is write-locked.
    fn build() -> Self {
        let one = Real::<LIMBS>::one(false);
        let two = Real::<LIMBS>::from_u64(2);

        let pi = Self::machin_pi();
        let ln2 = Real::fast_log(&two);
        // log(10) = 3 log(2) + log(10/8).
        let ln10 = ln2 * 3 + Real::fast_log(&Real::from_f64(1.25));
        let e = Real::fast_exp_sub(&one, &Real::zero(false));
        let frac_1_pi = pi.recip();
        let sqrt2 = two.sqrt();

        Constants {
            pi,
            e,
            ln2,
            ln10,
            log2e: ln2.recip(),
            log10e: ln10.recip(),
            pi_2: pi.ldexp(-1),
            pi_3: pi / 3,
            pi_4: pi.ldexp(-2),
            tau: pi.ldexp(1),
            frac_1_pi,
            frac_2_pi: frac_1_pi.ldexp(1),
            frac_2_sqrt_pi: pi.sqrt().recip().ldexp(1),
            sqrt2,
            sqrt3: Real::from_u64(3).sqrt(),
            sqrt1_2: sqrt2.ldexp(-1),
        }
    }

    /// Computes pi with Machin's formula: 16 atan(1/5) - 4 atan(1/239).
    fn machin_pi() -> Real<LIMBS> {
        let mut ret = Real::<LIMBS>::zero(false);
        let mut x0 = Real::<LIMBS>::from_u64(5);
        let mut x1 = Real::<LIMBS>::from_u64(239);
        let m0 = Real::<LIMBS>::from_i64(-5 * 5);
        let m1 = Real::<LIMBS>::from_i64(-239 * 239);
        let sixteen = Real::<LIMBS>::from_u64(16);
        let four = Real::<LIMBS>::from_u64(4);

        for i in (1..4 * Real::<LIMBS>::TOTAL_BITS as i64).step_by(2) {
            let next = ret + sixteen / (x0 * i) - four / (x1 * i);
            if next == ret {
                break;
            }
            ret = next;
            x0 *= m0;
            x1 *= m1;
        }
        ret
    }
}

macro_rules! declare_constant {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Self {
            Constants::<LIMBS>::get().$name
        }
    };
}

impl<const LIMBS: usize> Real<LIMBS> {
    declare_constant!(pi, "Returns pi.");
    declare_constant!(e, "Returns Euler's number e.");
    declare_constant!(ln2, "Returns log(2).");
    declare_constant!(ln10, "Returns log(10).");
    declare_constant!(log2e, "Returns log2(e).");
    declare_constant!(log10e, "Returns log10(e).");
    declare_constant!(pi_2, "Returns pi/2.");
    declare_constant!(pi_3, "Returns pi/3.");
    declare_constant!(pi_4, "Returns pi/4.");
    declare_constant!(tau, "Returns 2*pi.");
    declare_constant!(frac_1_pi, "Returns 1/pi.");
    declare_constant!(frac_2_pi, "Returns 2/pi.");
    declare_constant!(frac_2_sqrt_pi, "Returns 2/sqrt(pi).");
    declare_constant!(sqrt2, "Returns sqrt(2).");
    declare_constant!(sqrt3, "Returns sqrt(3).");
    declare_constant!(sqrt1_2, "Returns sqrt(1/2).");
}

#[test]
fn test_constants_native() {
    use crate::Real128;
    use std::f64::consts;

    let cases = [
        (Real128::pi(), consts::PI),
        (Real128::e(), consts::E),
        (Real128::ln2(), consts::LN_2),
        (Real128::ln10(), consts::LN_10),
        (Real128::log2e(), consts::LOG2_E),
        (Real128::log10e(), consts::LOG10_E),
        (Real128::pi_2(), consts::FRAC_PI_2),
        (Real128::pi_3(), consts::FRAC_PI_3),
        (Real128::pi_4(), consts::FRAC_PI_4),
        (Real128::tau(), consts::TAU),
        (Real128::frac_1_pi(), consts::FRAC_1_PI),
        (Real128::frac_2_pi(), consts::FRAC_2_PI),
        (Real128::frac_2_sqrt_pi(), consts::FRAC_2_SQRT_PI),
        (Real128::sqrt2(), consts::SQRT_2),
        (Real128::sqrt3(), 1.7320508075688772),
        (Real128::sqrt1_2(), consts::FRAC_1_SQRT_2),
    ];
    for (i, (val, expected)) in cases.iter().enumerate() {
        assert_eq!(val.as_f64(), *expected, "constant #{}", i);
    }
    assert_eq!(Real128::pi().as_f32(), std::f32::consts::PI);
}

#[test]
fn test_constants_full_precision() {
    use crate::utils::near;
    use crate::Real512;

    // Verify the digits with:
    // from mpmath import mp
    // mp.dps = 170
    // mp.nstr(mp.pi, 160)
    let pi: Real512 = "3.141592653589793238462643383279502884197169399375105820974944592307\
                       8164062862089986280348253421170679821480865132823066470938446095505\
                       8223172535940812848111745"
        .parse()
        .unwrap();
    let e: Real512 = "2.718281828459045235360287471352662497757247093699959574966967627724\
                      0766303535475945713821785251664274274663919320030599218174135966290\
                      43572900334295260595630738"
        .parse()
        .unwrap();
    let bits = Real512::TOTAL_BITS - 16;
    assert!(near(&Real512::pi(), &pi, bits));
    assert!(near(&Real512::e(), &e, bits));

    // Identities between the constants.
    let one = Real512::one(false);
    let two = Real512::from(2);
    assert!(near(&(Real512::ln2() * Real512::log2e()), &one, bits));
    assert!(near(&(Real512::sqrt2() * Real512::sqrt2()), &two, bits));
    assert!(near(&(Real512::sqrt3() * Real512::sqrt3()), &Real512::from(3), bits));
    assert!(near(&(Real512::pi_3() * 3), &pi, bits));
    assert!(near(&Real512::one(false).exp(), &e, bits));
    assert!(near(&Real512::from(10).log(), &Real512::ln10(), bits));
}

#[test]
fn test_constants_registry() {
    use std::thread;

    // Every precision has its own table, built once.
    let a = Constants::<6>::get() as *const Constants<6>;
    let b = Constants::<6>::get() as *const Constants<6>;
    assert_eq!(a, b);
    assert_eq!(Real::<6>::pi().as_f64(), std::f64::consts::PI);
    assert_eq!(Real::<7>::pi().as_f64(), std::f64::consts::PI);

    // Concurrent first access agrees on a single table.
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| Constants::<9>::get() as *const Constants<9> as usize))
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.iter().all(|&p| p == addresses[0]));
}
