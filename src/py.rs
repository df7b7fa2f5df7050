use crate::{ParseRealError, Real512};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<ParseRealError> for PyErr {
    fn from(err: ParseRealError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// A class representing real numbers with 512 bits of mantissa.
///
/// Arithmetic truncates toward zero, and invalid results (such as the square
/// root of a negative number) are NaN values that propagate.
#[pyclass]
struct PyReal {
    inner: Real512,
}

impl PyReal {
    fn wrap(inner: Real512) -> PyReal {
        PyReal { inner }
    }
}

#[pymethods]
impl PyReal {
    /// Create a new number from a string.
    ///
    /// Args:
    ///     value: A decimal number such as "-1.5e3", a hex number such as
    ///         "0x1.8p3", "inf" or "nan".
    #[new]
    fn new(value: &str) -> PyResult<Self> {
        Ok(PyReal::wrap(Real512::try_from_str(value)?))
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        self.inner.to_hex_string()
    }
    /// Returns the number as a decimal string with 'digits' digits.
    fn to_string_with_digits(&self, digits: usize) -> String {
        self.inner.to_string_with_digits(digits)
    }
    /// Returns the exact hexadecimal form of the number.
    fn hex(&self) -> String {
        self.inner.to_hex_string()
    }
    /// Returns the unbiased binary exponent of the number.
    fn get_exponent(&self) -> i64 {
        self.inner.get_exp()
    }
    /// Returns the category of the number.
    fn get_category(&self) -> String {
        format!("{:?}", self.inner.get_category())
    }
    /// Returns true if the number is negative
    fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }
    /// Returns true if the number is +-inf.
    fn is_inf(&self) -> bool {
        self.inner.is_inf()
    }
    /// Returns true if the number is a NaN.
    fn is_nan(&self) -> bool {
        self.inner.is_nan()
    }
    /// Returns true if the number is a +- zero.
    fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }
    /// Returns true if this number is normal (not Zero, Nan, Inf).
    fn is_normal(&self) -> bool {
        self.inner.is_normal()
    }

    fn __add__(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner + other.inner)
    }
    fn __sub__(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner - other.inner)
    }
    fn __mul__(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner * other.inner)
    }
    fn __truediv__(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner / other.inner)
    }
    /// Returns the truncating remainder of the division.
    fn __mod__(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner % other.inner)
    }
    fn __neg__(&self) -> PyReal {
        PyReal::wrap(self.inner.neg())
    }
    fn __abs__(&self) -> PyReal {
        PyReal::wrap(self.inner.abs())
    }
    fn __pow__(&self, exp: &PyReal, _modulo: Option<u64>) -> PyReal {
        PyReal::wrap(self.inner.pow(&exp.inner))
    }
    fn __lt__(&self, other: &PyReal) -> bool {
        self.inner < other.inner
    }
    fn __le__(&self, other: &PyReal) -> bool {
        self.inner <= other.inner
    }
    fn __eq__(&self, other: &PyReal) -> bool {
        self.inner == other.inner
    }
    fn __ne__(&self, other: &PyReal) -> bool {
        self.inner != other.inner
    }
    fn __gt__(&self, other: &PyReal) -> bool {
        self.inner > other.inner
    }
    fn __ge__(&self, other: &PyReal) -> bool {
        self.inner >= other.inner
    }
    fn __float__(&self) -> f64 {
        self.inner.as_f64()
    }

    /// Returns the number raised to the power of `exp` which is an integer.
    fn powi(&self, exp: i64) -> PyReal {
        PyReal::wrap(self.inner.powi(exp))
    }
    /// Returns the number raised to the power of `exp`.
    fn pow(&self, exp: &PyReal) -> PyReal {
        PyReal::wrap(self.inner.pow(&exp.inner))
    }
    /// Returns the square root of the number.
    fn sqrt(&self) -> PyReal {
        PyReal::wrap(self.inner.sqrt())
    }
    /// Returns the cube root of the number.
    fn cbrt(&self) -> PyReal {
        PyReal::wrap(self.inner.cbrt())
    }
    /// Returns the exponential of the number.
    fn exp(&self) -> PyReal {
        PyReal::wrap(self.inner.exp())
    }
    /// Returns 2 raised to the power of the number.
    fn exp2(&self) -> PyReal {
        PyReal::wrap(self.inner.exp2())
    }
    /// Returns the natural logarithm of the number.
    fn log(&self) -> PyReal {
        PyReal::wrap(self.inner.log())
    }
    /// Returns the base-2 logarithm of the number.
    fn log2(&self) -> PyReal {
        PyReal::wrap(self.inner.log2())
    }
    /// Returns the base-10 logarithm of the number.
    fn log10(&self) -> PyReal {
        PyReal::wrap(self.inner.log10())
    }
    /// Returns the sine of the number.
    fn sin(&self) -> PyReal {
        PyReal::wrap(self.inner.sin())
    }
    /// Returns the cosine of the number.
    fn cos(&self) -> PyReal {
        PyReal::wrap(self.inner.cos())
    }
    /// Returns the tangent of the number.
    fn tan(&self) -> PyReal {
        PyReal::wrap(self.inner.tan())
    }
    /// Returns the arcsine of the number.
    fn asin(&self) -> PyReal {
        PyReal::wrap(self.inner.asin())
    }
    /// Returns the arccosine of the number.
    fn acos(&self) -> PyReal {
        PyReal::wrap(self.inner.acos())
    }
    /// Returns the arctangent of the number.
    fn atan(&self) -> PyReal {
        PyReal::wrap(self.inner.atan())
    }
    /// Returns the four quadrant arctangent of self / x.
    fn atan2(&self, x: &PyReal) -> PyReal {
        PyReal::wrap(self.inner.atan2(&x.inner))
    }
    /// Returns the hyperbolic sine of the number.
    fn sinh(&self) -> PyReal {
        PyReal::wrap(self.inner.sinh())
    }
    /// Returns the hyperbolic cosine of the number.
    fn cosh(&self) -> PyReal {
        PyReal::wrap(self.inner.cosh())
    }
    /// Returns the hyperbolic tangent of the number.
    fn tanh(&self) -> PyReal {
        PyReal::wrap(self.inner.tanh())
    }
    /// Returns the gamma function of the number.
    fn gamma(&self) -> PyReal {
        PyReal::wrap(self.inner.gamma())
    }
    /// Rounds toward negative infinity.
    fn floor(&self) -> PyReal {
        PyReal::wrap(self.inner.floor())
    }
    /// Rounds toward positive infinity.
    fn ceil(&self) -> PyReal {
        PyReal::wrap(self.inner.ceil())
    }
    /// Rounds to the nearest integer.
    fn round(&self) -> PyReal {
        PyReal::wrap(self.inner.round())
    }
    /// Returns self - round(self / y) * y.
    fn fmod(&self, y: &PyReal) -> PyReal {
        PyReal::wrap(self.inner.fmod(&y.inner))
    }
    /// Returns the maximum of two numbers.
    fn max(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner.max(&other.inner))
    }
    /// Returns the minimum of two numbers.
    fn min(&self, other: &PyReal) -> PyReal {
        PyReal::wrap(self.inner.min(&other.inner))
    }
    /// convert to f64.
    fn to_float64(&self) -> f64 {
        self.inner.as_f64()
    }
} // impl PyReal

/// Returns the mathematical constant pi.
#[pyfunction]
fn pi() -> PyReal {
    PyReal::wrap(Real512::pi())
}

/// Returns the mathematical constant e (Euler's number).
#[pyfunction]
fn e() -> PyReal {
    PyReal::wrap(Real512::e())
}

/// Returns the natural logarithm of 2 (ln(2)).
#[pyfunction]
fn ln2() -> PyReal {
    PyReal::wrap(Real512::ln2())
}

/// Returns a new number with the integer value 'val'.
#[pyfunction]
fn from_i64(val: i64) -> PyReal {
    PyReal::wrap(Real512::from_i64(val))
}

/// Returns a new number with the fp64 value 'val'.
#[pyfunction]
fn from_fp64(val: f64) -> PyReal {
    PyReal::wrap(Real512::from_f64(val))
}

/// Franke's bivariate test function.
#[pyfunction]
fn franke(x: &PyReal, y: &PyReal) -> PyReal {
    PyReal::wrap(Real512::franke(&x.inner, &y.inner))
}

/// Matlab's peaks function.
#[pyfunction]
fn peaks(x: &PyReal, y: &PyReal) -> PyReal {
    PyReal::wrap(Real512::peaks(&x.inner, &y.inner))
}

#[pymodule]
fn _limbreal(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyReal>()?;

    // Add the functions to the module
    m.add_function(wrap_pyfunction!(pi, m)?)?;
    m.add_function(wrap_pyfunction!(e, m)?)?;
    m.add_function(wrap_pyfunction!(ln2, m)?)?;
    m.add_function(wrap_pyfunction!(from_i64, m)?)?;
    m.add_function(wrap_pyfunction!(from_fp64, m)?)?;
    m.add_function(wrap_pyfunction!(franke, m)?)?;
    m.add_function(wrap_pyfunction!(peaks, m)?)?;
    Ok(())
}
