use std::fmt;

/// A rational number as stored in EXIF `RATIONAL` / `SRATIONAL` entries.
///
/// The denominator may be zero when a camera writes a placeholder; such
/// values are kept as-is and reported by [`Ratio::is_finite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub num: i64,
    pub den: i64,
}

impl Ratio {
    pub fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    pub fn is_finite(self) -> bool {
        self.den != 0
    }

    /// Lowest terms with a positive denominator. Zero denominators are left alone.
    pub fn reduced(self) -> Self {
        if self.den == 0 {
            return self;
        }
        let divisor = gcd(self.num.unsigned_abs(), self.den.unsigned_abs()) as i64;
        let (mut num, mut den) = (self.num / divisor, self.den / divisor);
        if den < 0 {
            num = -num;
            den = -den;
        }
        Self { num, den }
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Integer part, truncated toward zero.
    pub fn trunc(self) -> Option<i64> {
        self.is_finite().then(|| self.num / self.den)
    }

    /// Last continued-fraction convergent of `value` whose denominator does
    /// not exceed `max_den`.
    pub fn approximate(value: f64, max_den: i64) -> Option<Self> {
        if !value.is_finite() || max_den < 1 {
            return None;
        }

        let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
        let mut x = value;
        loop {
            let whole = x.floor();
            let a = whole as i64;
            let Some(q2) = a.checked_mul(q1).and_then(|v| v.checked_add(q0)) else {
                break;
            };
            if q2 > max_den {
                break;
            }
            let Some(p2) = a.checked_mul(p1).and_then(|v| v.checked_add(p0)) else {
                break;
            };
            (p0, q0, p1, q1) = (p1, q1, p2, q2);

            let rest = x - whole;
            if rest < 1e-12 {
                break;
            }
            x = 1.0 / rest;
        }

        (q1 != 0).then(|| Self::new(p1, q1))
    }

    /// `num/den` in lowest terms, e.g. `1/200`.
    pub fn to_fraction_string(self) -> String {
        let r = self.reduced();
        format!("{}/{}", r.num, r.den)
    }
}

/// Decimal form: integral values print without a fractional part (`2`),
/// everything else as the shortest float that round-trips (`2.8`).
impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.reduced();
        if r.den == 1 {
            write!(f, "{}", r.num)
        } else {
            write!(f, "{}", r.to_f64())
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}
