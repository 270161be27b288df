//! Modular residue arithmetic for the two calculator fields.
//!
//! Expression values live in the base field mod P (prime), exponents in the
//! companion ring mod P−1 (composite in general). Both are served by the
//! same [`Field`] type; only the division path differs, captured by the
//! [`InversionPolicy`] the field is constructed with:
//!
//! - `Prime`: every nonzero residue is invertible, so division only has to
//!   reject a zero divisor.
//! - `Composite`: the fraction is first reduced to lowest terms by
//!   `gcd(a, b)`, then the reduced denominator must be coprime with the
//!   modulus for an inverse to exist.

use thiserror::Error;

/// Arithmetic failures a division can produce.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("division by 0")]
    DivisionByZero,
    /// The reduced denominator shares a nontrivial factor with the modulus.
    #[error("not invertible modulo {0}")]
    NotInvertible(u64),
}

/// How a [`Field`] decides whether a divisor is invertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionPolicy {
    /// Prime modulus: any nonzero residue has an inverse.
    Prime,
    /// Composite modulus: reduce the fraction by `gcd(a, b)`, then require
    /// the reduced denominator to be coprime with the modulus.
    Composite,
}

/// A fixed modulus together with its inversion policy.
///
/// All operations take residues in `[0, modulus)` and return residues in
/// the same range. Intermediates widen to `u128`, so any `u64` modulus is
/// safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    modulus: u64,
    policy: InversionPolicy,
}

impl Field {
    /// Field with a prime modulus.
    pub const fn prime(modulus: u64) -> Self {
        Self {
            modulus,
            policy: InversionPolicy::Prime,
        }
    }

    /// Ring with a (generally composite) modulus.
    pub const fn composite(modulus: u64) -> Self {
        Self {
            modulus,
            policy: InversionPolicy::Composite,
        }
    }

    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    pub const fn policy(&self) -> InversionPolicy {
        self.policy
    }

    /// Normalizes a signed integer into `[0, modulus)`.
    ///
    /// Negative inputs (subtraction intermediates, negated literals) wrap
    /// around by adding the modulus before the remainder is taken.
    pub const fn reduce(&self, value: i128) -> u64 {
        value.rem_euclid(self.modulus as i128) as u64
    }

    pub const fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.modulus as u128) as u64
    }

    pub const fn sub(&self, a: u64, b: u64) -> u64 {
        // Add the modulus first so the difference stays non-negative.
        ((a as u128 + self.modulus as u128 - b as u128) % self.modulus as u128) as u64
    }

    pub const fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }

    /// Additive inverse: `(modulus - a) mod modulus`.
    pub const fn neg(&self, a: u64) -> u64 {
        ((self.modulus as u128 - a as u128 % self.modulus as u128) % self.modulus as u128) as u64
    }

    /// Square-and-multiply exponentiation, `base^exp mod modulus`.
    pub const fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let m = self.modulus as u128;
        let mut base = base as u128 % m;
        let mut acc = 1 % m;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base % m;
            }
            base = base * base % m;
            exp >>= 1;
        }
        acc as u64
    }

    /// Division `a / b`, i.e. `a * b^-1 mod modulus`.
    ///
    /// ## Errors
    ///
    /// - [`FieldError::DivisionByZero`] when `b` reduces to zero.
    /// - [`FieldError::NotInvertible`] when, under the composite policy,
    ///   the denominator left after reducing the fraction to lowest terms
    ///   shares a factor with the modulus.
    pub fn div(&self, a: u64, b: u64) -> Result<u64, FieldError> {
        let b = b % self.modulus;
        if b == 0 {
            return Err(FieldError::DivisionByZero);
        }
        match self.policy {
            InversionPolicy::Prime => mod_inverse(b, self.modulus)
                .map(|inv| self.mul(a, inv))
                .ok_or(FieldError::NotInvertible(self.modulus)),
            InversionPolicy::Composite => {
                // Reduce to lowest terms before the invertibility check;
                // common factors must not count against the denominator.
                let g = gcd(a, b);
                let (a, b) = (a / g, b / g);
                if b != 1 && gcd(b, self.modulus) != 1 {
                    return Err(FieldError::NotInvertible(self.modulus));
                }
                mod_inverse(b, self.modulus)
                    .map(|inv| self.mul(a, inv))
                    .ok_or(FieldError::NotInvertible(self.modulus))
            }
        }
    }
}

/// Greatest common divisor. `gcd(0, b) == b`.
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Multiplicative inverse of `a` modulo `m`, or `None` when
/// `gcd(a, m) != 1`.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    let (g, x, _) = extended_gcd(a as i128, m as i128);
    if g != 1 {
        return None;
    }
    Some(x.rem_euclid(m as i128) as u64)
}

/// Extended Euclid: returns `(g, x, y)` with `a*x + b*y == g == gcd(a, b)`.
fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1, 0);
    let (mut old_y, mut y) = (0, 1);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }
    (old_r, old_x, old_y)
}

/// Trial-division primality test; only used to validate configuration.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
