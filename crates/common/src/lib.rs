pub mod field;

pub use field::{gcd, is_prime, mod_inverse, Field, FieldError, InversionPolicy};

/// The default base-field modulus. Prime; its companion exponent-field
/// modulus is `DEFAULT_PRIME - 1 = 1_234_576`.
pub const DEFAULT_PRIME: u64 = 1_234_577;
