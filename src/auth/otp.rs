use rand::{rngs::OsRng, Rng};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// How long a verification code stays valid after generation.
pub const CODE_TTL: Duration = Duration::minutes(10);

/// Generate a one-time verification code: six decimal digits, uniform over
/// [100000, 999999]. `OsRng` because the code is a bearer credential for
/// proving mailbox ownership.
pub fn generate_code() -> String {
    OsRng.gen_range(100_000..=999_999).to_string()
}

/// Absolute expiry instant for a code generated now.
pub fn code_expiry(now: OffsetDateTime) -> OffsetDateTime {
    now + CODE_TTL
}

/// Validate a submitted code against the stored one.
///
/// The match is checked before the expiry so a wrong code never reveals
/// whether a live code exists for the account.
pub fn check_code(
    stored: &str,
    submitted: &str,
    expiry: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), AuthError> {
    if stored != submitted {
        return Err(AuthError::CodeInvalid);
    }
    if now > expiry {
        return Err(AuthError::CodeExpired);
    }
    Ok(())
}
