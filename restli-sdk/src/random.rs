//! OS-backed random values for multipart boundaries.
//!
//! Boundaries only need to be unlikely to appear in the payload, but the
//! OS entropy source is cheap enough that there is no reason to use anything
//! weaker. RNG failures are returned, not panicked on.
//!
//! ```
//! use restli_sdk::random;
//!
//! let boundary = random::boundary().unwrap();
//! assert_eq!(boundary.len(), 16);
//! assert!(boundary.bytes().all(|b| b.is_ascii_alphanumeric()));
//! ```

use crate::constants::{BOUNDARY_CHARS, BOUNDARY_LEN};

/// Fill a fresh buffer with `len` random bytes.
pub fn bytes(len: usize) -> Result<Vec<u8>, getrandom::Error> {
    let mut buf = vec![0u8; len];
    getrandom::fill(&mut buf)?;
    Ok(buf)
}

/// Random lowercase base-36 string of [`BOUNDARY_LEN`] characters.
pub fn boundary() -> Result<String, getrandom::Error> {
    alphanumeric(BOUNDARY_LEN)
}

/// Random lowercase base-36 string of `len` characters.
///
/// Bytes at or above the largest multiple of 36 are discarded so every
/// character is equally likely.
pub fn alphanumeric(len: usize) -> Result<String, getrandom::Error> {
    const LIMIT: u8 = 252; // 36 * 7

    let mut out = String::with_capacity(len);
    while out.len() < len {
        for b in bytes(len)? {
            if b < LIMIT && out.len() < len {
                out.push(char::from(BOUNDARY_CHARS[usize::from(b % 36)]));
            }
        }
    }
    Ok(out)
}
