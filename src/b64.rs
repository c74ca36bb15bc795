//! The crypt(3) flavour of Base64.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Not the RFC 4648 encoding: the alphabet starts with `.` and `/`, and each
//! group of three bytes is emitted least significant six bits first. Reusing
//! a standard Base64 routine produces wrong digests.

use rand::RngCore;

use crate::error::Error;
use crate::Result;

/// The 64-character alphabet, in encoding order.
pub const CHARSET: &[u8; 64] =
    b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode three bytes into four characters.
///
/// The bytes are packed into a 24-bit group which is emitted low six bits
/// first, so `a` supplies the most significant bits of the group but the
/// last output character.
pub fn encode_bytes(a: u8, b: u8, c: u8) -> [u8; 4] {
    let mut n = (u32::from(a) << 16) | (u32::from(b) << 8) | u32::from(c);
    let mut out = [0u8; 4];
    for ch in &mut out {
        *ch = CHARSET[(n & 0x3F) as usize];
        n >>= 6;
    }
    out
}

/// Returns `true` if `c` is a character of the crypt Base64 alphabet.
pub fn in_alphabet(c: u8) -> bool {
    matches!(c, b'.' | b'/' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z')
}

/// Generate `len` salt characters from `rng`.
///
/// `len` must be a multiple of four; `3 * len / 4` bytes are drawn from the
/// entropy source and encoded in three-byte groups. Errors are reported
/// under the identifier of the calling `function`.
pub fn generate_salt(
    function: &'static str,
    len: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<u8>> {
    if len % 4 != 0 {
        return Err(Error::Internal {
            function,
            message: format!("salt length {len} is not a multiple of four"),
        });
    }
    let mut raw = vec![0u8; len / 4 * 3];
    rng.try_fill_bytes(&mut raw).map_err(|e| Error::Internal {
        function,
        message: format!("entropy source failed: {e}"),
    })?;
    let mut salt = Vec::with_capacity(len);
    for group in raw.chunks_exact(3) {
        salt.extend_from_slice(&encode_bytes(group[0], group[1], group[2]));
    }
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn low_bits_first() {
        assert_eq!(&encode_bytes(0, 0, 0), b"....");
        assert_eq!(&encode_bytes(0, 0, 1), b"/...");
        assert_eq!(&encode_bytes(0, 0, 63), b"z...");
        // bit 18 lands in the last output character
        assert_eq!(&encode_bytes(4, 0, 0), b".../");
        assert_eq!(&encode_bytes(0xFF, 0xFF, 0xFF), b"zzzz");
    }

    #[test]
    fn alphabet() {
        assert!(CHARSET.iter().all(|&c| in_alphabet(c)));
        assert!(!in_alphabet(b'$'));
        assert!(!in_alphabet(b':'));
        assert!(!in_alphabet(b'\n'));
        assert!(!in_alphabet(b'+'));
    }

    #[test]
    fn salt_length_and_closure() {
        let mut rng = StepRng::new(0xDEAD_BEEF_0BAD_CAFE, 0x1234_5678_9ABC_DEF1);
        for len in [8, 16, 64] {
            let salt = generate_salt("test", len, &mut rng).unwrap();
            assert_eq!(salt.len(), len);
            assert!(salt.iter().all(|&c| in_alphabet(c)));
        }
    }

    #[test]
    fn salt_length_must_be_divisible_by_four() {
        let mut rng = StepRng::new(0, 1);
        assert!(matches!(
            generate_salt("test", 6, &mut rng),
            Err(Error::Internal { function: "test", .. })
        ));
    }

    #[test]
    fn salt_is_deterministic_for_a_fixed_rng() {
        let a = generate_salt("test", 16, &mut StepRng::new(42, 7)).unwrap();
        let b = generate_salt("test", 16, &mut StepRng::new(42, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn entropy_failure_is_surfaced() {
        struct FailingRng;
        impl RngCore for FailingRng {
            fn next_u32(&mut self) -> u32 {
                0
            }
            fn next_u64(&mut self) -> u64 {
                0
            }
            fn fill_bytes(&mut self, _dest: &mut [u8]) {}
            fn try_fill_bytes(
                &mut self,
                _dest: &mut [u8],
            ) -> std::result::Result<(), rand::Error> {
                Err(rand::Error::new("entropy source unavailable"))
            }
        }
        assert!(matches!(
            generate_salt("test", 8, &mut FailingRng),
            Err(Error::Internal { function: "test", .. })
        ));
    }
}
