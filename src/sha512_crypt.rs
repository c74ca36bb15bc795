//! SHA-512 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed as an alternative to bcrypt
//! with NIST-approved hashing functions. It is similar to
//! MD5-crypt, but has a variable number of rounds and a larger
//! salt.
//!
//! # Example
//!
//! ```
//! use cryptid::function::Function;
//! use cryptid::sha512_crypt::Sha512Crypt;
//!
//! let digest = Sha512Crypt.hash(b"test", b"rTnE1VTfjNYkoY0k", 1000).unwrap();
//! assert_eq!(
//!     &digest[..],
//!     &b"k1YwHXQXAysWwIPpmQ2EvDjs62.Hqdh2yv8b0qbvR/.myAiOM5olqJdN.wvGk0zkIgGzSwIOIEKuEjX7OBOtX/"[..]
//! );
//! ```
//!
//! # Parameters
//!
//! * __Salt length__: 1 to 16 characters, anything except `$`, `:` and
//!   newline. Generated salts use the crypt Base64 alphabet.
//!
//! * __Rounds__: 1000 to 999999999. Default is 5000.
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$6$rounds=`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 86-character Base64 encoding of the checksum.
//!
//! The format __`$6$`__*`{salt}`*__$__*`{checksum}`* is accepted on input
//! and selects the default number of rounds.

use rand::RngCore;
use sha2::Sha512;

use crate::b64;
use crate::function::{Components, Function};
use crate::sha2_crypt;
use crate::Result;

pub use crate::sha2_crypt::COST_MAX;
pub use crate::sha2_crypt::COST_MIN;
pub use crate::sha2_crypt::DEFAULT_COST;
pub use crate::sha2_crypt::SALT_MAX_LEN;

/// The function identifier.
pub const ID: &str = "sha512crypt";

const PREFIX: &str = "$6$";
const DIGEST_LEN: usize = 86;

/// The sha512crypt hash function.
#[derive(Debug, Default)]
pub struct Sha512Crypt;

impl Function for Sha512Crypt {
    fn hash(&self, key: &[u8], salt: &[u8], cost: u64) -> Result<Vec<u8>> {
        let sum = sha2_crypt::sha2_sum::<Sha512>(ID, key, salt, cost)?;
        let mut out = Vec::with_capacity(DIGEST_LEN + 2);
        for i in (0..=18).step_by(3) {
            out.extend_from_slice(&b64::encode_bytes(sum[i], sum[i + 21], sum[i + 42]));
            out.extend_from_slice(&b64::encode_bytes(sum[i + 22], sum[i + 43], sum[i + 1]));
            out.extend_from_slice(&b64::encode_bytes(sum[i + 44], sum[i + 2], sum[i + 23]));
        }
        out.extend_from_slice(&b64::encode_bytes(0, 0, sum[63]));
        out.truncate(DIGEST_LEN);
        Ok(out)
    }

    fn parse(&self, encoded: &str) -> Result<Components> {
        sha2_crypt::parse_sha2(ID, encoded, PREFIX, DIGEST_LEN)
    }

    fn format(&self, digest: &[u8], salt: &[u8], cost: u64) -> String {
        format!(
            "{}rounds={}${}${}",
            PREFIX,
            cost,
            String::from_utf8_lossy(salt),
            String::from_utf8_lossy(digest)
        )
    }

    fn id(&self) -> &'static str {
        ID
    }

    fn default_cost(&self) -> u64 {
        DEFAULT_COST
    }

    fn generate_salt(&self, rng: &mut dyn RngCore) -> Result<Vec<u8>> {
        b64::generate_salt(ID, SALT_MAX_LEN, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const HASHCAT_DIGEST: &[u8] =
        b"k5ka2p8bFuSmoVT1tzOyyuaREkkKBcCNqoDKzYiJL9RaE8yMnPgh2XzzF0NDrUhgrcLwg78xs1w5pJiypEdFX/";

    #[test]
    fn known_digest() {
        // mkpasswd vector
        let digest = Sha512Crypt.hash(b"test", b"rTnE1VTfjNYkoY0k", 1000).unwrap();
        assert_eq!(
            &digest[..],
            &b"k1YwHXQXAysWwIPpmQ2EvDjs62.Hqdh2yv8b0qbvR/.myAiOM5olqJdN.wvGk0zkIgGzSwIOIEKuEjX7OBOtX/"[..]
        );
    }

    #[test]
    fn parse_default_rounds() {
        // https://hashcat.net/wiki/doku.php?id=example_hashes
        let encoded = format!(
            "$6$52450745${}",
            std::str::from_utf8(HASHCAT_DIGEST).unwrap()
        );
        let parsed = Sha512Crypt.parse(&encoded).unwrap();
        assert_eq!(parsed.digest, HASHCAT_DIGEST);
        assert_eq!(parsed.salt, b"52450745");
        assert_eq!(parsed.cost, DEFAULT_COST);
    }

    #[test]
    fn parse_with_rounds() {
        let encoded = format!(
            "$6$rounds=2000$JW6v18EWXm7n8HKc${}",
            std::str::from_utf8(HASHCAT_DIGEST).unwrap()
        );
        let parsed = Sha512Crypt.parse(&encoded).unwrap();
        assert_eq!(parsed.salt, b"JW6v18EWXm7n8HKc");
        assert_eq!(parsed.cost, 2000);
    }

    #[test]
    fn parse_rejects_wrong_digest_length() {
        // a 43-character digest belongs to the $5$ scheme
        assert!(matches!(
            Sha512Crypt
                .parse("$6$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD"),
            Err(Error::Encoded { .. })
        ));
    }

    #[test]
    fn format_inverts_parse() {
        let encoded = format!(
            "$6$rounds=2000$JW6v18EWXm7n8HKc${}",
            std::str::from_utf8(HASHCAT_DIGEST).unwrap()
        );
        let parsed = Sha512Crypt.parse(&encoded).unwrap();
        assert_eq!(
            Sha512Crypt.format(&parsed.digest, &parsed.salt, parsed.cost),
            encoded
        );
    }

    #[test]
    fn cost_bounds() {
        assert!(matches!(
            Sha512Crypt.hash(b"test", b"rTnE1VTfjNYkoY0k", 999),
            Err(Error::Cost { function: ID, .. })
        ));
    }
}
