//! SHA-256 based hash.
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
//! use cryptid::sha256_crypt::Sha256Crypt;
//!
//! let digest = Sha256Crypt.hash(b"foo", b"IDRkfIy1SYTbgI6X", 1000).unwrap();
//! assert_eq!(digest, b"KNHIuiRy7ZcBnFp0/OzMx0DkFoM6M2AFrdU../DzdU7");
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
//! __`$5$rounds=`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 43-character Base64 encoding of the checksum.
//!
//! The format __`$5$`__*`{salt}`*__$__*`{checksum}`* is accepted on input
//! and selects the default number of rounds.

use rand::RngCore;
use sha2::Sha256;

use crate::b64;
use crate::function::{Components, Function};
use crate::sha2_crypt;
use crate::Result;

pub use crate::sha2_crypt::COST_MAX;
pub use crate::sha2_crypt::COST_MIN;
pub use crate::sha2_crypt::DEFAULT_COST;
pub use crate::sha2_crypt::SALT_MAX_LEN;

/// The function identifier.
pub const ID: &str = "sha256crypt";

const PREFIX: &str = "$5$";
const DIGEST_LEN: usize = 43;

/// The sha256crypt hash function.
#[derive(Debug, Default)]
pub struct Sha256Crypt;

impl Function for Sha256Crypt {
    fn hash(&self, key: &[u8], salt: &[u8], cost: u64) -> Result<Vec<u8>> {
        let sum = sha2_crypt::sha2_sum::<Sha256>(ID, key, salt, cost)?;
        let mut out = Vec::with_capacity(DIGEST_LEN + 1);
        for (a, b, c) in [
            (sum[0], sum[10], sum[20]),
            (sum[21], sum[1], sum[11]),
            (sum[12], sum[22], sum[2]),
            (sum[3], sum[13], sum[23]),
            (sum[24], sum[4], sum[14]),
            (sum[15], sum[25], sum[5]),
            (sum[6], sum[16], sum[26]),
            (sum[27], sum[7], sum[17]),
            (sum[18], sum[28], sum[8]),
            (sum[9], sum[19], sum[29]),
            (0, sum[31], sum[30]),
        ] {
            out.extend_from_slice(&b64::encode_bytes(a, b, c));
        }
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

    #[test]
    fn known_digests() {
        // mkpasswd vectors
        assert_eq!(
            Sha256Crypt.hash(b"foo", b"IDRkfIy1SYTbgI6X", 1000).unwrap(),
            b"KNHIuiRy7ZcBnFp0/OzMx0DkFoM6M2AFrdU../DzdU7"
        );
        assert_eq!(
            Sha256Crypt.hash(b"abiglongpassword", b"7zOLT9IhFoUT6hgU", 9999).unwrap(),
            b"2Kx5z3lnIZGhjzMd2UKKN9SVxQjLy3wd5x.X00uEoo6"
        );
    }

    #[test]
    fn parse_with_rounds() {
        let parsed = Sha256Crypt
            .parse("$5$rounds=5000$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD")
            .unwrap();
        assert_eq!(parsed.digest, b"le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD");
        assert_eq!(parsed.salt, b"GX7BopJZJxPc/KEK");
        assert_eq!(parsed.cost, 5000);
    }

    #[test]
    fn parse_default_rounds() {
        let parsed = Sha256Crypt
            .parse("$5$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD")
            .unwrap();
        assert_eq!(parsed.cost, DEFAULT_COST);
    }

    #[test]
    fn two_field_form_takes_rounds_token_as_salt() {
        let parsed = Sha256Crypt
            .parse("$5$rounds=12$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD")
            .unwrap();
        assert_eq!(parsed.salt, b"rounds=12");
        assert_eq!(parsed.cost, DEFAULT_COST);
    }

    #[test]
    fn parse_rejects_malformed() {
        for encoded in [
            "$5$rounds=05000$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD",
            "$5$rounds=5$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD",
            "$5$iterations=5000$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD",
            "$5$GX7BopJZJxPc/KEKx$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD",
            "$5$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGc",
            "$6$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD",
        ] {
            assert!(
                matches!(Sha256Crypt.parse(encoded), Err(Error::Encoded { .. })),
                "accepted {encoded:?}"
            );
        }
    }

    #[test]
    fn format_inverts_parse() {
        let encoded =
            "$5$rounds=9999$7zOLT9IhFoUT6hgU$2Kx5z3lnIZGhjzMd2UKKN9SVxQjLy3wd5x.X00uEoo6";
        let parsed = Sha256Crypt.parse(encoded).unwrap();
        assert_eq!(
            Sha256Crypt.format(&parsed.digest, &parsed.salt, parsed.cost),
            encoded
        );
    }

    #[test]
    fn cost_bounds() {
        assert!(matches!(
            Sha256Crypt.hash(b"foo", b"IDRkfIy1SYTbgI6X", 999),
            Err(Error::Cost { .. })
        ));
        assert!(matches!(
            Sha256Crypt.hash(b"foo", b"IDRkfIy1SYTbgI6X", 1_000_000_000),
            Err(Error::Cost { .. })
        ));
    }

    #[test]
    fn salt_bounds() {
        assert!(matches!(
            Sha256Crypt.hash(b"foo", b"IDRkfIy1SYTbgI6Xx", 5000),
            Err(Error::SaltLength { .. })
        ));
    }
}
