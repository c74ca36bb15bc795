//! HMAC-SHA1 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed for NetBSD. It's a modern
//! algorithm with a large salt and a variable number of rounds.
//! Although the SHA-1 hash, on which it's based, is considered
//! insecure and is being phased out in the PKI environment, its
//! use in a HMAC setup, as is the case here, is still acceptable.
//!
//! # Example
//!
//! ```
//! use cryptid::function::Function;
//! use cryptid::sha1_crypt::Sha1Crypt;
//!
//! let digest = Sha1Crypt.hash(b"password", b"wnUR8T1U", 64000).unwrap();
//! assert_eq!(digest, b"vt1TFQ50tBMFgkflAFAOer2CwdYZ");
//! ```
//!
//! # Parameters
//!
//! * __Salt length__: 1 to 64 characters of the crypt Base64 alphabet.
//!
//! * __Rounds__: 1 to 2<sup>32</sup>-1. Default is 2<sup>18</sup>.
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$sha1$`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 28-character Base64 encoding of the checksum.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;

use crate::b64;
use crate::error::Error;
use crate::function::{Components, Function, KEY_MAX};
use crate::parse;
use crate::Result;

type HmacSha1 = Hmac<Sha1>;

/// The function identifier.
pub const ID: &str = "sha1crypt";
/// Maximum salt length.
pub const SALT_MAX_LEN: usize = 64;
/// Minimum number of rounds.
pub const COST_MIN: u64 = 1;
/// Maximum number of rounds.
pub const COST_MAX: u64 = (1 << 32) - 1;
/// Default number of rounds for newly generated hashes.
pub const DEFAULT_COST: u64 = 1 << 18;

const PREFIX: &str = "$sha1$";
const SUM_LEN: usize = 20;
const DIGEST_LEN: usize = 28;

/// The sha1crypt hash function.
#[derive(Debug, Default)]
pub struct Sha1Crypt;

fn keyed(key: &[u8]) -> Result<HmacSha1> {
    HmacSha1::new_from_slice(key)
        .map_err(|e| Error::Internal { function: ID, message: e.to_string() })
}

impl Function for Sha1Crypt {
    fn hash(&self, key: &[u8], salt: &[u8], cost: u64) -> Result<Vec<u8>> {
        if key.len() > KEY_MAX {
            return Err(Error::KeyLength { function: ID, max: KEY_MAX });
        }
        if salt.len() > SALT_MAX_LEN {
            return Err(Error::SaltLength { function: ID, max: SALT_MAX_LEN });
        }
        if !(COST_MIN..=COST_MAX).contains(&cost) {
            return Err(Error::Cost { function: ID, min: COST_MIN, max: COST_MAX });
        }

        let mut mac = keyed(key)?;
        mac.update(salt);
        mac.update(PREFIX.as_bytes());
        mac.update(cost.to_string().as_bytes());
        let mut sum = mac.finalize().into_bytes();
        for _ in 1..cost {
            let mut mac = keyed(key)?;
            mac.update(&sum);
            sum = mac.finalize().into_bytes();
        }

        let mut out = Vec::with_capacity(DIGEST_LEN);
        for i in (0..SUM_LEN - 3).step_by(3) {
            out.extend_from_slice(&b64::encode_bytes(sum[i], sum[i + 1], sum[i + 2]));
        }
        out.extend_from_slice(&b64::encode_bytes(sum[SUM_LEN - 2], sum[SUM_LEN - 1], sum[0]));
        Ok(out)
    }

    fn parse(&self, encoded: &str) -> Result<Components> {
        let fields =
            parse::fields_after(encoded, PREFIX).ok_or(Error::Encoded { function: ID })?;
        match fields[..] {
            [cost, salt, digest]
                if parse::b64_salt_ok(salt, SALT_MAX_LEN)
                    && parse::digest_ok(digest, DIGEST_LEN) =>
            {
                let cost = parse::parse_cost(cost).ok_or(Error::Encoded { function: ID })?;
                Ok(Components { digest: digest.to_vec(), salt: salt.to_vec(), cost })
            }
            _ => Err(Error::Encoded { function: ID }),
        }
    }

    fn format(&self, digest: &[u8], salt: &[u8], cost: u64) -> String {
        format!(
            "{}{}${}${}",
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
