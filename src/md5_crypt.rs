//! MD5 based hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed for FreeBSD to replace the
//! aging DES crypt. It was adopted in various Linux distributions
//! and saw wide use. Presently, it's considered insecure and
//! shouldn't be used for new passwords.
//!
//! # Example
//!
//! ```
//! use cryptid::function::Function;
//! use cryptid::md5_crypt::Md5Crypt;
//!
//! let digest = Md5Crypt.hash(b"password", b"5pZSV9va", 0).unwrap();
//! assert_eq!(digest, b"azfrPr6af3Fc7dLblQXVa0");
//! ```
//!
//! # Parameters
//!
//! * __Salt length__: 1 to 8 characters, anything except `$`, `:` and
//!   newline. Generated salts use the crypt Base64 alphabet.
//!
//! * __Rounds__: 1000 (fixed); the cost argument is ignored.
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$1$`__*`{salt}`*__$__*`{checksum}`*, where *`{checksum}`* is a
//! 22-character Base64 encoding of the permuted MD5 sum.

use md5::{Digest, Md5};
use rand::RngCore;

use crate::b64;
use crate::error::Error;
use crate::function::{Components, Function, KEY_MAX};
use crate::parse;
use crate::Result;

/// The function identifier.
pub const ID: &str = "md5crypt";
/// Maximum salt length.
pub const SALT_MAX_LEN: usize = 8;

const PREFIX: &str = "$1$";
const DIGEST_LEN: usize = 22;
const ROUNDS: usize = 1000;

/// The md5crypt hash function.
#[derive(Debug, Default)]
pub struct Md5Crypt;

impl Function for Md5Crypt {
    fn hash(&self, key: &[u8], salt: &[u8], _cost: u64) -> Result<Vec<u8>> {
        if key.len() > KEY_MAX {
            return Err(Error::KeyLength { function: ID, max: KEY_MAX });
        }
        if salt.len() > SALT_MAX_LEN {
            return Err(Error::SaltLength { function: ID, max: SALT_MAX_LEN });
        }

        let mut dgst = Md5::new();
        dgst.update(key);
        dgst.update(salt);
        dgst.update(key);
        let alt_sum = dgst.finalize_reset();

        dgst.update(key);
        dgst.update(PREFIX.as_bytes());
        dgst.update(salt);
        let mut n = key.len();
        while n > 0 {
            dgst.update(&alt_sum[..n.min(16)]);
            n = n.saturating_sub(16);
        }
        // one byte per bit of the key length, lowest bit first
        let mut n = key.len();
        while n > 0 {
            if n & 1 != 0 {
                dgst.update([0u8]);
            } else {
                dgst.update(&key[..1]);
            }
            n >>= 1;
        }
        let mut sum = dgst.finalize_reset();

        for r in 0..ROUNDS {
            if r % 2 != 0 {
                dgst.update(key);
            } else {
                dgst.update(&sum[..]);
            }
            if r % 3 != 0 {
                dgst.update(salt);
            }
            if r % 7 != 0 {
                dgst.update(key);
            }
            if r % 2 != 0 {
                dgst.update(&sum[..]);
            } else {
                dgst.update(key);
            }
            sum = dgst.finalize_reset();
        }

        let mut out = Vec::with_capacity(DIGEST_LEN + 2);
        for (a, b, c) in [
            (sum[0], sum[6], sum[12]),
            (sum[1], sum[7], sum[13]),
            (sum[2], sum[8], sum[14]),
            (sum[3], sum[9], sum[15]),
            (sum[4], sum[10], sum[5]),
            (0, 0, sum[11]),
        ] {
            out.extend_from_slice(&b64::encode_bytes(a, b, c));
        }
        out.truncate(DIGEST_LEN);
        Ok(out)
    }

    fn parse(&self, encoded: &str) -> Result<Components> {
        let fields =
            parse::fields_after(encoded, PREFIX).ok_or(Error::Encoded { function: ID })?;
        match fields[..] {
            [salt, digest]
                if parse::salt_ok(salt, SALT_MAX_LEN)
                    && parse::digest_ok(digest, DIGEST_LEN) =>
            {
                Ok(Components { digest: digest.to_vec(), salt: salt.to_vec(), cost: 0 })
            }
            _ => Err(Error::Encoded { function: ID }),
        }
    }

    fn format(&self, digest: &[u8], salt: &[u8], _cost: u64) -> String {
        format!(
            "{}{}${}",
            PREFIX,
            String::from_utf8_lossy(salt),
            String::from_utf8_lossy(digest)
        )
    }

    fn id(&self) -> &'static str {
        ID
    }

    fn default_cost(&self) -> u64 {
        0
    }

    fn generate_salt(&self, rng: &mut dyn RngCore) -> Result<Vec<u8>> {
        b64::generate_salt(ID, SALT_MAX_LEN, rng)
    }
}
