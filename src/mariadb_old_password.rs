//! MariaDB/MySQL `OLD_PASSWORD()` hash.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The pre-4.1 MySQL password hash, still emitted by the `OLD_PASSWORD()`
//! function in MariaDB. It is not a cryptographic hash: two 32-bit
//! registers are stirred with each input byte and printed as hex. Tab and
//! space characters are skipped, a quirk inherited from the server's
//! authentication parser.
//!
//! Implemented with reference to `sql/password.c` in the MariaDB server
//! sources.
//!
//! # Example
//!
//! ```
//! use cryptid::function::Function;
//! use cryptid::mariadb_old_password::MariaDbOldPassword;
//!
//! let digest = MariaDbOldPassword.hash(b"idkfa", b"", 0).unwrap();
//! assert_eq!(digest, b"5c078dc54ca0fcca");
//! ```
//!
//! # Parameters
//!
//! None: there is no salt, no cost, and no prefix. The digest is sixteen
//! lowercase hex characters.

use rand::RngCore;

use crate::error::Error;
use crate::function::{Components, Function, KEY_MAX};
use crate::Result;

/// The function identifier.
pub const ID: &str = "mariaDBOldPassword";

const DIGEST_LEN: usize = 16;

/// The MariaDB `OLD_PASSWORD()` hash function.
#[derive(Debug, Default)]
pub struct MariaDbOldPassword;

impl Function for MariaDbOldPassword {
    fn hash(&self, key: &[u8], _salt: &[u8], _cost: u64) -> Result<Vec<u8>> {
        if key.len() > KEY_MAX {
            return Err(Error::KeyLength { function: ID, max: KEY_MAX });
        }
        if key.is_empty() {
            return Ok(Vec::new());
        }
        let mut nr: u64 = 1345345333;
        let mut add: u64 = 7;
        let mut nr2: u64 = 0x12345671;
        for &c in key {
            if c == b'\t' || c == b' ' {
                continue;
            }
            let c = u64::from(c);
            // wrapping arithmetic at full register width; only the low 31
            // bits of each register survive into the digest
            nr ^= ((nr & 63).wrapping_add(add)).wrapping_mul(c).wrapping_add(nr << 8);
            nr2 = nr2.wrapping_add((nr2 << 8) ^ nr);
            add = add.wrapping_add(c);
        }
        let digest = format!("{:08x}{:08x}", nr & 0x7FFF_FFFF, nr2 & 0x7FFF_FFFF);
        Ok(digest.into_bytes())
    }

    fn parse(&self, encoded: &str) -> Result<Components> {
        let bytes = encoded.as_bytes();
        if bytes.len() != DIGEST_LEN
            || !bytes.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(Error::Encoded { function: ID });
        }
        Ok(Components { digest: bytes.to_vec(), salt: Vec::new(), cost: 0 })
    }

    fn format(&self, digest: &[u8], _salt: &[u8], _cost: u64) -> String {
        String::from_utf8_lossy(digest).into_owned()
    }

    fn id(&self) -> &'static str {
        ID
    }

    fn default_cost(&self) -> u64 {
        0
    }

    fn generate_salt(&self, _rng: &mut dyn RngCore) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
