// Common routines for SHA-2 hashing.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use digest::Digest;

use crate::error::Error;
use crate::function::{Components, KEY_MAX};
use crate::parse;
use crate::Result;

/// Minimum number of rounds.
pub const COST_MIN: u64 = 1000;
/// Maximum number of rounds.
pub const COST_MAX: u64 = 999_999_999;
/// Default number of rounds, substituted when the `rounds=` parameter is
/// absent from an encoded hash.
pub const DEFAULT_COST: u64 = 5000;
/// Maximum salt length.
pub const SALT_MAX_LEN: usize = 16;

// Writes `buf` repeatedly, one digest block at a time, until exactly `n`
// bytes have been written.
fn recycle<D: Digest>(dgst: &mut D, buf: &[u8], mut n: usize) {
    let bsize = buf.len();
    while n >= bsize {
        dgst.update(buf);
        n -= bsize;
    }
    dgst.update(&buf[..n]);
}

/// The shared SHA-256/SHA-512 permutation network. Returns the final raw
/// sum; the caller applies its own output permutation and encoding.
pub fn sha2_sum<D: Digest>(
    function: &'static str,
    key: &[u8],
    salt: &[u8],
    cost: u64,
) -> Result<Vec<u8>> {
    if key.len() > KEY_MAX {
        return Err(Error::KeyLength { function, max: KEY_MAX });
    }
    if salt.len() > SALT_MAX_LEN {
        return Err(Error::SaltLength { function, max: SALT_MAX_LEN });
    }
    if !(COST_MIN..=COST_MAX).contains(&cost) {
        return Err(Error::Cost { function, min: COST_MIN, max: COST_MAX });
    }

    let bsize = <D as Digest>::output_size();

    let mut dgst = D::new();
    dgst.update(key);
    dgst.update(salt);
    dgst.update(key);
    let alt_sum = dgst.finalize();

    let mut dgst = D::new();
    dgst.update(key);
    dgst.update(salt);
    let mut n = key.len();
    while n > bsize {
        dgst.update(&alt_sum[..]);
        n -= bsize;
    }
    dgst.update(&alt_sum[..n]);
    // one block per bit of the key length, lowest bit first
    let mut n = key.len();
    while n > 0 {
        if n & 1 != 0 {
            dgst.update(&alt_sum[..]);
        } else {
            dgst.update(key);
        }
        n >>= 1;
    }
    let mut sum = dgst.finalize();

    let mut dgst = D::new();
    for _ in 0..key.len() {
        dgst.update(key);
    }
    let p_bytes = dgst.finalize();

    let mut dgst = D::new();
    for _ in 0..16 + usize::from(sum[0]) {
        dgst.update(salt);
    }
    let s_bytes = dgst.finalize();

    for r in 0..cost {
        let mut dgst = D::new();
        if r % 2 != 0 {
            recycle(&mut dgst, &p_bytes, key.len());
        } else {
            dgst.update(&sum[..]);
        }
        if r % 3 != 0 {
            recycle(&mut dgst, &s_bytes, salt.len());
        }
        if r % 7 != 0 {
            recycle(&mut dgst, &p_bytes, key.len());
        }
        if r % 2 != 0 {
            dgst.update(&sum[..]);
        } else {
            recycle(&mut dgst, &p_bytes, key.len());
        }
        sum = dgst.finalize();
    }
    Ok(sum.to_vec())
}

/// Parse an encoded SHA-2 crypt hash; the grammar is shared between the
/// `$5$` and `$6$` schemes apart from the prefix and digest length.
pub fn parse_sha2(
    function: &'static str,
    encoded: &str,
    prefix: &str,
    digest_len: usize,
) -> Result<Components> {
    let fields = parse::fields_after(encoded, prefix).ok_or(Error::Encoded { function })?;
    let (cost, salt, digest) = match fields[..] {
        // no rounds= parameter; this arm also covers a salt which itself
        // starts with "rounds="
        [salt, digest] => (DEFAULT_COST, salt, digest),
        [rounds, salt, digest] => {
            let cost = rounds
                .strip_prefix(b"rounds=")
                .and_then(parse::parse_cost)
                .ok_or(Error::Encoded { function })?;
            (cost, salt, digest)
        }
        _ => return Err(Error::Encoded { function }),
    };
    if !parse::salt_ok(salt, SALT_MAX_LEN) || !parse::digest_ok(digest, digest_len) {
        return Err(Error::Encoded { function });
    }
    Ok(Components { digest: digest.to_vec(), salt: salt.to_vec(), cost })
}
