//! The common contract implemented by every hash function.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.

use rand::RngCore;

use crate::Result;

/// Maximum accepted key (password) length, in bytes.
///
/// Keys longer than this are rejected before any hashing work begins, in the
/// manner of the 32K limit in the musl crypt() implementation.
pub const KEY_MAX: usize = 1 << 15;

/// The components of an encoded hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    /// The digest, in its final encoded form.
    pub digest: Vec<u8>,
    /// The salt, as it appears in the encoded string.
    pub salt: Vec<u8>,
    /// The iteration count; zero for functions without a cost parameter.
    pub cost: u64,
}

/// A password hash function.
///
/// Implementations are stateless; a single instance of each lives in the
/// [`Registry`](crate::registry::Registry) and may be shared freely across
/// threads.
pub trait Function: Send + Sync {
    /// Hash `key` with the given salt and cost.
    ///
    /// Returns the digest bytes in their final encoded form, without the
    /// prefix, parameters or salt of the full hash string. Input bounds are
    /// checked before any hashing work begins.
    fn hash(&self, key: &[u8], salt: &[u8], cost: u64) -> Result<Vec<u8>>;

    /// Structurally parse an encoded hash into its components.
    ///
    /// Functions with an optional cost parameter substitute their default
    /// when it is absent. No bounds beyond the grammar are checked here.
    fn parse(&self, encoded: &str) -> Result<Components>;

    /// Format components into the encoded hash form.
    ///
    /// The inverse of [`parse`](Function::parse) on well-formed inputs.
    fn format(&self, digest: &[u8], salt: &[u8], cost: u64) -> String;

    /// The stable identifier of this function.
    fn id(&self) -> &'static str;

    /// The preferred cost for newly generated hashes; zero when the
    /// function has no cost parameter.
    fn default_cost(&self) -> u64;

    /// Draw a fresh salt of the maximum size for this function from `rng`.
    fn generate_salt(&self, rng: &mut dyn RngCore) -> Result<Vec<u8>>;
}
