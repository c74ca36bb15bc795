//! Error values.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Each hash function reports failures with one of the first five kinds,
//! tagged with the identifier of the function that raised it. The remaining
//! kinds are produced by the [registry](crate::registry) flows.
use thiserror::Error;

/// Possible errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The key exceeds the maximum accepted length.
    #[error("{function}: key longer than {max} bytes")]
    KeyLength {
        /// Identifier of the reporting function.
        function: &'static str,
        /// Maximum key length in bytes.
        max: usize,
    },
    /// The salt exceeds the maximum accepted length.
    #[error("{function}: salt longer than {max} bytes")]
    SaltLength {
        /// Identifier of the reporting function.
        function: &'static str,
        /// Maximum salt length in bytes.
        max: usize,
    },
    /// The cost value is out of range.
    #[error("{function}: cost outside the range {min}..={max}")]
    Cost {
        /// Identifier of the reporting function.
        function: &'static str,
        /// Smallest accepted cost.
        min: u64,
        /// Largest accepted cost.
        max: u64,
    },
    /// The encoded hash is not in the expected format.
    #[error("{function}: not a valid encoded hash")]
    Encoded {
        /// Identifier of the reporting function.
        function: &'static str,
    },
    /// An internal invariant was violated, or the entropy source failed.
    #[error("{function}: {message}")]
    Internal {
        /// Identifier of the reporting function.
        function: &'static str,
        /// Free-form diagnostic message.
        message: String,
    },
    /// A hash function identifier not present in the registry.
    #[error("unknown hash function: {0}")]
    UnknownFunction(String),
    /// No function recognised the encoded hash.
    #[error("no matching hash format")]
    NoFormatMatch,
    /// At least one function recognised the encoded hash, but the password
    /// did not match under any of them.
    #[error("no valid password found for any matching hash format")]
    NoPasswordMatch {
        /// Identifiers of the functions which recognised the format.
        formats: Vec<&'static str>,
    },
}
