//! Identification, verification and generation of Unix crypt-style
//! password hashes.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Given an encoded hash string such as
//! `$1$28772684$iEwNOgGugqO9.bIz5sk8k/`, this crate recognises which
//! algorithm produced it, parses out its parameters, and reproduces the
//! digest bit-exactly from a candidate password. In the other direction it
//! generates a freshly salted hash from a password and an algorithm
//! identifier. Five algorithms are supported, each in its own module:
//! [md5crypt](md5_crypt), [sha1crypt](sha1_crypt),
//! [sha256crypt](sha256_crypt), [sha512crypt](sha512_crypt) and the
//! MariaDB [`OLD_PASSWORD()`](mariadb_old_password) hash.
//!
//! Every algorithm implements the [`Function`] trait; the [`Registry`]
//! holds one instance of each and drives the three top-level flows.
//!
//! # Examples
//!
//! To find out which formats an encoded hash could belong to:
//!
//! ```
//! use cryptid::Registry;
//!
//! let registry = Registry::new();
//! assert_eq!(registry.identify("7196759210defdc0"), ["mariaDBOldPassword"]);
//! ```
//!
//! To verify a password against an encoded hash:
//!
//! ```
//! use cryptid::Registry;
//!
//! let registry = Registry::new();
//! let v = registry
//!     .verify("$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0", b"password")
//!     .unwrap();
//! assert_eq!(v.password_matches, ["md5crypt"]);
//! ```
//!
//! To generate a hash with a fresh salt:
//!
//! ```
//! use cryptid::Registry;
//! use rand::rngs::OsRng;
//!
//! let registry = Registry::new();
//! let encoded = registry
//!     .generate("sha512crypt", b"password", 0, &mut OsRng)
//!     .unwrap();
//! assert!(encoded.starts_with("$6$rounds=5000$"));
//! ```
//!
//! The entropy source backing salt generation is always passed in by the
//! caller, which keeps hash generation reproducible under test; pass
//! [`OsRng`](rand::rngs::OsRng) outside of tests.

#![warn(missing_docs)]

pub mod b64;
pub mod error;
pub mod function;
pub mod mariadb_old_password;
pub mod md5_crypt;
mod parse;
pub mod registry;
pub mod sha1_crypt;
mod sha2_crypt;
pub mod sha256_crypt;
pub mod sha512_crypt;

pub use crate::error::Error;
pub use crate::function::{Components, Function, KEY_MAX};
pub use crate::registry::{Registry, Verification};

/// Type alias for the Result type.
pub type Result<T> = std::result::Result<T, error::Error>;
