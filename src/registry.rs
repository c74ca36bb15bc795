//! The registry of supported hash functions and the flows built on it.
//
// Copyright (c) 2016 Ivan Nejgebauer <inejge@gmail.com>
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The registry maps each stable function identifier to its single
//! stateless [`Function`] instance. It is populated once and read-only
//! afterwards. Three flows are built on top of it: identify, verify and
//! generate.
//!
//! # Example
//!
//! ```
//! use cryptid::Registry;
//!
//! let registry = Registry::new();
//! let matches = registry.identify("$1$28772684$iEwNOgGugqO9.bIz5sk8k/");
//! assert_eq!(matches, ["md5crypt"]);
//! ```

use std::collections::BTreeMap;

use rand::RngCore;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::Error;
use crate::function::Function;
use crate::mariadb_old_password::MariaDbOldPassword;
use crate::md5_crypt::Md5Crypt;
use crate::sha1_crypt::Sha1Crypt;
use crate::sha256_crypt::Sha256Crypt;
use crate::sha512_crypt::Sha512Crypt;
use crate::Result;

/// The outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Functions which recognised the encoded format.
    pub format_matches: Vec<&'static str>,
    /// Functions whose re-hash of the password matched the parsed digest.
    pub password_matches: Vec<&'static str>,
}

/// The set of supported hash functions, keyed by identifier.
pub struct Registry {
    functions: BTreeMap<&'static str, Box<dyn Function>>,
}

impl Registry {
    /// Create a registry holding every supported function.
    pub fn new() -> Registry {
        let all: [Box<dyn Function>; 5] = [
            Box::new(Md5Crypt),
            Box::new(Sha1Crypt),
            Box::new(Sha256Crypt),
            Box::new(Sha512Crypt),
            Box::new(MariaDbOldPassword),
        ];
        let mut functions = BTreeMap::new();
        for f in all {
            functions.insert(f.id(), f);
        }
        Registry { functions }
    }

    /// Look up a function by identifier.
    pub fn get(&self, id: &str) -> Option<&dyn Function> {
        self.functions.get(id).map(|f| f.as_ref())
    }

    /// Iterate over `(identifier, function)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &dyn Function)> + '_ {
        self.functions.iter().map(|(id, f)| (*id, f.as_ref()))
    }

    /// Report the identifiers of every function able to parse `encoded`.
    ///
    /// Callers must not rely on the order of the returned matches.
    pub fn identify(&self, encoded: &str) -> Vec<&'static str> {
        let mut matches = Vec::new();
        for (id, f) in self.iter() {
            if f.parse(encoded).is_ok() {
                matches.push(id);
            } else {
                debug!(function = id, "format mismatch");
            }
        }
        matches
    }

    /// Check `password` against `encoded` under every function which
    /// recognises the format.
    ///
    /// Parse failures only exclude a function from the match set. Any other
    /// failure while re-hashing is surfaced immediately: a correct parser
    /// never emits out-of-bounds components, so it indicates a bug. Returns
    /// [`Error::NoFormatMatch`] when nothing recognised the format, and
    /// [`Error::NoPasswordMatch`] when the password matched under none of
    /// the recognising functions.
    ///
    /// The digest comparison is constant-time: it does not branch on digest
    /// bytes nor short-circuit on the first difference.
    pub fn verify(&self, encoded: &str, password: &[u8]) -> Result<Verification> {
        let mut format_matches = Vec::new();
        let mut password_matches = Vec::new();
        for (id, f) in self.iter() {
            let parsed = match f.parse(encoded) {
                Ok(parsed) => parsed,
                Err(_) => continue,
            };
            format_matches.push(id);
            let calculated = f.hash(password, &parsed.salt, parsed.cost)?;
            if bool::from(parsed.digest.ct_eq(&calculated)) {
                password_matches.push(id);
            }
        }
        if format_matches.is_empty() {
            return Err(Error::NoFormatMatch);
        }
        if password_matches.is_empty() {
            return Err(Error::NoPasswordMatch { formats: format_matches });
        }
        Ok(Verification { format_matches, password_matches })
    }

    /// Generate an encoded hash of `password` under the function named by
    /// `id`, drawing the salt from `rng`.
    ///
    /// A `cost` of zero selects the function's default.
    pub fn generate(
        &self,
        id: &str,
        password: &[u8],
        cost: u64,
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        let f = self.get(id).ok_or_else(|| Error::UnknownFunction(id.to_owned()))?;
        let salt = f.generate_salt(rng)?;
        let cost = if cost == 0 { f.default_cost() } else { cost };
        debug!(function = id, cost, "generating hash");
        let digest = f.hash(password, &salt, cost)?;
        Ok(f.format(&digest, &salt, cost))
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    fn fixed_rng() -> StepRng {
        StepRng::new(0x0123_4567_89AB_CDEF, 0x1111_1111_1111_1111)
    }

    #[test]
    fn identify_old_password_only() {
        assert_eq!(Registry::new().identify("7196759210defdc0"), ["mariaDBOldPassword"]);
    }

    #[test]
    fn identify_unrecognised() {
        assert!(Registry::new().identify("not a hash").is_empty());
        assert!(Registry::new().identify("").is_empty());
    }

    #[test]
    fn verify_md5crypt() {
        let v = Registry::new()
            .verify("$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0", b"password")
            .unwrap();
        assert_eq!(v.format_matches, ["md5crypt"]);
        assert_eq!(v.password_matches, ["md5crypt"]);
    }

    #[test]
    fn verify_sha1crypt() {
        let v = Registry::new()
            .verify("$sha1$19205$SeTzdv2R$8ZcgMk0PiGRrQdz5xGMncAfymq1C", b"Hashcat1234!")
            .unwrap();
        assert_eq!(v.password_matches, ["sha1crypt"]);
    }

    #[test]
    fn verify_wrong_password_reports_formats() {
        let err = Registry::new()
            .verify("$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0", b"not the password")
            .unwrap_err();
        match err {
            Error::NoPasswordMatch { formats } => assert_eq!(formats, ["md5crypt"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn verify_unrecognised_format() {
        assert!(matches!(
            Registry::new().verify("no such format", b"password"),
            Err(Error::NoFormatMatch)
        ));
    }

    #[test]
    fn verify_surfaces_hash_errors() {
        // parses under $5$, but the cost is out of range; the failure must
        // not be swallowed like a parse miss
        let encoded =
            "$5$rounds=1000000000$GX7BopJZJxPc/KEK$le16UF8I2Anb.rOrn22AUPWvzUETDGefUmAV8AZkGcD";
        assert!(matches!(
            Registry::new().verify(encoded, b"foo"),
            Err(Error::Cost { function: "sha256crypt", .. })
        ));
    }

    #[test]
    fn generate_then_verify_round_trip() {
        let registry = Registry::new();
        for id in ["md5crypt", "sha1crypt", "sha256crypt", "sha512crypt", "mariaDBOldPassword"] {
            let cost = match id {
                // keep the iterated schemes quick under test
                "sha1crypt" => 100,
                "sha256crypt" | "sha512crypt" => 1000,
                _ => 0,
            };
            let encoded = registry
                .generate(id, b"correct horse", cost, &mut fixed_rng())
                .unwrap();
            let v = registry.verify(&encoded, b"correct horse").unwrap();
            assert!(v.password_matches.contains(&id), "{id}: {encoded}");
            let err = registry.verify(&encoded, b"correct horsex").unwrap_err();
            assert!(matches!(err, Error::NoPasswordMatch { .. }), "{id}: {encoded}");
        }
    }

    #[test]
    fn generate_is_deterministic_for_a_fixed_rng() {
        let registry = Registry::new();
        let a = registry.generate("md5crypt", b"secret", 0, &mut fixed_rng()).unwrap();
        let b = registry.generate("md5crypt", b"secret", 0, &mut fixed_rng()).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("$1$"));
    }

    #[test]
    fn generate_substitutes_default_cost() {
        let registry = Registry::new();
        let encoded = registry
            .generate("sha256crypt", b"secret", 0, &mut fixed_rng())
            .unwrap();
        assert!(encoded.starts_with("$5$rounds=5000$"), "{encoded}");
    }

    #[test]
    fn generate_unknown_function() {
        assert!(matches!(
            Registry::new().generate("bcrypt", b"secret", 0, &mut fixed_rng()),
            Err(Error::UnknownFunction(_))
        ));
    }

    #[test]
    fn generated_salts_parse_back() {
        let registry = Registry::new();
        let encoded = registry
            .generate("sha512crypt", b"secret", 1000, &mut fixed_rng())
            .unwrap();
        let f = registry.get("sha512crypt").unwrap();
        let parsed = f.parse(&encoded).unwrap();
        assert_eq!(parsed.salt.len(), crate::sha512_crypt::SALT_MAX_LEN);
        assert_eq!(parsed.cost, 1000);
        assert_eq!(f.format(&parsed.digest, &parsed.salt, parsed.cost), encoded);
    }
}
