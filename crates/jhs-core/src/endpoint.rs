//! # Endpoint Keys
//!
//! A route in a Hyper-Schema document is identified by the combination of
//! HTTP method, `href`, and `encType`. If a link omits `encType`, the
//! default media type `application/json` applies.
//!
//! Matching is exact and case-sensitive on all three fields. Callers are
//! responsible for normalizing the method (typically uppercase) before
//! building a key; `href` is never canonicalized (no trailing-slash folding,
//! no template expansion).

use std::fmt;

use serde::Serialize;

use crate::error::JhsError;

/// The `(method, href, encType)` triple identifying one validated route.
///
/// Fields are private: a key is immutable once built, and can only be built
/// through [`EndpointKey::of`], which rejects absent (empty) fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EndpointKey {
    method: String,
    href: String,
    #[serde(rename = "encType")]
    enc_type: String,
}

impl EndpointKey {
    /// Build a key from its three components.
    ///
    /// # Errors
    ///
    /// Returns [`JhsError::Configuration`] if any component is empty.
    pub fn of(
        method: impl Into<String>,
        href: impl Into<String>,
        enc_type: impl Into<String>,
    ) -> Result<Self, JhsError> {
        let method = method.into();
        let href = href.into();
        let enc_type = enc_type.into();
        if method.is_empty() {
            return Err(JhsError::Configuration("endpoint method is empty".to_string()));
        }
        if href.is_empty() {
            return Err(JhsError::Configuration("endpoint href is empty".to_string()));
        }
        if enc_type.is_empty() {
            return Err(JhsError::Configuration("endpoint encType is empty".to_string()));
        }
        Ok(Self {
            method,
            href,
            enc_type,
        })
    }

    /// HTTP method, exactly as supplied.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path, exactly as supplied.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Media type of the request representation.
    pub fn enc_type(&self) -> &str {
        &self.enc_type
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.href, self.enc_type)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &EndpointKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn component() -> impl Strategy<Value = String> {
        "[A-Za-z0-9/_.-]{1,16}"
    }

    proptest! {
        /// Identical triples produce equal keys with equal hashes.
        #[test]
        fn identical_triples_are_equal(m in component(), h in component(), e in component()) {
            let a = EndpointKey::of(m.clone(), h.clone(), e.clone()).unwrap();
            let b = EndpointKey::of(m, h, e).unwrap();
            prop_assert_eq!(hash_of(&a), hash_of(&b));
            prop_assert_eq!(a, b);
        }

        /// Changing any single component breaks equality.
        #[test]
        fn single_field_difference_breaks_equality(
            m in component(),
            h in component(),
            e in component(),
            other in component(),
            field in 0usize..3,
        ) {
            let base = EndpointKey::of(m.clone(), h.clone(), e.clone()).unwrap();
            let varied = match field {
                0 => EndpointKey::of(other.clone(), h, e),
                1 => EndpointKey::of(m, other.clone(), e),
                _ => EndpointKey::of(m, h, other.clone()),
            }
            .unwrap();
            let original = [base.method(), base.href(), base.enc_type()][field];
            if original != other {
                prop_assert_ne!(base, varied);
            } else {
                prop_assert_eq!(base, varied);
            }
        }
    }
}
