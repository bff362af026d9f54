//! Node identifiers backed by string interning.
//!
//! This module provides the [`Id`] type. Node ids arrive from the surrounding
//! application as opaque strings; interning turns them into cheap `Copy` keys
//! that can be hashed and compared without touching the string data.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Opaque node identifier, stable for the lifetime of the node.
///
/// Ordering of interned symbols depends on interning history, so `Id` does not
/// implement `Ord`; callers that need a stable order keep their own sequence.
///
/// # Examples
///
/// ```
/// use mindtree_core::identifier::Id;
///
/// let root = Id::new("root");
/// let generated = Id::from_anonymous(7);
///
/// assert_eq!(root, "root");
/// assert_eq!(generated, "node-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// Interning the same string twice yields equal ids.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a generated identifier from a sequence number.
    ///
    /// Used for nodes created by the mind map session, where the user never
    /// supplies a name.
    pub fn from_anonymous(idx: usize) -> Self {
        let name = format!("node-{idx}");
        Self::new(&name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// ```
    /// use mindtree_core::identifier::Id;
    ///
    /// let id: Id = "question".into();
    /// assert_eq!(id, "question");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
