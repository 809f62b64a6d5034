#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::query::Budget;

/// Traversal limits for field lookups.
///
/// # Examples
///
/// ```rust
/// use txview::QueryOptions;
///
/// let options = QueryOptions {
///     max_level: 1,
///     ..Default::default()
/// };
/// assert_eq!(options.max_depth, 6);
/// ```
///
/// # Default
///
/// Two named levels and a total depth of six.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryOptions {
    /// How many nested objects the traversal may enter before rendering the
    /// value it reached as an opaque leaf.
    ///
    /// Arrays do not count against this limit since their elements are
    /// unnamed. It bounds the length of the key paths shown to the user.
    ///
    /// # Default
    ///
    /// `2`
    pub max_level: u8,

    /// How many nested objects and arrays, combined, the traversal may enter
    /// before rendering the value it reached as an opaque leaf.
    ///
    /// This bounds recursion and therefore stack usage.
    ///
    /// # Default
    ///
    /// `6`
    pub max_depth: u8,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_level: 2,
            max_depth: 6,
        }
    }
}

impl QueryOptions {
    /// The traversal budget a lookup starts from.
    pub fn budget(&self) -> Budget {
        Budget {
            level: self.max_level,
            depth: self.max_depth,
        }
    }
}
