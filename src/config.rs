/// What [`Tree::add`][crate::Tree::add] does with a key that is already in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateKey`][crate::Error::DuplicateKey].
    #[default]
    Reject,
    /// Leave the tree as it is and return the handle of the node already holding the key.
    Ignore,
}

/// Settings for a [`Tree`][crate::Tree].
///
/// # Examples
///
/// ```
/// use sized_bst::{Config, DuplicatePolicy, Tree};
///
/// let mut tree = Tree::with_config(Config::new().with_duplicates(DuplicatePolicy::Ignore));
///
/// let first = tree.add(1).unwrap();
/// assert_eq!(tree.add(1), Ok(first));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// How to treat duplicate keys. Defaults to [`DuplicatePolicy::Reject`].
    pub duplicates: DuplicatePolicy,
}

impl Config {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate key policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
