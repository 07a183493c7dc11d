use std::fmt::{self, Display, Formatter};

/// A type-class tag used to enforce strong typing between a function's
/// argument slots and the symbols that may fill them. Carries an
/// optional debug name so error messages and `Display` don't just print
/// an opaque integer, grounded on the original's named `category_set`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(pub u32);

impl Category {
    /// Sentinel for "no category" / the untyped default domain.
    pub const NULL: Category = Category(0);

    pub fn is_null(&self) -> bool {
        *self == Category::NULL
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "category#{}", self.0)
    }
}

/// A name-indexed set of categories, mirroring `category_set`'s
/// `insert`/`find` idiom: a category name maps to a stable tag assigned
/// on first insertion.
#[derive(Debug, Default)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self { names: vec!["".to_string()] }
    }

    /// Returns the existing tag if `name` was already registered,
    /// otherwise assigns and returns a new one.
    pub fn insert(&mut self, name: impl Into<String>) -> Category {
        let name = name.into();
        if let Some(tag) = self.find_by_name(&name) {
            return tag;
        }
        let tag = Category(self.names.len() as u32);
        self.names.push(name);
        tag
    }

    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| Category(i as u32))
    }

    pub fn name(&self, tag: Category) -> Option<&str> {
        self.names.get(tag.0 as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_by_name() {
        let mut set = CategorySet::new();
        let a = set.insert("numeric");
        let b = set.insert("numeric");
        assert_eq!(a, b);
        assert_eq!(set.name(a), Some("numeric"));
    }

    #[test]
    fn null_is_the_default_sentinel() {
        assert!(Category::NULL.is_null());
    }
}
