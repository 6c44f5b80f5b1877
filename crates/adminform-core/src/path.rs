//! Dotted field paths into JSON records.
//!
//! A `source` such as `"author.birthDate"` addresses `record["author"]["birthDate"]`.

use crate::error::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A parsed, non-empty dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPath`] for an empty path or empty segment.
    pub fn parse(path: &str) -> FormResult<Self> {
        if path.is_empty() {
            return Err(FormError::InvalidPath(path.to_string()));
        }
        let segments: Vec<String> = path.split('.').map(String::from).collect();
        if segments.iter().any(String::is_empty) {
            return Err(FormError::InvalidPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    /// Path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment.
    #[must_use]
    pub fn leaf(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map_or("", String::as_str)
    }

    /// Read the value at this path, if present.
    #[must_use]
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| node.as_object()?.get(segment))
    }

    /// Write `value` at this path, creating intermediate objects.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotAnObject`] when an intermediate value exists
    /// and is not an object.
    pub fn set(&self, root: &mut Value, value: Value) -> FormResult<()> {
        if root.is_null() {
            *root = Value::Object(Map::new());
        }
        let (leaf, parents) = self
            .segments
            .split_last()
            .ok_or_else(|| FormError::InvalidPath(String::new()))?;

        let mut node = root;
        for segment in parents {
            let map = node.as_object_mut().ok_or_else(|| self.not_object(segment))?;
            node = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if node.is_null() {
                *node = Value::Object(Map::new());
            }
        }
        let map = node.as_object_mut().ok_or_else(|| self.not_object(leaf))?;
        map.insert(leaf.clone(), value);
        Ok(())
    }

    /// Remove the value at this path, returning it. Missing paths are a no-op.
    pub fn remove(&self, root: &mut Value) -> Option<Value> {
        let (leaf, parents) = self.segments.split_last()?;
        let mut node = root;
        for segment in parents {
            node = node.as_object_mut()?.get_mut(segment)?;
        }
        node.as_object_mut()?.remove(leaf)
    }

    fn not_object(&self, segment: &str) -> FormError {
        FormError::NotAnObject {
            path: self.to_string(),
            segment: segment.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert_eq!(FieldPath::parse("a.b").expect("valid").segments().len(), 2);
    }

    #[test]
    fn test_get_nested() {
        let record = json!({ "id": 1, "author": { "birthDate": "1970-05-01" } });
        let path = FieldPath::parse("author.birthDate").expect("valid");
        assert_eq!(path.get(&record), Some(&json!("1970-05-01")));
        assert_eq!(path.leaf(), "birthDate");
        assert!(FieldPath::parse("author.missing")
            .expect("valid")
            .get(&record)
            .is_none());
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let record = json!({ "title": "Hello" });
        let path = FieldPath::parse("title.length").expect("valid");
        assert!(path.get(&record).is_none());
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut values = Value::Null;
        let path = FieldPath::parse("author.birthDate").expect("valid");
        path.set(&mut values, json!("2010-01-04")).expect("set");
        assert_eq!(values, json!({ "author": { "birthDate": "2010-01-04" } }));
    }

    #[test]
    fn test_set_through_scalar_errors() {
        let mut values = json!({ "author": "anonymous" });
        let path = FieldPath::parse("author.birthDate").expect("valid");
        let err = path.set(&mut values, json!("x")).expect_err("scalar parent");
        assert!(matches!(err, FormError::NotAnObject { .. }));
    }

    #[test]
    fn test_remove() {
        let mut values = json!({ "publishedAt": "2010-01-04", "title": "t" });
        let path = FieldPath::parse("publishedAt").expect("valid");
        assert_eq!(path.remove(&mut values), Some(json!("2010-01-04")));
        assert_eq!(values, json!({ "title": "t" }));
        assert_eq!(path.remove(&mut values), None);
    }

    proptest! {
        #[test]
        fn prop_set_then_get(segs in proptest::collection::vec("[a-z]{1,6}", 1..4), v in "[0-9-]{0,10}") {
            let path = FieldPath::parse(&segs.join(".")).expect("valid");
            let mut root = Value::Null;
            path.set(&mut root, Value::String(v.clone())).expect("set");
            prop_assert_eq!(path.get(&root), Some(&Value::String(v)));
        }
    }
}
