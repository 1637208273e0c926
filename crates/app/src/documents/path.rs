//! Document paths
//!
//! Collections and documents alternate in a path: `products` is a collection,
//! `products/p1` a document, `products/p1/reviews` a subcollection.

use std::fmt;

use crate::documents::DocumentStoreError;

fn validate_segment(segment: &str) -> Result<(), DocumentStoreError> {
    if segment.trim().is_empty() || segment.contains('/') {
        return Err(DocumentStoreError::InvalidPath(segment.to_string()));
    }

    Ok(())
}

/// Path to a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Top-level collection.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] for blank names or names containing `/`.
    pub fn root(name: &str) -> Result<Self, DocumentStoreError> {
        validate_segment(name)?;

        Ok(Self(name.to_string()))
    }

    /// Parse a full collection path such as `products/p1/reviews`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] when a segment is blank or
    /// the path does not point at a collection.
    pub fn parse(path: &str) -> Result<Self, DocumentStoreError> {
        let segments: Vec<&str> = path.split('/').collect();

        if segments.len() % 2 == 0 {
            return Err(DocumentStoreError::InvalidPath(path.to_string()));
        }

        for segment in &segments {
            validate_segment(segment)?;
        }

        Ok(Self(path.to_string()))
    }

    /// Path to a document in this collection.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] for a blank id or one containing `/`.
    pub fn doc(&self, id: &str) -> Result<DocumentPath, DocumentStoreError> {
        validate_segment(id)?;

        Ok(DocumentPath {
            collection: self.clone(),
            id: id.to_string(),
        })
    }

    /// Full path as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    collection: CollectionPath,
    id: String,
}

impl DocumentPath {
    /// Parse a full document path such as `carts/u1`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] when a segment is blank or
    /// the path does not point at a document.
    pub fn parse(path: &str) -> Result<Self, DocumentStoreError> {
        let (collection, id) = path
            .rsplit_once('/')
            .ok_or_else(|| DocumentStoreError::InvalidPath(path.to_string()))?;

        CollectionPath::parse(collection)?.doc(id)
    }

    /// Collection holding the document.
    #[must_use]
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Document id within its collection.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Subcollection nested under this document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] for a blank name or one containing `/`.
    pub fn collection_under(&self, name: &str) -> Result<CollectionPath, DocumentStoreError> {
        validate_segment(name)?;

        Ok(CollectionPath(format!("{self}/{name}")))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builds_nested_paths() -> TestResult {
        let reviews = CollectionPath::root("products")?
            .doc("p1")?
            .collection_under("reviews")?;

        assert_eq!(reviews.as_str(), "products/p1/reviews");
        assert_eq!(reviews.doc("r1")?.to_string(), "products/p1/reviews/r1");

        Ok(())
    }

    #[test]
    fn parses_document_paths() -> TestResult {
        let path = DocumentPath::parse("wishlists/u1/products/w1")?;

        assert_eq!(path.id(), "w1");
        assert_eq!(path.collection().as_str(), "wishlists/u1/products");

        Ok(())
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!(CollectionPath::parse("carts/u1").is_err());
        assert!(DocumentPath::parse("carts").is_err());
        assert!(DocumentPath::parse("carts//x").is_err());
        assert!(CollectionPath::root("a/b").is_err());
    }
}
