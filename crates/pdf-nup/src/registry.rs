//! Working set of source documents and their page orders
//!
//! Documents are addressed by a [`DocumentId`] that stays valid while other
//! documents are added or removed. Page orders live beside the documents,
//! keyed by the same id, and are created on first access.

use crate::batch::BatchItem;
use crate::order::{identity_order, move_page, validate_page_order};
use crate::source::PageSource;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: Vec<(DocumentId, PageSource)>,
    orders: HashMap<DocumentId, Vec<usize>>,
    next_id: u64,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` and add it to the working set
    pub fn register(&mut self, path: impl AsRef<Path>) -> Result<DocumentId> {
        let source = PageSource::open(path)?;
        Ok(self.insert(source))
    }

    /// Register several files.
    ///
    /// A file that cannot be opened is reported in its slot of the result and
    /// left out of the working set; the others are unaffected.
    pub fn register_all(&mut self, paths: &[impl AsRef<Path>]) -> Vec<Result<DocumentId>> {
        paths
            .iter()
            .map(|path| {
                let result = self.register(path);
                if let Err(e) = &result {
                    log::warn!("{}", e);
                }
                result
            })
            .collect()
    }

    /// Add an already opened source
    pub fn insert(&mut self, source: PageSource) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        log::info!(
            "Registered {} ({} pages) as {}",
            source.path.display(),
            source.page_count,
            id
        );
        self.documents.push((id, source));
        id
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<PageSource> {
        let index = self.documents.iter().position(|(doc_id, _)| *doc_id == id)?;
        self.orders.remove(&id);
        Some(self.documents.remove(index).1)
    }

    pub fn get(&self, id: DocumentId) -> Option<&PageSource> {
        self.documents
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(_, source)| source)
    }

    /// Registered documents in registration order
    pub fn documents(&self) -> impl Iterator<Item = (DocumentId, &PageSource)> {
        self.documents.iter().map(|(id, source)| (*id, source))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn source(&self, id: DocumentId) -> Result<&PageSource> {
        self.get(id).ok_or(NupError::UnknownDocument(id))
    }

    /// Current page order, created as identity on first access
    pub fn page_order(&mut self, id: DocumentId) -> Result<&[usize]> {
        let page_count = self.source(id)?.page_count;
        Ok(self
            .orders
            .entry(id)
            .or_insert_with(|| identity_order(page_count))
            .as_slice())
    }

    /// Replace the page order of a document
    pub fn set_page_order(&mut self, id: DocumentId, order: Vec<usize>) -> Result<()> {
        let page_count = self.source(id)?.page_count;
        validate_page_order(page_count, &order)?;
        self.orders.insert(id, order);
        Ok(())
    }

    /// Move the page at position `from` to position `to`
    pub fn move_page(&mut self, id: DocumentId, from: usize, to: usize) -> Result<()> {
        self.page_order(id)?;
        let order = self
            .orders
            .get_mut(&id)
            .ok_or(NupError::UnknownDocument(id))?;
        move_page(order, from, to)
    }

    /// Forget any reordering and go back to natural order
    pub fn reset_page_order(&mut self, id: DocumentId) -> Result<()> {
        self.source(id)?;
        self.orders.remove(&id);
        Ok(())
    }

    /// Batch input for one document
    pub fn batch_item(&self, id: DocumentId) -> Result<BatchItem> {
        let source = self.source(id)?;
        Ok(BatchItem {
            source: source.clone(),
            page_order: self.orders.get(&id).cloned(),
        })
    }

    /// Batch input for every document, in registration order
    pub fn batch_items(&self) -> Vec<BatchItem> {
        self.documents
            .iter()
            .map(|(id, source)| BatchItem {
                source: source.clone(),
                page_order: self.orders.get(id).cloned(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(name: &str, page_count: usize) -> PageSource {
        PageSource {
            path: PathBuf::from(name),
            page_count,
        }
    }

    #[test]
    fn test_ids_survive_removal() {
        let mut registry = DocumentRegistry::new();
        let a = registry.insert(source("a.pdf", 2));
        let b = registry.insert(source("b.pdf", 3));
        let c = registry.insert(source("c.pdf", 4));

        registry.set_page_order(c, vec![3, 2, 1, 0]).unwrap();
        registry.remove(a).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(b).unwrap().page_count, 3);
        assert_eq!(registry.page_order(c).unwrap(), &[3, 2, 1, 0]);
        assert!(matches!(
            registry.page_order(a),
            Err(NupError::UnknownDocument(_))
        ));

        // New ids are never reused
        let d = registry.insert(source("d.pdf", 1));
        assert_ne!(d, a);
    }

    #[test]
    fn test_order_is_lazily_identity() {
        let mut registry = DocumentRegistry::new();
        let id = registry.insert(source("a.pdf", 3));

        assert_eq!(registry.batch_items()[0].page_order, None);
        assert_eq!(registry.page_order(id).unwrap(), &[0, 1, 2]);
        assert_eq!(registry.batch_items()[0].page_order, Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_move_and_reset() {
        let mut registry = DocumentRegistry::new();
        let id = registry.insert(source("a.pdf", 4));

        registry.move_page(id, 3, 0).unwrap();
        assert_eq!(registry.page_order(id).unwrap(), &[3, 0, 1, 2]);

        registry.reset_page_order(id).unwrap();
        assert_eq!(registry.page_order(id).unwrap(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_order_is_rejected() {
        let mut registry = DocumentRegistry::new();
        let id = registry.insert(source("a.pdf", 3));
        assert!(registry.set_page_order(id, vec![0, 1]).is_err());
        assert!(registry.set_page_order(id, vec![0, 1, 5]).is_err());
        assert_eq!(registry.page_order(id).unwrap(), &[0, 1, 2]);
    }

    #[test]
    fn test_missing_file_is_excluded() {
        let mut registry = DocumentRegistry::new();
        let results = registry.register_all(&["/nonexistent/missing.pdf"]);
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(NupError::SourceOpen { .. })));
        assert!(registry.is_empty());
    }
}
