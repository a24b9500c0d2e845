//! Files a guest has selected for one contribution

use neberku_core::models::{CandidateFile, MediaCategory};

/// Ordered selection of files for the current contribution form.
///
/// Insertion order is kept so previews render stably and removal by index
/// refers to what the guest sees.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    files: Vec<CandidateFile>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateFile> {
        self.files.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CandidateFile> {
        self.files.get(index)
    }

    /// Number of selected files of one category.
    pub fn count_by_type(&self, category: MediaCategory) -> usize {
        self.files.iter().filter(|f| f.category == category).count()
    }

    pub(crate) fn extend(&mut self, files: Vec<CandidateFile>) {
        self.files.extend(files);
    }

    pub fn remove(&mut self, index: usize) -> Option<CandidateFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Selected files of one category, in selection order.
    pub fn files_of(&self, category: MediaCategory) -> Vec<CandidateFile> {
        self.files
            .iter()
            .filter(|f| f.category == category)
            .cloned()
            .collect()
    }
}

/// Count the files of one category in a batch that is not selected yet.
pub(crate) fn count_in_batch(batch: &[CandidateFile], category: MediaCategory) -> usize {
    batch.iter().filter(|f| f.category == category).count()
}
