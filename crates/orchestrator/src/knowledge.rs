//! Catalog knowledge corpus loaded from text files.

use std::fs;
use std::path::Path;

use brain_core::hash_prompt;
use tracing::{info, warn};

/// Suffix of files that make up the corpus.
pub const KNOWLEDGE_SUFFIX: &str = "_knowledge.txt";

/// Concatenated text of every knowledge document, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogKnowledge {
    text: String,
    documents: usize,
}

impl CatalogKnowledge {
    /// Load every `*_knowledge.txt` file in `dir`, in file-name order.
    ///
    /// Never fails: a missing directory or unreadable file is logged and
    /// skipped, leaving a possibly empty corpus.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Knowledge directory {} not available: {}", dir.display(), e);
                return Self::default();
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.ends_with(KNOWLEDGE_SUFFIX))
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            warn!("No {} files found in {}", KNOWLEDGE_SUFFIX, dir.display());
            return Self::default();
        }

        let mut documents = Vec::with_capacity(paths.len());
        for path in &paths {
            match fs::read_to_string(path) {
                Ok(content) => documents.push(content),
                Err(e) => warn!("Skipping knowledge file {}: {}", path.display(), e),
            }
        }

        let knowledge = Self {
            text: documents.join("\n\n"),
            documents: documents.len(),
        };

        info!(
            "Catalog knowledge loaded: {} files, {} chars",
            knowledge.documents,
            knowledge.text.len()
        );

        knowledge
    }

    /// Build a corpus from a single text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let documents = usize::from(!text.trim().is_empty());
        Self { text, documents }
    }

    /// The corpus text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether there is nothing to show the model.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of documents that were loaded.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// SHA-256 of the corpus, for telling deployments apart in logs.
    pub fn fingerprint(&self) -> String {
        hash_prompt(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_in_name_order_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_knowledge.txt"), "Bombas sumergibles").unwrap();
        fs::write(dir.path().join("a_knowledge.txt"), "Suavizadores").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignorar").unwrap();
        fs::create_dir(dir.path().join("c_knowledge.txt")).unwrap();

        let knowledge = CatalogKnowledge::load(dir.path());

        assert_eq!(knowledge.as_str(), "Suavizadores\n\nBombas sumergibles");
        assert_eq!(knowledge.document_count(), 2);
        assert!(!knowledge.is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let knowledge = CatalogKnowledge::load(dir.path().join("nope"));

        assert!(knowledge.is_empty());
        assert_eq!(knowledge.document_count(), 0);
    }

    #[test]
    fn test_no_matching_files_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("catalogo.pdf"), "binary").unwrap();

        assert!(CatalogKnowledge::load(dir.path()).is_empty());
    }

    #[test]
    fn test_from_text() {
        assert!(CatalogKnowledge::from_text("  \n").is_empty());
        let knowledge = CatalogKnowledge::from_text("Filtro de carbón activado");
        assert_eq!(knowledge.document_count(), 1);
        assert_eq!(knowledge.as_str(), "Filtro de carbón activado");
        assert_eq!(
            knowledge.fingerprint(),
            CatalogKnowledge::from_text("Filtro de carbón activado").fingerprint()
        );
        assert_ne!(knowledge.fingerprint(), CatalogKnowledge::default().fingerprint());
    }
}
