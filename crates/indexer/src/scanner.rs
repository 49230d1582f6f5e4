use crate::error::Result;
use crate::loader::DocumentLoader;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Lists the documents of one directory, non-recursively
pub struct DocumentScanner {
    root: PathBuf,
}

impl DocumentScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `.txt` files directly under the root, sorted by file name
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        // A plain directory listing: no ignore files, hidden files included.
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .max_depth(Some(1))
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b));

        for entry in builder.build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !DocumentLoader::is_text_file(path) {
                log::debug!("Skipping non-text file {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        log::info!(
            "Found {} text documents in {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }
}
