use crate::document::Corpus;
use crate::index::Index;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use sled::Db;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const INDEX_TREE: &str = "index";
const METADATA_TREE: &str = "metadata";
const INDEX_KEY: &[u8] = b"main_index";
const CORPUS_KEY: &str = "corpus";

pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open or create a storage database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).context("Failed to open database")?;
        Ok(Self { db })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let config = sled::Config::new().temporary(true);
        let db = config.open().context("Failed to create in-memory database")?;
        Ok(Self { db })
    }

    // ========== Index Operations ==========

    /// Save the retrieval index, replacing any previous one
    pub fn save_index(&self, index: &Index) -> Result<()> {
        let tree = self.db.open_tree(INDEX_TREE)?;
        let serialized = bincode::serialize(index)?;
        tree.insert(INDEX_KEY, serialized)?;
        tree.flush()?;
        tracing::info!(journals = index.journals().len(), "saved index");
        Ok(())
    }

    /// Drop everything stored, then save `index` and the corpus it was built from.
    pub fn replace_index(&self, index: &Index, corpus: &str) -> Result<()> {
        self.clear()?;
        self.save_index(index)?;
        self.save_metadata(CORPUS_KEY, corpus)?;
        self.flush()
    }

    /// Corpus path recorded by [`Storage::replace_index`].
    pub fn corpus_source(&self) -> Result<Option<String>> {
        self.get_metadata(CORPUS_KEY)
    }

    /// Load and validate the retrieval index.
    ///
    /// Malformed artifacts are an error, not `None`.
    pub fn load_index(&self) -> Result<Option<Index>> {
        let tree = self.db.open_tree(INDEX_TREE)?;
        if let Some(data) = tree.get(INDEX_KEY)? {
            let stored: Index = bincode::deserialize(&data).context("Corrupt index blob")?;
            let index = Index::from_stored(stored).context("Stored index failed validation")?;
            Ok(Some(index))
        } else {
            Ok(None)
        }
    }

    // ========== Metadata Operations ==========

    /// Save metadata (e.g., the corpus the index was built from)
    pub fn save_metadata(&self, key: &str, value: &str) -> Result<()> {
        let tree = self.db.open_tree(METADATA_TREE)?;
        tree.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    /// Get metadata
    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let tree = self.db.open_tree(METADATA_TREE)?;
        if let Some(data) = tree.get(key.as_bytes())? {
            Ok(Some(String::from_utf8(data.to_vec())?))
        } else {
            Ok(None)
        }
    }

    /// Flush all changes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all data
    pub fn clear(&self) -> Result<()> {
        self.db.drop_tree(INDEX_TREE)?;
        self.db.drop_tree(METADATA_TREE)?;
        Ok(())
    }
}

/// Read a JSON corpus, gzip-compressed when the file name ends in `.gz`.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;

    let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let corpus = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("Failed to parse corpus {}", path.display()))?;
    Ok(corpus)
}
