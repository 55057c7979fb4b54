//! Material library with RON file support
//!
//! A library file is a RON list of records:
//!
//! ```ron
//! [
//!     (uid: "grass", attributes: {"color": "#3a7d2c"}),
//!     (uid: "rock"),
//! ]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque material definition record
///
/// Only the uid matters to the preview session; attributes are passed through
/// to the material renderer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    uid: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl MaterialDefinition {
    /// Create a definition with no attributes
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Unique identifier shown in the material menu
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Look up a single attribute
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All attributes, sorted by key
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

/// Material library errors
#[derive(Error, Debug)]
pub enum MaterialError {
    /// The library file could not be read
    #[error("Failed to read material library {path:?}: {source}")]
    Io {
        /// Library file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The library file is not valid RON
    #[error("Failed to parse material library: {0}")]
    Parse(String),

    /// Two records share a uid
    #[error("Duplicate material uid '{0}'")]
    DuplicateUid(String),

    /// A record has an empty uid
    #[error("Material at index {index} has an empty uid")]
    EmptyUid {
        /// Position of the record in the file
        index: usize,
    },
}

/// Ordered collection of material definitions
pub trait MaterialSource {
    /// Number of definitions
    fn count(&self) -> usize;

    /// Definition at `index`, if in range
    fn get(&self, index: usize) -> Option<&MaterialDefinition>;

    /// Re-read the definitions from their backing store
    ///
    /// On failure the previous definitions stay in place.
    fn reload(&mut self) -> Result<(), MaterialError> {
        Ok(())
    }

    /// Whether there are no definitions
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Material library, optionally backed by a RON file
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    path: Option<PathBuf>,
    materials: Vec<MaterialDefinition>,
}

impl MaterialLibrary {
    /// In-memory library; `reload` is a no-op
    pub fn from_definitions(materials: Vec<MaterialDefinition>) -> Result<Self, MaterialError> {
        Self::check_uids(&materials)?;
        Ok(Self { path: None, materials })
    }

    /// Load a library from a RON file and remember the path for reloading
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MaterialError> {
        let path = path.as_ref().to_path_buf();
        let materials = Self::read(&path)?;
        log::info!("Loaded {} material definitions from {:?}", materials.len(), path);
        Ok(Self { path: Some(path), materials })
    }

    /// Parse library contents without touching the filesystem
    pub fn parse(contents: &str) -> Result<Vec<MaterialDefinition>, MaterialError> {
        let materials: Vec<MaterialDefinition> =
            ron::from_str(contents).map_err(|e| MaterialError::Parse(e.to_string()))?;
        Self::check_uids(&materials)?;
        Ok(materials)
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All definitions in file order
    pub fn definitions(&self) -> &[MaterialDefinition] {
        &self.materials
    }

    fn read(path: &Path) -> Result<Vec<MaterialDefinition>, MaterialError> {
        let contents = fs::read_to_string(path).map_err(|source| MaterialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    fn check_uids(materials: &[MaterialDefinition]) -> Result<(), MaterialError> {
        let mut seen = HashSet::with_capacity(materials.len());
        for (index, material) in materials.iter().enumerate() {
            if material.uid.is_empty() {
                return Err(MaterialError::EmptyUid { index });
            }
            if !seen.insert(material.uid.as_str()) {
                return Err(MaterialError::DuplicateUid(material.uid.clone()));
            }
        }
        Ok(())
    }
}

impl MaterialSource for MaterialLibrary {
    fn count(&self) -> usize {
        self.materials.len()
    }

    fn get(&self, index: usize) -> Option<&MaterialDefinition> {
        self.materials.get(index)
    }

    fn reload(&mut self) -> Result<(), MaterialError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let materials = Self::read(path)?;
        log::info!("Reloaded {} material definitions from {:?}", materials.len(), path);
        self.materials = materials;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_library() {
        let materials = MaterialLibrary::parse(
            r##"[
                (uid: "grass", attributes: {"color": "#3a7d2c"}),
                (uid: "rock"),
            ]"##,
        )
        .unwrap();

        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].uid(), "grass");
        assert_eq!(materials[0].attribute("color"), Some("#3a7d2c"));
        assert!(materials[1].attributes().is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_uids() {
        let duplicate = MaterialLibrary::from_definitions(vec![
            MaterialDefinition::new("a"),
            MaterialDefinition::new("a"),
        ]);
        assert!(matches!(duplicate, Err(MaterialError::DuplicateUid(uid)) if uid == "a"));

        let empty = MaterialLibrary::parse(r#"[(uid: "ok"), (uid: "")]"#);
        assert!(matches!(empty, Err(MaterialError::EmptyUid { index: 1 })));
    }

    #[test]
    fn test_reload_picks_up_edits() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[(uid: "first")]"#).unwrap();

        let mut library = MaterialLibrary::load(file.path()).unwrap();
        assert_eq!(library.count(), 1);

        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        write!(file, r#"[(uid: "first"), (uid: "second")]"#).unwrap();

        library.reload().unwrap();
        assert_eq!(library.count(), 2);
        assert_eq!(library.get(1).map(MaterialDefinition::uid), Some("second"));
    }

    #[test]
    fn test_failed_reload_keeps_previous_definitions() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[(uid: "kept")]"#).unwrap();
        let mut library = MaterialLibrary::load(file.path()).unwrap();

        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        write!(file, "not ron at all").unwrap();

        assert!(matches!(library.reload(), Err(MaterialError::Parse(_))));
        assert_eq!(library.count(), 1);
        assert_eq!(library.get(0).unwrap().uid(), "kept");
    }

    #[test]
    fn test_in_memory_reload_is_noop() {
        let mut library = MaterialLibrary::from_definitions(vec![MaterialDefinition::new("only")]).unwrap();
        assert!(library.path().is_none());
        library.reload().unwrap();
        assert_eq!(library.definitions().len(), 1);
        assert!(library.get(1).is_none());
    }
}
