use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{discovery, parse, PropertiesError};

/// A source of property files in the loading pipeline.
#[derive(Debug)]
enum PropertySource {
    Dir(PathBuf),
    File(PathBuf),
}

/// Immutable merged view of all loaded property files.
///
/// Built once at startup via [`PropertyStore::builder`] and never written
/// again, so shared references can be read concurrently without any
/// synchronization.
#[derive(Debug, Default)]
pub struct PropertyStore {
    entries: HashMap<String, String>,
}

impl PropertyStore {
    /// Creates a new store builder.
    pub fn builder() -> PropertyStoreBuilder {
        PropertyStoreBuilder::default()
    }

    /// Returns the value held under `key`, or `None` when the key is not
    /// defined in any loaded file.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct keys in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for loading `.properties` files into a [`PropertyStore`].
///
/// Sources are processed in registration order. A `with_root` source
/// contributes every property file found among the directory's immediate
/// children; a `with_file` source contributes exactly that file and fails
/// the build if it cannot be read.
///
/// Files are merged by repeated insertion, so when several files define the
/// same key the file loaded last wins. Discovered files within a root load
/// in directory iteration order, which is platform-dependent: a key defined
/// in more than one discovered file has no guaranteed winner, and resolving
/// such clashes is a deployment concern. Only explicit `with_file`
/// registration order is deterministic.
///
/// Any file that cannot be read or parsed aborts the whole build; no
/// partial store is ever produced.
///
/// ## Example
///
/// ```no_run
/// use dragon_props::PropertyStore;
///
/// let store = PropertyStore::builder()
///     .with_root("config")
///     .with_file("config/extra/override.properties")
///     .build()?;
///
/// let name = store.get("app.name");
/// # Ok::<(), dragon_props::PropertiesError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct PropertyStoreBuilder {
    sources: Vec<PropertySource>,
}

impl PropertyStoreBuilder {
    /// Adds a directory to scan for `.properties` files.
    ///
    /// Only the directory's immediate children are considered. A directory
    /// that does not exist contributes nothing.
    pub fn with_root(mut self, path: impl AsRef<Path>) -> Self {
        self.sources
            .push(PropertySource::Dir(path.as_ref().to_path_buf()));
        self
    }

    /// Adds a single property file to be loaded.
    ///
    /// Unlike `with_root`, the file must exist: a missing file fails the
    /// build.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources
            .push(PropertySource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Discovers, reads, and merges all registered sources.
    ///
    /// Files are read as UTF-8 text.
    pub fn build(self) -> Result<PropertyStore, PropertiesError> {
        let mut entries = HashMap::new();

        for source in self.sources {
            match source {
                PropertySource::Dir(root) => {
                    for path in discovery::discover(std::slice::from_ref(&root))? {
                        load_into(&mut entries, &path)?;
                    }
                }
                PropertySource::File(path) => load_into(&mut entries, &path)?,
            }
        }

        Ok(PropertyStore { entries })
    }
}

/// Reads and parses one file, inserting its entries over any existing ones.
fn load_into(entries: &mut HashMap<String, String>, path: &Path) -> Result<(), PropertiesError> {
    let text = std::fs::read_to_string(path).map_err(|e| PropertiesError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed = parse::parse(&text).map_err(|e| PropertiesError::Parse {
        path: path.to_path_buf(),
        line: e.line,
    })?;

    debug!(path = %path.display(), entries = parsed.len(), "loaded property file");

    for (key, value) in parsed {
        entries.insert(key, value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_build_merges_discovered_files() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("testProperties.properties"),
            "myProp=myVal\nmyProp2=myVal2\n",
        )
        .unwrap();
        fs::write(dir.path().join("another.properties"), "myProp3=myVal3\n").unwrap();

        let store = PropertyStore::builder().with_root(dir.path()).build().unwrap();

        assert_eq!(store.get("myProp"), Some("myVal"));
        assert_eq!(store.get("myProp2"), Some("myVal2"));
        assert_eq!(store.get("myProp3"), Some("myVal3"));
        assert_eq!(store.get("myProp4"), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_last_registered_file_wins() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.properties");
        let second = dir.path().join("second.properties");
        fs::write(&first, "shared=from-first\n").unwrap();
        fs::write(&second, "shared=from-second\n").unwrap();

        let store = PropertyStore::builder()
            .with_file(&first)
            .with_file(&second)
            .build()
            .unwrap();

        assert_eq!(store.get("shared"), Some("from-second"));
    }

    #[test]
    fn test_discovered_collision_has_some_value() {
        // The winner across discovered files is deliberately unspecified;
        // only presence is guaranteed.
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.properties"), "shared=a\n").unwrap();
        fs::write(dir.path().join("b.properties"), "shared=b\n").unwrap();

        let store = PropertyStore::builder().with_root(dir.path()).build().unwrap();

        assert!(matches!(store.get("shared"), Some("a") | Some("b")));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = PropertyStore::builder()
            .with_file("/nonexistent/base.properties")
            .build();

        assert!(matches!(result, Err(PropertiesError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.properties");
        fs::write(&path, "ok=1\nbad=\\u12G4\n").unwrap();

        let result = PropertyStore::builder().with_file(&path).build();

        match result {
            Err(PropertiesError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_build() {
        let store = PropertyStore::builder().build().unwrap();

        assert!(store.is_empty());
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_get_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.properties");
        fs::write(&path, "key=value\n").unwrap();

        let store = PropertyStore::builder().with_file(&path).build().unwrap();

        assert_eq!(store.get("key"), Some("value"));
        assert_eq!(store.get("key"), Some("value"));
    }
}
