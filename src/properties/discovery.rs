//! Property file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::PropertiesError;

/// Scans each root directory for property files.
///
/// Only the immediate children of a root are considered; subdirectories are
/// not entered. A root that does not exist contributes nothing. The order of
/// the returned paths follows directory iteration order and must not be
/// relied upon by callers.
pub fn discover(roots: &[PathBuf]) -> Result<Vec<PathBuf>, PropertiesError> {
    let mut found = Vec::new();

    for root in roots {
        scan_root(root, &mut found)?;
    }

    Ok(found)
}

/// Collects qualifying files among the immediate children of `root`.
///
/// A missing root is treated as empty; any other enumeration failure aborts
/// the scan.
fn scan_root(root: &Path, found: &mut Vec<PathBuf>) -> Result<(), PropertiesError> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(PropertiesError::Scan {
                path: root.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| PropertiesError::Scan {
            path: root.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if is_property_file(&path) {
            debug!(path = %path.display(), "discovered property file");
            found.push(path);
        }
    }

    Ok(())
}

/// Returns `true` if `path` names a property file: not a directory, with a
/// file name whose extension is exactly `properties`.
pub fn is_property_file(path: &Path) -> bool {
    if path.is_dir() {
        return false;
    }

    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => extension(name) == "properties",
        None => false,
    }
}

/// Returns the filename extension without the leading dot, or `""` when the
/// name contains no dot. E.g. `myFile.with.dots.properties` yields
/// `properties`, while `myFileproperties` yields `""`.
fn extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_extension() {
        assert_eq!(extension("myFile.properties"), "properties");
        assert_eq!(extension("anotherFile.with.multiple.dots"), "dots");
        assert_eq!(extension("myFileproperties"), "");
        assert_eq!(extension(""), "");
        assert_eq!(extension("..."), "");
    }

    #[test]
    fn test_predicate_accepts_property_files() {
        assert!(is_property_file(Path::new("test.properties")));
        assert!(is_property_file(Path::new("/myDirectory/file.properties")));
        assert!(is_property_file(Path::new(
            "/myDirectory/classes/weird.filenam.e.properties"
        )));
    }

    #[test]
    fn test_predicate_rejects_other_names() {
        assert!(!is_property_file(Path::new("/classes/test")));
        assert!(!is_property_file(Path::new("myFileproperties")));
        assert!(!is_property_file(Path::new("/myDirectory/classes/properties")));
        assert!(!is_property_file(Path::new("")));
    }

    #[test]
    fn test_predicate_rejects_directories() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub.properties");
        fs::create_dir(&sub).unwrap();

        assert!(!is_property_file(&sub));
    }

    #[test]
    fn test_discover_is_single_level() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.properties"), "k=v\n").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.properties"), "k=v\n").unwrap();

        let found = discover(&[dir.path().to_path_buf()]).unwrap();

        assert_eq!(found, vec![dir.path().join("a.properties")]);
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let found = discover(&[PathBuf::from("/nonexistent/config/root")]).unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_concatenates_roots() {
        let one = tempdir().unwrap();
        let two = tempdir().unwrap();
        fs::write(one.path().join("a.properties"), "").unwrap();
        fs::write(two.path().join("b.properties"), "").unwrap();

        let found = discover(&[one.path().to_path_buf(), two.path().to_path_buf()]).unwrap();

        assert_eq!(found.len(), 2);
    }
}
