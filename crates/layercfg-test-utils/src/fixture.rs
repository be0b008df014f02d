//! [`ConfigDir`] builder for configuration file scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An INI file exercising the global section, aliased sections and a
/// section named after a raw namespace.
pub const SAMPLE_INI: &str = "\
PORT = 9090

[db]
host = db.internal
port = 5432

[Foo]
key = X

[SampleEnum]
TEST_NUMBER = 456
specialName = from-file

[pkg.Raw]
key = raw-value
";

/// A temporary directory holding configuration files, with helpers for
/// writing them and asserting on their presence.
///
/// # Example
///
/// ```rust,no_run
/// use layercfg_test_utils::ConfigDir;
///
/// let dir = ConfigDir::new();
/// let path = dir.write("app.ini", "[db]\nhost = local\n");
/// dir.assert_file_exists("app.ini");
/// assert!(path.ends_with("app.ini"));
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("ConfigDir::new: failed to create temp dir"),
        }
    }

    /// Create a directory that already holds [`SAMPLE_INI`] as `sample.ini`.
    pub fn with_sample() -> (Self, PathBuf) {
        let dir = Self::new();
        let path = dir.write("sample.ini", SAMPLE_INI);
        (dir, path)
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the directory, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name` (relative to the root) and return its path.
    ///
    /// Parent directories are created as needed.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("ConfigDir::write: could not create {}: {e}", parent.display())
            });
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("ConfigDir::write: could not write {}: {e}", path.display()));
        path
    }

    /// Assert that `name` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, name: &str) {
        let full_path = self.path(name);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `name` is unchanged from `expected`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or differs from `expected`.
    pub fn assert_file_unchanged(&self, name: &str, expected: &str) {
        let full_path = self.path(name);
        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert_eq!(
            content,
            expected,
            "File {} was modified",
            full_path.display()
        );
    }
}
