//! Config file discovery and loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::editorconfig::{parse_editorconfig, ParsedConfig, Section};
use crate::paths;

/// Default name of the per-directory configuration file.
pub const DEFAULT_CONFIG_NAME: &str = ".editorconfig";

/// One configuration file found on a target's ancestry.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    dir: PathBuf,
    path: PathBuf,
    parsed: ParsedConfig,
}

impl ConfigFile {
    /// Build from text already in memory. `dir` is the directory section
    /// patterns are relative to.
    pub fn from_source(dir: impl Into<PathBuf>, file_name: &str, content: &str) -> Self {
        let dir = dir.into();
        Self {
            path: dir.join(file_name),
            parsed: parse_editorconfig(content),
            dir,
        }
    }

    /// Read `dir/file_name`.
    ///
    /// Missing, unreadable, and non-UTF-8 files all count as absent.
    pub fn read(dir: &Path, file_name: &str) -> Option<Self> {
        let path = dir.join(file_name);
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("read {}", path.display());
                Some(Self::from_source(dir, file_name, &content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!("ignoring {}: {e}", path.display());
                None
            }
        }
    }

    /// Directory containing the file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sections in declaration order.
    pub fn sections(&self) -> &[Section] {
        &self.parsed.sections
    }

    /// Whether the file declares `root = true` in its preamble.
    pub fn is_root(&self) -> bool {
        self.parsed.is_root()
    }
}

/// Collect every `config_name` file from the directory of `start_path` up to
/// the filesystem root, outermost first.
///
/// `start_path` is resolved against `base_dir` when relative and need not
/// exist. The walk stops early at a file declaring `root = true`; that file
/// is still included.
pub fn locate(start_path: &Path, config_name: &str, base_dir: &Path) -> Vec<ConfigFile> {
    let target = paths::absolutize(base_dir, start_path);
    let mut found = Vec::new();

    let Some(parent) = target.parent() else {
        return found;
    };
    let mut current = parent.to_path_buf();

    loop {
        let mut stop = false;
        if let Some(file) = ConfigFile::read(&current, config_name) {
            stop = file.is_root();
            if stop {
                tracing::debug!("root marker in {}", file.path().display());
            }
            found.push(file);
        }

        if stop || !current.pop() {
            break;
        }
    }

    // Discovery runs upward; callers want root-most first
    found.reverse();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dirs(files: &[ConfigFile]) -> Vec<PathBuf> {
        files.iter().map(|f| f.dir().to_path_buf()).collect()
    }

    #[test]
    fn test_locate_in_same_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".editorconfig"), "root = true\n").unwrap();

        let found = locate(&dir.path().join("app.hbs"), DEFAULT_CONFIG_NAME, dir.path());
        assert_eq!(dirs(&found), vec![dir.path().to_path_buf()]);
        assert_eq!(found[0].path(), dir.path().join(".editorconfig"));
    }

    #[test]
    fn test_locate_orders_outermost_first() {
        let parent = TempDir::new().unwrap();
        fs::write(parent.path().join(".editorconfig"), "root = true\n").unwrap();

        let child = parent.path().join("app");
        fs::create_dir(&child).unwrap();
        fs::write(child.join(".editorconfig"), "[*]\nindent_size = 2\n").unwrap();

        let found = locate(&child.join("app.hbs"), DEFAULT_CONFIG_NAME, parent.path());
        assert_eq!(dirs(&found), vec![parent.path().to_path_buf(), child]);
    }

    #[test]
    fn test_locate_stops_at_root_marker() {
        let parent = TempDir::new().unwrap();
        fs::write(parent.path().join(".editorconfig"), "[*]\nindent_size = 8\n").unwrap();

        let child = parent.path().join("project");
        fs::create_dir(&child).unwrap();
        fs::write(child.join(".editorconfig"), "root = true\n[*]\n").unwrap();

        let found = locate(&child.join("app.hbs"), DEFAULT_CONFIG_NAME, parent.path());
        assert_eq!(dirs(&found), vec![child]);
    }

    #[test]
    fn test_locate_skips_directories_without_config() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".editorconfig"), "root = true\n").unwrap();

        let deep = root.path().join("a/b/c");
        fs::create_dir_all(&deep).unwrap();

        let found = locate(&deep.join("file.txt"), DEFAULT_CONFIG_NAME, root.path());
        assert_eq!(dirs(&found), vec![root.path().to_path_buf()]);
    }

    #[test]
    fn test_locate_target_need_not_exist() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".editorconfig"), "root = true\n").unwrap();

        let missing = root.path().join("not/created/yet.rs");
        let found = locate(&missing, DEFAULT_CONFIG_NAME, root.path());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_locate_resolves_relative_paths() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".newline"), "root = true\n").unwrap();

        let found = locate(Path::new("src/app.hbs"), ".newline", root.path());
        assert_eq!(dirs(&found), vec![root.path().to_path_buf()]);
    }

    #[test]
    fn test_locate_custom_name_ignores_default() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".editorconfig"), "root = true\n").unwrap();

        let found = locate(&root.path().join("app.hbs"), ".newline", root.path());
        assert!(found.iter().all(|f| f.path().ends_with(".newline")));
        assert!(found.iter().all(|f| f.dir() != root.path()));
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".editorconfig"), "root = true\n").unwrap();
        let child = root.path().join("child");
        fs::create_dir_all(child.join(".editorconfig")).unwrap();

        let found = locate(&child.join("a.txt"), DEFAULT_CONFIG_NAME, root.path());
        assert_eq!(dirs(&found), vec![root.path().to_path_buf()]);
    }

    #[test]
    fn test_from_source() {
        let file = ConfigFile::from_source("/project", ".editorconfig", "root = true\n[*]\n");
        assert!(file.is_root());
        assert_eq!(file.sections().len(), 1);
        assert_eq!(file.path(), Path::new("/project/.editorconfig"));
    }
}
