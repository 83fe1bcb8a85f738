use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Expand a directory into the files under it, respecting gitignore.
///
/// Hidden entries are skipped, so config files themselves are never listed.
pub fn walk_paths<P: AsRef<Path>>(roots: &[P]) -> impl Iterator<Item = Result<PathBuf>> {
    let mut all_files: Vec<Result<PathBuf>> = vec![];

    for root in roots {
        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        all_files.push(Ok(entry.into_path()));
                    }
                }
                Err(e) => all_files.push(Err(e.into())),
            }
        }
    }

    all_files.into_iter()
}
