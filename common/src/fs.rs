use std::path::{Path, PathBuf};

use anyhow::Result;

pub trait FsExt {
    /// Resolves the path against the current working directory. Absolute
    /// paths are returned unchanged.
    fn relative_to_cwd(&self) -> Result<PathBuf>
    where
        Self: AsRef<Path>,
    {
        let path = self.as_ref();

        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        Ok(std::env::current_dir()?.join(path))
    }
}

impl FsExt for String {}

impl FsExt for &'static str {}
