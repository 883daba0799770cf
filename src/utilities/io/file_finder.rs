use crate::analysis::constants::RESULT_FILE_EXTENSION;
use std::fs::read_dir;
use std::io;
use std::path::{Path, PathBuf};

/// Iterates through the files directly inside a given directory whose extension
/// matches `extension`, passing each one to the provided callback function.
///
/// Subdirectories are not descended into.
///
/// # Arguments
///
/// * `directory_path` - The path to the directory to search
/// * `extension` - Extension to match, without the leading dot
/// * `callback` - Function that will be called for each file found
///
/// # Errors
///
/// Returns an error if there are issues accessing the directory or its entries.
pub fn find_files<P, F>(directory_path: P, extension: &str, mut callback: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnMut(PathBuf),
{
    for entry in read_dir(directory_path.as_ref())? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            callback(path);
        }
    }

    Ok(())
}

/// Collects the experiment result (`.dat`) files of a directory, sorted by name
pub fn find_result_files<P: AsRef<Path>>(directory_path: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    find_files(directory_path, RESULT_FILE_EXTENSION, |path| files.push(path))?;
    files.sort();
    Ok(files)
}
