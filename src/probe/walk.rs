//! Expand command-line inputs into the list of files to probe

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Files named directly are always kept. Directories are walked (recursively
/// if the config says so) and filtered by extension. Output is sorted per
/// directory so reports are stable between runs.
pub fn collect_files<P: AsRef<Path>>(inputs: &[P], config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            walk_dir(input, config, &mut files);
        } else {
            files.push(input.to_path_buf());
        }
    }
    files
}

fn walk_dir(dir: &Path, config: &Config, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            if config.recursive {
                walk_dir(&path, config, files);
            }
        } else if config.matches_extension(&path) {
            files.push(path);
        }
    }
}
