use crate::error::{CliError, Result};
use glob::glob;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Expand glob patterns in argument order; plain paths pass through untouched
/// so that a missing file is reported per file later on.
pub fn expand_inputs(values: &[String]) -> Result<Vec<PathBuf>> {
    if values.is_empty() {
        return Err(CliError::Message("no input files provided".to_string()));
    }
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        if !is_glob_pattern(value) {
            out.push(PathBuf::from(value));
            continue;
        }
        let before = out.len();
        for entry in glob(value).map_err(|e| CliError::InvalidGlob(e.to_string()))? {
            out.push(entry.map_err(|e| CliError::Glob(e.to_string()))?);
        }
        if out.len() == before {
            return Err(CliError::InputNotFound(value.clone()));
        }
    }
    Ok(out)
}

/// Decoding reads the whole file, so directories are rejected up front.
pub fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::InputNotFound(path.display().to_string()))
    }
}

/// `<dir>/<stem>.<ext>`, where `dir` defaults to the input's directory.
pub fn sibling_path(input: &Path, dir: Option<&Path>, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| OsString::from("output"), OsStr::to_os_string);
    let parent = dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let mut name = stem;
    name.push(".");
    name.push(ext);
    parent.join(name)
}

fn is_glob_pattern(value: &str) -> bool {
    value.contains('*') || value.contains('?') || value.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_path_defaults_to_input_dir() {
        let path = sibling_path(Path::new("/music/song.ncm"), None, "flac");
        assert_eq!(path, PathBuf::from("/music/song.flac"));
    }

    #[test]
    fn sibling_path_uses_output_dir() {
        let path = sibling_path(Path::new("/music/a.b.ncm"), Some(Path::new("/out")), "mp3");
        assert_eq!(path, PathBuf::from("/out/a.b.mp3"));
    }

    #[test]
    fn sibling_path_relative_input() {
        let path = sibling_path(Path::new("song.ncm"), None, "png");
        assert_eq!(path, PathBuf::from("song.png"));
    }

    #[test]
    fn empty_inputs_rejected() {
        assert!(matches!(expand_inputs(&[]), Err(CliError::Message(_))));
    }

    #[test]
    fn unmatched_glob_rejected() {
        let pattern = std::env::temp_dir()
            .join("ncmkit-no-such-dir-*")
            .join("*.ncm")
            .display()
            .to_string();
        assert!(matches!(
            expand_inputs(&[pattern]),
            Err(CliError::InputNotFound(_))
        ));
    }
}
