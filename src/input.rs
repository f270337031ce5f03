//! Input collection: positional paths, directories, globs, and piped stdin.

use crate::constants::{MAX_FILE_SIZE, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{PicplusError, Result};
use glob::glob;
use std::ffi::OsString;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One unit of work: a file on disk or the piped stdin buffer.
#[derive(Debug, Clone)]
pub enum InputItem {
    Path(PathBuf),
    Buffer(Vec<u8>),
}

impl InputItem {
    /// Identity used in per-item diagnostics.
    pub fn label(&self) -> String {
        match self {
            InputItem::Path(path) => path.display().to_string(),
            InputItem::Buffer(_) => "<stdin>".to_string(),
        }
    }

    pub fn file_name(&self) -> Option<OsString> {
        match self {
            InputItem::Path(path) => path.file_name().map(|name| name.to_os_string()),
            InputItem::Buffer(_) => None,
        }
    }

    /// Read the item's full contents, enforcing the per-item size ceiling.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            InputItem::Path(path) => {
                if !path.exists() {
                    return Err(PicplusError::FileNotFound(path.clone()));
                }
                let size = fs::metadata(path)?.len();
                if size > MAX_FILE_SIZE {
                    return Err(PicplusError::FileTooLarge(size, MAX_FILE_SIZE));
                }
                Ok(fs::read(path)?)
            }
            InputItem::Buffer(buffer) => Ok(buffer.clone()),
        }
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Expand positional arguments into input items.
///
/// Each argument may be an existing file, a directory (top-level image files
/// only, hidden entries skipped), or a glob pattern. Argument order is kept;
/// directory and glob expansions are sorted so repeated runs see the same
/// batch order. With no arguments, compress mode falls back to a piped stdin
/// buffer when stdin is not a terminal.
pub fn collect_inputs(raw: &[String], allow_stdin: bool) -> Result<Vec<InputItem>> {
    if raw.is_empty() {
        return stdin_input(allow_stdin);
    }

    let mut items = Vec::new();
    for arg in raw {
        let path = Path::new(arg);
        if path.is_file() {
            items.push(InputItem::Path(path.to_path_buf()));
        } else if path.is_dir() {
            items.extend(directory_inputs(path)?);
        } else {
            items.extend(glob_inputs(arg)?);
        }
    }

    if items.is_empty() {
        return Err(PicplusError::NoInput);
    }
    Ok(items)
}

fn stdin_input(allow_stdin: bool) -> Result<Vec<InputItem>> {
    if !allow_stdin || std::io::stdin().is_terminal() {
        return Err(PicplusError::NoInput);
    }
    let mut buffer = Vec::new();
    std::io::stdin().read_to_end(&mut buffer)?;
    if buffer.is_empty() {
        return Err(PicplusError::NoInput);
    }
    Ok(vec![InputItem::Buffer(buffer)])
}

fn directory_inputs(dir: &Path) -> Result<Vec<InputItem>> {
    let mut found = Vec::new();
    let walker = WalkDir::new(dir).max_depth(1).into_iter();
    for entry in walker.filter_entry(|e| {
        e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
    }) {
        let entry = entry?;
        if entry.path().is_file() && is_image_file(entry.path()) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found.into_iter().map(InputItem::Path).collect())
}

fn glob_inputs(pattern: &str) -> Result<Vec<InputItem>> {
    let mut found = Vec::new();
    if let Ok(paths) = glob(pattern) {
        for entry in paths.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                found.push(entry);
            }
        }
    }
    if found.is_empty() {
        return Err(PicplusError::NoImageFilesFound(pattern.to_string()));
    }
    found.sort();
    Ok(found.into_iter().map(InputItem::Path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(path: &Path, contents: &[u8]) {
        File::create(path).unwrap().write_all(contents).unwrap();
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("test.jpg")));
        assert!(is_image_file(Path::new("test.JPEG")));
        assert!(is_image_file(Path::new("test.png")));
        assert!(is_image_file(Path::new("test.gif")));
        assert!(is_image_file(Path::new("test.svg")));
        assert!(is_image_file(Path::new("test.webp")));

        assert!(!is_image_file(Path::new("test.txt")));
        assert!(!is_image_file(Path::new("test")));
    }

    #[test]
    fn test_collect_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.png");
        touch(&file, b"data");

        let items = collect_inputs(&[file.to_string_lossy().to_string()], false).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label(), file.display().to_string());
    }

    #[test]
    fn test_collect_directory_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("b.png"), b"x");
        touch(&temp.path().join("a.jpg"), b"x");
        touch(&temp.path().join("notes.txt"), b"x");
        touch(&temp.path().join(".hidden.png"), b"x");

        let items =
            collect_inputs(&[temp.path().to_string_lossy().to_string()], false).unwrap();
        let labels: Vec<_> = items.iter().map(|i| i.label()).collect();
        assert_eq!(items.len(), 2);
        assert!(labels[0].ends_with("a.jpg"));
        assert!(labels[1].ends_with("b.png"));
    }

    #[test]
    fn test_collect_directory_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("nested.png"), b"x");
        touch(&temp.path().join("top.png"), b"x");

        let items =
            collect_inputs(&[temp.path().to_string_lossy().to_string()], false).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].label().ends_with("top.png"));
    }

    #[test]
    fn test_collect_glob_pattern() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.png"), b"x");
        touch(&temp.path().join("b.png"), b"x");
        touch(&temp.path().join("c.jpg"), b"x");

        let pattern = format!("{}/*.png", temp.path().to_string_lossy());
        let items = collect_inputs(&[pattern], false).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_collect_missing_pattern_fails() {
        let result = collect_inputs(&["definitely-not-there-*.png".to_string()], false);
        assert!(matches!(result, Err(PicplusError::NoImageFilesFound(_))));
    }

    #[test]
    fn test_collect_empty_without_stdin_fails() {
        let result = collect_inputs(&[], false);
        assert!(matches!(result, Err(PicplusError::NoInput)));
    }

    #[test]
    fn test_read_bytes_missing_file() {
        let item = InputItem::Path(PathBuf::from("nope/nothing.png"));
        assert!(matches!(
            item.read_bytes(),
            Err(PicplusError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_buffer_item() {
        let item = InputItem::Buffer(vec![1, 2, 3]);
        assert_eq!(item.label(), "<stdin>");
        assert_eq!(item.file_name(), None);
        assert_eq!(item.read_bytes().unwrap(), vec![1, 2, 3]);
    }
}
