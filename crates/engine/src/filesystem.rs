use crate::config::WalkOptions;
use crate::error::{EngineError, Result};
use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Where the indexer gets its files from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Recursively scan a directory; paths are stored relative to it.
    Directory(PathBuf),
    /// Explicit file list (stdin mode); paths are stored relative to `base`.
    List { base: PathBuf, paths: Vec<PathBuf> },
}

impl InputSource {
    /// Validate a directory argument.
    ///
    /// # Errors
    /// Returns `NotADirectory` if `dir` does not exist or is not a directory.
    pub fn directory(dir: &Path) -> Result<Self> {
        let abs = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        if !abs.is_dir() {
            return Err(EngineError::NotADirectory(abs));
        }
        Ok(Self::Directory(abs))
    }

    /// Build a list source from newline-separated paths, relative to the
    /// current directory.
    ///
    /// # Errors
    /// Returns an error if the reader fails or the current directory is unavailable.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let base = std::env::current_dir()?;
        let paths = read_path_list(reader)?;
        Ok(Self::List { base, paths })
    }

    pub fn base(&self) -> &Path {
        match self {
            Self::Directory(dir) => dir,
            Self::List { base, .. } => base,
        }
    }
}

/// Read newline-separated paths, trimming each and dropping blank lines.
///
/// # Errors
/// Returns the reader's I/O error.
pub fn read_path_list<R: BufRead>(reader: R) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}

/// Feed every candidate file of `source` into `tx`.
///
/// Directory sources are walked in parallel and filtered by extension.
/// List sources are forwarded as given, so an unreadable entry still
/// reaches the analyzer and is reported there.
///
/// # Errors
/// Returns an error only when the walker cannot be set up.
pub fn send_inputs(source: &InputSource, options: &WalkOptions, tx: &Sender<PathBuf>) -> Result<()> {
    match source {
        InputSource::Directory(root) => walk_parallel(root, options, tx),
        InputSource::List { paths, .. } => {
            for path in paths {
                if tx.send(path.clone()).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }
}

/// Parallel recursive directory walk.
///
/// # Errors
/// Returns `NotADirectory` if `root` is not a directory. Entry errors
/// during traversal are logged and skipped.
pub fn walk_parallel(root: &Path, options: &WalkOptions, tx: &Sender<PathBuf>) -> Result<()> {
    if !root.is_dir() {
        return Err(EngineError::NotADirectory(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.hidden)
        .ignore(options.git_ignore)
        .parents(options.git_ignore)
        .git_ignore(options.git_ignore)
        .git_global(options.git_ignore)
        .git_exclude(options.git_ignore)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth);

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && options.accepts(entry.path())
                        && tx.send(entry.into_path()).is_err()
                    {
                        return ignore::WalkState::Quit;
                    }
                }
                Err(e) => warn!("Skipping walk entry: {e}"),
            }
            ignore::WalkState::Continue
        })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn collect(source: &InputSource, options: &WalkOptions) -> Vec<PathBuf> {
        let (tx, rx) = crossbeam_channel::unbounded();
        send_inputs(source, options, &tx).unwrap();
        drop(tx);
        let mut paths: Vec<_> = rx.into_iter().collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_read_path_list_trims_and_skips_blank() {
        let input = Cursor::new("a.adoc\n\n  b/c.adoc  \n   \n");
        let paths = read_path_list(input).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.adoc"), PathBuf::from("b/c.adoc")]);
    }

    #[test]
    fn test_directory_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("x.adoc");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            InputSource::directory(&file),
            Err(EngineError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_walk_filters_extension_and_includes_hidden() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("nested/.hidden")).unwrap();
        std::fs::write(dir.path().join("top.adoc"), "a").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "a").unwrap();
        std::fs::write(dir.path().join("nested/deep.ADOC"), "a").unwrap();
        std::fs::write(dir.path().join("nested/.hidden/secret.adoc"), "a").unwrap();

        let source = InputSource::directory(dir.path()).unwrap();
        let paths = collect(&source, &WalkOptions::default());
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(paths.len(), 3);
        assert!(names.contains(&"top.adoc".to_string()));
        assert!(names.contains(&"deep.ADOC".to_string()));
        assert!(names.contains(&"secret.adoc".to_string()));
    }

    #[test]
    fn test_walk_respects_max_depth() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
        std::fs::write(dir.path().join("one.adoc"), "").unwrap();
        std::fs::write(dir.path().join("a/b/three.adoc"), "").unwrap();

        let options = WalkOptions {
            max_depth: Some(1),
            ..WalkOptions::default()
        };
        let source = InputSource::directory(dir.path()).unwrap();
        let paths = collect(&source, &options);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("one.adoc"));
    }

    #[test]
    fn test_list_source_forwards_paths_verbatim() {
        let source = InputSource::List {
            base: PathBuf::from("/tmp"),
            paths: vec![PathBuf::from("missing.adoc"), PathBuf::from("other.txt")],
        };
        let paths = collect(&source, &WalkOptions::default());
        assert_eq!(paths.len(), 2);
    }
}
