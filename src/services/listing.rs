use crate::services::error::{ServiceError, ServiceResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk `root` and return the base names of files ending in `.extension`
/// (case-insensitive), in sorted walk order. Stops at the first error.
pub fn list_matching(root: &Path, extension: &str) -> ServiceResult<Vec<String>> {
    let suffix = format!(".{}", extension.trim_start_matches('.').to_lowercase());
    let mut names = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ServiceError::Traversal {
            root: root.display().to_string(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.to_lowercase().ends_with(&suffix) {
            names.push(name.into_owned());
        }
    }

    Ok(names)
}

/// Run [`list_matching`] on the blocking pool
pub async fn list_files(root: PathBuf, extension: String) -> ServiceResult<Vec<String>> {
    tracing::debug!("Scanning {} for .{} files", root.display(), extension);
    let names = tokio::task::spawn_blocking(move || list_matching(&root, &extension)).await??;
    tracing::info!("Found {} matching files", names.len());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"%PDF-1.4").unwrap();
    }

    #[test]
    fn test_matches_suffix_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.pdf"));
        touch(&dir.path().join("A.PDF"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("pdf"));

        let names = list_matching(dir.path(), "pdf").unwrap();
        assert_eq!(names, vec!["A.PDF".to_string(), "b.pdf".to_string()]);
    }

    #[test]
    fn test_recurses_and_returns_base_names() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("papers/2023/deep.pdf"));
        touch(&dir.path().join("top.pdf"));
        fs::create_dir_all(dir.path().join("folder.pdf")).unwrap();

        let names = list_matching(dir.path(), ".pdf").unwrap();
        assert_eq!(names, vec!["deep.pdf".to_string(), "top.pdf".to_string()]);
    }

    #[test]
    fn test_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_matching(dir.path(), "pdf").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_traversal_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = list_matching(&missing, "pdf").unwrap_err();
        assert!(matches!(err, ServiceError::Traversal { .. }));
        assert!(err.to_string().starts_with("error walking directory"));
    }

    #[tokio::test]
    async fn test_list_files_runs_off_the_async_thread() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("x.pdf"));

        let names =
            tokio_test::assert_ok!(list_files(dir.path().to_path_buf(), "pdf".to_string()).await);
        assert_eq!(names, vec!["x.pdf".to_string()]);
    }
}
