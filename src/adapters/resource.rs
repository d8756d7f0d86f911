use crate::utils::error::{Result, WordCountError};
use std::path::{Path, PathBuf};

pub const DEFAULT_RESOURCE_NAME: &str = "spark_example.txt";

/// 預設搜尋順序：工作目錄下的 `resources/`，再來是 crate 內附的 `resources/`
pub fn default_resource_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("resources"),
        Path::new(env!("CARGO_MANIFEST_DIR")).join("resources"),
    ]
}

#[derive(Debug, Clone)]
pub struct ResourceLocator {
    search_dirs: Vec<PathBuf>,
}

impl ResourceLocator {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn bundled() -> Self {
        Self::new(default_resource_dirs())
    }

    /// 依序在搜尋目錄中尋找資源，回傳第一個存在的檔案
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        for dir in &self.search_dirs {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!("Found resource {} at {}", name, candidate.display());
                return Ok(candidate);
            }
        }

        Err(WordCountError::ResourceNotFound {
            name: name.to_string(),
            searched: self
                .search_dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// 明確指定的輸入路徑，不做搜尋
    pub fn locate_path(&self, path: &str) -> Result<PathBuf> {
        let candidate = PathBuf::from(path);
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(WordCountError::ResourceNotFound {
                name: path.to_string(),
                searched: path.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_locate_uses_first_matching_dir() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("input.txt"), "b").unwrap();

        let locator = ResourceLocator::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(
            locator.locate("input.txt").unwrap(),
            second.path().join("input.txt")
        );

        std::fs::write(first.path().join("input.txt"), "a").unwrap();
        assert_eq!(
            locator.locate("input.txt").unwrap(),
            first.path().join("input.txt")
        );
    }

    #[test]
    fn test_locate_missing_resource() {
        let dir = TempDir::new().unwrap();
        let locator = ResourceLocator::new(vec![dir.path().to_path_buf()]);

        let err = locator.locate("spark_example.txt").unwrap_err();
        assert!(matches!(err, WordCountError::ResourceNotFound { .. }));
        assert!(err.to_string().contains("spark_example.txt"));
    }

    #[test]
    fn test_bundled_resource_is_found() {
        let path = ResourceLocator::bundled().locate(DEFAULT_RESOURCE_NAME).unwrap();
        assert!(path.ends_with("resources/spark_example.txt"));
    }

    #[test]
    fn test_locate_path_ignores_directories() {
        let dir = TempDir::new().unwrap();
        let locator = ResourceLocator::bundled();
        assert!(locator
            .locate_path(&dir.path().to_string_lossy())
            .is_err());
    }
}
