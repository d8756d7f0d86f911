use crate::core::Storage;
use crate::utils::error::{Result, WordCountError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn file_size(&self, path: &str) -> Result<u64> {
        let full_path = self.resolve(path);
        let metadata = tokio::fs::metadata(&full_path)
            .await
            .map_err(|e| WordCountError::read(full_path.display().to_string(), e))?;
        Ok(metadata.len())
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| WordCountError::read(full_path.display().to_string(), e))
    }

    async fn create_dir(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        let display = full_path.display().to_string();

        // 記下最外層尚不存在的上層目錄，失敗時才能完整清掉
        let mut created_root = Path::new(path).to_path_buf();
        for ancestor in Path::new(path).ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            let exists = tokio::fs::try_exists(self.resolve(&ancestor.to_string_lossy()))
                .await
                .map_err(|e| WordCountError::write(&display, e))?;
            if exists {
                break;
            }
            created_root = ancestor.to_path_buf();
        }

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| WordCountError::write(&display, e))?;
            }
        }

        // create_dir 而非 create_dir_all：已存在的目錄必須視為錯誤
        tokio::fs::create_dir(&full_path)
            .await
            .map_err(|e| WordCountError::write(&display, e))?;

        Ok(created_root.to_string_lossy().to_string())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| WordCountError::write(full_path.display().to_string(), e))
    }

    async fn remove_dir_all(&self, path: &str) -> Result<()> {
        let full_path = self.resolve(path);
        tokio::fs::remove_dir_all(&full_path)
            .await
            .map_err(|e| WordCountError::write(full_path.display().to_string(), e))
    }
}
