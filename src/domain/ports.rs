use crate::domain::model::{InputDocument, InputSource, OutputFormat, ResultSet};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    fn file_size(&self, path: &str) -> impl std::future::Future<Output = Result<u64>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// 建立新目錄（含缺少的上層目錄）；目錄已存在時必須失敗。
    /// 回傳本次實際建立的最外層目錄，失敗清理時由它開始移除
    fn create_dir(&self, path: &str) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_dir_all(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn app_name(&self) -> &str;
    fn parallelism(&self) -> usize;
    fn resource_name(&self) -> &str;
    fn resource_dirs(&self) -> &[PathBuf];
    fn input_override(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn partitions(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn app_name(&self) -> &str;
    async fn locate(&self) -> Result<InputSource>;
    async fn extract(&self, source: InputSource) -> Result<InputDocument>;
    async fn transform(&self, document: InputDocument) -> Result<ResultSet>;
    async fn load(&self, result: ResultSet) -> Result<String>;
}
