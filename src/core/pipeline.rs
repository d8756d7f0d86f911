use crate::adapters::resource::ResourceLocator;
use crate::core::aggregator::reduce_parallel;
use crate::core::output::OutputWriter;
use crate::core::tokenizer::split_lines;
use crate::core::{ConfigProvider, InputDocument, InputSource, Pipeline, ResultSet, Storage};
use crate::utils::error::{Result, WordCountError};

/// 讀檔 -> 切行 -> 計數 -> 寫出
pub struct WordCountPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> WordCountPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for WordCountPipeline<S, C> {
    fn app_name(&self) -> &str {
        self.config.app_name()
    }

    async fn locate(&self) -> Result<InputSource> {
        let locator = ResourceLocator::new(self.config.resource_dirs().to_vec());
        let path = match self.config.input_override() {
            Some(path) => locator.locate_path(path)?,
            None => locator.locate(self.config.resource_name())?,
        };

        let size_bytes = self.storage.file_size(&path.to_string_lossy()).await?;
        tracing::debug!("Resolved input {} ({} bytes)", path.display(), size_bytes);

        Ok(InputSource { path, size_bytes })
    }

    async fn extract(&self, source: InputSource) -> Result<InputDocument> {
        let path = source.path.to_string_lossy().to_string();
        let bytes = self.storage.read_file(&path).await?;

        let text = String::from_utf8(bytes).map_err(|e| {
            WordCountError::read(
                &path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error()),
            )
        })?;

        let lines = split_lines(&text);
        tracing::debug!("Read {} lines from {}", lines.len(), path);

        Ok(InputDocument { source, lines })
    }

    async fn transform(&self, document: InputDocument) -> Result<ResultSet> {
        let parallelism = self.config.parallelism();
        tracing::debug!(
            "Counting {} lines with parallelism {}",
            document.lines.len(),
            parallelism
        );
        reduce_parallel(document.lines, parallelism).await
    }

    async fn load(&self, result: ResultSet) -> Result<String> {
        let writer = OutputWriter::new(
            &self.storage,
            self.config.output_format(),
            self.config.partitions(),
        );
        writer.write(self.config.output_path(), &result).await
    }
}
