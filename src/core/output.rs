use crate::core::Storage;
use crate::domain::model::{CountPair, OutputFormat, ResultSet};
use crate::utils::error::{Result, WordCountError};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

pub const SUCCESS_MARKER: &str = "_SUCCESS";
const PART_PREFIX: &str = "part-";

pub fn part_file_name(index: usize) -> String {
    format!("{}{:05}", PART_PREFIX, index)
}

/// 依 token 的 hash 決定分區
pub fn partition_for(token: &str, partitions: usize) -> usize {
    let partitions = partitions.max(1);
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    (hasher.finish() % partitions as u64) as usize
}

pub fn encode_pairs(format: OutputFormat, pairs: &[CountPair]) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Tuple => {
            let mut out = String::new();
            for pair in pairs {
                out.push_str(&format!("({},{})\n", pair.token, pair.count));
            }
            Ok(out.into_bytes())
        }
        OutputFormat::Tsv => {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(Vec::new());
            for pair in pairs {
                writer.serialize(pair)?;
            }
            writer
                .into_inner()
                .map_err(|e| WordCountError::IoError(e.into_error()))
        }
        OutputFormat::Json => {
            let mut out = Vec::new();
            for pair in pairs {
                serde_json::to_writer(&mut out, pair)?;
                out.push(b'\n');
            }
            Ok(out)
        }
    }
}

fn parse_error(location: &str, line_no: usize, message: impl Into<String>) -> WordCountError {
    WordCountError::ParseError {
        location: format!("{}:{}", location, line_no),
        message: message.into(),
    }
}

fn decode_tuple_line(line: &str, location: &str, line_no: usize) -> Result<CountPair> {
    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| parse_error(location, line_no, "expected '(token,count)'"))?;
    // token 可能含逗號，計數一定在最後一個逗號之後
    let (token, count) = inner
        .rsplit_once(',')
        .ok_or_else(|| parse_error(location, line_no, "missing ',' separator"))?;
    let count = count
        .parse::<u64>()
        .map_err(|e| parse_error(location, line_no, format!("invalid count '{}': {}", count, e)))?;
    Ok(CountPair::new(token, count))
}

/// 解析一個分區檔的內容；`location` 只用於錯誤訊息
pub fn decode_pairs(format: OutputFormat, content: &str, location: &str) -> Result<Vec<CountPair>> {
    match format {
        OutputFormat::Tuple => content
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| decode_tuple_line(line, location, i + 1))
            .collect(),
        OutputFormat::Tsv => {
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(b'\t')
                .has_headers(false)
                .from_reader(content.as_bytes());
            let mut pairs = Vec::new();
            for (i, record) in reader.deserialize::<CountPair>().enumerate() {
                let pair = record.map_err(|e| parse_error(location, i + 1, e.to_string()))?;
                pairs.push(pair);
            }
            Ok(pairs)
        }
        OutputFormat::Json => content
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| {
                serde_json::from_str::<CountPair>(line)
                    .map_err(|e| parse_error(location, i + 1, e.to_string()))
            })
            .collect(),
    }
}

/// 將 ResultSet 寫成 `part-NNNNN` 分區檔加上 `_SUCCESS` 標記
pub struct OutputWriter<'a, S: Storage> {
    storage: &'a S,
    format: OutputFormat,
    partitions: usize,
}

impl<'a, S: Storage> OutputWriter<'a, S> {
    pub fn new(storage: &'a S, format: OutputFormat, partitions: usize) -> Self {
        Self {
            storage,
            format,
            partitions: partitions.max(1),
        }
    }

    pub fn split_into_partitions(&self, result: &ResultSet) -> Vec<Vec<CountPair>> {
        let mut buckets: Vec<Vec<CountPair>> = vec![Vec::new(); self.partitions];
        for pair in result.to_sorted_pairs() {
            let index = partition_for(&pair.token, self.partitions);
            buckets[index].push(pair);
        }
        buckets
    }

    /// 目的地已存在時以 WriteError 失敗；寫到一半失敗會移除本次建立的所有目錄
    pub async fn write(&self, dir: &str, result: &ResultSet) -> Result<String> {
        let created_root = self.storage.create_dir(dir).await?;

        if let Err(e) = self.write_contents(dir, result).await {
            tracing::warn!("Removing partially written output '{}'", created_root);
            if let Err(cleanup) = self.storage.remove_dir_all(&created_root).await {
                tracing::warn!("⚠️ Failed to clean up '{}': {}", created_root, cleanup);
            }
            return Err(e);
        }

        Ok(dir.to_string())
    }

    async fn write_contents(&self, dir: &str, result: &ResultSet) -> Result<()> {
        let buckets = self.split_into_partitions(result);
        for (index, bucket) in buckets.iter().enumerate() {
            let data = encode_pairs(self.format, bucket)?;
            let path = Path::new(dir).join(part_file_name(index));
            tracing::debug!(
                "Writing {} entries ({} bytes) to {}",
                bucket.len(),
                data.len(),
                path.display()
            );
            self.storage
                .write_file(&path.to_string_lossy(), &data)
                .await?;
        }

        let marker = Path::new(dir).join(SUCCESS_MARKER);
        self.storage.write_file(&marker.to_string_lossy(), &[]).await
    }
}

/// 讀回輸出目錄；缺少 `_SUCCESS` 代表輸出不完整
pub async fn read_output_dir(dir: impl AsRef<Path>, format: OutputFormat) -> Result<ResultSet> {
    let dir = dir.as_ref();
    let display = dir.display().to_string();

    if !tokio::fs::try_exists(dir.join(SUCCESS_MARKER))
        .await
        .map_err(|e| WordCountError::read(&display, e))?
    {
        return Err(WordCountError::ParseError {
            location: display,
            message: format!("missing {} marker, output is incomplete", SUCCESS_MARKER),
        });
    }

    let mut part_files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| WordCountError::read(&display, e))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| WordCountError::read(&display, e))?
    {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(PART_PREFIX) {
            part_files.push(entry.path());
        }
    }
    part_files.sort();

    let mut result = ResultSet::new();
    for path in part_files {
        let location = path.display().to_string();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| WordCountError::read(&location, e))?;
        result.extend(decode_pairs(format, &content, &location)?);
    }

    Ok(result)
}
