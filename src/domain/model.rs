use crate::utils::error::WordCountError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 一個 token 與其計數；映射階段為 (token, 1)，聚合後為 (token, total)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountPair {
    #[serde(rename = "word")]
    pub token: String,
    pub count: u64,
}

impl CountPair {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// 聚合結果：每個不同 token 對應其出現總次數，不保證順序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    counts: HashMap<String, u64>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str, count: u64) {
        match self.counts.get_mut(token) {
            Some(total) => *total += count,
            None => {
                self.counts.insert(token.to_string(), count);
            }
        }
    }

    pub fn add_pair(&mut self, pair: CountPair) {
        *self.counts.entry(pair.token).or_insert(0) += pair.count;
    }

    /// 合併另一個部分結果；加法可交換且可結合，合併順序不影響結果
    pub fn merge(&mut self, other: ResultSet) {
        if self.counts.len() < other.counts.len() {
            let smaller = std::mem::replace(&mut self.counts, other.counts);
            for (token, count) in smaller {
                *self.counts.entry(token).or_insert(0) += count;
            }
        } else {
            for (token, count) in other.counts {
                *self.counts.entry(token).or_insert(0) += count;
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 所有計數總和，等於輸入中的 token 總數
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    pub fn to_sorted_pairs(&self) -> Vec<CountPair> {
        let mut pairs: Vec<CountPair> = self
            .counts
            .iter()
            .map(|(token, count)| CountPair::new(token.clone(), *count))
            .collect();
        pairs.sort_by(|a, b| a.token.cmp(&b.token));
        pairs
    }
}

impl FromIterator<CountPair> for ResultSet {
    fn from_iter<I: IntoIterator<Item = CountPair>>(iter: I) -> Self {
        let mut result = ResultSet::new();
        result.extend(iter);
        result
    }
}

impl Extend<CountPair> for ResultSet {
    fn extend<I: IntoIterator<Item = CountPair>>(&mut self, iter: I) {
        for pair in iter {
            self.add_pair(pair);
        }
    }
}

impl<'a> FromIterator<(&'a str, u64)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut result = ResultSet::new();
        for (token, count) in iter {
            result.add(token, count);
        }
        result
    }
}

/// 已定位的輸入檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSource {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// 已讀入的輸入，每一行為不可變字串
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub source: InputSource,
    pub lines: Vec<String>,
}

/// 輸出檔每一行的格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `(token,count)`
    #[default]
    Tuple,
    /// `token<TAB>count`
    Tsv,
    /// `{"word":"token","count":N}`
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Tuple, OutputFormat::Tsv, OutputFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tuple => "tuple",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = WordCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WordCountError::InvalidConfigValueError {
                field: "output_format".to_string(),
                value: s.to_string(),
                reason: "Unsupported format. Valid formats: tuple, tsv, json".to_string(),
            })
    }
}

/// 一次執行的診斷摘要
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub app_name: String,
    pub input_path: PathBuf,
    pub input_bytes: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub lines: usize,
    pub total_tokens: u64,
    pub distinct_tokens: usize,
    pub output_path: String,
}
