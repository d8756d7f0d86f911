use crate::utils::error::{Result, WordCountError};
use regex::Regex;
use std::fmt;

/// 本機執行模式，語法沿用 `local`、`local[N]`、`local[*]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Local(usize),
    LocalAllCores,
}

impl ExecutionMode {
    pub fn parse(master: &str) -> Result<Self> {
        let re = Regex::new(r"^local(?:\[(\*|\d+)\])?$").map_err(|e| WordCountError::ConfigError {
            message: format!("invalid master pattern: {}", e),
        })?;

        let invalid = |reason: &str| WordCountError::InvalidConfigValueError {
            field: "master".to_string(),
            value: master.to_string(),
            reason: reason.to_string(),
        };

        let caps = re
            .captures(master.trim())
            .ok_or_else(|| invalid("Only local execution is supported: local, local[N] or local[*]"))?;

        match caps.get(1).map(|m| m.as_str()) {
            None => Ok(ExecutionMode::Local(1)),
            Some("*") => Ok(ExecutionMode::LocalAllCores),
            Some(threads) => {
                let threads: usize = threads
                    .parse()
                    .map_err(|_| invalid("Thread count is out of range"))?;
                if threads == 0 {
                    return Err(invalid("Thread count must be at least 1"));
                }
                Ok(ExecutionMode::Local(threads))
            }
        }
    }

    pub fn parallelism(&self) -> usize {
        match self {
            ExecutionMode::Local(threads) => *threads,
            ExecutionMode::LocalAllCores => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Local(1) => write!(f, "local"),
            ExecutionMode::Local(threads) => write!(f, "local[{}]", threads),
            ExecutionMode::LocalAllCores => write!(f, "local[*]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_modes() {
        assert_eq!(ExecutionMode::parse("local").unwrap(), ExecutionMode::Local(1));
        assert_eq!(ExecutionMode::parse("local[4]").unwrap(), ExecutionMode::Local(4));
        assert_eq!(
            ExecutionMode::parse("local[*]").unwrap(),
            ExecutionMode::LocalAllCores
        );
    }

    #[test]
    fn test_parse_rejects_cluster_and_garbage() {
        assert!(ExecutionMode::parse("yarn").is_err());
        assert!(ExecutionMode::parse("spark://host:7077").is_err());
        assert!(ExecutionMode::parse("local[0]").is_err());
        assert!(ExecutionMode::parse("local[-1]").is_err());
        assert!(ExecutionMode::parse("local[]").is_err());
    }

    #[test]
    fn test_parallelism() {
        assert_eq!(ExecutionMode::Local(3).parallelism(), 3);
        assert!(ExecutionMode::LocalAllCores.parallelism() >= 1);
    }

    #[test]
    fn test_display_round_trips() {
        for master in ["local", "local[8]", "local[*]"] {
            assert_eq!(ExecutionMode::parse(master).unwrap().to_string(), master);
        }
    }
}
