use crate::core::mapper::pair_with_one;
use crate::core::tokenizer::tokenize;
use crate::domain::model::{CountPair, ResultSet};
use crate::utils::error::{Result, WordCountError};
use tokio::task::JoinSet;

/// group-by-key 後加總
pub fn reduce_by_key<I>(pairs: I) -> ResultSet
where
    I: IntoIterator<Item = CountPair>,
{
    pairs.into_iter().collect()
}

/// tokenize -> pair_with_one -> reduce_by_key，作用於一批行
pub fn count_lines<S: AsRef<str>>(lines: &[S]) -> ResultSet {
    let mut result = ResultSet::new();
    for line in lines {
        for pair in tokenize(line.as_ref()).map(pair_with_one) {
            result.add(&pair.token, pair.count);
        }
    }
    result
}

/// 把行平均切成最多 `parts` 份，保留原本順序
pub fn partition_lines(lines: Vec<String>, parts: usize) -> Vec<Vec<String>> {
    let parts = parts.max(1);
    if lines.is_empty() {
        return Vec::new();
    }

    let chunk_size = lines.len().div_ceil(parts);
    let mut chunks = Vec::with_capacity(parts);
    let mut iter = lines.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(chunk_size).collect());
    }
    chunks
}

/// 各分塊在 blocking worker 上各自計數，再合併部分結果。
///
/// 合併順序取決於 worker 完成的先後，結果與循序計數相同。
pub async fn reduce_parallel(lines: Vec<String>, parallelism: usize) -> Result<ResultSet> {
    if parallelism <= 1 || lines.len() < 2 {
        return Ok(count_lines(&lines));
    }

    let chunks = partition_lines(lines, parallelism);
    tracing::debug!("Counting {} chunks in parallel", chunks.len());

    let mut tasks = JoinSet::new();
    for chunk in chunks {
        tasks.spawn_blocking(move || count_lines(&chunk));
    }

    let mut result = ResultSet::new();
    while let Some(joined) = tasks.join_next().await {
        let partial = joined.map_err(|e| WordCountError::ProcessingError {
            message: format!("Counting task failed: {}", e),
        })?;
        result.merge(partial);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reduce_by_key_sums_ones() {
        let pairs = vec![
            CountPair::new("the", 1),
            CountPair::new("cat", 1),
            CountPair::new("the", 1),
        ];
        let result = reduce_by_key(pairs);
        assert_eq!(result.get("the"), Some(2));
        assert_eq!(result.get("cat"), Some(1));
    }

    #[test]
    fn test_reduce_by_key_is_order_independent() {
        let pairs: Vec<CountPair> = tokenize("b a c a b a  ").map(pair_with_one).collect();
        let mut reversed = pairs.clone();
        reversed.reverse();
        let mut rotated = pairs.clone();
        rotated.rotate_left(3);

        let expected = reduce_by_key(pairs);
        assert_eq!(reduce_by_key(reversed), expected);
        assert_eq!(reduce_by_key(rotated), expected);
        assert_eq!(expected.get("a"), Some(3));
        assert_eq!(expected.get(""), Some(2));
    }

    #[test]
    fn test_count_lines_scenario_the_cat() {
        let result = count_lines(&["the cat sat on the mat"]);
        assert_eq!(result.len(), 5);
        assert_eq!(result.get("the"), Some(2));
        for word in ["cat", "sat", "on", "mat"] {
            assert_eq!(result.get(word), Some(1), "{}", word);
        }
    }

    #[test]
    fn test_count_lines_keeps_empty_tokens() {
        let result = count_lines(&["a  a"]);
        assert_eq!(result.get("a"), Some(2));
        assert_eq!(result.get(""), Some(1));
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn test_partition_lines() {
        let chunks = partition_lines(lines(&["1", "2", "3", "4", "5"]), 2);
        assert_eq!(chunks, vec![lines(&["1", "2", "3"]), lines(&["4", "5"])]);

        assert!(partition_lines(Vec::new(), 4).is_empty());
        assert_eq!(partition_lines(lines(&["x"]), 0).len(), 1);
        assert_eq!(partition_lines(lines(&["a", "b"]), 8).len(), 2);
    }

    #[tokio::test]
    async fn test_reduce_parallel_matches_sequential() {
        let input = lines(&[
            "the quick brown fox",
            "jumps over the lazy dog",
            "",
            "the  end ",
            "fox fox fox",
        ]);
        let sequential = count_lines(&input);

        for parallelism in 1..=6 {
            let parallel = reduce_parallel(input.clone(), parallelism).await.unwrap();
            assert_eq!(parallel, sequential, "parallelism = {}", parallelism);
        }
    }

    #[tokio::test]
    async fn test_reduce_parallel_empty_input() {
        let result = reduce_parallel(Vec::new(), 4).await.unwrap();
        assert!(result.is_empty());
    }
}
