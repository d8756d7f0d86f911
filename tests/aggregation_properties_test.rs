use wordcount::core::aggregator::{count_lines, reduce_by_key, reduce_parallel};
use wordcount::core::mapper::pair_with_one;
use wordcount::core::tokenizer::{split_lines, tokenize};
use wordcount::{CountPair, ResultSet};

const CORPUS: &str = "the quick brown fox jumps over the lazy dog\n\
                      \n\
                      the  dog   barks \n\
                      fox, fox; FOX fox\r\n\
                       leading and trailing \n\
                      (word,with,commas) and\ttabs";

fn pairs_of(text: &str) -> Vec<CountPair> {
    split_lines(text)
        .iter()
        .flat_map(|line| tokenize(line).map(pair_with_one).collect::<Vec<_>>())
        .collect()
}

fn naive_occurrences(text: &str, word: &str) -> u64 {
    split_lines(text)
        .iter()
        .map(|line| line.split(' ').filter(|t| *t == word).count() as u64)
        .sum()
}

/// Deterministic permutations: reversed, rotated and interleaved.
fn permutations(pairs: &[CountPair]) -> Vec<Vec<CountPair>> {
    let mut reversed = pairs.to_vec();
    reversed.reverse();

    let mut rotated = pairs.to_vec();
    rotated.rotate_left(pairs.len() / 3);

    let (evens, odds): (Vec<_>, Vec<_>) = pairs
        .iter()
        .cloned()
        .enumerate()
        .partition(|(i, _)| i % 2 == 0);
    let interleaved = odds
        .into_iter()
        .chain(evens)
        .map(|(_, pair)| pair)
        .collect();

    vec![reversed, rotated, interleaved]
}

#[test]
fn test_total_equals_number_of_tokens() {
    let lines = split_lines(CORPUS);
    let token_count: usize = lines.iter().map(|line| line.split(' ').count()).sum();

    let result = count_lines(&lines);

    assert_eq!(result.total(), token_count as u64);
}

#[test]
fn test_each_count_equals_occurrences() {
    let result = count_lines(&split_lines(CORPUS));

    for (word, count) in result.iter() {
        assert_eq!(count, naive_occurrences(CORPUS, word), "word = {:?}", word);
    }
    assert_eq!(result.get("fox"), Some(2));
    assert_eq!(result.get("the"), Some(3));
    assert_eq!(result.get("FOX"), Some(1));
}

#[test]
fn test_pair_order_does_not_change_result() {
    let pairs = pairs_of(CORPUS);
    let expected = reduce_by_key(pairs.clone());

    for permuted in permutations(&pairs) {
        assert_eq!(reduce_by_key(permuted), expected);
    }
}

#[test]
fn test_merge_grouping_does_not_change_result() {
    let pairs = pairs_of(CORPUS);
    let expected = reduce_by_key(pairs.clone());

    for chunk_size in [1, 2, 5, 7, pairs.len()] {
        let partials: Vec<ResultSet> = pairs
            .chunks(chunk_size)
            .map(|chunk| reduce_by_key(chunk.to_vec()))
            .collect();

        let mut left_to_right = ResultSet::new();
        for partial in partials.iter().cloned() {
            left_to_right.merge(partial);
        }

        let mut right_to_left = ResultSet::new();
        for partial in partials.into_iter().rev() {
            right_to_left.merge(partial);
        }

        assert_eq!(left_to_right, expected, "chunk_size = {}", chunk_size);
        assert_eq!(right_to_left, expected, "chunk_size = {}", chunk_size);
    }
}

#[tokio::test]
async fn test_parallel_reduction_matches_sequential() {
    let lines = split_lines(CORPUS);
    let sequential = count_lines(&lines);

    for parallelism in [1, 2, 3, 8, 64] {
        let parallel = reduce_parallel(lines.clone(), parallelism).await.unwrap();
        assert_eq!(parallel, sequential, "parallelism = {}", parallelism);
    }
}
