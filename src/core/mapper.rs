use crate::domain::model::CountPair;

/// token -> (token, 1)
pub fn pair_with_one(token: &str) -> CountPair {
    CountPair::new(token, 1)
}
