pub mod aggregator;
pub mod driver;
pub mod mapper;
pub mod output;
pub mod pipeline;
pub mod tokenizer;

pub use crate::domain::model::{
    CountPair, InputDocument, InputSource, OutputFormat, ResultSet, RunReport,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
