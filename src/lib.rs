pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{resource::ResourceLocator, storage::LocalStorage};
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::RunConfig;
pub use crate::core::{
    driver::{PipelineDriver, RunState},
    output::{read_output_dir, OutputWriter},
    pipeline::WordCountPipeline,
};
pub use crate::domain::model::{CountPair, OutputFormat, ResultSet, RunReport};
pub use crate::utils::error::{Result, WordCountError};
