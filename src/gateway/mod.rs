//! Gateway module - Image analysis, chat and image pinning

pub mod analysis;
pub mod chat;
pub mod prompts;
pub mod uploader;

pub use analysis::{AnalysisGateway, AnalysisOptions, AnalysisOutcome};
pub use chat::ChatGateway;
pub use uploader::StorageUploader;
