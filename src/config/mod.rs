//! Configuration module

pub mod settings;

pub use settings::{
    AnalysisConfig, GeminiConfig, LoggingConfig, ServerConfig, Settings, StorageConfig,
    StorageProvider,
};
