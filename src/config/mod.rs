// src/config/mod.rs

//! Job configuration: TOML model, loading, and validation.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_from_path, load_or_default};
pub use model::{
    CategoryFlags, CoderSection, JobConfig, MakeSection, ProvisionSection, RawJobConfig,
    ReviewSection, SourceSection, ToolsSection,
};
pub use validate::{
    validate_make, validate_provision, validate_review, validate_shared, ValidationErrors,
    ValidationIssue,
};
