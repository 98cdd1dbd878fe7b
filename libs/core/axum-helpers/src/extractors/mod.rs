//! Extractors that reject with [`crate::AppError`] so every 4xx shares one body shape.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
