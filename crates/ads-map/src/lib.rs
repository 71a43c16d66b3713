pub mod engine;
pub mod error;

pub use engine::{
    DEFAULT_MIN_CONFIDENCE, MappingEngine, RoleOverrides, RoleSuggestion, normalize_text,
};
pub use error::MapError;
