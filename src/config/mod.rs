// Re-export all items from the submodules
mod settings;

pub use settings::{RunSettings, TriageConfig};
