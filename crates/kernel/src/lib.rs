pub mod module;
pub mod registry;
pub mod settings;

pub use module::{AppState, InitCtx, Module};
pub use registry::ModuleRegistry;
