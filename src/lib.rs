pub mod context;
pub mod mesh;
pub mod shader;

// Re-export commonly used types
pub use context::GlWindow;
pub use mesh::Mesh;
pub use shader::{load_source, CompiledStage, ShaderError, ShaderProgram, StageKind};
