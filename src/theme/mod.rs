//! Color tokens, semantic roles, series palette and the token resolver.

mod palette;
mod resolver;
mod semantic;
mod tokens;

pub use palette::Palette;
pub use resolver::{ColorResolver, MAX_VAR_DEPTH, MAX_VAR_SUBSTITUTIONS};
pub use semantic::{ResolvedSemanticColors, SemanticColors, SemanticRole};
pub use tokens::TokenTable;
