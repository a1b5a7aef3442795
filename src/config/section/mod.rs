//! Configuration section definitions.

mod assets;
mod build;
mod serve;

pub use assets::AssetsConfig;
pub use build::BuildConfig;
pub use serve::ServeConfig;
