pub mod clock;
pub mod community;
pub mod config;
pub mod error;
pub mod profile;
pub mod project;
pub mod task;

pub use clock::*;
pub use community::*;
pub use config::Config;
pub use error::{CoreError, Result};
pub use profile::*;
pub use project::*;
pub use task::*;
