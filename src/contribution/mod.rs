pub mod contribution_model;
pub mod loader;
pub mod maestro;
pub mod raw;
pub mod source;
