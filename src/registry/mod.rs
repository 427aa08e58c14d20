pub mod export;
pub mod published;
pub mod registry_model;
