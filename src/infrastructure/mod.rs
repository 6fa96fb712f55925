pub mod metadata;
pub mod repositories;
