pub mod insights;
pub mod list;
pub mod media;
