pub mod insights;
pub mod posts;
