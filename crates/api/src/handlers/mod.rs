pub mod insights;
pub mod tracks;
