pub mod files;
pub mod format;
pub mod split;
pub mod transfer;
pub mod upload;
