pub mod format;
pub mod text;
pub mod time;
