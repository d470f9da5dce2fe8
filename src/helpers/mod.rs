pub mod text;
pub mod globs;
