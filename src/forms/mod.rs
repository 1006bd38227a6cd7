pub mod content;
pub mod videos;
