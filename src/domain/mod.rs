pub mod content;
pub mod machine;
pub mod taxonomy;
pub mod types;
