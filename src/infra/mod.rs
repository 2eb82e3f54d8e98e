pub mod import;
pub mod script;
