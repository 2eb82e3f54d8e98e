pub mod backend;
pub mod renderer;
