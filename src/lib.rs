pub mod app;
pub mod engine;
pub mod rendering;
pub mod repl;
