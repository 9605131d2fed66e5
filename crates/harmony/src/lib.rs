pub mod cli;
pub mod config;
pub mod events;
pub mod gradient;
pub mod render;
pub mod sys;
