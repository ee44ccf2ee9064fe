pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod levels;
pub mod physics;
pub mod runner;
pub mod save;
pub mod scene;
