//! A side-scrolling arcade game for the terminal.
//!
//! The simulation (`game` and the modules it drives) knows nothing about
//! terminals or sound devices; `terminal`, `render` and `audio` plug it into
//! crossterm and rodio, and `runtime` paces the loop.

pub mod audio;
pub mod bird;
pub mod collision;
pub mod config;
pub mod game;
pub mod geometry;
pub mod ground;
pub mod input;
pub mod logger;
pub mod obstacle;
pub mod render;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod terminal;
pub mod viewport;
