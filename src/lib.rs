pub mod assets;
pub mod config;
pub mod consts;
pub mod file;
pub mod gui;
pub mod math;
pub mod model;
