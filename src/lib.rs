pub mod audio;
pub mod core;
pub mod gui;
pub mod persistence;
