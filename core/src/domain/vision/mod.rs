pub mod annotator;
pub mod entities;
pub mod geometry;
pub mod parser;
pub mod ports;
pub mod prompt;
pub mod services;
