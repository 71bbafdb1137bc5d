//! Guest session resolution

pub mod resolver;

pub use resolver::{SessionResolution, resolve};
