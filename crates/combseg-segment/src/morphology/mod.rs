mod kernel;
mod ops;

pub use kernel::Kernel;
pub use ops::{clean, close, dilate, erode, open, MorphCleanConfig};
