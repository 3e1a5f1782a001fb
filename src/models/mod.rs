pub mod generation;
pub mod media;
pub mod prompt;

pub use generation::*;
pub use media::*;
pub use prompt::*;
