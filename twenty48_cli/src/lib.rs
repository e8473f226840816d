mod autoplay;
mod command;
mod console;
mod store;
pub use autoplay::*;
pub use command::*;
pub use console::*;
pub use store::*;
