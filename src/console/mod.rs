//! Console module replacing the web pages
//!
//! Commands arrive one per line on stdin; replies and dashboard notices
//! go to stdout as text or JSON lines.

mod input;
mod protocol;
mod render;
mod session;

pub use input::LineReader;
pub use session::Console;
