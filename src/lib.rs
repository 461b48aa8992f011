mod controller;
mod error;
mod help;
mod model;
mod parser;
mod util;

pub use controller::headless::*;
pub use controller::*;
pub use error::*;
pub use help::{OutputStream, command, emit, format as format_help, report, stream_for};
pub use model::config::*;
pub use model::mode::*;
pub use model::values::*;
pub use parser::*;
pub use util::*;
