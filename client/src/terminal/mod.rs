mod input;
mod renderer;

pub use input::{parse_input, InputCommand, HELP_TEXT};
pub use renderer::TerminalRenderer;
