mod command;
mod format;

pub use command::{CommandOutput, display_command, run_command_with_timeout};
pub use format::{fit_text, format_age, tail_width, take_width, text_width};
