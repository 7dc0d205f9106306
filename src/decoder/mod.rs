//! Plumbing for the external decoder (`mpg123 -R`): output framing,
//! status parsing and the subprocess itself.

mod framer;
mod process;
mod status;

pub use framer::{LineFramer, Lines};
pub use process::{CommandSink, DecoderCommand, DecoderHandle, DecoderProcess};
pub use status::{parse, PlaybackEvent};
