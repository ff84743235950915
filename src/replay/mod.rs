//! Input script recording and playback.

mod input_recorder;
mod input_script;
mod scripted_input;

pub use input_recorder::InputRecorder;
pub use input_script::InputScript;
pub use scripted_input::ScriptedInput;
