// Data models for notes and tempo.

pub mod note;
pub mod timing;

pub use note::{LEAD_TIME, Note, NoteId, NoteState};
pub use timing::Tempo;
