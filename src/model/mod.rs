//! Data model for detected headings and sub-topics.

mod heading;
mod subtopic;

pub use heading::{HeadingKind, HeadingMatch, LineClass};
pub use subtopic::SubTopic;
