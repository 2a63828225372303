//! Inputs to a parse: the source text, the edits applied to it, and the
//! line-start table derived from it.

mod change;
mod line_starts;
mod source;

pub use change::{ChangeWindow, EditError, TextChangeRange, TextChanges};
pub use line_starts::LineStarts;
pub use source::SourceText;
pub use text_size::{TextRange, TextSize};
