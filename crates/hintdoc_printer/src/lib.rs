//! hintdoc_printer: Tree to text output.
//!
//! Attaches original comments to statement-list entries and prints the tree
//! back as JavaScript. Annotations are never printed; synthesized
//! documentation comments render between an entry's original leading
//! comments and the entry itself.

mod attach;
mod printer;

pub use attach::attach_comments;
pub use printer::{Printer, PrinterOptions};
