//! Analysis engine for Bash Bunny style payload scripts.
//!
//! Everything here is a pure function of its inputs: the host feeds buffer
//! text, caret offsets and the command catalog, and renders what comes back.

pub mod autocomplete;
pub mod catalog;
pub mod debounce;
pub mod geometry;
pub mod highlight;
pub mod lexer;
pub mod lint;
pub mod vocab;

pub use autocomplete::{commit, complete, AutocompleteState, Commit};
pub use catalog::{Catalog, CatalogError, Category, CommandEntry};
pub use debounce::Debouncer;
pub use geometry::{
    caret_pixel_position, offset_to_line_col, selection_shape, selection_shape_with_inset,
    EditorMetrics, FontKey, LineCol, MetricsCache, Point, Scroll, SelectionShape,
};
pub use highlight::{highlight, RenderSpan, StyleClass};
pub use lexer::{lex, Token};
pub use lint::{is_shell_path, lint, Diagnostic, LintResult, Span};
