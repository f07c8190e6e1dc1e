// Read-only projections of the document: HTML markup, the visibility-filtered
// preview, LaTeX source, and the pdflatex compile pipeline with its temp-dir
// sweeper.

pub mod cleanup;
pub mod handlers;
pub mod latex;
pub mod markup;
pub mod pdf;
pub mod preview;
pub mod template;
