//! Per-construct streaming recognizers.
//!
//! One module per construct family; each owns its delimiter knowledge and
//! carries no state beyond what its own machine needs. All of them implement
//! [`crate::plugin::StreamPlugin`] and are driven exclusively by a session.

pub mod code_span;
pub mod emphasis;
pub mod fence;
pub mod header;
pub mod image;
pub mod latex;
pub mod link;
pub mod list;
pub mod plan;
pub mod quote;
pub mod rule;
pub mod table;
pub mod xml;

pub use code_span::InlineCode;
pub use emphasis::{Bold, Italic, Strikethrough, Underline};
pub use fence::FencedCode;
pub use header::Header;
pub use image::Image;
pub use latex::{BlockBracketLatex, BlockDollarLatex, InlineDollarLatex, InlineParenLatex};
pub use link::Link;
pub use list::{OrderedList, UnorderedList};
pub use plan::PlanExecution;
pub use quote::BlockQuote;
pub use rule::HorizontalRule;
pub use table::Table;
pub use xml::XmlRegion;
