//! Feed core: the excerpt model, where pages come from, the pagination
//! state machine, and the liked set with its export.

pub mod demo;
pub mod export;
pub mod likes;
pub mod model;
pub mod pager;
pub mod source;

pub use demo::DemoSource;
pub use likes::Likes;
pub use model::Excerpt;
pub use pager::{Applied, PageRequest, Pager};
pub use source::{ExcerptSource, FetchError, HttpSource};
