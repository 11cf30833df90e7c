pub mod bookmark;
pub mod catalog;
pub mod error;
pub mod feed;

pub use bookmark::{BookmarkRecord, Browser};
pub use catalog::{Catalog, CatalogQuery};
pub use error::{Error, Result};
pub use feed::SearchFeed;
