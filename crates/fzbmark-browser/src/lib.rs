//! Everything that touches a browser installation: finding profile
//! directories, reading their bookmark stores, and opening URLs.

mod error;
mod launcher;
mod locator;
mod store;

pub use error::{Error, Result};
pub use launcher::{LaunchCommand, Launcher};
pub use locator::{Profile, ProfileLocator};
pub use store::StoreFormat;
