pub mod utils;
pub use utils::*;

pub mod error;
pub use error::*;

pub mod models;
pub use models::*;

pub mod sync;
pub use sync::*;

pub mod api;
pub use api::*;

pub mod feed;
pub use feed::*;

pub mod commands;
pub use commands::*;

pub mod surface;
pub use surface::*;
