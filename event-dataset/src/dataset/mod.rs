//! Dataset adapters and the traits shared among them.

mod dataset;
mod frames;
mod manifest;
mod path_list;
mod record;
mod streaming;
mod uniform;
mod utils;

pub use dataset::*;
pub use frames::*;
pub use manifest::*;
pub use path_list::*;
pub use record::*;
pub use streaming::*;
pub use uniform::*;
pub use utils::*;
