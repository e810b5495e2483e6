pub mod api;
pub mod error;
pub mod id_generator;
pub mod result;
pub mod wire;

pub use api::*;
pub use error::*;
pub use id_generator::*;
pub use result::*;
pub use wire::*;
