pub mod error;
pub mod model;
pub mod reader;
pub mod retry;
pub mod route;
pub mod timestamp;

pub use error::FetchError;
pub use model::{to_legacy_varsler, Varsel, VarselDTO};
pub use reader::VarselReader;
pub use route::{varsel_path, Category, Lifecycle};
