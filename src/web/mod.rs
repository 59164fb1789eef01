pub mod api;
pub mod router;
pub mod state;
pub mod utils;
