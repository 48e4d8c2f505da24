mod error;
mod framing;
mod handlers;
mod helpers;
mod router;
mod types;

pub use error::err_without_id;
pub use framing::{read_line, Line};
pub use router::{handle_request, METHODS};
pub use types::{AppState, Request};
