//! Run configuration: backend selection, connection parameters and
//! extraction options.

mod connection;
mod options;

pub use connection::{Backend, ConnectionConfig};
pub use options::ExtractionOptions;
