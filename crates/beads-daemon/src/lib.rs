//! RPC daemon for the beads system: a long-lived process that owns the
//! `Store`, serves requests over a Unix domain socket, and periodically
//! flushes the dirty set to the journal.

pub mod autoflush;
pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use dispatcher::dispatch;
pub use error::{RpcError, RpcErrorCode};
pub use protocol::{Request, Response, RpcResult};
pub use server::Server;
