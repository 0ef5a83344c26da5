mod client;
mod config;
mod endpoint;
mod error;
mod executor;
mod policy;
mod transport;

pub use client::{BlobTableOptions, Client, blob_key};
pub use config::ClientConfig;
pub use endpoint::{Credentials, Endpoint};
pub use error::{DispatchError, TransportError};
pub use executor::Executor;
pub use policy::FailoverPolicy;
pub use transport::{HttpTransport, Transport};

pub use cratedb_query::{
    BlobError, BlobErrorKind, BlobResult, ColumnType, DataType, Query, QueryKind, QueryResult,
    RawReply, Record, Storage, Value,
};
