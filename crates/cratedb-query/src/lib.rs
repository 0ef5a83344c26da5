mod blob;
mod data_type;
mod query;
mod raw;
mod record;
pub mod request;
mod result;
mod value;

pub use blob::{BlobError, BlobErrorKind, BlobResult};
pub use data_type::{ColumnType, DataType};
pub use query::{Query, QueryKind};
pub use raw::{BULK_ERROR_ROWCOUNT, RawReply};
pub use record::Record;
pub use request::request_body;
pub use result::QueryResult;
pub use value::{Storage, Value};
