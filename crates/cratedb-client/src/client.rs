use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use cratedb_query::{BlobErrorKind, BlobResult, Query, QueryResult, RawReply, request_body};
use http::{Method, Request, Response, StatusCode, header};
use sha1::{Digest, Sha1};

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::DispatchError;
use crate::executor::Executor;
use crate::policy::FailoverPolicy;
use crate::transport::{HttpTransport, Transport};

const SQL_PATH: &str = "/_sql?types";
const DEFAULT_SCHEMA: &str = "default-schema";

/// Sharding and storage settings for a new blob table. Unset fields are
/// left to the server's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobTableOptions {
    pub shards: Option<u32>,
    pub replicas: Option<u32>,
    pub path: Option<String>,
}

/// Client for a CrateDB cluster speaking its HTTP endpoint.
///
/// ```no_run
/// use cratedb_client::{Client, Query};
///
/// let mut client = Client::new();
/// client.connect_url("http://localhost:4200");
/// let result = client.exec(&Query::new("SELECT name FROM sys.cluster"));
/// for record in result.records() {
///     println!("{}", record.value(0).as_string());
/// }
/// ```
pub struct Client<T = HttpTransport> {
    executor: Executor<T>,
    default_schema: Option<String>,
}

impl Client<HttpTransport> {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::default())
    }

    /// Builds the transport from `config` and connects to its nodes.
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = Self::with_transport(config.transport());
        client.connect(config.nodes.clone(), config.policy);
        client.default_schema = config.default_schema.clone();
        client
    }
}

impl Default for Client<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            executor: Executor::new(transport),
            default_schema: None,
        }
    }

    // ── Connection ──────────────────────────────────────────────

    /// Replaces the endpoint list. Returns whether the client is connected
    /// afterwards, which is false for an empty list.
    pub fn connect(&mut self, endpoints: Vec<Endpoint>, policy: FailoverPolicy) -> bool {
        self.executor.connect(endpoints, policy);
        self.is_connected()
    }

    pub fn connect_url(&mut self, url: impl Into<String>) -> bool {
        self.connect(vec![Endpoint::new(url)], FailoverPolicy::default())
    }

    pub fn disconnect(&mut self) {
        self.executor.disconnect();
    }

    pub fn is_connected(&self) -> bool {
        self.executor.is_connected()
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        self.executor.endpoints()
    }

    pub fn policy(&self) -> FailoverPolicy {
        self.executor.policy()
    }

    /// Schema used for unqualified table names, sent as the
    /// `Default-Schema` header.
    pub fn set_default_schema(&mut self, schema: impl Into<String>) {
        self.default_schema = Some(schema.into());
    }

    pub fn clear_default_schema(&mut self) {
        self.default_schema = None;
    }

    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    // ── SQL ─────────────────────────────────────────────────────

    pub fn exec_raw(&mut self, query: &Query) -> RawReply {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(SQL_PATH)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(schema) = &self.default_schema {
            builder = builder.header(DEFAULT_SCHEMA, schema.as_str());
        }

        match builder.body(request_body(query).into_bytes()) {
            Ok(request) => self.executor.execute(&request),
            Err(e) => RawReply::from_body(
                serde_json::json!({
                    "error": { "message": e.to_string(), "code": 0, "component": "client" }
                })
                .to_string(),
            ),
        }
    }

    pub fn exec(&mut self, query: &Query) -> QueryResult {
        QueryResult::new(self.exec_raw(query))
    }

    /// Runs `REFRESH TABLE` and reports whether it succeeded.
    pub fn refresh(&mut self, table: &str) -> bool {
        !self
            .exec_raw(&Query::new(format!("REFRESH TABLE {table}")))
            .has_error()
    }

    /// Names of all schemas, sorted. Empty on error.
    pub fn schemata(&mut self) -> Vec<String> {
        self.exec(&Query::new(
            "SELECT schema_name FROM information_schema.schemata ORDER BY schema_name",
        ))
        .records()
        .map(|r| r.value(0).as_string())
        .collect()
    }

    /// REST endpoints of every node in the cluster. Empty on error.
    pub fn cluster_nodes(&mut self) -> Vec<Endpoint> {
        self.exec(&Query::new("select rest_url from sys.nodes"))
            .records()
            .map(|r| Endpoint::new(r.value(0).as_string()))
            .collect()
    }

    // ── Blob tables ─────────────────────────────────────────────

    pub fn create_blob_storage(&mut self, table: &str, options: &BlobTableOptions) -> RawReply {
        self.exec_raw(&Query::new(create_blob_table_sql(table, options)))
    }

    pub fn remove_blob_storage(&mut self, table: &str) -> RawReply {
        self.exec_raw(&Query::new(format!("DROP BLOB TABLE {table}")))
    }

    /// Stores the content of `data` in `table` under its SHA-1 digest.
    pub fn upload_blob(&mut self, table: &str, mut data: impl Read) -> BlobResult {
        let mut content = Vec::new();
        if let Err(e) = data.read_to_end(&mut content) {
            return BlobResult::failed("", BlobErrorKind::Other, format!("Could not read blob data: {e}"));
        }
        let key = format!("{:x}", Sha1::digest(&content));

        match self.send_blob(Method::PUT, table, &key, content) {
            Ok(response) if response.status() == StatusCode::CREATED => BlobResult::ok(key),
            Ok(_) => {
                let message = format!("Blob with the key '{key}' already exists.");
                BlobResult::failed(key, BlobErrorKind::Server, message)
            }
            Err(failed) => failed,
        }
    }

    pub fn upload_blob_file(&mut self, table: &str, path: impl AsRef<Path>) -> BlobResult {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => self.upload_blob(table, file),
            Err(e) => BlobResult::failed(
                "",
                BlobErrorKind::Other,
                format!("Could not open {}: {e}", path.display()),
            ),
        }
    }

    /// Whether a blob exists. A failed result is not proof of absence:
    /// check [`BlobResult::is_server_error`].
    pub fn exists_blob(&mut self, table: &str, key: &str) -> BlobResult {
        match self.send_blob(Method::HEAD, table, key, Vec::new()) {
            Ok(response) if response.status() == StatusCode::OK => BlobResult::ok(key),
            Ok(_) => missing_blob(key, "does not exist"),
            Err(failed) => failed,
        }
    }

    /// Writes the blob stored under `key` to `out`.
    pub fn download_blob(&mut self, table: &str, key: &str, mut out: impl Write) -> BlobResult {
        match self.send_blob(Method::GET, table, key, Vec::new()) {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                missing_blob(key, "was not found")
            }
            Ok(response) => match out.write_all(response.body()).and_then(|()| out.flush()) {
                Ok(()) => BlobResult::ok(key),
                Err(e) => BlobResult::failed(
                    key,
                    BlobErrorKind::Other,
                    format!("Could not write blob data: {e}"),
                ),
            },
            Err(failed) => failed,
        }
    }

    pub fn download_blob_file(&mut self, table: &str, key: &str, path: impl AsRef<Path>) -> BlobResult {
        let path = path.as_ref();
        match File::create(path) {
            Ok(file) => self.download_blob(table, key, file),
            Err(e) => BlobResult::failed(
                key,
                BlobErrorKind::Other,
                format!("Could not create {}: {e}", path.display()),
            ),
        }
    }

    pub fn delete_blob(&mut self, table: &str, key: &str) -> BlobResult {
        match self.send_blob(Method::DELETE, table, key, Vec::new()) {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => BlobResult::ok(key),
            Ok(_) => missing_blob(key, "does not exist"),
            Err(failed) => failed,
        }
    }

    fn send_blob(
        &mut self,
        method: Method,
        table: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<Response<Vec<u8>>, BlobResult> {
        let request = Request::builder()
            .method(method)
            .uri(format!("/_blobs/{table}/{key}"))
            .body(body)
            .map_err(|e| {
                BlobResult::failed(
                    key,
                    BlobErrorKind::Other,
                    format!("Could not build blob request: {e}"),
                )
            })?;
        self.executor
            .dispatch(&request)
            .map_err(|e| blob_failure(key, e))
    }
}

/// SHA-1 hex digest of everything `data` yields, the key a blob is stored under.
pub fn blob_key(mut data: impl Read) -> io::Result<String> {
    let mut hasher = Sha1::new();
    io::copy(&mut data, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn create_blob_table_sql(table: &str, options: &BlobTableOptions) -> String {
    let mut sql = format!("CREATE BLOB TABLE {table}");
    if let Some(shards) = options.shards {
        sql.push_str(&format!(" CLUSTERED INTO {shards} SHARDS"));
    }

    let path = options.path.as_deref().filter(|p| !p.is_empty());
    match (options.replicas, path) {
        (Some(replicas), Some(path)) => {
            sql.push_str(&format!(" WITH (number_of_replicas={replicas},blobs_path='{path}')"))
        }
        (Some(replicas), None) => sql.push_str(&format!(" WITH (number_of_replicas={replicas})")),
        (None, Some(path)) => sql.push_str(&format!(" WITH (blobs_path='{path}')")),
        (None, None) => {}
    }
    sql
}

fn missing_blob(key: &str, what: &str) -> BlobResult {
    BlobResult::failed(
        key,
        BlobErrorKind::Server,
        format!("Blob with the key '{key}' {what}."),
    )
}

fn blob_failure(key: impl Into<String>, error: DispatchError) -> BlobResult {
    match error {
        DispatchError::NotConnected => {
            BlobResult::failed(key, BlobErrorKind::Other, error.to_string())
        }
        DispatchError::Exhausted { last, .. } => {
            BlobResult::failed(key, BlobErrorKind::Transport, last.to_string())
        }
    }
}
