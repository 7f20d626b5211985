use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::warn;

use castor_client_auth::{
    FileStorage, MemoryStorage, MockAuthBackend, RestAuthBackend, SessionStorage, SessionStore,
};
use castor_client_core::{ApiResult, ClientConfig, HttpTransport, TokenProvider};
use castor_client_functions::{
    FunctionsBackend, InvokeOptions, MockFunctionsGateway, RestFunctionsGateway,
};
use castor_client_query::{
    MockRpc, MockTableStore, QueryBuilder, RestRpc, RestTableClient, RpcBackend, TableBackend,
};

use crate::fixtures;
use crate::jobs::JobsApi;

const SESSION_KEY: &str = "castor.session";
const MOCK_SESSION_KEY: &str = "castor.mock.session";

/// The data-access facade for the console.
///
/// Built once at process start by [`CastorClient::new`] and injected into
/// consumers; everything downstream depends only on this contract, never on
/// which backend is active.
///
/// # Example
/// ```ignore
/// use castor_client::{CastorClient, ClientConfig, OrderDirection};
///
/// let client = CastorClient::new(ClientConfig::from_env())?;
/// let audits = client
///     .from("audits")
///     .eq("status", "InReview")
///     .order("due_date", OrderDirection::Ascending)
///     .select()
///     .await?;
/// ```
pub struct CastorClient {
    auth: Arc<SessionStore>,
    tables: Arc<dyn TableBackend>,
    rpc: Arc<dyn RpcBackend>,
    functions: Arc<dyn FunctionsBackend>,
}

impl CastorClient {
    /// Build a client, choosing remote backends when the configuration
    /// carries both a base URL and an access key, and the in-memory mock
    /// backends otherwise.
    ///
    /// Sessions persist under the platform's local data directory; use
    /// [`CastorClient::with_storage`] to control persistence explicitly.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let storage: Box<dyn SessionStorage> = match dirs::data_local_dir() {
            Some(dir) => Box::new(FileStorage::new(dir.join("castor-client"))),
            None => Box::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Build a client with explicit session storage.
    pub fn with_storage(config: ClientConfig, storage: Box<dyn SessionStorage>) -> ApiResult<Self> {
        match config.remote() {
            Some((base_url, access_key)) => Self::remote(base_url, access_key, storage),
            None => {
                warn!(
                    "Remote configuration is missing; falling back to the mock client \
                     for local development"
                );
                Ok(Self::mock(storage))
            }
        }
    }

    fn remote(
        base_url: &str,
        access_key: &str,
        storage: Box<dyn SessionStorage>,
    ) -> ApiResult<Self> {
        let transport = HttpTransport::new(base_url, access_key)?;

        let auth = Arc::new(SessionStore::new(
            Box::new(RestAuthBackend::new(transport.clone())),
            storage,
            SESSION_KEY,
        ));
        let tokens: Arc<dyn TokenProvider> = auth.clone();

        Ok(Self {
            auth,
            tables: Arc::new(RestTableClient::new(transport.clone(), Arc::clone(&tokens))),
            rpc: Arc::new(RestRpc::new(transport.clone(), Arc::clone(&tokens))),
            functions: Arc::new(RestFunctionsGateway::new(transport, tokens)),
        })
    }

    fn mock(storage: Box<dyn SessionStorage>) -> Self {
        let auth = Arc::new(SessionStore::new(
            Box::new(MockAuthBackend::new(fixtures::profiles())),
            storage,
            MOCK_SESSION_KEY,
        ));

        let store = fixtures::tables()
            .into_iter()
            .fold(MockTableStore::new(), |store, (name, rows)| {
                store.with_table(name, rows)
            });

        Self {
            auth,
            tables: Arc::new(store),
            rpc: Arc::new(MockRpc::new(fixtures::verification_results())),
            functions: Arc::new(MockFunctionsGateway::new()),
        }
    }

    /// The shared session store.
    pub fn auth(&self) -> &Arc<SessionStore> {
        &self.auth
    }

    /// Start a query against a named table.
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(Arc::clone(&self.tables), table)
    }

    /// Execute a named server-side procedure.
    pub async fn rpc(&self, function: &str, args: JsonValue) -> ApiResult<JsonValue> {
        self.rpc.call(function, args).await
    }

    /// Invoke a named external processing job.
    pub async fn invoke(&self, name: &str, options: InvokeOptions) -> ApiResult<JsonValue> {
        self.functions.invoke(name, options).await
    }

    /// Typed wrappers over the job catalogue.
    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }
}
