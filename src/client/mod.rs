//! Client layer: session handling, server failover and typed Panaccess calls.

mod orders;
mod products;
mod smartcards;
mod subscribers;

#[cfg(test)]
mod testing;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::{
    ApiToken, Envelope, Filter, GroupOp, Params, Password, Rule, ServerUrl, SessionId, Username,
    ValidationError,
};

const LOGIN_FUNCTION: &str = "login";
const LOGGED_IN_FUNCTION: &str = "loggedIn";
const LOGOUT_FUNCTION: &str = "logout";

/// Appended to the password before hashing.
const PASSWORD_SALT: &str = "_panaccess";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Clone)]
/// Login credentials for a Panaccess reseller account.
///
/// The salted MD5 digest sent by `login` is derived once at construction;
/// the raw password is kept untouched.
pub struct Credentials {
    username: Username,
    password: Password,
    api_token: ApiToken,
    password_hash: String,
}

impl Credentials {
    /// Validate all three parts and derive the password digest.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::from_parts(
            Username::new(username)?,
            Password::new(password)?,
            ApiToken::new(api_token)?,
        ))
    }

    /// Build credentials from already validated parts.
    pub fn from_parts(username: Username, password: Password, api_token: ApiToken) -> Self {
        let password_hash = hash_password(&password);
        Self {
            username,
            password,
            api_token,
            password_hash,
        }
    }

    /// Account name sent as `username`.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Raw password; only its salted hash goes on the wire.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Token sent as `apiToken` on `login`.
    pub fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Hex MD5 of `password + "_panaccess"`, as expected by `login`.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn login_params(&self) -> Params {
        Params::new()
            .with(ApiToken::FIELD, self.api_token.as_str())
            .with(Username::FIELD, self.username.as_str())
            .with(Password::FIELD, self.password_hash.as_str())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_token", &self.api_token)
            .finish_non_exhaustive()
    }
}

fn hash_password(password: &Password) -> String {
    let salted = format!("{}{PASSWORD_SALT}", password.as_str());
    format!("{:x}", md5::compute(salted.as_bytes()))
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PanaccessClient`].
///
/// Connectivity, decoding, application rejections and unrecoverable session
/// expiry are separate variants so callers can pick a retry policy.
pub enum PanaccessError {
    /// The HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// No configured server completed the request.
    #[error("no panaccess server reachable ({attempted} tried)")]
    Unreachable {
        attempted: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body or answer could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request parameters could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Panaccess rejected the call while the session was valid.
    #[error("API error: {code} {message:?}")]
    Api {
        code: String,
        tag: Option<String>,
        message: Option<String>,
    },

    /// The session was renewed and the call retried, but the server still
    /// does not accept the session.
    #[error("session expired: {code}")]
    SessionExpired { code: String },

    /// A lookup required by a composite operation came back empty.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PanaccessError {
    /// `true` for errors caused by session state rather than the request.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// `true` when no server could be reached.
    pub fn is_connectivity_error(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Error code reported by Panaccess, if any.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } | Self::SessionExpired { code } => Some(code),
            _ => None,
        }
    }

    fn from_envelope(envelope: &Envelope) -> Self {
        match envelope.failure() {
            Some(failure) => Self::Api {
                code: failure.code.clone(),
                tag: failure.tag.clone(),
                message: failure.message.clone(),
            },
            None => Self::Api {
                code: String::new(),
                tag: None,
                message: Some("request was not successful".to_owned()),
            },
        }
    }
}

impl Envelope {
    /// Fail with [`PanaccessError::Api`] unless the envelope is successful.
    pub fn ensure_success(&self) -> Result<(), PanaccessError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(PanaccessError::from_envelope(self))
        }
    }

    /// Decode the answer into `T` after checking success.
    pub fn decode_answer<T: DeserializeOwned>(&self) -> Result<T, PanaccessError> {
        self.ensure_success()?;
        crate::transport::decode_answer(self).map_err(|err| PanaccessError::Parse(Box::new(err)))
    }

    fn decode_with<T, E>(&self, decode: impl FnOnce(&str) -> Result<T, E>) -> Result<T, PanaccessError>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.ensure_success()?;
        let json = self
            .answer_json()
            .ok_or_else(|| PanaccessError::Parse("response has no answer".into()))?;
        decode(json).map_err(|err| PanaccessError::Parse(Box::new(err)))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`PanaccessClient`].
///
/// Servers are tried in the order they were added.
pub struct PanaccessClientBuilder {
    credentials: Credentials,
    servers: Vec<ServerUrl>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl PanaccessClientBuilder {
    /// Create a builder with no servers and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            servers: Vec::new(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Append one server to the failover list.
    pub fn server(mut self, server: ServerUrl) -> Self {
        self.servers.push(server);
        self
    }

    /// Append several servers to the failover list, keeping their order.
    pub fn servers(mut self, servers: impl IntoIterator<Item = ServerUrl>) -> Self {
        self.servers.extend(servers);
        self
    }

    /// Set an HTTP client timeout applied to each request attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`PanaccessClient`]. At least one server is required.
    pub fn build(self) -> Result<PanaccessClient, PanaccessError> {
        if self.servers.is_empty() {
            return Err(ValidationError::NoServers.into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| PanaccessError::Transport(Box::new(err)))?;

        Ok(PanaccessClient::with_transport(
            self.credentials,
            self.servers,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

#[derive(Clone)]
/// Session-aware Panaccess client.
///
/// Every call is posted to the first reachable server. When a call fails
/// because the session expired, the client logs in again and retries the
/// call once. Clones share the session.
pub struct PanaccessClient {
    credentials: Arc<Credentials>,
    servers: Arc<[ServerUrl]>,
    session: Arc<Mutex<Option<SessionId>>>,
    login_gate: Arc<tokio::sync::Mutex<()>>,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for PanaccessClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanaccessClient")
            .field("credentials", &self.credentials)
            .field("servers", &self.servers)
            .field("session", &self.session_id())
            .finish_non_exhaustive()
    }
}

impl PanaccessClient {
    /// Start building a client.
    pub fn builder(credentials: Credentials) -> PanaccessClientBuilder {
        PanaccessClientBuilder::new(credentials)
    }

    fn with_transport(
        credentials: Credentials,
        servers: Vec<ServerUrl>,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            credentials: Arc::new(credentials),
            servers: servers.into(),
            session: Arc::new(Mutex::new(None)),
            login_gate: Arc::new(tokio::sync::Mutex::new(())),
            http,
        }
    }

    pub fn servers(&self) -> &[ServerUrl] {
        &self.servers
    }

    /// Currently held session identifier.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reuse a session obtained elsewhere (e.g. persisted by the caller).
    pub fn restore_session(&self, session: SessionId) {
        self.store_session(Some(session));
    }

    /// Forget the local session identifier. The next call logs in again.
    pub fn clear_session(&self) {
        self.store_session(None);
    }

    fn store_session(&self, session: Option<SessionId>) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Log in and store the returned session identifier.
    ///
    /// Errors:
    /// - [`PanaccessError::Api`] when the credentials are rejected,
    /// - [`PanaccessError::Parse`] when the answer is not a session id.
    pub async fn login(&self) -> Result<(), PanaccessError> {
        let _gate = self.login_gate.lock().await;
        self.login_locked().await
    }

    async fn login_locked(&self) -> Result<(), PanaccessError> {
        let envelope = self
            .post(LOGIN_FUNCTION, self.credentials.login_params())
            .await?;
        let answer: String = envelope.decode_answer()?;
        let session = SessionId::new(answer).map_err(|err| PanaccessError::Parse(Box::new(err)))?;
        self.store_session(Some(session));
        info!(
            username = self.credentials.username().as_str(),
            "logged in to panaccess"
        );
        Ok(())
    }

    /// Renew the session after `stale` was rejected.
    ///
    /// Logins are serialized; a caller that finds the session already
    /// replaced while it waited reuses the new one.
    async fn relogin(&self, stale: Option<&SessionId>) -> Result<(), PanaccessError> {
        let _gate = self.login_gate.lock().await;
        let current = self.session_id();
        if current.is_some() && current.as_ref() != stale {
            debug!("session already renewed by a concurrent call");
            return Ok(());
        }
        self.login_locked().await
    }

    /// Ask the server whether the held session is still valid.
    ///
    /// Returns `false` without contacting any server when no session is held.
    pub async fn logged_in(&self) -> Result<bool, PanaccessError> {
        let Some(session) = self.session_id() else {
            return Ok(false);
        };
        let params = Params::new().with(SessionId::FIELD, session.as_str());
        let envelope = self.post(LOGGED_IN_FUNCTION, params).await?;
        envelope.decode_answer()
    }

    /// Check `session` against the server on behalf of a failed call.
    ///
    /// Unlike [`PanaccessClient::logged_in`], an unsuccessful `loggedIn`
    /// envelope reads as an invalid session so the caller keeps its own
    /// error code.
    async fn session_valid(&self, session: Option<&SessionId>) -> Result<bool, PanaccessError> {
        let Some(session) = session else {
            return Ok(false);
        };
        let params = Params::new().with(SessionId::FIELD, session.as_str());
        let envelope = self.post(LOGGED_IN_FUNCTION, params).await?;
        if let Some(failure) = envelope.failure() {
            debug!(code = %failure.code, "session check rejected");
            return Ok(false);
        }
        envelope.decode_answer()
    }

    /// End the server-side session.
    ///
    /// Does nothing when no session is held. The local identifier is kept;
    /// use [`PanaccessClient::clear_session`] to drop it.
    pub async fn logout(&self) -> Result<(), PanaccessError> {
        if self.session_id().is_none() {
            return Ok(());
        }
        self.call(LOGOUT_FUNCTION, Params::new())
            .await?
            .ensure_success()?;
        info!("logged out of panaccess");
        Ok(())
    }

    /// Invoke a Panaccess function and return its decoded envelope.
    ///
    /// The held session id is attached to every function except `login`.
    /// An error code triggers a check of the session the request carried: a
    /// valid session surfaces [`PanaccessError::Api`]; an expired one is
    /// renewed and the call is retried exactly once. A session replaced by a
    /// concurrent login while the request was in flight is retried without
    /// the check.
    pub async fn call(&self, function: &str, params: Params) -> Result<Envelope, PanaccessError> {
        if function == LOGIN_FUNCTION {
            return self.post(function, params).await;
        }

        let mut renewed = false;
        loop {
            let held = self.session_id();
            let mut outgoing = params.clone();
            if let Some(session) = &held {
                outgoing.set(SessionId::FIELD, session.as_str());
            }

            let envelope = self.post(function, outgoing).await?;
            let Some(failure) = envelope.failure().cloned() else {
                return Ok(envelope);
            };

            let replaced = self.session_id() != held;
            if !replaced && self.session_valid(held.as_ref()).await? {
                return Err(PanaccessError::from_envelope(&envelope));
            }
            if renewed {
                warn!(function, code = %failure.code, "session still rejected after login");
                return Err(PanaccessError::SessionExpired { code: failure.code });
            }

            if replaced {
                debug!(function, "session renewed while the call was in flight, retrying");
            } else {
                warn!(function, code = %failure.code, "session expired, logging in again");
                self.relogin(held.as_ref()).await?;
            }
            renewed = true;
        }
    }

    /// Like [`PanaccessClient::call`], with a `filters` parameter built from
    /// `group_op` and `rules`.
    pub async fn call_with_filters(
        &self,
        function: &str,
        mut params: Params,
        group_op: GroupOp,
        rules: Vec<Rule>,
    ) -> Result<Envelope, PanaccessError> {
        let filter = Filter::new(group_op, rules);
        let encoded = crate::transport::encode_filters(&filter).map_err(PanaccessError::Encode)?;
        params.set(Filter::FIELD, encoded);
        self.call(function, params).await
    }

    /// Post to the first reachable server and decode the envelope.
    async fn post(&self, function: &str, params: Params) -> Result<Envelope, PanaccessError> {
        let form = params.into_vec();
        let mut last_error: Option<Box<dyn StdError + Send + Sync>> = None;

        for server in self.servers.iter() {
            let url = server.function_url(function);
            debug!(function, server = server.as_str(), "calling panaccess");
            match self.http.post_form(&url, form.clone()).await {
                Ok(response) => return decode_response(response),
                Err(err) => {
                    warn!(
                        function,
                        server = server.as_str(),
                        error = %err,
                        "panaccess server unreachable"
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(PanaccessError::Unreachable {
            attempted: self.servers.len(),
            source: last_error.unwrap_or_else(|| "no servers configured".into()),
        })
    }
}

fn decode_response(response: HttpResponse) -> Result<Envelope, PanaccessError> {
    if !(200..=299).contains(&response.status) {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(PanaccessError::HttpStatus {
            status: response.status,
            body,
        });
    }

    crate::transport::decode_envelope(&response.body)
        .map_err(|err| PanaccessError::Parse(Box::new(err)))
}
