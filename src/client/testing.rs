use std::collections::VecDeque;
use std::sync::Mutex;

use super::*;

pub const SERVER_A: &str = "https://a.example.invalid";
pub const SERVER_B: &str = "https://b.example.invalid";
pub const SERVER_C: &str = "https://c.example.invalid";
pub const SERVER_D: &str = "https://d.example.invalid";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

#[derive(Debug)]
enum Reply {
    Body { status: u16, body: String },
    Unreachable,
}

type Hook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct ScriptState {
    replies: VecDeque<Reply>,
    requests: Vec<RecordedRequest>,
    before_next: Option<Hook>,
}

/// Replays queued replies in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: impl Into<String>) -> Self {
        self.reply_status(200, body)
    }

    pub fn reply_status(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Reply::Body {
            status,
            body: body.into(),
        })
    }

    pub fn unreachable(self) -> Self {
        self.push(Reply::Unreachable)
    }

    fn push(self, reply: Reply) -> Self {
        self.state.lock().unwrap().replies.push_back(reply);
        self
    }

    /// Run `hook` once, while the next request is in flight.
    pub fn before_next_reply(&self, hook: impl FnOnce() + Send + 'static) {
        self.state.lock().unwrap().before_next = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Value of the `f` query parameter of every request, in order.
    pub fn functions(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| {
                let url = url::Url::parse(&request.url).unwrap();
                url.query_pairs()
                    .find(|(key, _)| key == "f")
                    .map(|(_, value)| value.into_owned())
                    .unwrap()
            })
            .collect()
    }
}

impl HttpTransport for ScriptedTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let (reply, hook) = {
                let mut state = self.state.lock().unwrap();
                state.requests.push(RecordedRequest {
                    url: url.to_owned(),
                    params,
                });
                (state.replies.pop_front(), state.before_next.take())
            };
            if let Some(hook) = hook {
                hook();
            }
            match reply {
                Some(Reply::Body { status, body }) => Ok(HttpResponse { status, body }),
                Some(Reply::Unreachable) => Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )) as Box<dyn StdError + Send + Sync>),
                None => panic!("unexpected request to {url}"),
            }
        })
    }
}

pub fn make_client(servers: &[&str], transport: ScriptedTransport) -> PanaccessClient {
    PanaccessClient::with_transport(
        Credentials::new("admin", "secret", "token").unwrap(),
        servers
            .iter()
            .map(|server| ServerUrl::new(server).unwrap())
            .collect(),
        Arc::new(transport),
    )
}

/// Successful envelope around a raw JSON answer.
pub fn ok(answer: &str) -> String {
    format!(r#"{{"success": true, "answer": {answer}}}"#)
}

/// Failed envelope carrying `code`.
pub fn failed(code: &str) -> String {
    format!(
        r#"{{"success": false, "errorCode": "{code}", "errorMessage": "{code} raised"}}"#
    )
}

pub fn assert_param(params: &[(String, String)], key: &str, value: &str) {
    assert!(
        params.iter().any(|(k, v)| k == key && v == value),
        "missing param {key}={value}; got: {params:?}"
    );
}

pub fn assert_no_param(params: &[(String, String)], key: &str) {
    assert!(
        params.iter().all(|(k, _)| k != key),
        "unexpected param {key}; got: {params:?}"
    );
}
