use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use super::{BoxFuture, HttpResponse, HttpTransport};

/// Replays scripted `(status, body)` responses in order and records every requested URL.
///
/// Once the script is exhausted, requests fail as if the connection could not be set up.
#[derive(Debug, Clone)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    urls: Vec<String>,
    responses: VecDeque<(u16, String)>,
}

impl FakeTransport {
    pub(super) fn new<'a>(responses: impl IntoIterator<Item = (u16, &'a str)>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                urls: Vec::new(),
                responses: responses
                    .into_iter()
                    .map(|(status, body)| (status, body.to_owned()))
                    .collect(),
            })),
        }
    }

    pub(super) fn urls(&self) -> Vec<String> {
        self.state.lock().unwrap().urls.clone()
    }

    /// The `DA` value of every recorded request.
    pub(super) fn destinations(&self) -> Vec<String> {
        self.urls()
            .iter()
            .filter_map(|url| {
                url.split(['?', '&'])
                    .find_map(|pair| pair.strip_prefix("DA="))
                    .map(str::to_owned)
            })
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.urls.push(url.to_owned());
            let (status, body) = state
                .responses
                .pop_front()
                .ok_or("connection refused")?;
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or_default()
                .to_owned();
            Ok(HttpResponse {
                status,
                reason,
                body,
            })
        })
    }
}

/// A `200 OK` body carrying `codes` after a message identifier.
pub(super) fn ok_body(codes: &[&str]) -> String {
    let mut body = String::from("100001");
    for code in codes {
        body.push(' ');
        body.push_str(code);
    }
    body
}
