//! Request gateway: one declarative options object, one HTTP call, one outcome.
//!
//! GET data goes into the query string, every other method sends it as a
//! multipart `FormData` body. There is no retry, timeout or cancellation.

use std::collections::BTreeMap;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::RequestError;
use super::task::Spawner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub url: String,
    pub method: HttpMethod,
    pub data: Option<BTreeMap<String, String>>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            data: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.to_string());
        self
    }
}

/// Handle of an issued request. It can be inspected but not cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHandle {
    url: String,
    method: HttpMethod,
}

impl RequestHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }
}

/// `key=value` pairs joined with `&`, both sides percent-encoded
pub fn encode_query(data: &BTreeMap<String, String>) -> String {
    data.iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Final URL of the request: the query string is only built for GET
pub fn build_url(options: &RequestOptions) -> String {
    match (&options.data, options.method) {
        (Some(data), HttpMethod::Get) if !data.is_empty() => {
            let separator = if options.url.contains('?') { '&' } else { '?' };
            format!("{}{}{}", options.url, separator, encode_query(data))
        }
        _ => options.url.clone(),
    }
}

fn builder_for(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

fn build_request(options: &RequestOptions, url: &str) -> Result<Request, RequestError> {
    let builder = builder_for(options.method, url);
    match &options.data {
        Some(data) if options.method != HttpMethod::Get => {
            let form = web_sys::FormData::new()
                .map_err(|e| RequestError::Build(format!("{:?}", e)))?;
            for (key, value) in data {
                form.append_with_str(key, value)
                    .map_err(|e| RequestError::Build(format!("{:?}", e)))?;
            }
            builder
                .body(form)
                .map_err(|e| RequestError::Build(e.to_string()))
        }
        _ => builder
            .build()
            .map_err(|e| RequestError::Build(e.to_string())),
    }
}

/// Map a received response onto the gateway outcome. Only 2xx bodies are
/// parsed; any other status is reported as is.
fn outcome(ok: bool, status: u16, body: Result<Value, String>) -> Result<Value, RequestError> {
    if !ok {
        return Err(RequestError::Status(status));
    }
    body.map_err(RequestError::Parse)
}

async fn send(request: Request) -> Result<Value, RequestError> {
    let response = request
        .send()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    let body = if response.ok() {
        response.json::<Value>().await.map_err(|e| e.to_string())
    } else {
        Ok(Value::Null)
    };
    outcome(response.ok(), response.status(), body)
}

/// Hand a built request to `spawner`, or report the build error right away
/// without spawning anything.
fn dispatch<R, S, F>(built: Result<R, RequestError>, spawner: &Spawner, send: S, callback: F)
where
    R: 'static,
    S: FnOnce(R) -> LocalBoxFuture<'static, Result<Value, RequestError>> + 'static,
    F: FnOnce(Result<Value, RequestError>) + 'static,
{
    match built {
        Ok(request) => spawner.spawn(Box::pin(async move {
            callback(send(request).await);
        })),
        Err(e) => callback(Err(e)),
    }
}

/// Issue a single request and report its outcome through `callback`.
///
/// The request is built synchronously. If that fails the callback is
/// invoked right away with [`RequestError::Build`] and nothing is sent;
/// otherwise it is invoked exactly once when the response arrives.
pub fn issue_request<F>(options: RequestOptions, callback: F) -> RequestHandle
where
    F: FnOnce(Result<Value, RequestError>) + 'static,
{
    issue_request_on(options, &Spawner::local(), callback)
}

/// [`issue_request`] with the response awaited on `spawner`
pub fn issue_request_on<F>(options: RequestOptions, spawner: &Spawner, callback: F) -> RequestHandle
where
    F: FnOnce(Result<Value, RequestError>) + 'static,
{
    let url = build_url(&options);
    let handle = RequestHandle {
        url: url.clone(),
        method: options.method,
    };

    let built = build_request(&options, &url);
    match &built {
        Ok(_) => log::debug!("{} {}", options.method.as_str(), url),
        Err(e) => log::error!("{} {}: {}", options.method.as_str(), url, e),
    }
    dispatch(built, spawner, |request| send(request).boxed_local(), callback);

    handle
}

/// [`issue_request`] as a single-resolution future
pub async fn fetch_json(options: RequestOptions) -> Result<Value, RequestError> {
    let (tx, rx) = oneshot::channel();
    issue_request(options, move |result| {
        let _ = tx.send(result);
    });
    rx.await
        .unwrap_or_else(|_| Err(RequestError::Network("request was dropped".to_string())))
}

pub async fn fetch<T: DeserializeOwned>(options: RequestOptions) -> Result<T, RequestError> {
    let value = fetch_json(options).await?;
    serde_json::from_value(value).map_err(|e| RequestError::Parse(e.to_string()))
}
