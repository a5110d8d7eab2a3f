//! voip.ms client handle and the single call primitive every endpoint uses.

use std::fmt;

use reqwest::blocking::{multipart, Client, Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::{AccountsApi, CdrApi, ClientsApi, DidsApi, GeneralApi};
use crate::config::{normalize_base_url, ClientConfig};
use crate::encode::{Form, ToForm};
use crate::{Result, VoipMsError};

/// The only status value that means the call worked.
pub const SUCCESS: &str = "success";

const REDACTED: &str = "********";

/// Typed client for the voip.ms REST API.
///
/// Holds the endpoint URL and API credentials and nothing else; it never
/// changes after construction, so one instance can be shared across threads.
#[derive(Clone)]
pub struct VoipMsClient {
    base_url: String,
    username: String,
    password: String,
    debug: bool,
    http: Client,
}

impl VoipMsClient {
    /// Create a new client with a default `reqwest` client.
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            username: username.to_string(),
            password: password.to_string(),
            debug: false,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.url, &config.username, &config.password).with_debug(config.debug)
    }

    /// Log every raw request and response at `debug` level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Use a caller-configured HTTP client (timeouts, proxies, TLS roots).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn general(&self) -> GeneralApi<'_> {
        GeneralApi::new(self)
    }

    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub fn cdr(&self) -> CdrApi<'_> {
        CdrApi::new(self)
    }

    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    pub fn dids(&self) -> DidsApi<'_> {
        DidsApi::new(self)
    }

    /// The authentication triad followed by `params`, in wire order.
    pub fn request_fields<R: ToForm + ?Sized>(&self, method: &str, params: &R) -> Result<Form> {
        let mut form = Form::new();
        form.text("api_username", &self.username)
            .text("api_password", &self.password)
            .text("method", method)
            .record(params)?;
        Ok(form)
    }

    /// GET `base_url?api_username=..&api_password=..&method=..&<params>`.
    pub fn get<T: DeserializeOwned>(&self, method: &str, params: &Form) -> Result<T> {
        let fields = self.request_fields(method, params)?;
        let req = self.http.get(&self.base_url).query(fields.fields());
        self.call(method, &fields, req)
    }

    /// POST a multipart body carrying the authentication triad and `request`.
    pub fn post<R: ToForm + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        request: &R,
    ) -> Result<T> {
        let fields = self.request_fields(method, request)?;
        let req = self.http.post(&self.base_url).multipart(to_multipart(&fields));
        self.call(method, &fields, req)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        fields: &Form,
        req: RequestBuilder,
    ) -> Result<T> {
        let req = req.build()?;
        if self.debug {
            debug!(method, request = %self.dump_request(&req, fields), "voip.ms request");
        }
        let resp = self.http.execute(req)?;
        let status = resp.status();
        let headers = self.debug.then(|| resp.headers().clone());
        let body = resp.text()?;
        if let Some(headers) = headers {
            debug!(method, %status, ?headers, %body, "voip.ms response");
        }

        if !status.is_success() {
            return Err(VoipMsError::HttpStatus {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        decode_envelope(&body).inspect_err(|e| {
            if e.is_api_status() {
                debug!(method, status = %e, "voip.ms call rejected");
            }
        })
    }

    /// Request line, headers and fields. The URL is printed without its
    /// query, which carries the password on GET calls.
    fn dump_request(&self, req: &Request, fields: &Form) -> String {
        let mut out = format!("{} {}\n", req.method(), self.base_url);
        for (name, value) in req.headers() {
            let value = value.to_str().unwrap_or("<binary>");
            out.push_str(&format!("{name}: {value}\n"));
        }
        out.push('\n');
        out.push_str(&redact(fields));
        out
    }
}

impl fmt::Debug for VoipMsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoipMsClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Check the status envelope, then decode the whole body into `T`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| VoipMsError::Decode(e.to_string()))?;
    check_status(&value)?;
    serde_json::from_value(value).map_err(|e| VoipMsError::Decode(e.to_string()))
}

/// `Ok` for `"status": "success"`, the status verbatim as an error otherwise.
pub fn check_status(value: &Value) -> Result<()> {
    match value.get("status").and_then(Value::as_str) {
        Some(SUCCESS) => Ok(()),
        Some(status) => Err(VoipMsError::ApiStatus(status.to_string())),
        None => Err(VoipMsError::Decode(
            "response has no string `status` field".into(),
        )),
    }
}

fn to_multipart(fields: &Form) -> multipart::Form {
    fields
        .iter()
        .fold(multipart::Form::new(), |form, (name, value)| {
            form.text(name.to_string(), value.to_string())
        })
}

fn redact(fields: &Form) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            let value = if name == "api_password" { REDACTED } else { value };
            format!("{name}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}
