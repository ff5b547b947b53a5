/// Query flags sent with every request: channel-based streaming of results
/// and JSON encoding of replies.
pub const DEFAULT_FLAGS: &str = "stream-channels=true&json=true&encoding=json";

/// Name of the server-side timeout parameter.
pub const TIMEOUT_PARAM: &str = "timeout";

/// One call to a daemon endpoint, before it is bound to a session.
///
/// Parameters keep their insertion order and may repeat; the daemon reads
/// repeated `arg` parameters positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    path: String,
    params: Vec<(String, String)>,
}

impl EndpointRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Appends an `arg` parameter.
    pub fn arg(self, value: impl Into<String>) -> Self {
        self.param("arg", value)
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Appends a boolean flag, serialized as `true` / `false`.
    pub fn flag(self, name: impl Into<String>, value: bool) -> Self {
        self.param(name, if value { "true" } else { "false" })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Renders the request URL below `prefix`.
    ///
    /// The default flags come first, then the caller's parameters in order,
    /// then `timeout` when one is configured. Names and values go through
    /// `encode` independently.
    pub fn url(&self, prefix: &str, timeout: Option<&str>, encode: impl Fn(&str) -> String) -> String {
        let mut url = format!("{prefix}/{}?{DEFAULT_FLAGS}", self.path);

        let timeout = timeout
            .filter(|t| !t.is_empty())
            .map(|t| (TIMEOUT_PARAM, t));
        let params = self
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(timeout);

        for (name, value) in params {
            url.push('&');
            url.push_str(&encode(name));
            url.push('=');
            url.push_str(&encode(value));
        }

        url
    }
}
