//! libcurl-backed transport.
//!
//! The curl easy interface is blocking, so each GET runs on tokio's blocking
//! pool. Redirects are followed; the body is buffered in memory.

use std::future::Future;
use std::time::Duration;

use super::Transport;
use crate::retry::TransportError;

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        let url = url.to_string();
        let opts = *self;
        async move {
            tokio::task::spawn_blocking(move || get_blocking(&url, opts))
                .await
                .map_err(|e| TransportError::Task(e.to_string()))?
        }
    }
}

/// Performs one GET in the current thread and returns the full body.
fn get_blocking(url: &str, opts: CurlTransport) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(concat!("cardroster/", env!("CARGO_PKG_VERSION")))?;

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransportError::Http(code));
    }
    Ok(body)
}
