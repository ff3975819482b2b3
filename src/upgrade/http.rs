//! HTTP plumbing shared by the manifest fetch and the package download.

use crate::core::UpdaterError;
use crate::upgrade::UpgradeConfig;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

/// Build the client used for every request of one attempt.
pub fn build_client(config: &UpgradeConfig) -> Result<Client, UpdaterError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|error| UpdaterError::Other {
            message: format!("Failed to initialise HTTP client: {}", describe(&error)),
        })
}

/// Send a GET request and require a `200 OK` answer.
///
/// - Transport failures (DNS, refused connection, timeout) become
///   [`UpdaterError::RemoteUnreachable`]
/// - Any status other than 200 becomes [`UpdaterError::RemoteFetchFailed`]
pub async fn get_ok(client: &Client, url: &str) -> Result<Response, UpdaterError> {
    debug!("GET {url}");
    let response = client.get(url).send().await.map_err(|error| unreachable(url, &error))?;

    let status = response.status();
    debug!("GET {url} -> {status}");
    if status != StatusCode::OK {
        return Err(UpdaterError::RemoteFetchFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Map a transport error to [`UpdaterError::RemoteUnreachable`].
pub fn unreachable(url: &str, error: &reqwest::Error) -> UpdaterError {
    let reason = if error.is_timeout() {
        format!("request timed out ({})", describe(error))
    } else if error.is_connect() {
        format!("connection failed ({})", describe(error))
    } else {
        describe(error)
    };
    UpdaterError::RemoteUnreachable {
        url: url.to_string(),
        reason,
    }
}

/// Render an error together with its sources.
///
/// reqwest's own message rarely says more than "error sending request".
fn describe(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_ok_rejects_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client(&UpgradeConfig::default()).unwrap();
        let url = format!("{}/missing", server.uri());
        let err = get_ok(&client, &url).await.unwrap_err();

        assert!(matches!(err, UpdaterError::RemoteFetchFailed { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_get_ok_connection_refused() {
        // Bind and drop a listener so the port is very likely closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = build_client(&UpgradeConfig::default()).unwrap();
        let err = get_ok(&client, &format!("http://127.0.0.1:{port}/manifest.ini"))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdaterError::RemoteUnreachable { .. }));
    }
}
