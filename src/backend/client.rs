use crate::app_config::AppConfig;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

pub fn new_client(config: &AppConfig) -> Result<Client, BackendClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .default_headers(headers)
        .user_agent(HeaderValue::from_str(config.backend().user_agent())?)
        .timeout(config.backend().request_timeout())
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum BackendClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("backend client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;

    #[tokio::test]
    async fn new_client_sets_the_accept_and_user_agent_headers() -> Result<(), BackendClientError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .match_header("accept", "application/json")
            .match_header("user-agent", "impactsim-test")
            .create_async()
            .await;

        let config = AppConfigBuilder::new().backend_url(server.url()).build();
        let client = new_client(&config)?;

        client.get(format!("{}{}", server.url(), "/")).send().await?;

        // Verify that the call came in with both headers set
        mock.assert();

        Ok(())
    }
}
