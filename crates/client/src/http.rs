use reqwest::{Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ClientError, Result};

/// Thin JSON wrapper around `reqwest::Client` bound to a base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{base_url}: {err}")))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.http.get(self.url(path)).send().await?;
        let res = check(res).await?;
        Ok(res.json::<T>().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.http.post(self.url(path)).json(body).send().await?;
        let res = check(res).await?;
        Ok(res.json::<T>().await?)
    }

    /// Sends a PUT and decodes the response body, if the server sent one.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.http.put(self.url(path)).json(body).send().await?;
        let res = check(res).await?;
        let bytes = res.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let res = self.http.delete(self.url(path)).send().await?;
        check(res).await?;
        Ok(())
    }
}

async fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = HttpClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(
            client.url("/api/categories/4"),
            "http://127.0.0.1:3000/api/categories/4"
        );
        let client = HttpClient::new("http://localhost/finance").unwrap();
        assert_eq!(client.url("api/entries"), "http://localhost/finance/api/entries");
    }
}
