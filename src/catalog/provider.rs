use std::time::Duration;

use super::{Catalog, CatalogError};

pub(super) const DEFAULT_CATALOG_URL: &str = "https://llm-cost-engine.com/data/llm-pricing.json";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_RETRIES: usize = 3;
const RETRY_BACKOFF_MS: u64 = 250;

pub(super) fn is_remote(source: &str) -> bool {
    source.starts_with("https://") || source.starts_with("http://")
}

/// Fetches a catalog, retrying transport failures.
///
/// A response that arrives but does not parse is returned as
/// [`CatalogError::Parse`] without retrying.
pub(super) fn fetch_catalog(url: &str) -> Result<Catalog, CatalogError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(FETCH_TIMEOUT))
        .build()
        .into();
    fetch_with(&agent, url)
}

fn fetch_with(agent: &ureq::Agent, url: &str) -> Result<Catalog, CatalogError> {
    for attempt in 0..FETCH_RETRIES {
        match agent.get(url).call() {
            Ok(response) => {
                let mut body = response.into_body();
                return serde_json::from_reader(body.as_reader()).map_err(|e| {
                    tracing::debug!(attempt, "catalog body did not parse: {e}");
                    CatalogError::Parse(e)
                });
            }
            Err(e) => tracing::debug!(attempt, "catalog request failed: {e}"),
        }

        if attempt + 1 < FETCH_RETRIES {
            std::thread::sleep(Duration::from_millis(
                RETRY_BACKOFF_MS * (attempt as u64 + 1),
            ));
        }
    }

    Err(CatalogError::Fetch {
        url: url.to_string(),
        attempts: FETCH_RETRIES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    /// Answers exactly one request with `body`, then stops accepting.
    fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        format!("http://{addr}/llm-pricing.json")
    }

    fn direct_agent() -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .proxy(None)
            .build()
            .into()
    }

    #[test]
    fn invalid_body_fails_without_retry() {
        let url = serve_once("not json");
        let err = fetch_with(&direct_agent(), &url).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)), "{err}");
    }

    #[test]
    fn valid_body_parses() {
        let url = serve_once(
            r#"{"models": [{"id": "m1", "pricing": {"input_1m": 1.0, "output_1m": 2.0}}]}"#,
        );
        let catalog = fetch_with(&direct_agent(), &url).unwrap();
        assert_eq!(catalog.models.len(), 1);
    }

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://example.com/pricing.json"));
        assert!(is_remote("http://localhost:8080/pricing.json"));
        assert!(!is_remote("data/llm-pricing.json"));
        assert!(!is_remote("/tmp/https.json"));
    }
}
