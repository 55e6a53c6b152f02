//! Where the catalog document comes from

use crate::error::{CatalogError, Result};
use reqwest::blocking::Client;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Remote(Url),
}

impl CatalogSource {
    /// Parse a path, `file://` URL, or `http(s)://` URL.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(CatalogError::InvalidSource {
                input: input.to_string(),
                reason: "empty source".to_string(),
            });
        }
        if !input.contains("://") {
            return Ok(CatalogSource::File(PathBuf::from(input)));
        }

        let url = Url::parse(input).map_err(|e| CatalogError::InvalidSource {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(CatalogSource::Remote(url)),
            "file" => url
                .to_file_path()
                .map(CatalogSource::File)
                .map_err(|_| CatalogError::InvalidSource {
                    input: input.to_string(),
                    reason: "file URL does not name a local path".to_string(),
                }),
            other => Err(CatalogError::InvalidSource {
                input: input.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    /// Read the raw document. One attempt, no retry.
    pub fn fetch(&self) -> Result<String> {
        match self {
            CatalogSource::File(path) => {
                log::debug!("Reading catalog from {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
            CatalogSource::Remote(_) => self.fetch_with(&Client::new()),
        }
    }

    pub fn fetch_with(&self, client: &Client) -> Result<String> {
        match self {
            CatalogSource::File(_) => self.fetch(),
            CatalogSource::Remote(url) => {
                log::debug!("Fetching catalog from {url}");
                let text = client
                    .get(url.clone())
                    .send()
                    .and_then(|r| r.error_for_status())?
                    .text()?;
                Ok(text)
            }
        }
    }
}

impl FromStr for CatalogSource {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_parse_plain_path() {
        assert_eq!(
            CatalogSource::parse("content.json").unwrap(),
            CatalogSource::File(PathBuf::from("content.json"))
        );
    }

    #[test]
    fn test_parse_http() {
        let source = CatalogSource::parse("https://example.com/content.json").unwrap();
        assert!(matches!(source, CatalogSource::Remote(_)));
        assert_eq!(source.to_string(), "https://example.com/content.json");
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_file_url() {
        assert_eq!(
            CatalogSource::parse("file:///tmp/content.json").unwrap(),
            CatalogSource::File(PathBuf::from("/tmp/content.json"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        let err = CatalogSource::parse("ftp://example.com/content.json").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(CatalogSource::parse("").is_err());
    }

    #[test]
    fn test_fetch_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::File(dir.path().join("missing.json"));
        assert!(matches!(source.fetch(), Err(CatalogError::Io(_))));
    }

    /// Serve one HTTP response on a local port and return its URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/content.json")
    }

    fn local_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_fetch_over_http() {
        let url = serve_once("200 OK", r#"[{"id":1}]"#);
        let source = CatalogSource::parse(&url).unwrap();
        assert_eq!(source.fetch_with(&local_client()).unwrap(), r#"[{"id":1}]"#);
    }

    #[test]
    fn test_fetch_http_error_status() {
        let url = serve_once("404 Not Found", "missing");
        let source = CatalogSource::parse(&url).unwrap();
        assert!(matches!(
            source.fetch_with(&local_client()),
            Err(CatalogError::Http(_))
        ));
    }
}
