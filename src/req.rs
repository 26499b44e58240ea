use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

const MAX_HEAD_SIZE: usize = 8 * 1024;
const MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Debug, PartialEq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
}

impl TryFrom<&str> for Method {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(anyhow::anyhow!("Method not supported")),
        }
    }
}

pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Request {
    pub async fn new<Reader>(reader: Reader) -> Result<Self>
    where
        Reader: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut budget = MAX_HEAD_SIZE;

        // Method and path
        let mut first = String::new();
        read_head_line(&mut reader, &mut first, &mut budget)
            .await
            .context("Failed to read request line")?;
        if first.trim().is_empty() {
            anyhow::bail!("Empty Request");
        }
        let mut request_parts = first.split_whitespace();
        let method: Method = request_parts
            .next()
            .ok_or(anyhow::anyhow!("missing method"))
            .and_then(TryInto::try_into)
            .context("Missing Method")?;
        let target = request_parts.next().context("No Path")?;
        let (path, query) = split_target(target);

        // Headers
        let mut headers = HashMap::new();
        loop {
            let mut line = String::new();
            let read = read_head_line(&mut reader, &mut line, &mut budget)
                .await
                .context("Failed to read header")?;
            let line = line.trim_end_matches(['\r', '\n']);
            if read == 0 || line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }

        // Body
        let length = match headers.get("content-length") {
            Some(value) => value
                .parse::<usize>()
                .context("Invalid Content-Length")?,
            None => 0,
        };
        if length > MAX_BODY_SIZE {
            anyhow::bail!("Body too large: {} bytes", length);
        }
        let mut body = vec![0u8; length];
        reader
            .read_exact(&mut body)
            .await
            .context("Failed to read body")?;

        Ok(Request {
            method,
            path,
            query,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Path split on `/`, ignoring empty segments.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Reads one line, failing once the request line and headers together
/// exceed `budget` bytes.
async fn read_head_line<R>(reader: &mut R, line: &mut String, budget: &mut usize) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let read = (&mut *reader).take(*budget as u64).read_line(line).await?;
    if read == *budget && !line.ends_with('\n') {
        anyhow::bail!("Request head too large");
    }
    *budget -= read;
    Ok(read)
}

fn split_target(target: &str) -> (String, HashMap<String, String>) {
    match target.split_once('?') {
        Some((path, query)) => (
            path.to_string(),
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        ),
        None => (target.to_string(), HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_query_and_decodes_values() {
        let raw = "GET /api/v1/wallets?wallet_type=Credit%20Card HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let request = Request::new(raw.as_bytes()).await.unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/v1/wallets");
        assert_eq!(request.query_param("wallet_type"), Some("Credit Card"));
        assert_eq!(request.headers.get("host").map(String::as_str), Some("localhost"));
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn plus_in_query_is_a_space() {
        let raw = "GET /api/v1/wallets?wallet_type=Crypto+Wallet HTTP/1.1\r\n\r\n";
        let request = Request::new(raw.as_bytes()).await.unwrap();

        assert_eq!(request.query_param("wallet_type"), Some("Crypto Wallet"));
    }

    #[tokio::test]
    async fn reads_body_by_content_length() {
        let raw = "PUT /api/v1/wallets HTTP/1.1\r\nContent-Length: 9\r\n\r\n{\"id\":1}\ntrailing";
        let request = Request::new(raw.as_bytes()).await.unwrap();

        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.body, "{\"id\":1}\n");
    }

    #[tokio::test]
    async fn splits_path_segments() {
        let raw = "DELETE /api/v1/users/42/wallets HTTP/1.1\r\n\r\n";
        let request = Request::new(raw.as_bytes()).await.unwrap();

        assert_eq!(request.segments(), vec!["api", "v1", "users", "42", "wallets"]);
    }

    #[tokio::test]
    async fn rejects_unknown_method() {
        let raw = "PATCH /api/v1/wallets HTTP/1.1\r\n\r\n";
        assert!(Request::new(raw.as_bytes()).await.is_err());
    }

    #[tokio::test]
    async fn rejects_unterminated_header_line() {
        let raw = format!("GET / HTTP/1.1\r\nX-Padding: {}", "a".repeat(MAX_HEAD_SIZE));
        let err = Request::new(raw.as_bytes()).await.err().unwrap();

        assert!(format!("{:#}", err).contains("Request head too large"));
    }

    #[tokio::test]
    async fn rejects_too_many_headers() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..1000 {
            raw.push_str(&format!("X-Header-{}: value\r\n", i));
        }
        raw.push_str("\r\n");

        assert!(Request::new(raw.as_bytes()).await.is_err());
    }

    #[tokio::test]
    async fn rejects_truncated_body() {
        let raw = "POST /api/v1/wallets HTTP/1.1\r\nContent-Length: 50\r\n\r\n{}";
        assert!(Request::new(raw.as_bytes()).await.is_err());
    }
}
