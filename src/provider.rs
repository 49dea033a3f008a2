//! Sources of the hidden word.
//!
//! A provider picks a length uniformly from `MIN_WORD_LEN..=MAX_WORD_LEN`
//! and returns one word of that length. Failures are fatal to the session;
//! nothing here retries.

use crate::word::{MAX_WORD_LEN, MIN_WORD_LEN, Word};
use crate::{debug_log, info_log};
use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use std::io;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://random-word-api.herokuapp.com/word";
pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("word request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("word service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("no usable {length}-letter word in the response")]
    NoCandidates { length: usize },
    #[error("word list is empty")]
    EmptyWordbank,
    #[error("could not read word list: {0}")]
    Wordbank(#[from] io::Error),
}

#[async_trait]
pub trait WordProvider: Send + Sync {
    async fn fetch_word(&self) -> Result<Word, ProviderError>;
}

/// A length drawn uniformly from the playable range.
#[must_use]
pub fn random_length() -> usize {
    rand::thread_rng().gen_range(MIN_WORD_LEN..=MAX_WORD_LEN)
}

/// First candidate that is a plain word of exactly `length` letters.
///
/// Not simply the first element: entries with other lengths or non-letters
/// are skipped so a service ignoring `length` can't break the 4-9 range.
pub fn pick_candidate(candidates: &[String], length: usize) -> Result<Word, ProviderError> {
    candidates
        .iter()
        .filter_map(|raw| Word::new(raw).ok())
        .find(|word| word.len() == length)
        .ok_or(ProviderError::NoCandidates { length })
}

/// Fetches words from a random-word HTTP API answering with a JSON array.
pub struct HttpWordProvider {
    client: reqwest::Client,
    endpoint: String,
    lang: String,
}

impl HttpWordProvider {
    pub fn new(endpoint: &str, lang: &str, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder().user_agent("hangman");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
            lang: lang.to_string(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query(&self, length: usize) -> [(&'static str, String); 2] {
        [("lang", self.lang.clone()), ("length", length.to_string())]
    }

    async fn fetch_length(&self, length: usize) -> Result<Word, ProviderError> {
        info_log!("Requesting {}-letter word from {}", length, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query(length))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Word service error: {status}");
            return Err(ProviderError::Status(status));
        }

        let candidates: Vec<String> = response.json().await?;
        debug_log!("Word service returned {} candidates", candidates.len());
        pick_candidate(&candidates, length)
    }
}

#[async_trait]
impl WordProvider for HttpWordProvider {
    async fn fetch_word(&self) -> Result<Word, ProviderError> {
        let length = random_length();
        self.fetch_length(length).await
    }
}

/// Offline provider drawing from an in-memory word list.
pub struct WordbankProvider {
    words: Vec<Word>,
}

impl WordbankProvider {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A random word of `length` letters, or of any length if none match.
    pub fn pick(&self, length: usize) -> Result<Word, ProviderError> {
        let mut rng = rand::thread_rng();
        let matching: Vec<&Word> = self.words.iter().filter(|w| w.len() == length).collect();
        let chosen = match matching.choose(&mut rng) {
            Some(word) => Some(*word),
            None => {
                debug_log!("No {}-letter word in list, picking any length", length);
                self.words.choose(&mut rng)
            }
        };
        chosen.cloned().ok_or(ProviderError::EmptyWordbank)
    }
}

#[async_trait]
impl WordProvider for WordbankProvider {
    async fn fetch_word(&self) -> Result<Word, ProviderError> {
        self.pick(random_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_str};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// One-shot HTTP server answering a single request with `status` and `body`.
    ///
    /// Returns the endpoint URL and a receiver for the raw request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/word"), rx)
    }

    fn local_provider(endpoint: &str) -> HttpWordProvider {
        HttpWordProvider::new(endpoint, DEFAULT_LANG, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_http_fetch_returns_word_of_requested_length() {
        let body = r#"["abcd","abcde","abcdef","abcdefg","abcdefgh","abcdefghi"]"#;
        let (endpoint, request) = serve_once("200 OK", body).await;

        let word = local_provider(&endpoint).fetch_word().await.unwrap();
        let len = word.len();
        assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len));
        assert_eq!(word.to_string(), &"abcdefghi"[..len]);

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /word?"));
        assert!(request.contains("lang=en"));
        assert!(request.contains(&format!("length={len}")));
    }

    #[tokio::test]
    async fn test_http_fetch_empty_array_is_no_candidates() {
        let (endpoint, _request) = serve_once("200 OK", "[]").await;
        let result = local_provider(&endpoint).fetch_word().await;
        assert!(matches!(result, Err(ProviderError::NoCandidates { .. })));
    }

    #[tokio::test]
    async fn test_http_fetch_server_error_is_status() {
        let (endpoint, _request) = serve_once("500 Internal Server Error", "").await;
        match local_provider(&endpoint).fetch_word().await {
            Err(ProviderError::Status(status)) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_fetch_malformed_body_is_request_error() {
        let (endpoint, _request) = serve_once("200 OK", "{bad").await;
        match local_provider(&endpoint).fetch_word().await {
            Err(ProviderError::Request(e)) => assert!(e.is_decode()),
            other => panic!("Expected decode error, got {other:?}"),
        }
    }

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_random_length_in_range() {
        for _ in 0..200 {
            let len = random_length();
            assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len));
        }
    }

    #[test]
    fn test_pick_candidate_first_match() {
        let candidates = strings(&["Garden", "planet"]);
        assert_eq!(pick_candidate(&candidates, 6).unwrap().to_string(), "garden");
    }

    #[test]
    fn test_pick_candidate_skips_wrong_length_and_junk() {
        let candidates = strings(&["tree", "ice-cream", "forest"]);
        assert_eq!(pick_candidate(&candidates, 6).unwrap().to_string(), "forest");
    }

    #[test]
    fn test_pick_candidate_empty_is_error() {
        assert!(matches!(
            pick_candidate(&[], 5),
            Err(ProviderError::NoCandidates { length: 5 })
        ));
        assert!(matches!(
            pick_candidate(&strings(&["cat"]), 5),
            Err(ProviderError::NoCandidates { length: 5 })
        ));
    }

    #[test]
    fn test_http_query_parameters() {
        let provider = HttpWordProvider::new(DEFAULT_ENDPOINT, "de", None).unwrap();
        assert_eq!(provider.endpoint(), DEFAULT_ENDPOINT);
        let query = provider.query(7);
        assert_eq!(query[0], ("lang", "de".to_string()));
        assert_eq!(query[1], ("length", "7".to_string()));
    }

    #[test]
    fn test_wordbank_pick_prefers_requested_length() {
        let provider = WordbankProvider::new(load_wordbank_from_str("tree\nforest\nmeadow"));
        assert_eq!(provider.len(), 3);
        for _ in 0..20 {
            assert_eq!(provider.pick(6).unwrap().len(), 6);
        }
        assert_eq!(provider.pick(4).unwrap().to_string(), "tree");
    }

    #[test]
    fn test_wordbank_pick_falls_back_to_any_length() {
        let provider = WordbankProvider::new(load_wordbank_from_str("tree"));
        assert_eq!(provider.pick(9).unwrap().to_string(), "tree");
    }

    #[test]
    fn test_empty_wordbank_is_error() {
        let provider = WordbankProvider::new(Vec::new());
        assert!(provider.is_empty());
        assert!(matches!(provider.pick(5), Err(ProviderError::EmptyWordbank)));
    }

    #[tokio::test]
    async fn test_embedded_wordbank_provider_fetches_playable_word() {
        let provider = WordbankProvider::new(load_wordbank_from_str(EMBEDDED_WORDBANK));
        let word = provider.fetch_word().await.unwrap();
        assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()));
    }
}
