//! Session data request boundary
//!
//! A request is addressed by year, round and session with an optional
//! comma-separated `drivers` query. The response is either the filtered
//! record or a not-found document echoing the request parameters.
//!
//! ```rust
//! use paddock::request::SessionRequest;
//!
//! let request = SessionRequest::from_query("2025", "bahrain", "q", Some("ver, nor")).unwrap();
//! assert_eq!(request.drivers, vec!["VER", "NOR"]);
//! assert_eq!(request.query_path(), "/api/sessions/2025/bahrain/Q?drivers=VER,NOR");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::filter::parse_driver_codes;
use crate::source::SessionSource;
use crate::types::{SessionKey, SessionRecord};
use crate::{PaddockError, Result};

/// `error` field of every not-found document.
pub const SESSION_NOT_FOUND: &str = "Session data not found";

/// A session selection plus the competitors to keep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionRequest {
    pub key: SessionKey,
    /// Normalised codes; empty means "no filtering"
    pub drivers: Vec<String>,
}

impl SessionRequest {
    pub fn new<S: AsRef<str>>(key: SessionKey, drivers: &[S]) -> Self {
        let drivers = drivers
            .iter()
            .map(|code| code.as_ref().trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();
        Self { key, drivers }
    }

    /// Build a request from raw route parameters and the `drivers` query value.
    pub fn from_query(year: &str, round: &str, session: &str, drivers: Option<&str>) -> Result<Self> {
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|e| PaddockError::parse_error(format!("year {year:?}"), e))?;
        Ok(Self { key: SessionKey::new(year, round, session), drivers: parse_driver_codes(drivers) })
    }

    /// Path and query this request is served under.
    pub fn query_path(&self) -> String {
        let SessionKey { year, round, session } = &self.key;
        let mut path = format!("/api/sessions/{year}/{round}/{session}");
        if !self.drivers.is_empty() {
            path.push_str("?drivers=");
            path.push_str(&self.drivers.join(","));
        }
        path
    }
}

/// Request parameters echoed in a not-found document, as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RouteParams {
    pub year: String,
    pub round: String,
    pub session: String,
}

impl From<&SessionKey> for RouteParams {
    fn from(key: &SessionKey) -> Self {
        Self { year: key.year.to_string(), round: key.round.clone(), session: key.session.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ErrorDocument {
    pub error: String,
    /// Underlying reason, for diagnostics
    pub details: String,
    pub params: RouteParams,
}

/// Outcome of a session data request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SessionResponse {
    Found(SessionRecord),
    NotFound(ErrorDocument),
}

impl SessionResponse {
    fn not_found(params: RouteParams, error: &PaddockError) -> Self {
        SessionResponse::NotFound(ErrorDocument {
            error: SESSION_NOT_FOUND.to_string(),
            details: error.detailed_message(),
            params,
        })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            SessionResponse::Found(_) => 200,
            SessionResponse::NotFound(_) => 404,
        }
    }

    pub fn record(&self) -> Option<&SessionRecord> {
        match self {
            SessionResponse::Found(record) => Some(record),
            SessionResponse::NotFound(_) => None,
        }
    }
}

/// Serve `request` from `source`.
pub async fn respond<S>(source: &S, request: &SessionRequest) -> SessionResponse
where
    S: SessionSource + ?Sized,
{
    match source.fetch_session(request).await {
        Ok(record) => {
            info!(
                session = %request.key,
                drivers = record.drivers.len(),
                laps = record.laps.len(),
                "Serving session data"
            );
            SessionResponse::Found(record)
        }
        Err(error) => {
            warn!(session = %request.key, error = %error.detailed_message(), "Session request failed");
            SessionResponse::not_found(RouteParams::from(&request.key), &error)
        }
    }
}

/// Serve a request given as raw route parameters.
///
/// Parameters that cannot form a request produce a not-found document too.
pub async fn respond_to_query<S>(
    source: &S,
    year: &str,
    round: &str,
    session: &str,
    drivers: Option<&str>,
) -> SessionResponse
where
    S: SessionSource + ?Sized,
{
    match SessionRequest::from_query(year, round, session, drivers) {
        Ok(request) => respond(source, &request).await,
        Err(error) => {
            warn!(year, round, session, error = %error, "Rejected session request");
            let params = RouteParams {
                year: year.to_string(),
                round: round.to_string(),
                session: session.to_string(),
            };
            SessionResponse::not_found(params, &error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_session;
    use crate::test_utils::{RecordBuilder, lap};

    struct FixedSource(SessionRecord);

    #[async_trait::async_trait]
    impl SessionSource for FixedSource {
        async fn fetch_session(&self, request: &SessionRequest) -> Result<SessionRecord> {
            if request.key.round != self.0.meta.round {
                return Err(PaddockError::SessionNotFound {
                    key: request.key.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no session.json"),
                });
            }
            Ok(filter_session(self.0.clone(), &request.drivers))
        }
    }

    fn source() -> FixedSource {
        FixedSource(
            RecordBuilder::new(2025, "bahrain", "Q")
                .driver("VER", "Red Bull Racing")
                .driver("NOR", "McLaren")
                .lap(lap("VER", 1, Some(91.2)))
                .lap(lap("NOR", 1, Some(91.5)))
                .build(),
        )
    }

    #[test]
    fn query_normalises_session_and_drivers() {
        let request = SessionRequest::from_query(" 2025", "monza", "fp1", Some("lec,,ham ")).unwrap();
        assert_eq!(request.key, SessionKey::new(2025, "monza", "FP1"));
        assert_eq!(request.drivers, vec!["LEC", "HAM"]);

        let unfiltered = SessionRequest::new(SessionKey::new(2025, "monza", "R"), &[] as &[&str]);
        assert_eq!(unfiltered.query_path(), "/api/sessions/2025/monza/R");
    }

    #[test]
    fn invalid_year_is_a_parse_error() {
        let error = SessionRequest::from_query("twenty", "monza", "R", None).unwrap_err();
        assert!(matches!(error, PaddockError::Parse { .. }));
    }

    #[tokio::test]
    async fn found_response_is_filtered_record() {
        let _ = tracing_subscriber::fmt::try_init();
        let response = respond_to_query(&source(), "2025", "bahrain", "q", Some("nor")).await;
        assert_eq!(response.status_code(), 200);

        let record = response.record().unwrap();
        assert_eq!(record.drivers.keys().collect::<Vec<_>>(), vec!["NOR"]);
        assert_eq!(record.laps.len(), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("meta").is_some(), "found response serialises as the bare record");
    }

    #[tokio::test]
    async fn missing_session_yields_not_found_document() {
        let response = respond_to_query(&source(), "2025", "monaco", "r", None).await;
        assert_eq!(response.status_code(), 404);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "Session data not found");
        assert_eq!(json["params"], serde_json::json!({"year": "2025", "round": "monaco", "session": "R"}));
        assert!(json["details"].as_str().unwrap().contains("no session.json"));
    }

    #[tokio::test]
    async fn malformed_parameters_echo_raw_values() {
        let response = respond_to_query(&source(), "abc", "bahrain", "q", None).await;
        let SessionResponse::NotFound(document) = response else {
            panic!("expected not-found document");
        };
        assert_eq!(document.params.year, "abc");
        assert_eq!(document.params.session, "q");
        assert!(document.details.contains("year"));
    }
}
