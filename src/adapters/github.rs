use crate::domain::model::{ContributionCalendar, ContributionDay};
use crate::utils::error::{Result, StreakError};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
pub const USER_AGENT: &str = "Streak-Stats-Generator";

const MIN_TOKEN_LENGTH: usize = 10;

const CONTRIBUTIONS_QUERY: &str = r#"
query($userName: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $userName) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: CalendarNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarNode {
    total_contributions: u64,
    weeks: Vec<WeekNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekNode {
    contribution_days: Vec<DayNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayNode {
    date: String,
    contribution_count: u32,
}

/// Checks the token shape without ever echoing its value.
pub fn check_token(token: Option<&str>) -> Result<&str> {
    match token {
        Some(token) if token.len() >= MIN_TOKEN_LENGTH => Ok(token),
        _ => Err(StreakError::ConfigError {
            message: "GITHUB_TOKEN environment variable is missing or invalid!".to_string(),
        }),
    }
}

fn token_hint(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{}... (length: {})", prefix, token.len())
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| StreakError::DataFormatError {
        message: format!("invalid contribution date '{}': {}", raw, e),
    })
}

/// A 200 body that does not match the expected shape is a remote-data problem,
/// not a transport one.
fn parse_response(text: &str) -> Result<GraphQlResponse> {
    serde_json::from_str(text).map_err(|e| StreakError::DataFormatError {
        message: format!("unexpected GraphQL response body: {}", e),
    })
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl GitHubClient {
    pub fn new(endpoint: &str, token: Option<&str>) -> Result<Self> {
        let token = check_token(token)?;
        tracing::debug!("Token prefix = {}", token_hint(token));

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }

    pub async fn fetch_calendar(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar> {
        let body = json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": {
                "userName": username,
                "from": from.to_rfc3339_opts(SecondsFormat::Secs, true),
                "to": to.to_rfc3339_opts(SecondsFormat::Secs, true),
            }
        });

        tracing::debug!("Making GraphQL request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(StreakError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let payload = parse_response(&text)?;

        if let Some(errors) = payload.errors {
            return Err(StreakError::GraphQlError {
                errors: serde_json::to_string_pretty(&errors)?,
            });
        }

        let user = payload
            .data
            .and_then(|data| data.user)
            .ok_or_else(|| StreakError::UserNotFound {
                username: username.to_string(),
            })?;

        let calendar_node = user.contributions_collection.contribution_calendar;
        let mut calendar =
            ContributionCalendar::new(username, calendar_node.total_contributions, from, to);

        for week in calendar_node.weeks {
            for day in week.contribution_days {
                calendar.record(ContributionDay {
                    date: parse_day(&day.date)?,
                    count: day.contribution_count,
                });
            }
        }

        tracing::debug!(
            "Parsed {} active days out of {} total contributions",
            calendar.active_days(),
            calendar.total_contributions
        );

        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use httpmock::prelude::*;

    const TOKEN: &str = "ghp_testtoken1234567890";
    const AUTHORIZATION: &str = "Bearer ghp_testtoken1234567890";

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2025, 10, 18, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_check_token() {
        assert!(check_token(None).is_err());
        assert!(check_token(Some("short")).is_err());
        assert_eq!(check_token(Some(TOKEN)).unwrap(), TOKEN);
    }

    #[test]
    fn test_token_hint_hides_secret() {
        let hint = token_hint(TOKEN);
        assert_eq!(hint, "ghp_... (length: 23)");
    }

    #[test]
    fn test_parse_day_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(parse_day("2026-03-04").unwrap(), expected);
        assert_eq!(parse_day("2026-03-04T00:00:00Z").unwrap(), expected);
        assert!(parse_day("yesterday").is_err());
    }

    #[tokio::test]
    async fn test_fetch_calendar_sends_query_and_parses_days() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("Authorization", AUTHORIZATION)
                .header("User-Agent", USER_AGENT)
                .body_contains("\"userName\":\"octocat\"")
                .body_contains("\"from\":\"2025-10-18T09:00:00Z\"")
                .body_contains("\"to\":\"2026-10-18T09:00:00Z\"")
                .body_contains("contributionsCollection");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": {"user": {"contributionsCollection": {"contributionCalendar": {
                        "totalContributions": 9,
                        "weeks": [
                            {"contributionDays": [
                                {"date": "2026-10-11", "contributionCount": 0},
                                {"date": "2026-10-12", "contributionCount": 4}
                            ]},
                            {"contributionDays": [
                                {"date": "2026-10-17", "contributionCount": 2},
                                {"date": "2026-10-18", "contributionCount": 3}
                            ]}
                        ]
                    }}}}
                }));
        });

        let client = GitHubClient::new(&server.url("/graphql"), Some(TOKEN)).unwrap();
        let (from, to) = window();
        let calendar = client.fetch_calendar("octocat", from, to).await.unwrap();

        api_mock.assert();
        assert_eq!(calendar.username, "octocat");
        assert_eq!(calendar.total_contributions, 9);
        assert_eq!(calendar.active_days(), 3);
        assert_eq!(calendar.window_end, to);
    }

    #[tokio::test]
    async fn test_fetch_calendar_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(401).body("Bad credentials");
        });

        let client = GitHubClient::new(&server.url("/graphql"), Some(TOKEN)).unwrap();
        let (from, to) = window();
        let err = client.fetch_calendar("octocat", from, to).await.unwrap_err();

        match err {
            StreakError::ApiStatusError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Bad credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_calendar_graphql_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "data": null,
                "errors": [{"message": "The total time spanned by 'from' and 'to' must not exceed 1 year"}]
            }));
        });

        let client = GitHubClient::new(&server.url("/graphql"), Some(TOKEN)).unwrap();
        let (from, to) = window();
        let err = client.fetch_calendar("octocat", from, to).await.unwrap_err();

        assert!(matches!(err, StreakError::GraphQlError { .. }));
        assert!(err.to_string().contains("must not exceed 1 year"));
    }

    #[tokio::test]
    async fn test_fetch_calendar_unknown_user() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .json_body(serde_json::json!({"data": {"user": null}}));
        });

        let client = GitHubClient::new(&server.url("/graphql"), Some(TOKEN)).unwrap();
        let (from, to) = window();
        let err = client.fetch_calendar("nobody-here", from, to).await.unwrap_err();

        assert!(matches!(err, StreakError::UserNotFound { ref username } if username == "nobody-here"));
    }

    #[tokio::test]
    async fn test_fetch_calendar_malformed_body_is_data_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "data": {"user": {"contributionsCollection": null}}
            }));
        });

        let client = GitHubClient::new(&server.url("/graphql"), Some(TOKEN)).unwrap();
        let (from, to) = window();
        let err = client.fetch_calendar("octocat", from, to).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, StreakError::DataFormatError { .. }));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::RemoteData);
        assert_eq!(err.severity(), crate::utils::error::ErrorSeverity::High);
    }

    #[test]
    fn test_parse_response_rejects_html() {
        let err = parse_response("<html>Service Unavailable</html>").unwrap_err();
        assert!(matches!(err, StreakError::DataFormatError { .. }));
    }

    #[test]
    fn test_missing_token_fails_before_request() {
        let err = GitHubClient::new(DEFAULT_GRAPHQL_ENDPOINT, None).unwrap_err();
        assert!(matches!(err, StreakError::ConfigError { .. }));
    }
}
