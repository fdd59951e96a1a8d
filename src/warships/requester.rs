//! HTTP client for the warships server API.
//!
//! This module provides the [`WarshipsRequester`] struct for making HTTP
//! requests to the warships server. Besides the requests themselves it owns
//! the session token handed out when a match is registered.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::RwLock;

use crate::warships::{
    FireResponse, InitGameRequest, LobbyEntry, PlayerStatistics, RequestError, StatusResponse,
    request_structs::FireRequest,
    response_structs::{BoardResponse, PlayerStatisticsResponse, TopStatisticsResponse},
};

/// Header carrying the session token in both directions.
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// HTTP client for requesting data from the warships server.
///
/// # Examples
///
/// ```no_run
/// let requester = WarshipsRequester::new("https://go-pjatk-server.fly.dev", Duration::from_secs(2))?;
/// requester.init_game(&InitGameRequest { nick: "alice".to_owned(), ..Default::default() }).await?;
/// let status = requester.get_status().await?;
/// println!("Status: {}", status);
/// ```
pub struct WarshipsRequester {
    /// Warships server url
    url: String,
    /// HTTP client, built with the request timeout
    client: Client,
    /// Session token, set by [`Requester::init_game`] and replaced by refreshes
    token: RwLock<Option<String>>,
}

/// Trait for making requests to the warships server.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
#[async_trait]
pub trait Requester: Send + Sync {
    /// Registers a new match and stores the session token.
    async fn init_game(&self, request: &InitGameRequest) -> Result<(), RequestError>;
    /// Fetches the cells occupied by own ships.
    async fn get_board(&self) -> Result<Vec<String>, RequestError>;
    /// Fetches the current match status.
    async fn get_status(&self) -> Result<StatusResponse, RequestError>;
    /// Fetches the match status with both players' descriptions.
    async fn get_description(&self) -> Result<StatusResponse, RequestError>;
    /// Fires at the given cell.
    async fn fire(&self, coord: &str) -> Result<FireResponse, RequestError>;
    /// Keeps the session alive, storing a new token if the server sends one.
    async fn refresh_session(&self) -> Result<(), RequestError>;
    /// Fetches the players currently in the lobby.
    async fn get_lobby(&self) -> Result<Vec<LobbyEntry>, RequestError>;
    /// Abandons the current match.
    async fn abandon(&self) -> Result<(), RequestError>;
    /// Fetches the leaderboard.
    async fn get_top_statistics(&self) -> Result<Vec<PlayerStatistics>, RequestError>;
    /// Fetches the statistics of one player.
    async fn get_player_statistics(&self, nick: &str) -> Result<PlayerStatistics, RequestError>;
}

impl WarshipsRequester {
    /// Create a new [WarshipsRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the warships server, without trailing slash.
    /// * `timeout` - Upper bound applied to every request.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(WarshipsRequester {
            url: url.to_string(),
            client,
            token: RwLock::new(None),
        })
    }

    /// Returns the current session token, if a match was initialized.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Attaches the session token to `request`, sends it and checks the status.
    async fn send_authorized(&self, request: RequestBuilder) -> Result<Response, RequestError> {
        let token = self.token().await.ok_or(RequestError::MissingToken)?;
        let response = request.header(AUTH_TOKEN_HEADER, token).send().await?;
        check_status(response)
    }
}

/// Turns non-success HTTP statuses into [`RequestError::Server`].
fn check_status(response: Response) -> Result<Response, RequestError> {
    let status = response.status();
    if !status.is_success() {
        debug!("response from {} -> {}", response.url(), status);
        return Err(RequestError::Server {
            status_code: status.as_u16(),
        });
    }
    Ok(response)
}

/// Reads a non-empty session token from the response headers.
fn header_token(response: &Response) -> Option<String> {
    response
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

#[async_trait]
impl Requester for WarshipsRequester {
    /// Request `POST /api/game` to register a match.
    ///
    /// The session token comes back in the `X-Auth-Token` response header:
    /// a successful response without it is reported as
    /// [`RequestError::MissingToken`].
    async fn init_game(&self, request: &InitGameRequest) -> Result<(), RequestError> {
        let url = format!("{}/api/game", &self.url);
        info!("request new game for {}", &request.nick);
        debug!("request POST {} -> {:?}", &url, request);

        let response = self.client.post(&url).json(request).send().await?;
        let response = check_status(response)?;
        let token = header_token(&response).ok_or(RequestError::MissingToken)?;

        *self.token.write().await = Some(token);
        info!("game initialized for {}", &request.nick);

        Ok(())
    }

    /// Request `GET /api/game/board` to get the own ships.
    ///
    /// This api call returns a json object:
    /// ```
    /// { board: ["A1", "A2", "A3", "C5"] }
    /// ```
    async fn get_board(&self) -> Result<Vec<String>, RequestError> {
        let url = format!("{}/api/game/board", &self.url);
        debug!("request {}", &url);

        let board: BoardResponse = self
            .send_authorized(self.client.get(&url))
            .await?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &board);

        Ok(board.board)
    }

    /// Request `GET /api/game` to get the match status.
    async fn get_status(&self) -> Result<StatusResponse, RequestError> {
        let url = format!("{}/api/game", &self.url);
        debug!("request {}", &url);

        let status: StatusResponse = self
            .send_authorized(self.client.get(&url))
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &status);

        Ok(status)
    }

    /// Request `GET /api/game/desc` to get both players' descriptions.
    async fn get_description(&self) -> Result<StatusResponse, RequestError> {
        let url = format!("{}/api/game/desc", &self.url);
        debug!("request {}", &url);

        let status: StatusResponse = self
            .send_authorized(self.client.get(&url))
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &status);

        Ok(status)
    }

    /// Request `POST /api/game/fire` with `{ coord: "B7" }`.
    ///
    /// This api call returns a json object:
    /// ```
    /// { result: "hit" }
    /// ```
    async fn fire(&self, coord: &str) -> Result<FireResponse, RequestError> {
        let url = format!("{}/api/game/fire", &self.url);
        info!("fire at {}", coord);

        let fire_response: FireResponse = self
            .send_authorized(self.client.post(&url).json(&FireRequest { coord }))
            .await?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &fire_response);

        Ok(fire_response)
    }

    /// Request `GET /api/game/refresh` to keep the session alive.
    async fn refresh_session(&self) -> Result<(), RequestError> {
        let url = format!("{}/api/game/refresh", &self.url);
        debug!("request {}", &url);

        let response = self.send_authorized(self.client.get(&url)).await?;
        if let Some(token) = header_token(&response) {
            debug!("session token replaced by refresh");
            *self.token.write().await = Some(token);
        }

        Ok(())
    }

    /// Request `GET /api/lobby` to get the players in the lobby.
    ///
    /// This api call returns a json array:
    /// ```
    /// [
    ///   { nick: "bob", game_status: "waiting" },
    ///   { nick: "carol", game_status: "game_in_progress" }
    /// ]
    /// ```
    async fn get_lobby(&self) -> Result<Vec<LobbyEntry>, RequestError> {
        let url = format!("{}/api/lobby", &self.url);
        debug!("request {}", &url);

        let response = check_status(self.client.get(&url).send().await?)?;
        let lobby: Vec<LobbyEntry> = response.json().await?;

        debug!("response from {} -> {:?}", &url, &lobby);

        Ok(lobby)
    }

    /// Request `DELETE /api/game/abandon`.
    async fn abandon(&self) -> Result<(), RequestError> {
        let url = format!("{}/api/game/abandon", &self.url);
        info!("abandon game");

        self.send_authorized(self.client.delete(&url)).await?;

        Ok(())
    }

    /// Request `GET /api/stats` to get the leaderboard.
    async fn get_top_statistics(&self) -> Result<Vec<PlayerStatistics>, RequestError> {
        let url = format!("{}/api/stats", &self.url);
        info!("request top statistics");

        let response = check_status(self.client.get(&url).send().await?)?;
        let top: TopStatisticsResponse = response.json().await?;

        debug!("response from {} -> {:?}", &url, &top);

        Ok(top.stats)
    }

    /// Request `GET /api/stats/{nick}` to get one player's statistics.
    async fn get_player_statistics(&self, nick: &str) -> Result<PlayerStatistics, RequestError> {
        let url = format!("{}/api/stats/{}", &self.url, nick);
        info!("request statistics of {}", nick);

        let response = check_status(self.client.get(&url).send().await?)?;
        let player: PlayerStatisticsResponse = response.json().await?;

        debug!("response from {} -> {:?}", &url, &player);

        Ok(player.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requester(url: &str) -> WarshipsRequester {
        WarshipsRequester::new(url, Duration::from_secs(2)).unwrap()
    }

    async fn mock_init(server: &mut mockito::ServerGuard, token: &str) -> mockito::Mock {
        server
            .mock("POST", "/api/game")
            .with_status(200)
            .with_header("X-Auth-Token", token)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_init_game_stores_token() {
        let mut server = mockito::Server::new_async().await;
        let init = server
            .mock("POST", "/api/game")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "nick": "alice",
                "target_nick": "bob"
            })))
            .with_status(200)
            .with_header("X-Auth-Token", "token-1")
            .create_async()
            .await;

        let requester = requester(&server.url());
        let request = InitGameRequest {
            nick: "alice".to_owned(),
            target_nick: Some("bob".to_owned()),
            ..Default::default()
        };
        requester.init_game(&request).await.unwrap();

        init.assert_async().await;
        assert_eq!(requester.token().await.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_init_game_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/game")
            .with_status(400)
            .create_async()
            .await;

        let requester = requester(&server.url());
        let error = requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(error, RequestError::Server { status_code: 400 }));
        assert!(requester.token().await.is_none());
    }

    #[tokio::test]
    async fn test_init_game_without_token_header() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/game")
            .with_status(200)
            .create_async()
            .await;

        let requester = requester(&server.url());
        let error = requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(error, RequestError::MissingToken));
    }

    #[tokio::test]
    async fn test_status_requires_token() {
        let requester = requester("http://127.0.0.1:1");
        let error = requester.get_status().await.unwrap_err();
        assert!(matches!(error, RequestError::MissingToken));
    }

    #[tokio::test]
    async fn test_get_status_sends_token() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        let body = r#"{"game_status": "game_in_progress", "should_fire": true, "timer": 55, "opp_shots": ["B2"]}"#;
        let status_mock = server
            .mock("GET", "/api/game")
            .match_header("X-Auth-Token", "token-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        let status = requester.get_status().await.unwrap();

        status_mock.assert_async().await;
        assert_eq!(status.game_status, "game_in_progress");
        assert!(status.should_fire);
        assert_eq!(status.timer, 55);
        assert_eq!(status.opp_shots, vec!["B2"]);
    }

    #[tokio::test]
    async fn test_get_board() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        server
            .mock("GET", "/api/game/board")
            .match_header("X-Auth-Token", "token-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"board": ["A1", "A2", "J10"]}"#)
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        let board = requester.get_board().await.unwrap();

        assert_eq!(board, vec!["A1", "A2", "J10"]);
    }

    #[tokio::test]
    async fn test_fire() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        server
            .mock("POST", "/api/game/fire")
            .match_header("X-Auth-Token", "token-1")
            .match_body(mockito::Matcher::Json(serde_json::json!({"coord": "C4"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": "sunk"}"#)
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        let fire_response = requester.fire("C4").await.unwrap();

        assert_eq!(fire_response.result, "sunk");
    }

    #[tokio::test]
    async fn test_refresh_session_replaces_token() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        server
            .mock("GET", "/api/game/refresh")
            .match_header("X-Auth-Token", "token-1")
            .with_status(200)
            .with_header("X-Auth-Token", "token-2")
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        requester.refresh_session().await.unwrap();

        assert_eq!(requester.token().await.as_deref(), Some("token-2"));
    }

    #[tokio::test]
    async fn test_refresh_session_keeps_token() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        server
            .mock("GET", "/api/game/refresh")
            .with_status(200)
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        requester.refresh_session().await.unwrap();

        assert_eq!(requester.token().await.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_refresh_session_expired() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        server
            .mock("GET", "/api/game/refresh")
            .with_status(401)
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        let error = requester.refresh_session().await.unwrap_err();

        assert!(matches!(error, RequestError::Server { status_code: 401 }));
    }

    #[tokio::test]
    async fn test_get_lobby() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[{"nick": "bob", "game_status": "waiting"}, {"nick": "carol", "game_status": "game_in_progress"}]"#;
        server
            .mock("GET", "/api/lobby")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = requester(&server.url());
        let lobby = requester.get_lobby().await.unwrap();

        assert_eq!(lobby.len(), 2);
        assert_eq!(lobby[0].nick, "bob");
        assert_eq!(lobby[1].game_status, "game_in_progress");
    }

    #[tokio::test]
    async fn test_abandon() {
        let mut server = mockito::Server::new_async().await;
        mock_init(&mut server, "token-1").await;
        let abandon_mock = server
            .mock("DELETE", "/api/game/abandon")
            .match_header("X-Auth-Token", "token-1")
            .with_status(200)
            .create_async()
            .await;

        let requester = requester(&server.url());
        requester
            .init_game(&InitGameRequest::default())
            .await
            .unwrap();
        requester.abandon().await.unwrap();

        abandon_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_player_statistics() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/stats/alice")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"stats": {"games": 12, "nick": "alice", "points": 150, "rank": 3, "wins": 7}}"#)
            .create_async()
            .await;

        let requester = requester(&server.url());
        let stats = requester.get_player_statistics("alice").await.unwrap();

        assert_eq!(stats.nick, "alice");
        assert_eq!(stats.rank, 3);
        assert_eq!(stats.wins, 7);
    }

    #[tokio::test]
    async fn test_get_top_statistics_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/stats")
            .with_status(404)
            .create_async()
            .await;

        let requester = requester(&server.url());
        let error = requester.get_top_statistics().await.unwrap_err();

        assert!(matches!(error, RequestError::Server { status_code: 404 }));
    }
}
