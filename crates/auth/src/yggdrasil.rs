use std::fmt::Debug;

use base64::prelude::*;
use mmcai_shared::output::{MessageContents, MessageLevel, MmcaiOutput, OutputProcess};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The path suffix of the authlib integration endpoint in an API URL
const AUTHLIB_PATH: &str = "/authlib/minecraft";
/// The path suffix of the sign in endpoint that replaces the authlib one
const SIGNIN_PATH: &str = "/auth/signin";

/// The default User-Agent sent with sign in requests. Some servers reject
/// requests that don't look like they come from a browser
pub const DEFAULT_USER_AGENT: &str =
	"Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:138.0) Gecko/20100101 Firefox/138.0";

/// Represents an error that can occur when logging in to a Yggdrasil server
#[derive(Error, Debug)]
pub enum YggdrasilError {
	/// The HTTP client could not be created
	#[error("Failed to build HTTP client")]
	ClientBuildFailed(#[source] reqwest::Error),

	/// Fetching the server metadata failed
	#[error("Failed to fetch metadata from the authentication server")]
	YggdrasilHelloFailed(#[source] reqwest::Error),

	/// The sign in request failed or returned something unexpected
	#[error("Failed to authenticate with the authentication server. Response: {response}")]
	YggdrasilAuthFailed {
		/// What went wrong
		#[source]
		source: SigninFailure,
		/// The raw response body, or a placeholder if there was none
		response: String,
	},
}

/// The reason a sign in request failed
#[derive(Error, Debug)]
pub enum SigninFailure {
	/// An error occurred while sending the request or reading the response
	#[error(transparent)]
	Request(#[from] reqwest::Error),

	/// The response body was not a valid sign in response
	#[error("invalid sign in response: {0}")]
	InvalidResponse(#[from] serde_json::Error),
}

/// Username and password for a user of the authentication server
#[derive(Clone)]
pub struct Credentials {
	/// The login name
	pub username: String,
	/// The password
	pub password: String,
}

impl Credentials {
	/// Create new credentials
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
		}
	}
}

impl Debug for Credentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &"[redacted]")
			.finish()
	}
}

/// An access token for a user that will be hidden in debug messages
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccessToken(pub String);

impl Debug for AccessToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "AccessToken(***)")
	}
}

/// Body of the sign in request
#[derive(Serialize, Debug)]
struct AuthRequest<'a> {
	login: &'a str,
	password: &'a str,
	/// Always the string "null"; the server expects it to be present
	#[serde(rename = "accessToken")]
	access_token: &'a str,
}

/// Response from the sign in endpoint
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
	/// The user data
	pub data: AuthData,
	/// Textual status
	#[serde(default)]
	pub status: String,
	/// HTTP-like status code reported by the server
	#[serde(default)]
	pub status_code: u16,
	/// Message from the server
	#[serde(default)]
	pub message: String,
	/// Errors reported by the server
	#[serde(default)]
	pub errors: Vec<String>,
}

/// User data from a sign in response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
	/// The UUID of the player
	pub uuid: String,
	/// The name of the player
	pub name: String,
	/// The access token to give to the game
	pub access_token: String,
	/// When the access token expires
	#[serde(default)]
	pub expired_date: Option<String>,
	/// URL of the skin texture
	#[serde(default)]
	pub texture_skin_url: Option<String>,
	/// URL of the cloak texture
	#[serde(default)]
	pub texture_cloak_url: Option<String>,
	/// ID of the skin texture
	#[serde(default)]
	pub texture_skin_guid: Option<String>,
	/// ID of the cloak texture
	#[serde(default)]
	pub texture_cloak_guid: Option<String>,
	/// URL of the full skin render
	#[serde(default)]
	pub full_skin_url: Option<String>,
}

/// A game profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
	/// The UUID of the profile
	pub id: String,
	/// The player name
	pub name: String,
}

/// Result from logging in
#[derive(Debug, Clone)]
pub struct LoginResult {
	/// Server metadata, base64 encoded, for -Dauthlibinjector.yggdrasil.prefetched
	pub prefetched_data: String,
	/// The access token for the game
	pub access_token: AccessToken,
	/// The profile to play as
	pub selected_profile: Profile,
}

/// Create the HTTP client used for logging in. Redirects are never followed
pub fn create_client() -> Result<Client, YggdrasilError> {
	Client::builder()
		.redirect(reqwest::redirect::Policy::none())
		.build()
		.map_err(YggdrasilError::ClientBuildFailed)
}

/// Get the sign in URL that belongs to an authlib API URL
pub fn signin_url(api_url: &str) -> String {
	api_url.replace(AUTHLIB_PATH, SIGNIN_PATH)
}

/// Fetch the server metadata and encode it for use with
/// -Dauthlibinjector.yggdrasil.prefetched
pub async fn fetch_prefetched_data(client: &Client, api_url: &str) -> reqwest::Result<String> {
	let text = client
		.get(api_url)
		.send()
		.await?
		.error_for_status()?
		.text()
		.await?;

	Ok(BASE64_STANDARD.encode(text))
}

/// Headers sent with the sign in request
fn signin_headers(user_agent: &str) -> HeaderMap {
	let mut headers = HeaderMap::new();
	let user_agent = HeaderValue::from_str(user_agent)
		.unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
	headers.insert(header::USER_AGENT, user_agent);
	headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
	headers.insert(
		header::ACCEPT_LANGUAGE,
		HeaderValue::from_static("en-US,en;q=0.5"),
	);
	headers.insert(
		header::CONTENT_TYPE,
		HeaderValue::from_static("application/json"),
	);
	headers
}

/// Send the sign in request. The body is read once and then parsed so that
/// it can be reported if it is not what we expected
pub async fn authenticate(
	client: &Client,
	signin_url: &str,
	credentials: &Credentials,
	user_agent: &str,
) -> Result<AuthResponse, YggdrasilError> {
	let body = AuthRequest {
		login: &credentials.username,
		password: &credentials.password,
		access_token: "null",
	};

	let response = client
		.post(signin_url)
		.headers(signin_headers(user_agent))
		.json(&body)
		.send()
		.await
		.map_err(|e| YggdrasilError::YggdrasilAuthFailed {
			source: e.into(),
			response: "<request failed, no response body>".into(),
		})?;

	let text = response
		.text()
		.await
		.map_err(|e| YggdrasilError::YggdrasilAuthFailed {
			source: e.into(),
			response: "<failed to read response body>".into(),
		})?;

	serde_json::from_str(&text).map_err(|e| YggdrasilError::YggdrasilAuthFailed {
		source: e.into(),
		response: text,
	})
}

/// Log in to the authentication server behind an authlib API URL.
/// The metadata is fetched first, then the user is signed in
pub async fn login(
	client: &Client,
	credentials: &Credentials,
	api_url: &str,
	user_agent: &str,
	o: &mut impl MmcaiOutput,
) -> Result<LoginResult, YggdrasilError> {
	let mut process = OutputProcess::new(o);
	process.0.display(
		MessageContents::StartProcess("Fetching authentication server metadata".into()),
		MessageLevel::Debug,
	);
	let prefetched_data = fetch_prefetched_data(client, api_url)
		.await
		.map_err(YggdrasilError::YggdrasilHelloFailed)?;

	let signin_url = signin_url(api_url);
	process.0.display(
		MessageContents::StartProcess(format!("Signing in as {}", credentials.username)),
		MessageLevel::Debug,
	);
	let response = authenticate(client, &signin_url, credentials, user_agent).await?;
	drop(process);

	o.display(
		MessageContents::Property(
			"Sign in status".into(),
			Box::new(MessageContents::Simple(format!(
				"{} {}",
				response.status_code, response.status
			))),
		),
		MessageLevel::Trace,
	);
	if !response.message.is_empty() {
		o.display(
			MessageContents::Property(
				"Server message".into(),
				Box::new(MessageContents::Simple(response.message.clone())),
			),
			MessageLevel::Debug,
		);
	}
	for error in &response.errors {
		o.display(
			MessageContents::Warning(format!("Server reported: {error}")),
			MessageLevel::Debug,
		);
	}

	let data = response.data;
	Ok(LoginResult {
		prefetched_data,
		access_token: AccessToken(data.access_token),
		selected_profile: Profile {
			id: data.uuid,
			name: data.name,
		},
	})
}

#[cfg(test)]
mod tests {
	use httpmock::prelude::*;
	use mmcai_shared::output::{NoOp, Recorded};
	use serde_json::json;

	use super::*;

	const API_PATH: &str = "/api/v1/integrations/authlib/minecraft";
	const SIGNIN: &str = "/api/v1/integrations/auth/signin";
	const METADATA: &str = r#"{"meta":{"serverName":"Test"},"skinDomains":[]}"#;

	fn signin_response() -> serde_json::Value {
		json!({
			"data": {
				"uuid": "0d4c8e2b-6a55-4a36-9b1d-4a7c1e5e2b11",
				"name": "Steve",
				"accessToken": "TOKEN123",
				"expiredDate": null,
				"textureSkinUrl": null,
				"textureCloakUrl": null,
				"textureSkinGuid": null,
				"textureCloakGuid": null,
				"fullSkinUrl": null
			},
			"status": "Ok",
			"statusCode": 200,
			"message": "",
			"errors": []
		})
	}

	#[test]
	fn test_signin_url() {
		assert_eq!(
			signin_url("http://95.165.98.176:5000/api/v1/integrations/authlib/minecraft"),
			"http://95.165.98.176:5000/api/v1/integrations/auth/signin"
		);
		assert_eq!(
			signin_url("https://example.com/other"),
			"https://example.com/other"
		);
	}

	#[test]
	fn test_access_token_debug_is_hidden() {
		let token = AccessToken("secret".into());
		assert_eq!(format!("{token:?}"), "AccessToken(***)");
		let creds = Credentials::new("Steve", "hunter2");
		assert!(!format!("{creds:?}").contains("hunter2"));
	}

	#[test]
	fn test_auth_request_serialization() {
		let body = AuthRequest {
			login: "Steve",
			password: "hunter2",
			access_token: "null",
		};
		assert_eq!(
			serde_json::to_value(&body).unwrap(),
			json!({"login": "Steve", "password": "hunter2", "accessToken": "null"})
		);
	}

	#[test]
	fn test_auth_response_missing_optionals() {
		let response: AuthResponse = serde_json::from_value(json!({
			"data": {"uuid": "u", "name": "n", "accessToken": "t"},
			"status": "Ok",
			"statusCode": 200,
			"message": "",
			"errors": [],
			"extra": true
		}))
		.unwrap();
		assert_eq!(response.data.access_token, "t");
		assert!(response.data.full_skin_url.is_none());
	}

	#[tokio::test]
	async fn test_login() {
		let server = MockServer::start_async().await;
		let hello = server
			.mock_async(|when, then| {
				when.method(GET).path(API_PATH);
				then.status(200).body(METADATA);
			})
			.await;
		let signin = server
			.mock_async(|when, then| {
				when.method(POST)
					.path(SIGNIN)
					.header("user-agent", DEFAULT_USER_AGENT)
					.header("accept", "application/json")
					.header("accept-language", "en-US,en;q=0.5")
					.json_body(json!({
						"login": "Steve",
						"password": "hunter2",
						"accessToken": "null"
					}));
				then.status(200)
					.header("Content-Type", "application/json")
					.json_body(signin_response());
			})
			.await;

		let client = create_client().unwrap();
		let credentials = Credentials::new("Steve", "hunter2");
		let mut o = Recorded::default();
		let result = login(
			&client,
			&credentials,
			&server.url(API_PATH),
			DEFAULT_USER_AGENT,
			&mut o,
		)
		.await
		.unwrap();

		hello.assert_async().await;
		signin.assert_async().await;
		assert_eq!(result.prefetched_data, BASE64_STANDARD.encode(METADATA));
		assert_eq!(result.access_token, AccessToken("TOKEN123".into()));
		assert_eq!(
			result.selected_profile,
			Profile {
				id: "0d4c8e2b-6a55-4a36-9b1d-4a7c1e5e2b11".into(),
				name: "Steve".into(),
			}
		);
		assert!(!o.contains("hunter2"));
	}

	/// Sign in with the given User-Agent against a server that only accepts the expected one
	async fn authenticate_with_user_agent(user_agent: &str, expected: &str) {
		let server = MockServer::start_async().await;
		let signin = server
			.mock_async(|when, then| {
				when.method(POST)
					.path(SIGNIN)
					.header("user-agent", expected)
					.header("accept", "application/json")
					.header("accept-language", "en-US,en;q=0.5");
				then.status(200).json_body(signin_response());
			})
			.await;

		let client = create_client().unwrap();
		let response = authenticate(
			&client,
			&server.url(SIGNIN),
			&Credentials::new("Steve", "hunter2"),
			user_agent,
		)
		.await
		.unwrap();

		signin.assert_async().await;
		assert_eq!(response.data.name, "Steve");
	}

	#[tokio::test]
	async fn test_custom_user_agent() {
		authenticate_with_user_agent("mmcai-test/1.0", "mmcai-test/1.0").await;
	}

	#[tokio::test]
	async fn test_invalid_user_agent_falls_back_to_default() {
		authenticate_with_user_agent("bad\nagent", DEFAULT_USER_AGENT).await;
	}

	#[test]
	fn test_signin_headers() {
		let headers = signin_headers("bad\nagent");
		assert_eq!(headers[header::USER_AGENT], DEFAULT_USER_AGENT);
		assert_eq!(headers[header::ACCEPT], "application/json");
		assert_eq!(headers[header::ACCEPT_LANGUAGE], "en-US,en;q=0.5");
		assert_eq!(headers[header::CONTENT_TYPE], "application/json");
	}

	#[tokio::test]
	async fn test_login_hello_failure() {
		let server = MockServer::start_async().await;
		server
			.mock_async(|when, then| {
				when.method(GET).path(API_PATH);
				then.status(500);
			})
			.await;
		let signin = server
			.mock_async(|when, then| {
				when.method(POST).path(SIGNIN);
				then.status(200).json_body(signin_response());
			})
			.await;

		let client = create_client().unwrap();
		let result = login(
			&client,
			&Credentials::new("Steve", "hunter2"),
			&server.url(API_PATH),
			DEFAULT_USER_AGENT,
			&mut NoOp,
		)
		.await;

		assert!(matches!(result, Err(YggdrasilError::YggdrasilHelloFailed(_))));
		signin.assert_hits_async(0).await;
	}

	#[tokio::test]
	async fn test_login_bad_credentials_reports_body() {
		let server = MockServer::start_async().await;
		server
			.mock_async(|when, then| {
				when.method(GET).path(API_PATH);
				then.status(200).body(METADATA);
			})
			.await;
		server
			.mock_async(|when, then| {
				when.method(POST).path(SIGNIN);
				then.status(401).json_body(json!({
					"data": null,
					"status": "Unauthorized",
					"statusCode": 401,
					"message": "Invalid login or password",
					"errors": []
				}));
			})
			.await;

		let client = create_client().unwrap();
		let result = login(
			&client,
			&Credentials::new("Steve", "wrong"),
			&server.url(API_PATH),
			DEFAULT_USER_AGENT,
			&mut NoOp,
		)
		.await;

		match result {
			Err(YggdrasilError::YggdrasilAuthFailed { source, response }) => {
				assert!(matches!(source, SigninFailure::InvalidResponse(_)));
				assert!(response.contains("Invalid login or password"));
			}
			other => panic!("Unexpected result: {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_redirects_are_not_followed() {
		let server = MockServer::start_async().await;
		server
			.mock_async(|when, then| {
				when.method(GET).path(API_PATH);
				then.status(302).header("Location", "/elsewhere");
			})
			.await;
		let elsewhere = server
			.mock_async(|when, then| {
				when.method(GET).path("/elsewhere");
				then.status(200).body(METADATA);
			})
			.await;

		let client = create_client().unwrap();
		// A redirect is not an error status, so the empty body is what gets encoded
		let data = fetch_prefetched_data(&client, &server.url(API_PATH))
			.await
			.unwrap();
		assert_eq!(data, "");
		elsewhere.assert_hits_async(0).await;
	}
}
