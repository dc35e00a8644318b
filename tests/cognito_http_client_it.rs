mod common;

// std
use std::{net::TcpListener, sync::Arc};
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::{CLIENT_ID, PASSWORD, SECRET_HASH, USERNAME};
use signup_broker::{
	auth::{SignUpOptions, UserAttributeKey},
	config::UserPoolEndpoint,
	error::{Error, SIGN_UP_FAILED, TransportError, UnexpectedError},
	flows::{self, OperationState, SignUpExecutor, SignUpRequest},
	http::{AMZ_JSON_CONTENT_TYPE, CognitoHttpClient, SIGN_UP_TARGET},
	provider::ProviderErrorKind,
	result::{DeliveryMedium, SignUpStep},
};

fn http_client(server: &MockServer) -> CognitoHttpClient {
	let endpoint =
		UserPoolEndpoint::parse(&server.url("/")).expect("Mock endpoint should be accepted.");

	CognitoHttpClient::new(endpoint).expect("HTTP client should build.")
}

fn request() -> SignUpRequest {
	let options =
		SignUpOptions::default().with_user_attribute(UserAttributeKey::Email, "alice@example.com");

	SignUpRequest::new(USERNAME, PASSWORD, common::client(), options)
		.expect("Request fixture should be valid.")
}

#[tokio::test]
async fn sign_up_posts_the_json_protocol_body() {
	let server = MockServer::start_async().await;
	let client = http_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/")
				.header("content-type", AMZ_JSON_CONTENT_TYPE)
				.header("x-amz-target", SIGN_UP_TARGET)
				.json_body(json!({
					"ClientId": CLIENT_ID,
					"SecretHash": SECRET_HASH,
					"Username": USERNAME,
					"Password": PASSWORD,
					"UserAttributes": [{ "Name": "email", "Value": "alice@example.com" }]
				}));
			then.status(200).header("content-type", AMZ_JSON_CONTENT_TYPE).body(
				r#"{
					"UserConfirmed": false,
					"UserSub": "uuid-1",
					"CodeDeliveryDetails": {
						"Destination": "a***@example.com",
						"DeliveryMedium": "EMAIL",
						"AttributeName": "email"
					}
				}"#,
			);
		})
		.await;
	let result = flows::sign_up(&client, &request()).await.expect("Sign-up should succeed.");

	mock.assert_async().await;

	assert!(!result.is_sign_up_complete);
	assert_eq!(result.next_step.step, SignUpStep::ConfirmSignUpStep);
	assert_eq!(result.user.user_id.as_ref(), "uuid-1");

	let details =
		result.next_step.code_delivery_details.expect("Delivery details should be forwarded.");

	assert_eq!(details.delivery_medium, DeliveryMedium::Email);
	assert_eq!(details.destination.as_deref(), Some("a***@example.com"));
}

#[tokio::test]
async fn existing_usernames_are_provider_rejections() {
	let server = MockServer::start_async().await;
	let client = http_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/");
			then.status(400).header("content-type", AMZ_JSON_CONTENT_TYPE).body(
				r#"{"__type":"UsernameExistsException","message":"User already exists"}"#,
			);
		})
		.await;
	let err = flows::sign_up(&client, &request())
		.await
		.expect_err("Duplicate usernames should be rejected.");

	mock.assert_calls_async(1).await;

	let Error::Provider(provider) = err else {
		panic!("Expected a provider rejection, got {err:?}.");
	};

	assert_eq!(provider.kind, ProviderErrorKind::UsernameExists);
	assert_eq!(provider.error_type, "UsernameExistsException");
	assert_eq!(provider.message, "User already exists");
	assert_eq!(provider.status, Some(400));
}

#[tokio::test]
async fn throttling_carries_retry_after() {
	let server = MockServer::start_async().await;
	let client = http_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/");
			then.status(400)
				.header("content-type", AMZ_JSON_CONTENT_TYPE)
				.header("retry-after", "7")
				.body(r#"{"__type":"TooManyRequestsException","message":"Rate exceeded"}"#);
		})
		.await;
	let err = flows::sign_up(&client, &request())
		.await
		.expect_err("Throttled sign-ups should fail.");

	mock.assert_async().await;

	let Error::Provider(provider) = err else {
		panic!("Expected a provider rejection, got {err:?}.");
	};

	assert!(provider.kind.is_throttling());
	assert_eq!(provider.retry_after, Some(time::Duration::seconds(7)));
}

#[tokio::test]
async fn malformed_success_bodies_are_unexpected() {
	let server = MockServer::start_async().await;
	let client = http_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/");
			then.status(200)
				.header("content-type", AMZ_JSON_CONTENT_TYPE)
				.body(r#"{"UserConfirmed":"maybe","UserSub":"uuid-1"}"#);
		})
		.await;
	let err = flows::sign_up(&client, &request())
		.await
		.expect_err("Malformed bodies should fail.");

	mock.assert_async().await;

	let Error::Unexpected(UnexpectedError::ResponseParse { source, status }) = err else {
		panic!("Expected a parse failure, got {err:?}.");
	};

	assert_eq!(status, Some(200));
	assert_eq!(source.path().to_string(), "UserConfirmed");
}

#[tokio::test]
async fn unreachable_endpoints_are_transport_failures() {
	let port = {
		let listener = TcpListener::bind("127.0.0.1:0").expect("Ephemeral port should bind.");

		listener.local_addr().expect("Listener should expose its address.").port()
	};
	let endpoint = UserPoolEndpoint::parse(&format!("http://127.0.0.1:{port}/"))
		.expect("Loopback endpoint should be accepted.");
	let client = CognitoHttpClient::new(endpoint).expect("HTTP client should build.");
	let err = flows::sign_up(&client, &request())
		.await
		.expect_err("Closed ports should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}

#[tokio::test]
async fn operation_reports_through_callbacks_over_http() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/").header("x-amz-target", SIGN_UP_TARGET);
			then.status(200)
				.header("content-type", AMZ_JSON_CONTENT_TYPE)
				.body(r#"{"UserConfirmed":true,"UserSub":"uuid-2"}"#);
		})
		.await;
	let executor = SignUpExecutor::current().expect("Test runtime should be available.");
	let (op, rx) = common::operation(
		Arc::new(http_client(&server)),
		"bob",
		PASSWORD,
		SignUpOptions::default(),
	);
	let status = op.start(&executor);
	let result = common::single_outcome(rx).await.expect("Sign-up should succeed.");

	mock.assert_calls_async(1).await;

	assert!(result.is_sign_up_complete);
	assert_eq!(result.next_step.step, SignUpStep::Done);
	assert_eq!(result.user.username.as_ref(), "bob");
	assert_eq!(status.state(), OperationState::Succeeded);

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/");
			then.status(500).body("upstream unavailable");
		})
		.await;

	let (op, rx) = common::operation(
		Arc::new(http_client(&server)),
		"carol",
		PASSWORD,
		SignUpOptions::default(),
	);

	op.start(&executor);

	let err = common::single_outcome(rx).await.expect_err("Server errors should fail.");

	assert_eq!(err.description, SIGN_UP_FAILED);
	assert!(matches!(
		&err.cause,
		Error::Provider(e) if e.kind == ProviderErrorKind::InternalError && e.status == Some(500)
	));
}
