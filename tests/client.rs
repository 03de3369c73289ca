#![cfg(feature = "client")]

use dataleon::{
	Client, ClientConfig, Error,
	enums::{DocumentType, VerificationState},
	models::{
		CompanyListParams, DocumentUploadParams, IndividualCreateParams, IndividualRetrieveParams,
		Person,
	},
};
use hyper::{
	Body, Request, Response, Server,
	service::{make_service_fn, service_fn},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::{
	convert::Infallible,
	net::SocketAddr,
	sync::{Arc, Mutex},
	time::Duration,
};
use tokio_test::{assert_err, assert_ok};

/// A request as received by the mock API.
#[derive(Debug, Clone)]
struct Seen {
	method: String,
	uri: String,
	api_key: Option<String>,
	content_type: Option<String>,
	body: serde_json::Value,
}

struct MockApi {
	client: Client,
	seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockApi {
	fn requests(&self) -> Vec<Seen> {
		self.seen.lock().unwrap().clone()
	}
}

/// Serve one canned response on a loopback port.
async fn mock(status: u16, response: &'static str, delay: Duration) -> MockApi {
	let seen = Arc::new(Mutex::new(Vec::new()));
	let log = Arc::clone(&seen);

	let make = make_service_fn(move |_| {
		let log = Arc::clone(&log);

		async move {
			Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
				let log = Arc::clone(&log);

				async move {
					let header = |name: &str| {
						req.headers()
							.get(name)
							.and_then(|v| v.to_str().ok())
							.map(ToString::to_string)
					};
					let api_key = header("api-key");
					let content_type = header("content-type");
					let method = req.method().to_string();
					let uri = req.uri().to_string();

					let bytes = hyper::body::to_bytes(req.into_body()).await.unwrap();
					let body = if bytes.is_empty() {
						serde_json::Value::Null
					} else {
						serde_json::from_slice(&bytes).unwrap()
					};

					log.lock().unwrap().push(Seen {
						method,
						uri,
						api_key,
						content_type,
						body,
					});

					tokio::time::sleep(delay).await;

					Ok::<_, Infallible>(
						Response::builder()
							.status(status)
							.header("content-type", "application/json")
							.body(Body::from(response))
							.unwrap(),
					)
				}
			}))
		}
	});

	let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make);
	let address = server.local_addr();
	tokio::spawn(server);

	let config = ClientConfig::new("test-key")
		.with_base_url(format!("http://{address}"))
		.with_timeout(Duration::from_millis(500));

	MockApi {
		client: Client::new(config).unwrap(),
		seen,
	}
}

#[tokio::test]
async fn create_individual_sends_encoded_params() {
	let api = mock(
		200,
		r#"{"id": "ind_1", "state": "WAITING", "person": {"first_name": "Jane"}, "extra": 1}"#,
		Duration::ZERO,
	)
	.await;

	let params = IndividualCreateParams {
		workspace_id: "wk_123".into(),
		person: Some(Person {
			first_name: Some("Jane".into()),
			..Default::default()
		}),
		..Default::default()
	};

	let individual = assert_ok!(api.client.individuals().create(&params).await);
	assert_eq!(individual.id, "ind_1");
	assert_eq!(individual.state, Some(VerificationState::WAITING));

	let requests = api.requests();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method, "POST");
	assert_eq!(requests[0].uri, "/individuals");
	assert_eq!(requests[0].api_key.as_deref(), Some("test-key"));
	assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
	assert_eq!(
		requests[0].body,
		json!({"workspace_id": "wk_123", "person": {"first_name": "Jane"}})
	);
}

#[tokio::test]
async fn retrieve_passes_query_parameters() {
	let api = mock(200, r#"{"id": "ind_9"}"#, Duration::ZERO).await;

	let params = IndividualRetrieveParams {
		document: Some(true),
		..Default::default()
	};
	assert_ok!(api.client.individuals().retrieve("ind_9", &params).await);

	let requests = api.requests();
	assert_eq!(requests[0].method, "GET");
	assert_eq!(requests[0].uri, "/individuals/ind_9?document=true");
	assert_eq!(requests[0].content_type, None);
}

#[tokio::test]
async fn company_list_decodes_in_order() {
	let api = mock(
		200,
		r#"[{"company": {"name": "ACME"}}, {"company": {"name": "Beta"}}]"#,
		Duration::ZERO,
	)
	.await;

	let params = CompanyListParams {
		limit: Some(2),
		workspace_id: Some("wk_1".into()),
		..Default::default()
	};
	let companies = assert_ok!(api.client.companies().list(&params).await);

	let names: Vec<_> = companies
		.into_iter()
		.filter_map(|c| c.company.map(|company| company.name))
		.collect();
	assert_eq!(names, ["ACME", "Beta"]);
	assert_eq!(api.requests()[0].uri, "/companies?limit=2&workspace_id=wk_1");
}

#[tokio::test]
async fn delete_accepts_an_empty_body() {
	let api = mock(204, "", Duration::ZERO).await;

	assert_ok!(api.client.companies().delete("cmp_1").await);

	let requests = api.requests();
	assert_eq!(requests[0].method, "DELETE");
	assert_eq!(requests[0].uri, "/companies/cmp_1");
}

#[tokio::test]
async fn documents_are_nested_under_their_file() {
	let api = mock(
		200,
		r#"{"id": "doc_1", "document_type": "passport"}"#,
		Duration::ZERO,
	)
	.await;

	let params = DocumentUploadParams {
		document_type: DocumentType::PASSPORT,
		url: Some("https://files.example.com/passport.jpg".into()),
	};
	let document = assert_ok!(api.client.individuals().documents().upload("ind_1", &params).await);
	assert_eq!(document.document_type, Some(DocumentType::PASSPORT));

	let requests = api.requests();
	assert_eq!(requests[0].uri, "/individuals/ind_1/documents");
	assert_eq!(
		requests[0].body,
		json!({"document_type": "passport", "url": "https://files.example.com/passport.jpg"})
	);
}

#[tokio::test]
async fn error_statuses_map_to_variants() {
	let api = mock(404, r#"{"message": "individual not found"}"#, Duration::ZERO).await;

	let err = assert_err!(
		api.client
			.individuals()
			.retrieve("missing", &IndividualRetrieveParams::default())
			.await
	);
	assert!(matches!(err, Error::NotFound(_)), "{err}");
	assert_eq!(err.api_error().unwrap().message(), "individual not found");

	let api = mock(429, "slow down", Duration::ZERO).await;
	let err = assert_err!(api.client.companies().documents().list("cmp_1").await);
	assert!(matches!(err, Error::RateLimit(_)), "{err}");
}

#[tokio::test]
async fn malformed_responses_are_mapping_errors() {
	let api = mock(200, r#"{"state": "RUNNING"}"#, Duration::ZERO).await;

	let err = assert_err!(
		api.client
			.individuals()
			.retrieve("ind_1", &IndividualRetrieveParams::default())
			.await
	);
	match err {
		Error::Mapping(inner) => assert_eq!(inner.field(), "id"),
		other => panic!("unexpected error {other}"),
	}

	let api = mock(200, "<html>", Duration::ZERO).await;
	let err = assert_err!(api.client.companies().delete("cmp_1").await);
	assert!(matches!(err, Error::Json(_)), "{err}");
}

#[tokio::test]
async fn slow_responses_time_out() {
	let api = mock(200, r#"{"id": "ind_1"}"#, Duration::from_secs(2)).await;

	let err = assert_err!(
		api.client
			.individuals()
			.retrieve("ind_1", &IndividualRetrieveParams::default())
			.await
	);
	assert!(matches!(err, Error::Timeout(_)), "{err}");
}
