use hyper::{Client, client::HttpConnector};
use hyper_rustls::{ConfigBuilderExt, HttpsConnector, HttpsConnectorBuilder};

/// The HTTP client used to reach the API.
pub type HttpClient = Client<HttpsConnector<HttpConnector>>;

#[must_use]
/// Creates an HTTPS client for the API.
///
/// TLS is handled by rustls using the webpki root store, with no client
/// authentication. Plain `http://` URLs are accepted as well so the client
/// can be pointed at a local gateway or mock server.
pub fn client() -> HttpClient {
	let tls = rustls::ClientConfig::builder()
		.with_webpki_roots()
		.with_no_client_auth();

	let connector = HttpsConnectorBuilder::new()
		.with_tls_config(tls)
		.https_or_http()
		.enable_http1()
		.build();

	Client::builder().build(connector)
}
