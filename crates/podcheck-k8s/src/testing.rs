//! In-process API server for client tests

use http::{Request, Response, StatusCode, Uri};
use kube::client::Body;
use serde_json::Value;
use tower_test::mock::{self, Handle};

use crate::client::KubeClient;

pub(crate) type ApiHandle = Handle<Request<Body>, Response<Body>>;

/// A client whose requests are answered through the returned handle
pub(crate) fn mock_client() -> (KubeClient, ApiHandle) {
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    let client = kube::Client::new(service, "default");
    (KubeClient::from_client(client), handle)
}

/// Answer the next request with a JSON body; returns the requested URI
pub(crate) async fn respond(handle: &mut ApiHandle, status: StatusCode, body: Value) -> Uri {
    let (request, send) = handle
        .next_request()
        .await
        .expect("client sent no request");

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send.send_response(response);

    request.uri().clone()
}
