use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use portcullis_client::Client;
use tokio::net::TcpListener;

/// Runs `router` on an ephemeral local port and returns a client pointed at it.
pub async fn serve(router: Router) -> Client {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    Client::new(&format!("http://{addr}/"))
}

/// A base URL nothing is listening on.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}")
}

pub fn json_reply(status: StatusCode, raw: &'static str) -> Response {
    (status, [(CONTENT_TYPE, "application/json")], raw).into_response()
}

pub fn text_reply(status: StatusCode, text: &'static str) -> Response {
    (status, [(CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
}
