//! Fills the `path` field of error payloads.
//!
//! [`AppError`](crate::error::AppError) renders its body without knowing
//! which request produced it and leaves a copy of the [`ErrorBody`] in the
//! response extensions. This middleware re-renders that body with the
//! request path.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ErrorBody;

pub async fn attach_request_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorBody>() {
        Some(mut body) => {
            body.path = path;
            let mut rebuilt = body.into_response_with_status();
            for (name, value) in response.headers() {
                if name != axum::http::header::CONTENT_LENGTH {
                    rebuilt.headers_mut().insert(name.clone(), value.clone());
                }
            }
            rebuilt
        }
        None => response,
    }
}
