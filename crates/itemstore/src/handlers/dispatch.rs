//! Request dispatcher.
//!
//! Routes an [`Event`] on its method to one table operation and always
//! produces a [`Response`]: every failure, including malformed input and
//! unsupported verbs, is rendered as an error envelope.

use lambda_runtime::{Error, LambdaEvent};

use itemstore_core::envelope::{Event, Method, Response};

use crate::{
    handlers::{
        items::{create_item, list_items},
        ApiError,
    },
    state::AppState,
};

/// Handle one event.
pub async fn dispatch(state: &AppState, event: Event) -> Response {
    tracing::debug!(
        method = %event.http_method,
        has_body = event.body.is_some(),
        "Dispatching request"
    );

    let result = match event.method() {
        Method::Get => list_items(state).await,
        Method::Post => create_item(state, event.body.as_deref()).await,
        Method::Other(verb) => Err(ApiError::MethodNotAllowed(verb)),
    };

    result.unwrap_or_else(ApiError::into_response)
}

/// Lambda entry point. Never returns an error; the `Result` is the runtime's
/// service signature.
pub async fn handle(state: &AppState, event: LambdaEvent<Event>) -> Result<Response, Error> {
    let (payload, context) = event.into_parts();
    tracing::debug!(request_id = %context.request_id, "Received invocation");

    Ok(dispatch(state, payload).await)
}
