//! Web form: submit an expression, get a rendered card back.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::FlashcardError;
use crate::generator::CardGenerator;
use crate::html::{card_page, index_page};
use crate::params::validate_expression;

/// Form body posted to `/generate`.
#[derive(Deserialize)]
pub struct GenerateForm {
    /// The expression to build a card for.
    #[serde(default)]
    pub expression: String,
}

/// Build the router. Each request is independent; the generator is shared.
pub fn router(generator: CardGenerator) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .with_state(generator)
}

async fn home() -> Html<String> {
    Html(index_page(None, ""))
}

async fn health() -> &'static str {
    "ok"
}

async fn generate(
    State(generator): State<CardGenerator>,
    Form(form): Form<GenerateForm>,
) -> Response {
    if let Err(message) = validate_expression(&form.expression) {
        return (StatusCode::BAD_REQUEST, Html(index_page(Some(&message), &form.expression)))
            .into_response();
    }
    let card = generator.generate(&form.expression).await;
    Html(card_page(&card)).into_response()
}

/// Serve the web form on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(generator: CardGenerator, addr: &str) -> Result<(), FlashcardError> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "serving flashcard form");
    axum::serve(listener, router(generator))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
