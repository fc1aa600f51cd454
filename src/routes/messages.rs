use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use super::{error_response, AppState};
use crate::models::{AssistantRequest, AssistantResponse, ConversationQuery, SendMessageRequest};
use crate::services::ConversationError;

/// Configure chat and assistant routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/conversations", web::get().to(list_conversations))
        .route("/conversations/{id}/read", web::post().to(mark_read))
        .route("/conversations/{id}/messages", web::get().to(get_messages))
        .route("/conversations/{id}/messages", web::post().to(send_message))
        .route("/assistant/reply", web::post().to(assistant_reply));
}

fn conversation_error(e: ConversationError) -> HttpResponse {
    match e {
        ConversationError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Conversation not found", e),
        ConversationError::EmptyMessage => error_response(StatusCode::BAD_REQUEST, "Invalid message", e),
    }
}

/// GET /api/v1/conversations?search={tag}
async fn list_conversations(
    state: web::Data<AppState>,
    query: web::Query<ConversationQuery>,
) -> impl Responder {
    let conversations = state.conversations.list(&query.search).await;
    HttpResponse::Ok().json(conversations)
}

/// POST /api/v1/conversations/{id}/read
async fn mark_read(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.conversations.mark_read(&path).await {
        Ok(convo) => HttpResponse::Ok().json(convo),
        Err(e) => conversation_error(e),
    }
}

/// GET /api/v1/conversations/{id}/messages
async fn get_messages(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.conversations.messages(&path).await {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(e) => conversation_error(e),
    }
}

/// POST /api/v1/conversations/{id}/messages
async fn send_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SendMessageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.conversations.send(&path, &req.content).await {
        Ok(message) => HttpResponse::Created().json(message),
        Err(e) => conversation_error(e),
    }
}

/// Ask the gaming assistant
///
/// POST /api/v1/assistant/reply
///
/// Upstream failures come back as a 200 with an apology as the reply.
async fn assistant_reply(
    state: web::Data<AppState>,
    req: web::Json<AssistantRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let reply = state.assistant.reply(&req.prompt, &req.history).await;

    HttpResponse::Ok().json(AssistantResponse {
        reply: reply.text,
        simulated: reply.simulated,
    })
}
