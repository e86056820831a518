use actix_cors::Cors;
use actix_files::Files;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use chrono::Utc;
use faqmatch_core::{Error, MatchOutcome, MatchResult, Matcher, ALL_CATEGORIES};
use faqmatch_storage::{ConversationLog, FeedbackEntry, FeedbackLog};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_SUGGESTION_LIMIT: usize = 10;

const EMPTY_QUERY_SUGGESTION: &str =
    "Please ask a question about examinations, certificates, or policies.";

const NO_MATCH_ANSWER: &str = "I apologize, but I couldn't find a specific answer to your question. Here's what I can help you with:";

const HELP_TOPICS: &[&str] = &[
    "Examination policies and procedures",
    "Certificate applications (Transcripts, Duplicates)",
    "Malpractice rules and penalties",
    "Grade cards and results",
    "Review, revaluation, and retotaling",
    "Examination fees and payments",
    "Online examination procedures",
    "E-Sanad attestation services",
];

/// Shared, read-mostly state handed to every handler
pub struct AppState {
    pub matcher: Arc<Matcher>,
    pub conversations: Arc<ConversationLog>,
    pub feedback: Arc<FeedbackLog>,
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ChatAnswer<'a> {
    answer: &'a str,
    category: &'a str,
    confidence: f64,
    strategy: String,
    related_links: &'a [String],
    additional_info: &'a [String],
    steps: &'a [String],
    important_notes: &'a [String],
    timestamp: String,
}

#[derive(Serialize)]
struct ContactInfo {
    office: &'static str,
    location: &'static str,
    phone: &'static str,
    email: &'static str,
}

const CONTACT_INFO: ContactInfo = ContactInfo {
    office: "Controller of Examinations",
    location: "14th Floor, University Building, SRM Nagar",
    phone: "+91-44-2741 7211, 7225",
    email: "coe@srmist.edu.in",
};

#[derive(Serialize)]
struct NoMatchAnswer {
    answer: &'static str,
    suggestions: &'static [&'static str],
    confidence: f64,
    contact_info: ContactInfo,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    #[serde(default)]
    conversation_id: String,
    rating: i32,
    #[serde(default)]
    comments: String,
}

#[derive(Deserialize)]
struct SuggestionsQuery {
    category: Option<String>,
    limit: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        state: Arc<AppState>,
        port: u16,
        static_dir: Option<PathBuf>,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            let mut app = App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(configure);

            // Registered last so it never shadows the API routes
            if let Some(dir) = &static_dir {
                app = app.service(Files::new("/", dir).index_file("index.html"));
            }
            app
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register the API routes. Expects `web::Data<Arc<AppState>>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/chat", web::post().to(chat))
        .route("/api/feedback", web::post().to(submit_feedback))
        .route("/api/suggestions", web::get().to(suggestions))
        .route("/api/health", web::get().to(health));
}

fn percent(confidence: f32) -> f64 {
    (f64::from(confidence) * 100.0 * 100.0).round() / 100.0
}

fn answer_body(matched: &MatchResult<'_>) -> serde_json::Result<serde_json::Value> {
    let record = matched.record;
    serde_json::to_value(ChatAnswer {
        answer: &record.answer,
        category: matched.category,
        confidence: percent(matched.confidence),
        strategy: matched.strategy.to_string(),
        related_links: &record.links,
        additional_info: &record.additional_info,
        steps: &record.steps,
        important_notes: &record.important_notes,
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn chat(
    state: web::Data<Arc<AppState>>,
    req: web::Json<ChatRequest>,
) -> ActixResult<HttpResponse> {
    let query = req.message.trim();

    let outcome = match state.matcher.find_match(query) {
        Ok(outcome) => outcome,
        Err(Error::EmptyQuery) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Empty query",
                "suggestion": EMPTY_QUERY_SUGGESTION,
            })));
        }
        Err(e) => {
            error!("Error in chat endpoint: {}", e);
            return Ok(internal_error());
        }
    };

    let confidence = outcome.confidence();
    match outcome {
        MatchOutcome::Matched(matched) => {
            let mut body = match answer_body(&matched) {
                Ok(body) => body,
                Err(e) => {
                    error!("Failed to serialize answer: {}", e);
                    return Ok(internal_error());
                }
            };
            let conversation_id = state.conversations.record(query, body.clone());
            body["conversation_id"] = serde_json::Value::String(conversation_id);
            Ok(HttpResponse::Ok().json(body))
        }
        MatchOutcome::NoMatch => Ok(HttpResponse::Ok().json(NoMatchAnswer {
            answer: NO_MATCH_ANSWER,
            suggestions: HELP_TOPICS,
            confidence: percent(confidence),
            contact_info: CONTACT_INFO,
        })),
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "An error occurred processing your request",
        "message": "Please try again or contact support",
    }))
}

async fn submit_feedback(
    state: web::Data<Arc<AppState>>,
    req: web::Json<FeedbackRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let mut entry = FeedbackEntry::new(req.conversation_id, req.rating, req.comments);

    if let Some(conversation) = state.conversations.get(&entry.conversation_id) {
        entry.query = Some(conversation.query);
        entry.response = Some(conversation.response);
    }

    if let Err(e) = state.feedback.append(&entry) {
        error!("Error in feedback endpoint: {}", e);
        return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to submit feedback"
        })));
    }

    if entry.rating >= 4 {
        info!(
            "Positive feedback received for query: {}",
            entry.query.as_deref().unwrap_or("N/A")
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Thank you for your feedback!"
    })))
}

async fn suggestions(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SuggestionsQuery>,
) -> ActixResult<HttpResponse> {
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let suggestions = state.matcher.sample_questions(category, limit);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "suggestions": suggestions
    })))
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use faqmatch_core::{Corpus, KnowledgeRecord, MatcherConfig};

    fn state(dir: &std::path::Path) -> Arc<AppState> {
        let corpus = Corpus::from_categories(vec![
            (
                "fees",
                vec![KnowledgeRecord::new("What is the examination fee?", "Rs. 500 per course.")
                    .with_steps(vec!["Login".to_string(), "Pay".to_string()])],
            ),
            (
                "results",
                vec![KnowledgeRecord::new("When will results be declared?", "Within 30 days.")],
            ),
        ]);
        Arc::new(AppState {
            matcher: Arc::new(Matcher::new(corpus, MatcherConfig::default()).unwrap()),
            conversations: Arc::new(ConversationLog::default()),
            feedback: Arc::new(FeedbackLog::open(dir.join("feedback.jsonl")).unwrap()),
        })
    }

    #[actix_web::test]
    async fn test_chat_match() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({ "message": "exm fee?" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["answer"], "Rs. 500 per course.");
        assert_eq!(body["category"], "fees");
        assert_eq!(body["strategy"], "vector");
        assert_eq!(body["steps"], serde_json::json!(["Login", "Pay"]));
        assert_eq!(body["related_links"], serde_json::json!([]));
        let id = body["conversation_id"].as_str().unwrap();
        assert_eq!(state.conversations.get(id).unwrap().query, "exm fee?");
    }

    #[actix_web::test]
    async fn test_chat_empty_query() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({ "message": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_chat_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({ "message": "how do i get it" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["confidence"], 0.0);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), HELP_TOPICS.len());
        assert_eq!(body["contact_info"]["office"], "Controller of Examinations");
    }

    #[actix_web::test]
    async fn test_feedback_is_logged_with_conversation() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let id = state.conversations.record("exm fee", serde_json::json!({ "answer": "Rs. 500" }));
        let req = test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({ "conversation_id": id, "rating": 5, "comments": "ok" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let entries = state.feedback.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query.as_deref(), Some("exm fee"));
        assert_eq!(entries[0].rating, 5);
    }

    #[actix_web::test]
    async fn test_suggestions_and_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(dir.path())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/suggestions?category=results").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["suggestions"], serde_json::json!(["When will results be declared?"]));

        let req = test::TestRequest::get().uri("/api/suggestions?limit=1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["suggestions"], serde_json::json!(["What is the examination fee?"]));

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_feedback_without_conversation_id_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({ "rating": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let entries = state.feedback.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].conversation_id.is_empty());
        assert_eq!(entries[0].rating, 2);
        assert!(entries[0].query.is_none());
    }
}
