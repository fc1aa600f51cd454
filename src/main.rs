use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use arena_nexus::config::{LogFormat, Settings};
use arena_nexus::core::Matcher;
use arena_nexus::models::ScoringRules;
use arena_nexus::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use arena_nexus::services::{
    AssistantClient, AssistantConfig, ConversationStore, JsonFileProfileStore, ProfileStore,
    RosterSource, SessionRegistry, StaticRoster,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match LogFormat::parse(&log_format) {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting Arena Nexus matchmaking service...");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    info!("Configuration loaded successfully");

    let roster: Arc<dyn RosterSource> = match &settings.roster.path {
        Some(path) => match StaticRoster::from_json_file(path) {
            Ok(roster) => {
                info!("Loaded {} players from {}", roster.len(), path);
                Arc::new(roster)
            }
            Err(e) => {
                error!("Failed to load roster from {}: {}", path, e);
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
            }
        },
        None => {
            info!("Using built-in demo roster");
            Arc::new(StaticRoster::builtin())
        }
    };

    let profiles: Arc<dyn ProfileStore> = Arc::new(JsonFileProfileStore::new(&settings.profile.path));
    info!("Viewer profile stored at {}", settings.profile.path);

    let assistant = match AssistantClient::new(AssistantConfig::from(&settings.assistant)) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create assistant client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    let sessions = SessionRegistry::new(settings.matching.max_sessions, settings.matching.session_ttl_secs);
    info!(
        "Session registry initialized (max: {}, idle TTL: {}s)",
        settings.matching.max_sessions, settings.matching.session_ttl_secs
    );

    let rules = ScoringRules::from(&settings.scoring);
    let matcher = Matcher::new(rules);

    info!("Matcher initialized with rules: {:?}", rules);

    let app_state = AppState {
        roster,
        profiles,
        sessions,
        conversations: Arc::new(ConversationStore::seeded()),
        assistant,
        matcher,
        search_delay: Duration::from_millis(settings.matching.search_delay_ms),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
