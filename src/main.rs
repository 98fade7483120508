use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use jobalign::config::Settings;
use jobalign::core::{JobMatcher, MatchScorer, QuotaResolver, RoleInference, RoleVariations};
use jobalign::routes::{self, AppState};
use jobalign::services::{
    DisabledGenerator, FileCorpus, GeminiClient, InMemorySubscriptionStore, JobCorpus,
    PostgresSubscriptionStore, SubscriptionStore, TextGenerator,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    init_logging(&settings);

    info!("Starting JobAlign matching service v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(settings.llm.timeout_secs.max(1));

    // Text generation; without a key only the deterministic tiers run
    let generator: Arc<dyn TextGenerator> = if settings.llm.api_key.is_empty() {
        warn!("No Gemini API key configured, role inference and scoring use fallbacks only");
        Arc::new(DisabledGenerator)
    } else {
        let client = GeminiClient::new(
            settings.llm.endpoint.clone(),
            settings.llm.model.clone(),
            settings.llm.api_key.clone(),
            timeout,
        )
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        info!("Gemini client initialized (model: {})", client.model());
        Arc::new(client)
    };

    // Subscription store
    let subscriptions: Arc<dyn SubscriptionStore> = match &settings.database.url {
        Some(url) => {
            let store = PostgresSubscriptionStore::new(
                url,
                settings.database.max_connections.unwrap_or(10),
                settings.database.min_connections.unwrap_or(1),
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?;
            info!("PostgreSQL subscription store initialized");
            Arc::new(store)
        }
        None => {
            warn!("No database configured, all callers get the free tier");
            Arc::new(InMemorySubscriptionStore::new())
        }
    };

    let corpus: Arc<dyn JobCorpus> = Arc::new(FileCorpus::new(&settings.corpus.path));
    info!("Job corpus: {}", settings.corpus.path);

    let variations = Arc::new(RoleVariations::standard());

    let matcher = JobMatcher::new(
        RoleInference::new(generator.clone(), timeout).with_max_roles(settings.matching.max_roles),
        MatchScorer::new(generator, variations, timeout)
            .with_min_model_score(settings.matching.min_model_score),
        corpus.clone(),
        QuotaResolver::new(subscriptions.clone()).with_default(settings.matching.default_max_matches),
    )
    .with_concurrency(settings.matching.scoring_concurrency);

    let app_state = AppState {
        matcher: Arc::new(matcher),
        corpus,
        subscriptions,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
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

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}
