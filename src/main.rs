use std::sync::Arc;
use std::time::Duration;

use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;

use tms_event_api::config::Settings;
use tms_event_api::token::AzureTokenFetcher;
use tms_event_api::varsel::VarselReader;
use tms_event_api::web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tms_event_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("[Startup] tms-event-api initializing...");

    let settings = Settings::new()?;
    info!(
        "[Config] Binding at {}:{}, event handler at {}",
        settings.server.host, settings.server.port, settings.event_handler.url
    );

    // 出站 HTTP 客户端，令牌获取与上游调用共用
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(settings.event_handler.timeout())
        .connect_timeout(settings.event_handler.connect_timeout())
        .build()?;

    let token_fetcher = Arc::new(AzureTokenFetcher::new(
        client.clone(),
        settings.azure.token_endpoint.clone(),
        settings.azure.client_id.clone(),
        settings.azure.client_secret.clone(),
        settings.event_handler.client_id.clone(),
    ));

    let varsel_reader = VarselReader::new(
        token_fetcher,
        client,
        &settings.event_handler.url,
        settings.event_handler.retry_delay(),
    )?;

    let state = Arc::new(AppState { varsel_reader });

    let app = build_router(state, &settings.server.base_path)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[Startup] Service ready at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
