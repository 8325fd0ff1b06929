use roster_mock::{MockState, basic_info_router, details_router};
use std::future::IntoFuture;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

fn port(var: &str, default: u16) -> u16 {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_mock=debug,tower_http=debug".into()),
        )
        .init();

    let basic_addr = SocketAddr::from(([127, 0, 0, 1], port("MOCK_BASIC_INFO_PORT", 4001)));
    let details_addr = SocketAddr::from(([127, 0, 0, 1], port("MOCK_DETAILS_PORT", 4002)));

    let basic_app = basic_info_router(MockState::new()).layer(CorsLayer::permissive());
    let details_app = details_router(MockState::new()).layer(CorsLayer::permissive());

    let basic_listener = tokio::net::TcpListener::bind(basic_addr).await?;
    let details_listener = tokio::net::TcpListener::bind(details_addr).await?;
    tracing::info!(%basic_addr, %details_addr, "Mock record services listening");

    tokio::try_join!(
        axum::serve(basic_listener, basic_app).into_future(),
        axum::serve(details_listener, details_app).into_future(),
    )?;
    Ok(())
}
