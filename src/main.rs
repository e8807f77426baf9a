use coursebook::config::server::ServerConfig;
use coursebook::logging::init_tracing;
use coursebook::router::init_router;
use coursebook::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config);

    let state = init_app_state().await;
    let app = init_router(state);

    let port = server_config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    println!("🚀 Server running on http://localhost:{port}");
    println!("📚 Swagger UI available at http://localhost:{port}/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:{port}/scalar");
    axum::serve(listener, app).await.unwrap();
}
