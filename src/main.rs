use axum::{
    middleware,
    routing::{get, get_service, post},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use sangam_web::services::interest_guard::InterestSendGuard;
use sangam_web::web::middleware::auth as auth_middleware;
use sangam_web::web::routes::{auth, home, matches, member, photos, profile};

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    let backend_url = env::var("MATRIMONY_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    println!("Backend API: {}", backend_url);

    // 2. Gedeelde state: het in-flight slot per interest-verzoek
    let interest_sends = InterestSendGuard::new();

    // 3. Protected routes onder één middleware layer
    let protected_routes = Router::new()
        .route("/matches", get(matches::matches_handler))
        .route(
            "/matches/:user_id/interest",
            post(matches::send_interest_handler),
        )
        .route("/profile", get(profile::profile_handler))
        .route("/profile/basic", post(profile::save_basic_handler))
        .route(
            "/profile/preferences",
            post(profile::save_preferences_handler),
        )
        .route("/profile/family", post(profile::save_family_handler))
        .route("/profile/photos", post(profile::upload_photo_handler))
        .route(
            "/profile/photos/:photo_id/delete",
            post(profile::delete_photo_handler),
        )
        .route("/members/:user_id", get(member::member_profile_handler))
        .route("/photos/*path", get(photos::photo_proxy))
        .route("/logout", post(auth::logout_handler))
        .layer(middleware::from_fn(auth_middleware::require_auth));

    // 4. Bouw de hele applicatie
    let app = Router::new()
        // Public routes
        .route("/", get(home::home_handler))
        .route("/login", get(auth::login_page).post(auth::login_handler))
        .route(
            "/register",
            get(auth::register_page).post(auth::register_handler),
        )
        // Protected routes
        .merge(protected_routes)
        // Static files
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(interest_sends);

    // 5. Start de server (met fallback poort)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Kan host/port niet parsen");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Kon niet binden op {}: {}. Probeer fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Kan fallback niet parsen");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Kan niet binden op fallback poort")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server draait op http://{}", bound_addr);
    println!("📍 Ga naar http://{}/login om te beginnen", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
