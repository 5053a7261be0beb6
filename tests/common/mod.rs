#![allow(dead_code)]

use folio::auth::TokenSigner;
use folio::config::{Config, Mode};
use folio::entities::{Role, User, UserId};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

pub fn config(mode: Mode) -> Config { Config::local(mode) }

/// Token for a non-admin caller, signed with the local secret.
pub fn user_token(config: &Config) -> String {
    let signer = TokenSigner::new(&config.token_secret, config.token_ttl_secs);
    let user = User {
        id: UserId::generate(),
        name: "Visitor".to_string(),
        email: "visitor@example.com".to_string(),
        role: Role::User,
    };

    signer.issue(&user, chrono::Utc::now()).unwrap()
}

/// Builds the full app over a fresh in-memory store.
#[macro_export]
macro_rules! app {
    ($config:expr) => {{
        let config: ::folio::config::Config = $config;
        let state = ::actix_web::web::Data::new(::folio::in_memory(&config));

        ::actix_web::test::init_service(
            ::actix_web::App::new()
                .wrap(::folio::middleware::NormalizeErrors { mode: config.mode })
                .app_data(state)
                .configure(::folio::controllers::configure),
        )
        .await
    }};
}

#[macro_export]
macro_rules! login {
    ($app:expr) => {{
        let req = ::actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(::serde_json::json!({
                "email": $crate::common::ADMIN_EMAIL,
                "password": $crate::common::ADMIN_PASSWORD,
            }))
            .to_request();
        let body: ::serde_json::Value = ::actix_web::test::call_and_read_body_json(&$app, req).await;

        body["token"].as_str().unwrap().to_string()
    }};
}
