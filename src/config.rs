use clap::Parser;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl ::core::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown mode `{}` (development | production)", other)),
        }
    }
}

/// API server settings. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[clap(name = "folio", about = "portfolio REST API")]
pub struct Config {
    #[clap(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    #[clap(long, env = "APP_ENV", default_value = "development")]
    pub mode: Mode,

    /// Leave unset to keep everything in memory.
    #[clap(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    #[clap(long, env = "MONGODB_DB", default_value = "portfolio")]
    pub mongodb_db: String,

    #[clap(long, env = "TOKEN_SECRET", default_value = "change-me")]
    pub token_secret: String,

    #[clap(long, env = "TOKEN_TTL_SECS", default_value = "604800")]
    pub token_ttl_secs: i64,

    #[clap(long, env = "ADMIN_ID", default_value = "00000000-0000-0000-0000-000000000001")]
    pub admin_id: Uuid,

    #[clap(long, env = "ADMIN_EMAIL", default_value = "admin@example.com")]
    pub admin_email: String,

    #[clap(long, env = "ADMIN_NAME", default_value = "Admin")]
    pub admin_name: String,

    /// Hex SHA-256 of the admin password.
    #[clap(long, env = "ADMIN_PASSWORD_SHA256", default_value = "")]
    pub admin_password_sha256: String,

    #[clap(long, env = "SPOTIFY_CLIENT_ID")]
    pub spotify_client_id: Option<String>,

    #[clap(
        long,
        env = "SPOTIFY_REDIRECT_URI",
        default_value = "http://localhost:8888/callback.html"
    )]
    pub spotify_redirect_uri: String,

    #[clap(
        long,
        env = "SPOTIFY_SCOPES",
        default_value = "user-read-private user-read-email user-read-currently-playing"
    )]
    pub spotify_scopes: String,
}

impl Config {
    /// Settings for tests and local tinkering: in-memory store, development mode.
    pub fn local(mode: Mode) -> Self {
        Self {
            port: 5000,
            mode,
            mongodb_uri: None,
            mongodb_db: "portfolio".to_string(),
            token_secret: "local-secret".to_string(),
            token_ttl_secs: 3600,
            admin_id: Uuid::from_u128(1),
            admin_email: "admin@example.com".to_string(),
            admin_name: "Admin".to_string(),
            admin_password_sha256: crate::auth::digest_password("password"),
            spotify_client_id: None,
            spotify_redirect_uri: "http://localhost:8888/callback.html".to_string(),
            spotify_scopes: "user-read-private user-read-email".to_string(),
        }
    }
}

/// OAuth redirect helper settings.
#[derive(Debug, Clone, Parser)]
#[clap(name = "oauth-helper", about = "static server for the OAuth callback page")]
pub struct HelperConfig {
    #[clap(long, env = "OAUTH_HELPER_PORT", default_value = "8888")]
    pub port: u16,

    #[clap(long, env = "OAUTH_HELPER_ROOT", default_value = "public")]
    pub root: std::path::PathBuf,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("development", Mode::Development)]
    #[case("Production", Mode::Production)]
    #[case("prod", Mode::Production)]
    fn mode_parses(#[case] raw: &str, #[case] expected: Mode) {
        assert_eq!(raw.parse::<Mode>(), Ok(expected));
    }

    #[test]
    fn unknown_mode_rejected() { assert!("staging".parse::<Mode>().is_err()); }

    #[test]
    fn flags_override_defaults() {
        let c = Config::try_parse_from(["folio", "--port", "8080", "--mode", "production"]).unwrap();

        assert_eq!(c.port, 8080);
        assert_eq!(c.mode, Mode::Production);
        assert_eq!(c.mongodb_db, "portfolio");
    }
}
