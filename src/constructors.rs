use alloc::sync::Arc;

use crate::auth::{AdminAccount, TokenSigner};
use crate::config::Config;
use crate::entities::{Message, Portfolio, Project, UserNotification};
use crate::interactors::auth::{AuthLoginInteractor, AuthMeInteractor};
use crate::interactors::message::{
    MessageDeleteInteractor, MessageEditInteractor, MessageGetInteractor, MessageGetsInteractor,
    MessageSubmitInteractor,
};
use crate::interactors::notification::{
    NotificationCreateInteractor, NotificationGetsInteractor, NotificationMarkAllReadInteractor,
    NotificationMarkReadInteractor, NotificationUnreadCountInteractor,
};
use crate::interactors::portfolio::{PortfolioGetInteractor, PortfolioUpdateInteractor};
use crate::interactors::project::{
    ProjectCreateInteractor, ProjectDeleteInteractor, ProjectEditInteractor, ProjectGetInteractor,
    ProjectGetsInteractor,
};
use crate::repositories::{
    InMemoryRepository, MessageRepository, MongoMessageRepository,
    MongoNotificationRepository, MongoPortfolioRepository, MongoProjectRepository,
    NotificationRepository, PortfolioRepository, ProjectRepository,
};
use crate::usecases;

pub struct ProjectUsecases {
    pub gets: Arc<dyn usecases::project::gets::Usecase + Sync + Send>,
    pub get: Arc<dyn usecases::project::get::Usecase + Sync + Send>,
    pub create: Arc<dyn usecases::project::create::Usecase + Sync + Send>,
    pub edit: Arc<dyn usecases::project::edit::Usecase + Sync + Send>,
    pub delete: Arc<dyn usecases::project::delete::Usecase + Sync + Send>,
}

pub struct MessageUsecases {
    pub submit: Arc<dyn usecases::message::submit::Usecase + Sync + Send>,
    pub gets: Arc<dyn usecases::message::gets::Usecase + Sync + Send>,
    pub get: Arc<dyn usecases::message::get::Usecase + Sync + Send>,
    pub edit: Arc<dyn usecases::message::edit::Usecase + Sync + Send>,
    pub delete: Arc<dyn usecases::message::delete::Usecase + Sync + Send>,
}

pub struct PortfolioUsecases {
    pub get: Arc<dyn usecases::portfolio::get::Usecase + Sync + Send>,
    pub update: Arc<dyn usecases::portfolio::update::Usecase + Sync + Send>,
}

pub struct NotificationUsecases {
    pub gets: Arc<dyn usecases::notification::gets::Usecase + Sync + Send>,
    pub unread_count: Arc<dyn usecases::notification::unread_count::Usecase + Sync + Send>,
    pub mark_read: Arc<dyn usecases::notification::mark_read::Usecase + Sync + Send>,
    pub mark_all_read: Arc<dyn usecases::notification::mark_all_read::Usecase + Sync + Send>,
    pub create: Arc<dyn usecases::notification::create::Usecase + Sync + Send>,
}

pub struct AuthUsecases {
    pub login: Arc<dyn usecases::auth::login::Usecase + Sync + Send>,
    pub me: Arc<dyn usecases::auth::me::Usecase + Sync + Send>,
}

/// Settings for the third-party authorize redirect.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: Option<String>,
    pub redirect_uri: String,
    pub scopes: String,
}

/// Everything the HTTP layer needs, shared by every worker.
pub struct AppState {
    pub signer: TokenSigner,
    pub spotify: SpotifySettings,
    pub projects: ProjectUsecases,
    pub messages: MessageUsecases,
    pub portfolio: PortfolioUsecases,
    pub notifications: NotificationUsecases,
    pub auth: AuthUsecases,
}

struct Repositories {
    project: Arc<dyn ProjectRepository + Sync + Send>,
    message: Arc<dyn MessageRepository + Sync + Send>,
    portfolio: Arc<dyn PortfolioRepository + Sync + Send>,
    notification: Arc<dyn NotificationRepository + Sync + Send>,
}

fn assemble(config: &Config, repos: Repositories) -> AppState {
    let Repositories {
        project,
        message,
        portfolio,
        notification,
    } = repos;

    let signer = TokenSigner::new(&config.token_secret, config.token_ttl_secs);
    let account = AdminAccount::new(
        config.admin_id.into(),
        &config.admin_name,
        &config.admin_email,
        &config.admin_password_sha256,
    );

    if account.password_sha256.is_empty() {
        tracing::warn!("no admin password configured, sign-in is disabled");
    }

    AppState {
        signer: signer.clone(),
        spotify: SpotifySettings {
            client_id: config.spotify_client_id.clone(),
            redirect_uri: config.spotify_redirect_uri.clone(),
            scopes: config.spotify_scopes.clone(),
        },
        projects: ProjectUsecases {
            gets: Arc::new(ProjectGetsInteractor {
                project_repository: project.clone(),
            }),
            get: Arc::new(ProjectGetInteractor {
                project_repository: project.clone(),
            }),
            create: Arc::new(ProjectCreateInteractor {
                project_repository: project.clone(),
            }),
            edit: Arc::new(ProjectEditInteractor {
                project_repository: project.clone(),
            }),
            delete: Arc::new(ProjectDeleteInteractor {
                project_repository: project,
            }),
        },
        messages: MessageUsecases {
            submit: Arc::new(MessageSubmitInteractor {
                message_repository: message.clone(),
            }),
            gets: Arc::new(MessageGetsInteractor {
                message_repository: message.clone(),
            }),
            get: Arc::new(MessageGetInteractor {
                message_repository: message.clone(),
            }),
            edit: Arc::new(MessageEditInteractor {
                message_repository: message.clone(),
            }),
            delete: Arc::new(MessageDeleteInteractor {
                message_repository: message,
            }),
        },
        portfolio: PortfolioUsecases {
            get: Arc::new(PortfolioGetInteractor {
                portfolio_repository: portfolio.clone(),
            }),
            update: Arc::new(PortfolioUpdateInteractor {
                portfolio_repository: portfolio,
            }),
        },
        notifications: NotificationUsecases {
            gets: Arc::new(NotificationGetsInteractor {
                notification_repository: notification.clone(),
            }),
            unread_count: Arc::new(NotificationUnreadCountInteractor {
                notification_repository: notification.clone(),
            }),
            mark_read: Arc::new(NotificationMarkReadInteractor {
                notification_repository: notification.clone(),
            }),
            mark_all_read: Arc::new(NotificationMarkAllReadInteractor {
                notification_repository: notification.clone(),
            }),
            create: Arc::new(NotificationCreateInteractor {
                notification_repository: notification,
            }),
        },
        auth: AuthUsecases {
            login: Arc::new(AuthLoginInteractor {
                account: account.clone(),
                signer,
            }),
            me: Arc::new(AuthMeInteractor { account }),
        },
    }
}

pub fn in_memory(config: &Config) -> AppState {
    assemble(config, Repositories {
        project: Arc::new(InMemoryRepository::<Project>::new()),
        message: Arc::new(InMemoryRepository::<Message>::new()),
        portfolio: Arc::new(InMemoryRepository::<Portfolio>::new()),
        notification: Arc::new(InMemoryRepository::<UserNotification>::new()),
    })
}

pub async fn mongo(config: &Config, uri_str: impl AsRef<str>) -> ::anyhow::Result<AppState> {
    let db = crate::repositories::mongo::connect(uri_str, &config.mongodb_db).await?;

    let repos = Repositories {
        project: Arc::new(MongoProjectRepository::new_with(&db).await?),
        message: Arc::new(MongoMessageRepository::new_with(&db).await?),
        portfolio: Arc::new(MongoPortfolioRepository::new_with(&db).await?),
        notification: Arc::new(MongoNotificationRepository::new_with(&db).await?),
    };

    Ok(assemble(config, repos))
}

/// Picks the store from the configuration.
pub async fn from_config(config: &Config) -> ::anyhow::Result<AppState> {
    match &config.mongodb_uri {
        Some(uri) => {
            tracing::info!("using mongodb database `{}`", config.mongodb_db);
            mongo(config, uri).await
        },
        None => {
            tracing::info!("no MONGODB_URI set, keeping data in memory");
            Ok(in_memory(config))
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::config::Mode;
    use crate::entities::UserId;
    use crate::usecases::auth::login;

    #[tokio::test]
    async fn in_memory_state_follows_config() {
        let mut config = Config::local(Mode::Production);
        config.spotify_client_id = Some("abc".to_string());
        let state = in_memory(&config);

        assert_eq!(state.spotify.client_id.as_deref(), Some("abc"));

        let out = state
            .auth
            .login
            .handle(login::Input {
                email: config.admin_email.clone(),
                password: "password".to_string(),
            })
            .await
            .unwrap();
        let claims = state.signer.verify(&out.token, Utc::now()).unwrap();

        assert_eq!(claims.sub, UserId::from(config.admin_id));
    }
}
