mod common;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use folio::client::services::MessageListQuery;
use folio::client::{
    AuthService, AuthStore, ContactService, HttpApi, ProjectService, ProjectsStore,
};
use folio::client::Credentials;
use folio::config::Mode;
use folio::entities::{MessageDraft, MessageStatus, ProjectDraft, ProjectMutation};
use folio::usecases::message::MessageMutation;

use crate::common::{config, ADMIN_EMAIL, ADMIN_PASSWORD};

/// Serves the API on an ephemeral port and returns its base url.
fn spawn_server() -> (String, ServerHandle) {
    let config = config(Mode::Production);
    let state = web::Data::new(folio::in_memory(&config));
    let mode = config.mode;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(folio::middleware::NormalizeErrors { mode })
            .app_data(state.clone())
            .configure(folio::controllers::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{}/api", addr), handle)
}

fn draft(title: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        description: "built over a weekend".to_string(),
        technologies: vec!["Rust".to_string()],
        ..Default::default()
    }
}

#[actix_web::test]
async fn stores_drive_the_live_api() {
    let (base, handle) = spawn_server();

    let mut auth = AuthStore::new(HttpApi::new(&base).unwrap(), Credentials::default());
    assert!(!auth.login(ADMIN_EMAIL, "wrong").await);
    assert_eq!(auth.error.as_deref(), Some("Incorrect email or password"));
    assert!(!auth.is_authenticated());

    assert!(auth.login(ADMIN_EMAIL, ADMIN_PASSWORD).await);
    assert!(auth.is_admin());
    assert!(auth.error.is_none());

    let mut projects = ProjectsStore::new(HttpApi::new(&base).unwrap());
    let created = projects
        .create(&mut auth.credentials, &draft("Weekend Hack"))
        .await
        .unwrap();
    assert_eq!(created.slug, "weekend-hack");

    assert!(projects.create(&mut auth.credentials, &draft("weekend hack!")).await.is_none());
    assert_eq!(
        projects.error.as_deref(),
        Some("Duplicate field value: \"weekend-hack\"")
    );

    let mutation = ProjectMutation {
        featured: Some(true),
        ..Default::default()
    };
    let updated = projects
        .update(&mut auth.credentials, created.id, &mutation)
        .await
        .unwrap();
    assert!(updated.featured);

    let mut anonymous = Credentials::default();
    assert!(projects.fetch(&mut anonymous, Some(true)).await);
    assert_eq!(projects.projects.len(), 1);
    assert!(projects.open(&mut anonymous, "weekend-hack").await);
    assert_eq!(projects.current.as_ref().map(|p| p.id), Some(created.id));

    assert!(projects.remove(&mut auth.credentials, created.id).await);
    assert!(projects.projects.is_empty());
    assert!(!projects.open(&mut anonymous, "weekend-hack").await);

    auth.logout().await;
    assert!(!auth.is_authenticated());
    assert!(!auth.credentials.is_signed_in());

    handle.stop(true).await;
}

#[actix_web::test]
async fn rejected_token_is_dropped() {
    let (base, handle) = spawn_server();
    let api = HttpApi::new(&base).unwrap();

    let mut stale = Credentials::new("00.00");
    assert!(api.me(&mut stale).await.is_err());
    assert!(!stale.is_signed_in());

    let mut auth = AuthStore::new(HttpApi::new(&base).unwrap(), Credentials::new("00.00"));
    assert!(!auth.restore().await);
    assert!(!auth.credentials.is_signed_in());

    handle.stop(true).await;
}

#[actix_web::test]
async fn contact_round_trip() {
    let (base, handle) = spawn_server();
    let api = HttpApi::new(&base).unwrap();

    let mut visitor = Credentials::default();
    let ack = api
        .send(&mut visitor, &MessageDraft {
            name: "Grace".to_string(),
            email: "Grace@Example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Loved the portfolio, let's talk".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ack, "Thank you for your message! I'll get back to you soon.");

    let err = api
        .messages(&mut visitor, &MessageListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "You are not logged in");

    let mut admin = Credentials::default();
    api.login(&mut admin, ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let page = api
        .messages(&mut admin, &MessageListQuery {
            status: Some(MessageStatus::New),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.messages[0].email, "grace@example.com");

    let id = page.messages[0].id;
    let fetched = api.message(&mut admin, id).await.unwrap();
    assert_eq!(fetched.subject, "Hi");
    assert_eq!(fetched.status, MessageStatus::New);

    let err = api.message(&mut visitor, id).await.unwrap_err();
    assert_eq!(err.status, Some(401));
    let read = api
        .update_message(&mut admin, id, &MessageMutation {
            status: Some(MessageStatus::Read),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(read.status, MessageStatus::Read);

    api.delete_message(&mut admin, id).await.unwrap();
    assert!(api.delete_message(&mut admin, id).await.is_err());

    let err = api.message(&mut admin, id).await.unwrap_err();
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "No message found with that ID");
    assert!(admin.is_signed_in());

    handle.stop(true).await;
}
