//! Unit tests for authentication service

use std::sync::Arc;

use uuid::Uuid;

use todo_shared::config::AuthConfig;

use crate::domain::entities::TokenPurpose;
use crate::errors::{
    AuthError, AuthenticationFailure, CredentialFailure, DomainError, ErrorKind,
};
use crate::repositories::UserRepository;
use crate::services::auth::{AuthService, TokenResolver};

use super::mocks::*;

#[tokio::test]
async fn test_create_user_stores_hash_not_plaintext() {
    let (service, repo) = service();

    let user = service.create_user("a@x.com", "secret1").await.unwrap();
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();

    let hash = stored.password_hash().unwrap();
    assert_ne!(hash, "secret1");
    assert!(service.hasher().verify("secret1", hash));
    assert!(stored.tokens().is_empty());
}

#[tokio::test]
async fn test_create_user_normalizes_email() {
    let (service, _repo) = service();

    let user = service.create_user("  A@X.com ", "secret1").await.unwrap();
    assert_eq!(user.email, "a@x.com");

    let err = service.create_user("a@x.COM", "secret1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateIdentity);
}

#[tokio::test]
async fn test_create_user_validation() {
    let (service, repo) = service();

    let err = service.create_user("not-an-email", "secret1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    let err = service.create_user("a@x.com", "short").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_multibyte_password_past_hash_limit_is_rejected() {
    let (service, repo) = service();

    // 37 chars but 73 bytes; the hash would only see the shared 72-byte prefix
    let stored = format!("{}x", "é".repeat(36));
    let other = format!("{}y", "é".repeat(36));

    let err = service.create_user("a@x.com", &stored).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(repo.is_empty().await);

    let err = service.resolve_by_credentials("a@x.com", &other).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialMismatch);

    let at_limit = "x".repeat(72);
    let user = service.create_user("a@x.com", &at_limit).await.unwrap();
    assert!(service.resolve_by_credentials("a@x.com", &at_limit).await.is_ok());

    let err = service
        .resolve_by_credentials("a@x.com", &format!("{}z", at_limit))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialMismatch);

    let err = service.change_password(&user, &stored).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
}

#[tokio::test]
async fn test_duplicate_email_leaves_first_record() {
    let (service, repo) = service();

    let first = service.create_user("a@x.com", "secret1").await.unwrap();
    let err = service.create_user("a@x.com", "another").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::DuplicateIdentity)));

    let stored = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert!(service.hasher().verify("secret1", stored.password_hash().unwrap()));
}

#[tokio::test]
async fn test_issue_then_resolve_round_trip() {
    let (service, repo) = service();
    let user = service.create_user("a@x.com", "secret1").await.unwrap();

    let token = service.issue_token(&user).await.unwrap();
    let resolved = service.resolve_by_token(&token).await.unwrap();
    assert_eq!(resolved.id, user.id);

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.tokens().len(), 1);
    assert_eq!(stored.tokens()[0].purpose, TokenPurpose::Auth);
    assert_eq!(stored.tokens()[0].token, token);
}

#[tokio::test]
async fn test_register_issues_token() {
    let (service, _repo) = service();

    let session = service.register("a@x.com", "secret1").await.unwrap();
    let resolved = service.resolve_by_token(&session.token).await.unwrap();
    assert_eq!(resolved.id, session.user.id);
}

#[tokio::test]
async fn test_full_session_scenario() {
    let (service, _repo) = service();

    let user = service.create_user("a@x.com", "secret1").await.unwrap();
    let t1 = service.issue_token(&user).await.unwrap();

    let resolved = service.resolve_by_token(&t1).await.unwrap();
    assert_eq!(resolved.id, user.id);

    service.remove_token(&resolved, &t1).await.unwrap();

    let err = service.resolve_by_token(&t1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::AuthenticationRequired(
            AuthenticationFailure::UnknownToken
        ))
    ));

    // The signature is still valid; only the live membership is gone.
    let decoded = service.codec().decode(&t1).unwrap();
    assert_eq!(decoded.user_id, user.id);
}

#[tokio::test]
async fn test_remove_token_is_idempotent_and_scoped() {
    let (service, repo) = service();
    let user = service.create_user("a@x.com", "secret1").await.unwrap();

    let t1 = service.issue_token(&user).await.unwrap();
    let t2 = service.issue_token(&user).await.unwrap();

    service.remove_token(&user, &t1).await.unwrap();
    service.remove_token(&user, &t1).await.unwrap();

    assert!(service.resolve_by_token(&t2).await.is_ok());
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.tokens().len(), 1);
}

#[tokio::test]
async fn test_invalid_token_never_touches_store() {
    let (service, repo) = counting_service();

    let err = service.resolve_by_token("garbage").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::AuthenticationRequired(
            AuthenticationFailure::InvalidToken
        ))
    ));

    let foreign = AuthService::new(
        Arc::new(crate::repositories::InMemoryUserRepository::new()),
        &AuthConfig {
            token: todo_shared::config::TokenConfig::new("someone-elses-secret"),
            ..AuthConfig::for_tests()
        },
    );
    let forged = foreign.codec().encode(Uuid::new_v4(), TokenPurpose::Auth).unwrap();
    let err = service.resolve_by_token(&forged).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);

    assert_eq!(repo.token_lookups(), 0);
}

#[tokio::test]
async fn test_valid_signature_unknown_user() {
    let (service, repo) = counting_service();

    let token = service.codec().encode(Uuid::new_v4(), TokenPurpose::Auth).unwrap();
    let err = service.resolve_by_token(&token).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);
    assert_eq!(repo.token_lookups(), 1);
}

#[tokio::test]
async fn test_token_of_deleted_user_rejected() {
    let (service, repo) = service();
    let user = service.create_user("a@x.com", "secret1").await.unwrap();
    let token = service.issue_token(&user).await.unwrap();

    repo.delete(user.id).await.unwrap();

    let err = service.resolve_by_token(&token).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);

    let err = service.issue_token(&user).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_resolve_by_credentials() {
    let (service, _repo) = service();
    let user = service.create_user("a@x.com", "secret1").await.unwrap();

    let resolved = service
        .resolve_by_credentials(" A@x.com", "secret1")
        .await
        .unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_credential_failures_share_kind() {
    let (service, _repo) = service();
    service.create_user("a@x.com", "secret1").await.unwrap();

    let wrong_password = service
        .resolve_by_credentials("a@x.com", "wrong-password")
        .await
        .unwrap_err();
    let unknown_email = service
        .resolve_by_credentials("b@x.com", "secret1")
        .await
        .unwrap_err();

    assert_eq!(wrong_password.kind(), ErrorKind::CredentialMismatch);
    assert_eq!(unknown_email.kind(), ErrorKind::CredentialMismatch);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::CredentialMismatch(CredentialFailure::WrongPassword))
    ));
    assert!(matches!(
        unknown_email,
        DomainError::Auth(AuthError::CredentialMismatch(CredentialFailure::UnknownEmail))
    ));
}

#[tokio::test]
async fn test_login_appends_new_token() {
    let (service, repo) = service();
    let session = service.register("a@x.com", "secret1").await.unwrap();

    let login = service.login("a@x.com", "secret1").await.unwrap();
    assert_ne!(login.token, session.token);

    let stored = repo.find_by_id(session.user.id).await.unwrap().unwrap();
    assert_eq!(stored.tokens().len(), 2);
}

#[tokio::test]
async fn test_change_password() {
    let (service, repo) = service();
    let session = service.register("a@x.com", "secret1").await.unwrap();

    let updated = service
        .change_password(&session.user, "new-secret")
        .await
        .unwrap();
    assert!(updated.pending_password().is_none());

    assert!(service.resolve_by_credentials("a@x.com", "secret1").await.is_err());
    assert!(service.resolve_by_credentials("a@x.com", "new-secret").await.is_ok());

    // Existing sessions survive a password change
    assert!(service.resolve_by_token(&session.token).await.is_ok());

    let stored = repo.find_by_id(session.user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash(), updated.password_hash());
}

#[tokio::test]
async fn test_change_password_validation() {
    let (service, _repo) = service();
    let user = service.create_user("a@x.com", "secret1").await.unwrap();

    let err = service.change_password(&user, "abc").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(service.resolve_by_credentials("a@x.com", "secret1").await.is_ok());
}

#[tokio::test]
async fn test_store_failure_surfaces_as_internal() {
    let service = AuthService::new(Arc::new(FailingUserRepository), &AuthConfig::for_tests());

    let err = service.create_user("a@x.com", "secret1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let token = service.codec().encode(Uuid::new_v4(), TokenPurpose::Auth).unwrap();
    let err = service.resolve_by_token(&token).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_resolver_trait_object() {
    let (service, _repo) = service();
    let session = service.register("a@x.com", "secret1").await.unwrap();

    let resolver: Arc<dyn TokenResolver> = Arc::new(service);
    let user = resolver.resolve(&session.token).await.unwrap();
    assert_eq!(user.id, session.user.id);
}
