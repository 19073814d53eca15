//! Google sign-in end to end: authorization URL, code exchange, profile,
//! and the backend login-or-register step.

mod common;

use common::fake_backend::FakeBackend;
use common::{api_for, google_config, run, services};
use vocabvault::auth::{
    sign_in_with_google, GoogleAuthError, GoogleOAuth, GoogleProfile, GoogleStep,
    PendingAuthorization,
};
use vocabvault::effects::{EffectOutcome, Services, UiCommand};
use vocabvault::session::{AuthProvider, Session};

fn google_services(backend: &FakeBackend) -> Services {
    let mut services = services(api_for(&backend.base_url()), Session::in_memory());
    services.google = Some(GoogleOAuth::new(&google_config(&backend.base_url())).unwrap());
    services
}

async fn begin(services: &Services) -> PendingAuthorization {
    let outcomes = run(services, UiCommand::BeginGoogle).await;
    match outcomes.into_iter().next() {
        Some(EffectOutcome::GoogleReady(Ok(pending))) => pending,
        other => panic!("unexpected outcome {:?}", other),
    }
}

fn redirect(pending: &PendingAuthorization, code: &str) -> String {
    format!(
        "http://127.0.0.1:8765/callback?code={}&state={}",
        code, pending.state
    )
}

#[tokio::test]
async fn test_new_google_user_is_registered() {
    let backend = FakeBackend::start().await;
    backend.set_google_account("g-1", "new@example.com").await;
    let services = google_services(&backend);

    let pending = begin(&services).await;
    assert!(pending.auth_url.contains("/oauth/authorize"));

    let outcomes = run(
        &services,
        UiCommand::CompleteGoogle {
            redirect: redirect(&pending, "good-code"),
            pending,
        },
    )
    .await;

    assert!(matches!(outcomes[0], EffectOutcome::GoogleTokenReceived));
    assert!(matches!(outcomes[1], EffectOutcome::GoogleStep(GoogleStep::BackendLogin)));
    assert!(matches!(outcomes[2], EffectOutcome::GoogleStep(GoogleStep::Registering)));
    let account = match &outcomes[3] {
        EffectOutcome::GoogleFinished(Ok(account)) => account,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert!(account.registered);
    assert!(!services.session.is_signed_in());

    let identity = &account.identity;
    assert_eq!(identity.email, "new@example.com");
    assert_eq!(identity.provider, AuthProvider::Google);
    assert_eq!(
        identity.user_id.as_str(),
        backend.user_id("new@example.com").await.to_string()
    );

    let tables = backend.tables.lock().await;
    let user = tables.user_by_email("new@example.com").unwrap();
    assert_eq!(user.password, "google:g-1");
    assert_eq!(user.security_question, "Google");
    assert_eq!(user.security_answer, "Google");

    let token_request = &tables.token_requests[0];
    assert_eq!(token_request["grant_type"], "authorization_code");
    assert_eq!(token_request["client_secret"], "test-secret");
    assert!(!token_request["code_verifier"].is_empty());
}

#[tokio::test]
async fn test_returning_google_user_logs_in() {
    let backend = FakeBackend::start().await;
    backend.set_google_account("g-2", "again@example.com").await;
    let services = google_services(&backend);

    for expected_registered in [true, false] {
        let pending = begin(&services).await;
        let outcomes = run(
            &services,
            UiCommand::CompleteGoogle {
                redirect: redirect(&pending, "good-code"),
                pending,
            },
        )
        .await;
        match outcomes.last() {
            Some(EffectOutcome::GoogleFinished(Ok(account))) => {
                assert_eq!(account.registered, expected_registered)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    let tables = backend.tables.lock().await;
    let count = tables
        .users
        .iter()
        .filter(|u| u.email == "again@example.com")
        .count();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_state_mismatch_stops_before_token_exchange() {
    let backend = FakeBackend::start().await;
    backend.set_google_account("g-3", "x@example.com").await;
    let services = google_services(&backend);

    let pending = begin(&services).await;
    let outcomes = run(
        &services,
        UiCommand::CompleteGoogle {
            redirect: "http://127.0.0.1:8765/callback?code=good-code&state=forged".to_string(),
            pending,
        },
    )
    .await;

    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
        EffectOutcome::GoogleFinished(Err(failure)) => {
            assert_eq!(failure.message, GoogleAuthError::StateMismatch.to_string());
            assert!(!failure.connection);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(backend.tables.lock().await.token_requests.is_empty());
    assert!(!services.session.is_signed_in());
}

#[tokio::test]
async fn test_rejected_code_fails_without_signing_in() {
    let backend = FakeBackend::start().await;
    backend.set_google_account("g-4", "y@example.com").await;
    let services = google_services(&backend);

    let pending = begin(&services).await;
    let outcomes = run(
        &services,
        UiCommand::CompleteGoogle {
            redirect: "bad-code".to_string(),
            pending,
        },
    )
    .await;

    match outcomes.last() {
        Some(EffectOutcome::GoogleFinished(Err(failure))) => {
            let rejected = GoogleAuthError::CodeRejected {
                reason: "invalid_grant".to_string(),
            };
            assert_eq!(failure.message, rejected.to_string());
            assert!(!failure.connection);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(backend.tables.lock().await.token_requests.len(), 1);
    assert!(!services.session.is_signed_in());
}

#[tokio::test]
async fn test_begin_without_configuration() {
    let backend = FakeBackend::start().await;
    let services = services(api_for(&backend.base_url()), Session::in_memory());

    let outcomes = run(&services, UiCommand::BeginGoogle).await;
    match &outcomes[0] {
        EffectOutcome::GoogleReady(Err(failure)) => {
            assert_eq!(failure.message, GoogleAuthError::NotConfigured.to_string())
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_register_without_id_falls_back_to_login() {
    let backend = FakeBackend::start().await;
    backend.tables.lock().await.register_without_id = true;
    let api = api_for(&backend.base_url());
    let profile = GoogleProfile {
        id: "g-5".to_string(),
        email: "late@example.com".to_string(),
        name: None,
    };

    let mut steps = Vec::new();
    let signed_in = sign_in_with_google(&api, &profile, |step| steps.push(step))
        .await
        .unwrap();

    assert!(signed_in.registered);
    assert_eq!(
        signed_in.user_id.as_str(),
        backend.user_id("late@example.com").await.to_string()
    );
    assert_eq!(steps, vec![GoogleStep::BackendLogin, GoogleStep::Registering]);
}

#[tokio::test]
async fn test_wrong_password_is_not_treated_as_new_user() {
    let backend = FakeBackend::start().await;
    let api = api_for(&backend.base_url());
    // testuser exists with a password that is not the Google-derived one.
    let profile = GoogleProfile {
        id: "g-6".to_string(),
        email: "testuser".to_string(),
        name: None,
    };

    let err = sign_in_with_google(&api, &profile, |_| {}).await.unwrap_err();
    assert!(matches!(err, GoogleAuthError::Backend(_)));
    assert_eq!(err.user_message(), "Invalid credentials");
}
