//! Integration tests for the account workflows, wired to the
//! in-memory store, a pinned clock and a recording notifier.

use std::collections::BTreeSet;
use std::sync::Arc;

use adapters::outbound::clock::FixedClock;
use adapters::outbound::crypto::{
    OsRngRandom, Sha1PasswordDigest, Sha256TokenDigest,
};
use adapters::outbound::notifier::{Notification, RecordingNotifier};
use adapters::outbound::persistence::InMemoryAccountStore;
use application::config::Settings;
use application::dto::{
    AdminAccountUpdate, PasswordChange, ProfileUpdate, RegisterRequest,
};
use application::error::WorkflowError;
use application::ports::inbound::{
    AdministerAccounts, Authenticate, Authorization, Autologin, EmailChange,
    PasswordManagement, Registration, UpdateProfile,
};
use application::ports::outbound::{
    AccountStore, Clock, Notifier, PasswordDigest, SecureRandom, TokenDigest,
};
use application::usecases::{
    AdminUseCase, AuthenticateUseCase, AutologinUseCase, EmailChangeUseCase,
    PasswordUseCase, ProfileUseCase, RegistrationUseCase, RolesUseCase,
};
use chrono::{DateTime, TimeDelta, Utc};
use domain::account::Account;
use domain::role::RoleSlug;

fn fixed_now() -> DateTime<Utc> {
    "2026-08-06T12:00:00Z".parse().expect("valid timestamp")
}

struct Harness {
    store: Arc<InMemoryAccountStore>,
    notifier: Arc<RecordingNotifier>,
    registration: RegistrationUseCase,
    auth: AuthenticateUseCase,
    passwords: PasswordUseCase,
    email_change: EmailChangeUseCase,
    autologin: AutologinUseCase,
    roles: RolesUseCase,
    profile: ProfileUseCase,
    admin: AdminUseCase,
}

fn harness() -> Harness {
    harness_with(Settings::default())
}

fn harness_with(settings: Settings) -> Harness {
    let store = Arc::new(InMemoryAccountStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let settings = Arc::new(settings);

    let store_port: Arc<dyn AccountStore> = store.clone();
    let digest: Arc<dyn PasswordDigest> = Arc::new(Sha1PasswordDigest::new());
    let tokens: Arc<dyn TokenDigest> =
        Arc::new(Sha256TokenDigest::new(b"test-pepper".to_vec()));
    let random: Arc<dyn SecureRandom> = Arc::new(OsRngRandom::new());
    let notifier_port: Arc<dyn Notifier> = notifier.clone();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(fixed_now()));

    Harness {
        registration: RegistrationUseCase::new(
            store_port.clone(),
            digest.clone(),
            tokens.clone(),
            random.clone(),
            notifier_port.clone(),
            clock.clone(),
            settings.clone(),
        ),
        auth: AuthenticateUseCase::new(
            store_port.clone(),
            digest.clone(),
            clock.clone(),
        ),
        passwords: PasswordUseCase::new(
            store_port.clone(),
            digest.clone(),
            random.clone(),
            notifier_port.clone(),
            settings.clone(),
        ),
        email_change: EmailChangeUseCase::new(
            store_port.clone(),
            tokens.clone(),
            notifier_port.clone(),
            clock.clone(),
        ),
        autologin: AutologinUseCase::new(
            store_port.clone(),
            tokens.clone(),
            clock.clone(),
        ),
        roles: RolesUseCase::new(store_port.clone(), settings.clone()),
        profile: ProfileUseCase::new(store_port.clone()),
        admin: AdminUseCase::new(
            store_port,
            digest,
            random,
            clock,
            settings,
        ),
        store,
        notifier,
    }
}

/// Registers an account and pulls the generated password and
/// activation code out of the welcome notification, the way a user
/// would read them out of the email.
async fn register(h: &Harness, email: &str) -> (Account, String, String) {
    let account = h
        .registration
        .register(RegisterRequest {
            email: email.into(),
            ..Default::default()
        })
        .await
        .expect("registration should succeed");

    let Some(Notification::Welcome {
        password,
        activation_token,
        ..
    }) = h.notifier.last()
    else {
        panic!("welcome notification missing");
    };

    (account, password, activation_token)
}

/// Registers and activates, returning the account and its password.
async fn register_active(h: &Harness, email: &str) -> (Account, String) {
    let (_, password, token) = register(h, email).await;
    let account = h.registration.activate(&token).await.expect("activation");
    (account, password)
}

fn slugs(items: &[&str]) -> BTreeSet<RoleSlug> {
    items.iter().copied().map(RoleSlug::from).collect()
}

// REGISTRATION

#[tokio::test]
async fn registration_creates_unactivated_account() {
    let h = harness();
    let (account, password, token) = register(&h, "bob@bob.com").await;

    assert!(!account.activated);
    assert!(account.activated_at.is_none());
    assert!(!token.is_empty());
    assert_eq!(account.activation_token.as_deref(), Some(token.as_str()));
    assert_eq!(account.login_count, 0);
    assert_eq!(account.salt.len(), 10);
    assert_eq!(password.len(), 10);
    assert_eq!(account.roles, slugs(&["user"]));

    // Correct credentials are still refused until activation.
    let err = h.auth.authenticate("bob@bob.com", &password).await;
    assert!(matches!(err, Err(WorkflowError::UnauthorizedNotActivated)));
}

#[tokio::test]
async fn registration_with_name_derives_slug() {
    let h = harness();
    let account = h
        .registration
        .register(RegisterRequest {
            email: "larry@brown.com".into(),
            name: Some("Larry Brown".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(account.name, "Larry Brown");
    assert_eq!(account.slug, "larry-brown");
}

#[tokio::test]
async fn registration_collects_field_errors() {
    let h = harness();

    let err = h
        .registration
        .register(RegisterRequest {
            email: "wrong@email".into(),
            name: Some(";:!^%()".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    let WorkflowError::NotRegistered(violations) = err else {
        panic!("expected NotRegistered");
    };
    assert!(violations.contains_field("email"));
    assert!(violations.contains_field("name"));
}

#[tokio::test]
async fn registration_rejects_taken_email_and_name() {
    let h = harness();
    h.registration
        .register(RegisterRequest {
            email: "bob@bob.com".into(),
            name: Some("Bob Smith".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let err = h
        .registration
        .register(RegisterRequest {
            email: "bob@bob.com".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.violations().is_some_and(|v| v.contains_field("email")));

    let err = h
        .registration
        .register(RegisterRequest {
            email: "other@bob.com".into(),
            name: Some("Bob Smith".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.violations().is_some_and(|v| v.contains_field("name")));
}

#[tokio::test]
async fn registration_honors_legal_acceptance_requirement() {
    let h = harness_with(Settings {
        require_legal_acceptance: true,
        ..Settings::default()
    });

    let err = h
        .registration
        .register(RegisterRequest {
            email: "bob@bob.com".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(
        err.violations()
            .is_some_and(|v| v.contains_field("legal_notice"))
    );

    h.registration
        .register(RegisterRequest {
            email: "bob@bob.com".into(),
            accepted_legal_notice: true,
            ..Default::default()
        })
        .await
        .unwrap();
}

// ACTIVATION

#[tokio::test]
async fn activation_consumes_the_code_once() {
    let h = harness();
    let (_, _, token) = register(&h, "bob@bob.com").await;

    let account = h.registration.activate(&token).await.unwrap();
    assert!(account.activated);
    assert_eq!(account.activated_at, Some(fixed_now()));
    // Activation counts as the implicit first login.
    assert_eq!(account.login_count, 1);

    // Not idempotent: a replay is a domain error, not a state change.
    assert!(matches!(
        h.registration.activate(&token).await,
        Err(WorkflowError::AlreadyActivated)
    ));
}

#[tokio::test]
async fn activation_argument_errors() {
    let h = harness();

    assert!(matches!(
        h.registration.activate("").await,
        Err(WorkflowError::InvalidArgument(_))
    ));
    assert!(matches!(
        h.registration.activate("f423omfo34i5fo34").await,
        Err(WorkflowError::BadActivationCode)
    ));
}

#[tokio::test]
async fn activation_refuses_blocked_accounts() {
    let h = harness();
    let (account, _, token) = register(&h, "bob@bob.com").await;

    h.admin
        .update_account(
            &account,
            AdminAccountUpdate {
                blocked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(matches!(
        h.registration.activate(&token).await,
        Err(WorkflowError::UnauthorizedAccountBlocked)
    ));
}

#[tokio::test]
async fn resend_activation_code_resends_the_existing_code() {
    let h = harness();
    let (_, _, token) = register(&h, "bob@bob.com").await;

    assert!(matches!(
        h.registration.resend_activation_code("random@email.com").await,
        Err(WorkflowError::UnauthorizedWrongEmail)
    ));

    h.registration
        .resend_activation_code("bob@bob.com")
        .await
        .unwrap();
    let Some(Notification::ActivationCode {
        activation_token, ..
    }) = h.notifier.last()
    else {
        panic!("activation code notification missing");
    };
    // The previously delivered code must stay usable.
    assert_eq!(activation_token, token);

    h.registration.activate(&token).await.unwrap();
    assert!(matches!(
        h.registration.resend_activation_code("bob@bob.com").await,
        Err(WorkflowError::AlreadyActivated)
    ));
}

// AUTHENTICATION

#[tokio::test]
async fn authentication_failures_keep_their_precedence() {
    let h = harness();
    let (bob, password) = register_active(&h, "bob@bob.com").await;

    // Unknown email outranks everything.
    assert!(matches!(
        h.auth.authenticate("nobody@x.com", &password).await,
        Err(WorkflowError::UnauthorizedWrongEmail)
    ));
    assert!(matches!(
        h.auth.authenticate("bob@bob.com", "wrong").await,
        Err(WorkflowError::UnauthorizedWrongPassword)
    ));

    // A wrong password on an unactivated account still reports the
    // wrong password, not the activation state.
    let (_, _, _token) = register(&h, "fresh@bob.com").await;
    assert!(matches!(
        h.auth.authenticate("fresh@bob.com", "wrong").await,
        Err(WorkflowError::UnauthorizedWrongPassword)
    ));

    // Same for a blocked account.
    h.admin
        .update_account(
            &bob,
            AdminAccountUpdate {
                blocked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        h.auth.authenticate("bob@bob.com", "wrong").await,
        Err(WorkflowError::UnauthorizedWrongPassword)
    ));
    assert!(matches!(
        h.auth.authenticate("bob@bob.com", &password).await,
        Err(WorkflowError::UnauthorizedAccountBlocked)
    ));
}

#[tokio::test]
async fn authentication_succeeds_with_correct_credentials() {
    let h = harness();
    let (bob, password) = register_active(&h, "bob@bob.com").await;

    let account = h.auth.authenticate("bob@bob.com", &password).await.unwrap();
    assert_eq!(account.id, bob.id);

    // Lookups are case-insensitive because addresses are normalized.
    let account = h.auth.authenticate("BOB@BOB.COM", &password).await.unwrap();
    assert_eq!(account.id, bob.id);
}

#[tokio::test]
async fn login_telemetry_shifts_current_to_last() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    assert_eq!(bob.login_count, 1);

    let bob = h.auth.record_login(&bob, Some("10.0.0.1")).await.unwrap();
    assert_eq!(bob.login_count, 2);
    assert_eq!(bob.current_ip.as_deref(), Some("10.0.0.1"));
    assert_eq!(bob.current_login_at, Some(fixed_now()));
    assert!(bob.last_ip.is_none());

    let bob = h.auth.record_login(&bob, Some("10.0.0.2")).await.unwrap();
    assert_eq!(bob.login_count, 3);
    assert_eq!(bob.current_ip.as_deref(), Some("10.0.0.2"));
    assert_eq!(bob.last_ip.as_deref(), Some("10.0.0.1"));
    assert_eq!(bob.last_login_at, Some(fixed_now()));
}

#[tokio::test]
async fn failed_login_telemetry_is_recorded() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;

    h.auth
        .record_failed_login("bob@bob.com", Some("10.0.0.9"))
        .await
        .unwrap();

    let bob = h.store.find_by_id(bob.id).await.unwrap().unwrap();
    assert_eq!(bob.last_failed_ip.as_deref(), Some("10.0.0.9"));
    assert_eq!(bob.last_failed_login_at, Some(fixed_now()));

    // Unknown addresses are silently ignored.
    h.auth
        .record_failed_login("nobody@x.com", None)
        .await
        .unwrap();
}

// PASSWORDS

#[tokio::test]
async fn forgot_password_issues_a_fresh_one() {
    let h = harness();
    let (bob, old_password) = register_active(&h, "bob@bob.com").await;

    // Distinct not-found kind: this anonymous flow never reuses the
    // authentication refusals.
    assert!(matches!(
        h.passwords.forgot_password("nobody@x.com").await,
        Err(WorkflowError::NotFound)
    ));

    h.passwords.forgot_password("bob@bob.com").await.unwrap();
    let Some(Notification::ForgotPassword { password, .. }) = h.notifier.last()
    else {
        panic!("forgot-password notification missing");
    };

    assert!(matches!(
        h.auth.authenticate("bob@bob.com", &old_password).await,
        Err(WorkflowError::UnauthorizedWrongPassword)
    ));
    let account = h.auth.authenticate("bob@bob.com", &password).await.unwrap();

    // The salt is generated once and survives every password change.
    assert_eq!(account.salt, bob.salt);
}

#[tokio::test]
async fn change_password_requires_the_old_password() {
    let h = harness();
    let (bob, password) = register_active(&h, "bob@bob.com").await;

    let err = h
        .passwords
        .change_password(
            &bob,
            PasswordChange {
                old_password: "bad-password".into(),
                password: "newpass".into(),
                password_confirmation: "newpass".into(),
            },
        )
        .await;
    assert!(matches!(err, Err(WorkflowError::UnauthorizedWrongPassword)));

    for (new, confirmation) in
        [("tiny", "tiny"), ("", ""), ("new-password", "bad-confirmation")]
    {
        let err = h
            .passwords
            .change_password(
                &bob,
                PasswordChange {
                    old_password: password.clone(),
                    password: new.into(),
                    password_confirmation: confirmation.into(),
                },
            )
            .await
            .unwrap_err();
        let WorkflowError::PasswordNotChanged(violations) = err else {
            panic!("expected PasswordNotChanged");
        };
        assert!(violations.contains_field("password"));
    }
}

#[tokio::test]
async fn change_password_replaces_the_secret() {
    let h = harness();
    let (bob, old_password) = register_active(&h, "bob@bob.com").await;

    h.passwords
        .change_password(
            &bob,
            PasswordChange {
                old_password: old_password.clone(),
                password: "newpass".into(),
                password_confirmation: "newpass".into(),
            },
        )
        .await
        .unwrap();

    let Some(Notification::PasswordChanged { password, .. }) =
        h.notifier.last()
    else {
        panic!("password-changed notification missing");
    };
    assert_eq!(password, "newpass");

    assert!(matches!(
        h.auth.authenticate("bob@bob.com", &old_password).await,
        Err(WorkflowError::UnauthorizedWrongPassword)
    ));
    h.auth.authenticate("bob@bob.com", "newpass").await.unwrap();
}

// EMAIL CHANGE

#[tokio::test]
async fn email_change_round_trip() {
    let h = harness();
    let (bob, password) = register_active(&h, "bob@bob.com").await;

    let bob = h
        .email_change
        .request_email_change(&bob, "new@x.com")
        .await
        .unwrap();
    assert_eq!(bob.pending_email.as_deref(), Some("new@x.com"));
    let token = bob.pending_email_token.clone().expect("pending token");
    assert!(!token.is_empty());

    // The activation link goes to the candidate address.
    let Some(Notification::EmailChangeActivation { to, token: sent }) =
        h.notifier.last()
    else {
        panic!("email-change notification missing");
    };
    assert_eq!(to, "new@x.com");
    assert_eq!(sent, token);

    let bob = h.email_change.activate_email_change(&token).await.unwrap();
    assert_eq!(bob.email, "new@x.com");
    assert!(bob.pending_email.is_none());
    assert!(bob.pending_email_token.is_none());

    assert!(matches!(
        h.auth.authenticate("bob@bob.com", &password).await,
        Err(WorkflowError::UnauthorizedWrongEmail)
    ));
    h.auth.authenticate("new@x.com", &password).await.unwrap();
}

#[tokio::test]
async fn email_change_request_is_validated() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    register_active(&h, "bill@bill.com").await;

    assert!(matches!(
        h.email_change.request_email_change(&bob, "").await,
        Err(WorkflowError::InvalidArgument(_))
    ));
    assert!(matches!(
        h.email_change.request_email_change(&bob, "bob").await,
        Err(WorkflowError::EmailNotChanged(_))
    ));
    assert!(matches!(
        h.email_change.request_email_change(&bob, "bill@bill.com").await,
        Err(WorkflowError::EmailNotChanged(_))
    ));
}

#[tokio::test]
async fn email_change_activation_requires_a_known_token() {
    let h = harness();

    assert!(matches!(
        h.email_change.activate_email_change("").await,
        Err(WorkflowError::InvalidArgument(_))
    ));
    assert!(matches!(
        h.email_change.activate_email_change("f34f32fasfd").await,
        Err(WorkflowError::NotFound)
    ));
}

// AUTOLOGIN

#[tokio::test]
async fn remember_me_round_trip() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    assert!(bob.autologin_token.is_none());
    assert!(bob.autologin_expires_at.is_none());

    let bob = h
        .autologin
        .remember_me(&bob, TimeDelta::days(30))
        .await
        .unwrap();
    let token = bob.autologin_token.clone().expect("autologin token");
    assert_eq!(
        bob.autologin_expires_at,
        Some(fixed_now() + TimeDelta::days(30))
    );

    let resolved = h.autologin.resolve_from_token(&token).await.unwrap();
    assert_eq!(resolved.map(|a| a.id), Some(bob.id));

    let bob = h.autologin.forget_me(&bob).await.unwrap();
    assert!(bob.autologin_token.is_none());
    assert!(bob.autologin_expires_at.is_none());
    assert!(
        h.autologin
            .resolve_from_token(&token)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn expired_autologin_tokens_resolve_to_nothing() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;

    let bob = h
        .autologin
        .remember_me(&bob, TimeDelta::days(-1))
        .await
        .unwrap();
    let token = bob.autologin_token.clone().expect("autologin token");

    assert!(
        h.autologin
            .resolve_from_token(&token)
            .await
            .unwrap()
            .is_none()
    );

    // No lazy cleanup: the expired pair stays in place.
    let stored = h.store.find_by_id(bob.id).await.unwrap().unwrap();
    assert_eq!(stored.autologin_token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn session_loading_prefers_the_session() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    let bob = h
        .autologin
        .remember_me(&bob, TimeDelta::days(30))
        .await
        .unwrap();
    let cookie = bob.autologin_token.clone().expect("autologin token");

    let resolved = h
        .autologin
        .load_current_account(Some(bob.id), Some(&cookie))
        .await
        .unwrap()
        .expect("session resolution");
    assert!(!resolved.promote_to_session);

    // Cookie fallback asks the web adapter to promote to the session.
    let resolved = h
        .autologin
        .load_current_account(None, Some(&cookie))
        .await
        .unwrap()
        .expect("cookie resolution");
    assert!(resolved.promote_to_session);
    assert_eq!(resolved.account.id, bob.id);

    assert!(
        h.autologin
            .load_current_account(None, None)
            .await
            .unwrap()
            .is_none()
    );

    // A stale session id is an error, not an anonymous request.
    let stale = domain::account::AccountId::new(54_151_515);
    assert!(matches!(
        h.autologin.load_current_account(Some(stale), None).await,
        Err(WorkflowError::NotFound)
    ));
}

// ROLES

#[tokio::test]
async fn role_predicates_require_a_session() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    let user = RoleSlug::new("user");

    assert!(h.roles.has_role(Some(&bob), &user));
    assert!(!h.roles.has_role(None, &user));
    assert!(!h.roles.has_role(Some(&bob), &RoleSlug::new("administrator")));

    assert!(h.roles.require_role(Some(&bob), &user).is_ok());
    assert!(matches!(
        h.roles.require_role(None, &user),
        Err(WorkflowError::MissingRole { .. })
    ));
}

#[tokio::test]
async fn replace_roles_replaces_instead_of_merging() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    assert_eq!(bob.roles, slugs(&["user"]));

    let bob = h.admin.update_roles(&bob, &slugs(&[])).await.unwrap();
    assert!(bob.roles.is_empty());

    let bob = h
        .admin
        .update_roles(&bob, &slugs(&["administrator"]))
        .await
        .unwrap();
    assert_eq!(bob.roles, slugs(&["administrator"]));

    let bob = h
        .admin
        .update_roles(&bob, &slugs(&["user", "administrator"]))
        .await
        .unwrap();
    assert_eq!(bob.roles, slugs(&["user", "administrator"]));
}

#[tokio::test]
async fn unknown_role_slugs_are_skipped_silently() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;

    let bob = h
        .roles
        .replace_roles(&bob, &slugs(&["editor", "superuser"]))
        .await
        .unwrap();
    assert_eq!(bob.roles, slugs(&["editor"]));
}

// PROFILE

#[tokio::test]
async fn profile_update_derives_the_slug() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;

    let bob = h
        .profile
        .update_profile(
            &bob,
            ProfileUpdate {
                name: Some("To Łódź pójdź".into()),
                gender: Some(domain::account::Gender::Male),
            },
        )
        .await
        .unwrap();
    assert_eq!(bob.slug, "to-lodz-pojdz");
    assert_eq!(bob.gender, Some(domain::account::Gender::Male));
}

#[tokio::test]
async fn profile_update_is_validated() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;
    h.registration
        .register(RegisterRequest {
            email: "ann@ann.com".into(),
            name: Some("Ann Smith".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let err = h
        .profile
        .update_profile(
            &bob,
            ProfileUpdate {
                name: Some("B".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ProfileNotUpdated(_)));

    let err = h
        .profile
        .update_profile(
            &bob,
            ProfileUpdate {
                name: Some("Ann Smith".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(
        err.violations().is_some_and(|v| v.contains_field("name")),
        "name collision should be a field error"
    );
}

// ADMINISTRATION

#[tokio::test]
async fn admin_can_activate_and_block_despite_blank_profile() {
    let h = harness();
    let (account, _, _) = register(&h, "bob@bob.com").await;

    let account = h
        .admin
        .update_account(
            &account,
            AdminAccountUpdate {
                activated: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(account.activated);
    assert_eq!(account.activated_at, Some(fixed_now()));

    let account = h
        .admin
        .update_account(
            &account,
            AdminAccountUpdate {
                blocked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(account.blocked);
}

#[tokio::test]
async fn admin_password_rules() {
    let h = harness();
    let (bob, password) = register_active(&h, "bob@bob.com").await;

    // Too short.
    let err = h
        .admin
        .update_account(
            &bob,
            AdminAccountUpdate {
                password: Some("123".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UserNotUpdated(_)));

    // Blank means "no change": the old password keeps working.
    h.admin
        .update_account(
            &bob,
            AdminAccountUpdate {
                password: Some("".into()),
                password_confirmation: Some("".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    h.auth.authenticate("bob@bob.com", &password).await.unwrap();

    // A real value replaces the secret.
    h.admin
        .update_account(
            &bob,
            AdminAccountUpdate {
                password: Some("new-passwd".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    h.auth
        .authenticate("bob@bob.com", "new-passwd")
        .await
        .unwrap();
}

#[tokio::test]
async fn admin_name_update_is_validated() {
    let h = harness();
    let (bob, _) = register_active(&h, "bob@bob.com").await;

    let err = h
        .admin
        .update_account(
            &bob,
            AdminAccountUpdate {
                name: Some("xx".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UserNotUpdated(_)));

    let bob = h
        .admin
        .update_account(
            &bob,
            AdminAccountUpdate {
                name: Some("Very Good Bob".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(bob.slug, "very-good-bob");
}
