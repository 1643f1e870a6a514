use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        password::{hash_password, verify_password},
        repo_types::{NewUser, Role, User},
    },
    config::AdminSeed,
    error::AppError,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

lazy_static! {
    /// Stand-in digest checked when no account matches the email.
    static ref UNKNOWN_USER_DIGEST: String =
        hash_password("placement-portal-unknown-user").unwrap_or_default();
}

/// Verifies `password` against the user's digest, or against a stand-in
/// digest when there is no user, so both paths pay for one Argon2 run.
fn password_matches(user: Option<&User>, password: &str) -> Result<bool, AppError> {
    match user {
        Some(user) => Ok(verify_password(password, &user.password_hash)?),
        None => {
            let _ = verify_password(password, &UNKNOWN_USER_DIGEST);
            Ok(false)
        }
    }
}

/// Checks credentials and the company approval gate.
///
/// Unknown email and wrong password both yield `InvalidCredentials`.
/// A company whose account is not yet approved gets `NotApproved` even with
/// the right password. The `active` flag is not consulted.
pub async fn login(db: &SqlitePool, form: &LoginForm) -> Result<User, AppError> {
    let email = form.email.trim();

    let found = User::find_by_email(db, email).await?;
    let matches = password_matches(found.as_ref(), &form.password)?;
    let Some(user) = found else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };
    if !matches {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    if user.role == Role::Company && !user.approved {
        warn!(user_id = user.id, "login by unapproved company");
        return Err(AppError::NotApproved);
    }

    info!(user_id = user.id, role = %user.role, "user logged in");
    Ok(user)
}

/// Creates a student or company account. Never creates admins.
pub async fn register(db: &SqlitePool, form: &RegisterForm) -> Result<User, AppError> {
    let role: Role = form.role.trim().parse()?;
    if role == Role::Admin {
        warn!("admin self-registration refused");
        return Err(AppError::AdminRoleForbidden);
    }

    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || form.password.is_empty() {
        return Err(AppError::MissingFields);
    }
    if !is_valid_email(email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::InvalidEmail);
    }

    if User::find_by_email(db, email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::EmailTaken);
    }

    let hash = hash_password(&form.password)?;
    let new = NewUser {
        name,
        email,
        password_hash: &hash,
        role,
        approved: role.approved_on_registration(),
    };
    let user = match User::create(db, &new).await {
        Ok(u) => u,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(email = %email, "email taken by concurrent registration");
            return Err(AppError::EmailTaken);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, role = %user.role, approved = user.approved, "user registered");
    Ok(user)
}

/// Seeds the admin account if none exists. Returns true when one was created.
pub async fn ensure_admin(db: &SqlitePool, seed: &AdminSeed) -> anyhow::Result<bool> {
    if let Some(admin) = User::find_admin(db).await.context("look up admin")? {
        info!(user_id = admin.id, "admin account present");
        return Ok(false);
    }

    let hash = hash_password(&seed.password)?;
    let admin = User::create(
        db,
        &NewUser {
            name: &seed.name,
            email: &seed.email,
            password_hash: &hash,
            role: Role::Admin,
            approved: true,
        },
    )
    .await
    .with_context(|| format!("seed admin account {}", seed.email))?;

    info!(user_id = admin.id, email = %admin.email, "admin account seeded");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn reg(name: &str, email: &str, role: &str) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            email: email.into(),
            password: "pa55word".into(),
            role: role.into(),
        }
    }

    fn creds(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ann@uni.edu"));
        assert!(!is_valid_email("ann"));
        assert!(!is_valid_email("ann@uni"));
        assert!(!is_valid_email("a nn@uni.edu"));
    }

    #[tokio::test]
    async fn admin_registration_is_refused_and_creates_nothing() {
        let state = AppState::fake().await;
        let before = User::count_all(&state.db).await.unwrap();

        let err = register(&state.db, &reg("Eve", "eve@x.com", "admin"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AdminRoleForbidden));
        assert_eq!(User::count_all(&state.db).await.unwrap(), before);
        assert!(User::find_by_email(&state.db, "eve@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_refused_and_first_row_untouched() {
        let state = AppState::fake().await;
        let first = register(&state.db, &reg("Ann", "ann@uni.edu", "student"))
            .await
            .unwrap();

        let err = register(&state.db, &reg("Mallory", "ann@uni.edu", "company"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));

        let stored = User::find_by_email(&state.db, "ann@uni.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.name, "Ann");
        assert_eq!(stored.role, Role::Student);
        assert_eq!(stored.password_hash, first.password_hash);
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let state = AppState::fake().await;
        register(&state.db, &reg("Ann", "ann@uni.edu", "student")).await.unwrap();
        assert!(register(&state.db, &reg("Ann2", "Ann@uni.edu", "student"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn approval_defaults_by_role() {
        let state = AppState::fake().await;
        let student = register(&state.db, &reg("Ann", "ann@uni.edu", "student"))
            .await
            .unwrap();
        let company = register(&state.db, &reg("Acme", "hr@acme.com", "company"))
            .await
            .unwrap();
        assert!(student.approved);
        assert!(!company.approved);
        assert!(student.active && company.active);
        assert_ne!(student.password_hash, "pa55word");
    }

    #[tokio::test]
    async fn invalid_inputs_are_refused() {
        let state = AppState::fake().await;
        assert!(matches!(
            register(&state.db, &reg("X", "x@y.com", "recruiter")).await,
            Err(AppError::InvalidRole)
        ));
        assert!(matches!(
            register(&state.db, &reg("", "x@y.com", "student")).await,
            Err(AppError::MissingFields)
        ));
        assert!(matches!(
            register(&state.db, &reg("X", "not-an-email", "student")).await,
            Err(AppError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn unapproved_company_cannot_log_in_until_approved() {
        let state = AppState::fake().await;
        let company = register(&state.db, &reg("Acme", "hr@acme.com", "company"))
            .await
            .unwrap();

        let err = login(&state.db, &creds("hr@acme.com", "pa55word"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotApproved));

        User::approve_company(&state.db, company.id).await.unwrap();
        let user = login(&state.db, &creds("hr@acme.com", "pa55word")).await.unwrap();
        assert_eq!(user.id, company.id);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let state = AppState::fake().await;
        register(&state.db, &reg("Ann", "ann@uni.edu", "student")).await.unwrap();

        let a = login(&state.db, &creds("nobody@uni.edu", "pa55word")).await.unwrap_err();
        let b = login(&state.db, &creds("ann@uni.edu", "wrong")).await.unwrap_err();
        assert!(matches!(a, AppError::InvalidCredentials));
        assert!(matches!(b, AppError::InvalidCredentials));
        assert_eq!(a.flash(), b.flash());
    }

    #[test]
    fn unknown_user_is_checked_against_a_real_digest() {
        assert!(UNKNOWN_USER_DIGEST.starts_with("$argon2"));
        assert!(!verify_password("pa55word", &UNKNOWN_USER_DIGEST).unwrap());
        assert!(!password_matches(None, "pa55word").unwrap());
        assert!(!password_matches(None, "placement-portal-unknown-user").unwrap());
    }

    #[tokio::test]
    async fn unknown_email_costs_about_as_much_as_wrong_password() {
        let state = AppState::fake().await;
        register(&state.db, &reg("Ann", "ann@uni.edu", "student")).await.unwrap();
        lazy_static::initialize(&UNKNOWN_USER_DIGEST);

        let start = std::time::Instant::now();
        for _ in 0..5 {
            login(&state.db, &creds("nobody@uni.edu", "pa55word")).await.unwrap_err();
        }
        let unknown = start.elapsed();

        let start = std::time::Instant::now();
        for _ in 0..5 {
            login(&state.db, &creds("ann@uni.edu", "wrong")).await.unwrap_err();
        }
        let wrong = start.elapsed();

        // same order of magnitude; a skipped hash is tens of times faster
        assert!(unknown * 4 >= wrong, "unknown={:?} wrong={:?}", unknown, wrong);
    }

    #[tokio::test]
    async fn student_logs_in_without_admin_action() {
        let state = AppState::fake().await;
        register(&state.db, &reg("Ann", "ann@uni.edu", "student")).await.unwrap();
        let user = login(&state.db, &creds(" ann@uni.edu ", "pa55word")).await.unwrap();
        assert_eq!(user.role, Role::Student);
    }

    #[tokio::test]
    async fn admin_seed_runs_once() {
        let state = AppState::fake().await;
        // fake() already seeded
        assert!(!ensure_admin(&state.db, &state.config.admin).await.unwrap());
        assert_eq!(User::count_by_role(&state.db, Role::Admin).await.unwrap(), 1);

        let admin = User::find_admin(&state.db).await.unwrap().unwrap();
        assert!(admin.approved);
        assert_eq!(admin.email, state.config.admin.email);
    }
}
