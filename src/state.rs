use crate::{auth::services::ensure_admin, config::AppConfig, db, views::Views};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub views: Arc<Views>,
}

impl AppState {
    /// Connects, creates the schema, and seeds the admin account if absent.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        Self::prepare(db, config).await
    }

    pub async fn prepare(db: SqlitePool, config: Arc<AppConfig>) -> anyhow::Result<Self> {
        db::migrate(&db).await?;
        ensure_admin(&db, &config.admin).await?;
        let views = Arc::new(Views::new(config.session.cookie_secure)?);
        Ok(Self { db, config, views })
    }

    #[cfg(test)]
    pub async fn fake() -> Self {
        use crate::config::{AdminSeed, SessionConfig};

        let db = db::connect_in_memory().await.expect("in-memory db");
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            session: SessionConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                cookie_secure: false,
            },
            admin: AdminSeed {
                name: "Admin".into(),
                email: "admin@iitm.ac.in".into(),
                password: "admin123".into(),
            },
        });
        Self::prepare(db, config).await.expect("prepare test state")
    }
}
