use std::env;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DB_CLUSTER: &str = "cluster0.2rl34.mongodb.net";
pub const DEFAULT_DB_NAME: &str = "doctors_portal";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub db_user: String,
    pub db_pass: String,
    pub db_cluster: String,
    pub db_name: String,
    pub mongodb_uri: Option<String>,
    pub access_token_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("PORT value {:?} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            port,
            db_user: env::var("DB_USER")
                .unwrap_or_else(|_| {
                    warn!("DB_USER not set, using empty value");
                    String::new()
                }),
            db_pass: env::var("DB_PASS")
                .unwrap_or_else(|_| {
                    warn!("DB_PASS not set, using empty value");
                    String::new()
                }),
            db_cluster: env::var("DB_CLUSTER")
                .unwrap_or_else(|_| DEFAULT_DB_CLUSTER.to_string()),
            db_name: env::var("DB_NAME")
                .unwrap_or_else(|_| DEFAULT_DB_NAME.to_string()),
            mongodb_uri: env::var("MONGODB_URI").ok().filter(|uri| !uri.is_empty()),
            access_token_secret: env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| {
                    warn!("ACCESS_TOKEN_SECRET not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    /// Connection string for the document database. `MONGODB_URI` wins over
    /// the Atlas URI assembled from the credential variables.
    pub fn mongo_uri(&self) -> String {
        match &self.mongodb_uri {
            Some(uri) => uri.clone(),
            None => format!(
                "mongodb+srv://{}:{}@{}/myFirstDatabase?retryWrites=true&w=majority",
                self.db_user, self.db_pass, self.db_cluster
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        let has_database = self.mongodb_uri.is_some()
            || (!self.db_user.is_empty() && !self.db_pass.is_empty());

        has_database && !self.access_token_secret.is_empty()
    }
}
