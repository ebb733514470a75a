mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use repos::{IMedicalEventRepo, IReminderRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct MediscanContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

struct ContextParams {
    pub mongodb_connection_string: String,
    pub mongodb_db_name: String,
}

impl MediscanContext {
    /// Context with inmemory repositories, a real clock and a recording notifier
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryNotifier::new()),
        }
    }

    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_mongodb(
            &params.mongodb_connection_string,
            &params.mongodb_db_name,
        )
        .await?;
        let config = Config::new();
        let notifier = create_notifier(&config)?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        })
    }
}

fn create_notifier(config: &Config) -> anyhow::Result<Arc<dyn INotifier>> {
    match &config.smtp {
        Some(smtp) => Ok(Arc::new(SmtpNotifier::new(smtp)?)),
        None => Ok(Arc::new(LogNotifier {})),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<MediscanContext> {
    const MONGODB_CONNECTION_STRING: &str = "MONGODB_CONNECTION_STRING";
    const MONGODB_NAME: &str = "MONGODB_NAME";

    let connection_string = std::env::var(MONGODB_CONNECTION_STRING);
    let db_name = std::env::var(MONGODB_NAME);

    match (connection_string, db_name) {
        (Ok(mongodb_connection_string), Ok(mongodb_db_name)) => {
            info!("{} and {} env vars was provided. Going to use mongodb.", MONGODB_CONNECTION_STRING, MONGODB_NAME);
            MediscanContext::create(ContextParams {
                mongodb_connection_string,
                mongodb_db_name,
            })
            .await
        }
        _ => {
            warn!("{} and {} env vars was not provided. Going to use inmemory infra. Data is lost on restart.", MONGODB_CONNECTION_STRING, MONGODB_NAME);
            let config = Config::new();
            let notifier = create_notifier(&config)?;
            Ok(MediscanContext {
                repos: Repos::create_inmemory(),
                config,
                sys: Arc::new(RealSys {}),
                notifier,
            })
        }
    }
}
