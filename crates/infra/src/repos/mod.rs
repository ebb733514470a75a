mod medical_event;
mod reminder;
mod shared;
mod user;

pub use medical_event::IMedicalEventRepo;
use medical_event::{InMemoryMedicalEventRepo, MongoMedicalEventRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, MongoReminderRepo};
pub use user::IUserRepo;
use user::{InMemoryUserRepo, MongoUserRepo};

use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub medical_events: Arc<dyn IMedicalEventRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.run_command(mongodb::bson::doc! { "ping": 1 }, None)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(MongoUserRepo::new(&db)),
            reminders: Arc::new(MongoReminderRepo::new(&db)),
            medical_events: Arc::new(MongoMedicalEventRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            medical_events: Arc::new(InMemoryMedicalEventRepo::new()),
        }
    }
}
