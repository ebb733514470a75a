use mediscan_api::{create_token, Application};
use mediscan_domain::User;
use mediscan_infra::{Config, InMemoryNotifier, MediscanContext, StaticTimeSys};
use std::sync::Arc;

// 2023-05-10T08:30:00Z
pub const NOW: i64 = 1683707400000;

pub struct TestApp {
    pub address: String,
    pub config: Config,
    pub ctx: MediscanContext,
    pub notifier: Arc<InMemoryNotifier>,
    pub sys: Arc<StaticTimeSys>,
    pub client: reqwest::Client,
}

/// A `User` known to the application together with its token
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub async fn create_user(&self, email: &str) -> TestUser {
        let user = User::new(email);
        self.ctx
            .repos
            .users
            .insert(&user)
            .await
            .expect("To insert user");
        let token = create_token(&user.id, &self.config.jwt_secret).expect("To create token");
        TestUser { user, token }
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = MediscanContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.reminder_tick_secs = 1;
    ctx.config.reminder_timezone = chrono_tz::UTC;
    let notifier = Arc::new(InMemoryNotifier::new());
    ctx.notifier = notifier.clone();
    let sys = Arc::new(StaticTimeSys::new(NOW));
    ctx.sys = sys.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        config,
        ctx,
        notifier,
        sys,
        client: reqwest::Client::new(),
    }
}
