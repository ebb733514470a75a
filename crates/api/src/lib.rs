mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;
mod timeline;
mod vitals;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use error::MediscanError;
pub use job_schedulers::{JobHandle, ReminderDispatcher, VitalsReminderJob};
use mediscan_infra::MediscanContext;
pub use reminder::dispatch_reminders::{DispatchReport, REMINDER_SUBJECT};
pub use shared::auth::create_token;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;
pub use vitals::send_vitals_reminders::VITALS_REMINDER_SUBJECT;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    timeline::configure_routes(cfg);
    vitals::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    jobs: Vec<JobHandle>,
}

impl Application {
    pub async fn new(context: MediscanContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let jobs = Application::start_job_schedulers(context);

        Ok(Self { server, port, jobs })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: MediscanContext) -> Vec<JobHandle> {
        vec![
            ReminderDispatcher::new(context.clone()).start(),
            VitalsReminderJob::new(context).start(),
        ]
    }

    async fn configure_server(context: MediscanContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let ctx = web::Data::new(context);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(ctx.clone())
                // Document text can be long
                .app_data(web::JsonConfig::default().limit(1024 * 1024 * 5))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Runs the server until it shuts down and then stops the jobs
    pub async fn start(self) -> Result<(), std::io::Error> {
        let Self { server, jobs, .. } = self;
        let res = server.await;
        for job in jobs {
            job.stop().await;
        }
        info!("Application stopped");
        res
    }
}
