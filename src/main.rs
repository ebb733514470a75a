mod telemetry;

use mediscan_api::Application;
use mediscan_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("mediscan".into(), "info".into());
    init_subscriber(subscriber).map_err(std::io::Error::other)?;

    let context = setup_context().await.map_err(std::io::Error::other)?;

    let app = Application::new(context).await?;
    app.start().await
}
