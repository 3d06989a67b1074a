#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    service_log_server::run().await
}
