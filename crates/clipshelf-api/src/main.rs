use clipshelf_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under
// large request bodies, especially on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, metadata, routes)
    let (_state, router) = clipshelf_api::setup::initialize_app(config.clone()).await?;

    clipshelf_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
