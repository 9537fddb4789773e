/// Wave Server - track sharing backend
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wave_server::{
    build_state, config::ServerConfig, create_router, services::auth::validate_registration,
    AuthService, JsonStore,
};

#[derive(Parser)]
#[command(name = "wave-server")]
#[command(about = "Wave track sharing server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml", env = "WAVE_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wave_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(&cli.config)?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser { username, password } => add_user(&config, &username, &password).await?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Wave Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = build_state(&config).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: &ServerConfig, username: &str, password: &str) -> anyhow::Result<()> {
    validate_registration(username, password)?;

    let store = JsonStore::open(&config.storage.data_dir).await?;
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_lifetime_days,
        config.auth.bcrypt_cost,
    );

    let hash = auth_service.hash_password(password)?;
    let user = store.create_user(username, hash).await?;

    println!("Created user {} ({})", user.username, user.id);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let store = JsonStore::open(&config.storage.data_dir).await?;
    let users = store.users().await?;

    println!("Users:");
    for record in users {
        let user = record.user;
        println!(
            "  {} - {} ({} tracks)",
            user.id, user.username, user.tracks_count
        );
    }

    Ok(())
}
