//! Backend entry-point: wires REST endpoints, health probes, and OpenAPI docs.

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use nagrik_backend::inbound::http::health::HealthState;
use nagrik_backend::server::{create_server, ServerConfig};

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "nagrik-backend", about = "Civic-issue reporting backend")]
struct Cli {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind: std::net::SocketAddr,

    /// Path to the JWT signing secret.
    #[arg(long, env = "JWT_SECRET_FILE", default_value = "/var/run/secrets/jwt_secret")]
    jwt_secret_file: String,

    /// Allow an ephemeral signing secret when the secret file is missing.
    /// Tokens then become invalid on restart; suitable for development only.
    #[arg(long, env = "JWT_ALLOW_EPHEMERAL", default_value_t = false)]
    allow_ephemeral_secret: bool,

    /// One-time code accepted by the mock Aadhaar verifier.
    #[arg(long, env = "VERIFICATION_OTP", default_value = "123456")]
    otp_code: String,
}

fn load_jwt_secret(cli: &Cli) -> std::io::Result<Vec<u8>> {
    match std::fs::read(&cli.jwt_secret_file) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            if cfg!(debug_assertions) || cli.allow_ephemeral_secret {
                warn!(
                    path = %cli.jwt_secret_file,
                    error = %e,
                    "using ephemeral JWT secret (dev only)"
                );
                Ok(uuid::Uuid::new_v4().as_bytes().to_vec())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read JWT secret at {}: {e}",
                    cli.jwt_secret_file
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let jwt_secret = load_jwt_secret(&cli)?;
    let config = ServerConfig::new(cli.bind, jwt_secret, cli.otp_code);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
