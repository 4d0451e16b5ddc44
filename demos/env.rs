use std::io;

use panaccess::{Credentials, PanaccessClient, ServerUrl};
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("panaccess=info")),
        )
        .init();
}

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

/// Build a client from `PANACCESS_SERVERS` (comma-separated),
/// `PANACCESS_USERNAME`, `PANACCESS_PASSWORD` and `PANACCESS_API_TOKEN`.
pub fn client_from_env() -> Result<PanaccessClient, Box<dyn std::error::Error>> {
    let servers = required("PANACCESS_SERVERS")?
        .split(',')
        .filter(|it| !it.trim().is_empty())
        .map(ServerUrl::new)
        .collect::<Result<Vec<_>, _>>()?;
    let credentials = Credentials::new(
        required("PANACCESS_USERNAME")?,
        required("PANACCESS_PASSWORD")?,
        required("PANACCESS_API_TOKEN")?,
    )?;

    Ok(PanaccessClient::builder(credentials)
        .servers(servers)
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("panaccess-demos")
        .build()?)
}
