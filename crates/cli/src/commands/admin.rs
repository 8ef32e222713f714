//! Admin API probes.

use plumcot_client::config::AdminLogin;

use super::client_from_env;

/// Check that the admin API accepts the configured credential.
pub async fn status() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, client) = client_from_env()?;
    install_credential(&client).await?;

    let status = client.admin_status().await?;
    tracing::info!("Admin API reachable: {status}");

    Ok(())
}

/// Print store-wide counters.
#[allow(clippy::print_stdout)]
pub async fn stats() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, client) = client_from_env()?;
    install_credential(&client).await?;

    let stats = client.admin_stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Install the admin credential from the environment, if configured.
/// Without one the probe still runs; the backend's rejection then shows
/// exactly what an unauthenticated console sees.
async fn install_credential(
    client: &plumcot_client::GatewayClient,
) -> Result<(), Box<dyn std::error::Error>> {
    match AdminLogin::from_env()? {
        Some(login) => {
            client
                .set_admin_credential(&login.username, &login.password)
                .await;
        }
        None => {
            tracing::warn!(
                "PLUMCOT_ADMIN_USER/PLUMCOT_ADMIN_PASSWORD not set; calling unauthenticated"
            );
        }
    }
    Ok(())
}
