//! Shopper identity commands.

use plumcot_client::{SessionState, ShopperSession};

use super::{client_from_env, profile_store};

/// Resolve the current shopper (provisioning a guest when needed) and
/// print the outcome.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = client_from_env()?;
    let session = ShopperSession::new(client, profile_store(&config));

    let identity = session.init().await;

    match identity.id {
        Some(id) => {
            tracing::info!("Shopper #{id}: {}", identity.display_name);
            if let Some(profile) = session.profile().await {
                tracing::info!("  Email: {}", profile.email);
                if let Some(full_name) = &profile.full_name {
                    tracing::info!("  Name: {full_name}");
                }
            }
        }
        None => {
            tracing::warn!(
                "No identity could be resolved; the backend rejected provisioning. \
                 Running anonymously."
            );
        }
    }

    if session.state().await == SessionState::Resolved {
        tracing::info!("Identity remembered at {}", config.profile_path.display());
    }

    Ok(())
}

/// Forget the remembered shopper.
pub async fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = client_from_env()?;
    let session = ShopperSession::new(client, profile_store(&config));

    session.logout().await;
    tracing::info!("Remembered shopper cleared; the next run provisions a fresh guest");

    Ok(())
}
