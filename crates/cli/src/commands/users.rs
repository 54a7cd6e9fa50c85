//! User account inspection and management commands.

use staybook_backoffice::coordinator::{UserCoordinator, UserForm};
use staybook_core::UserId;

use super::{CliError, print_json, stay_client};

/// List all user accounts.
pub async fn list() -> Result<(), CliError> {
    let client = stay_client().await?;
    let users = client.list_users().await?;
    tracing::info!("Fetched {} users", users.len());
    print_json(&users)
}

/// Create a user account through the same form validation the service uses.
pub async fn create(
    name: String,
    email: String,
    password: String,
    role: &str,
) -> Result<(), CliError> {
    let role = role
        .parse()
        .map_err(|e: staybook_core::UnknownRole| CliError::InvalidArgument(e.to_string()))?;

    let form = UserForm {
        name,
        email,
        password,
        role,
        ..UserForm::add()
    };

    let coordinator = UserCoordinator::new(stay_client().await?);
    let user = coordinator.submit(&form).await?;
    tracing::info!("Created user {}", user.id);
    print_json(&user)
}

/// Show one account as JSON.
pub async fn get(id: i64) -> Result<(), CliError> {
    let client = stay_client().await?;
    let user = client.get_user(UserId::new(id)).await?;
    print_json(&user)
}

/// Delete an account.
pub async fn delete(id: i64) -> Result<(), CliError> {
    let client = stay_client().await?;
    client.delete_user(UserId::new(id)).await?;
    tracing::info!("Deleted user {id}");
    Ok(())
}
