//! Room inspection and management commands.

use staybook_core::RoomId;

use super::{CliError, print_json, stay_client};

/// List one page of rooms.
pub async fn list(page: u32) -> Result<(), CliError> {
    let client = stay_client().await?;
    let rooms = client.list_rooms(page).await?;
    tracing::info!("Fetched {} rooms (page {})", rooms.len(), page);
    print_json(&rooms)
}

/// Show one room as JSON.
pub async fn get(id: i64) -> Result<(), CliError> {
    let client = stay_client().await?;
    let room = client.get_room(RoomId::new(id)).await?;
    print_json(&room)
}

/// Delete a room.
pub async fn delete(id: i64) -> Result<(), CliError> {
    let client = stay_client().await?;
    client.delete_room(RoomId::new(id)).await?;
    tracing::info!("Deleted room {id}");
    Ok(())
}
