//! Booking inspection and management commands.

use chrono::NaiveDate;
use staybook_backoffice::coordinator::{BookingCoordinator, BookingForm};
use staybook_core::BookingId;

use super::{CliError, print_json, stay_client};

/// List one page of bookings, newest first.
pub async fn list(page: u32) -> Result<(), CliError> {
    let coordinator = BookingCoordinator::new(stay_client().await?);
    let bookings = coordinator.list(page).await?;
    tracing::info!("Fetched {} bookings (page {})", bookings.len(), page);
    print_json(&bookings)
}

/// Show one booking as JSON.
pub async fn get(id: i64) -> Result<(), CliError> {
    let client = stay_client().await?;
    let booking = client.get_booking(BookingId::new(id)).await?;
    print_json(&booking)
}

/// Price a draft booking without creating it.
pub async fn quote(room: i64, check_in: &str, check_out: &str) -> Result<(), CliError> {
    let coordinator = BookingCoordinator::new(stay_client().await?);

    let form = BookingForm {
        room_id: room,
        check_in: Some(parse_date(check_in)?),
        check_out: Some(parse_date(check_out)?),
        ..BookingForm::add()
    };

    match coordinator.quote(&form).await? {
        Some(quote) => print_json(&quote),
        None => {
            tracing::warn!("Draft is not priceable (check the ids and date range)");
            Ok(())
        }
    }
}

/// Delete a booking.
pub async fn delete(id: i64) -> Result<(), CliError> {
    let client = stay_client().await?;
    client.delete_booking(BookingId::new(id)).await?;
    tracing::info!("Deleted booking {id}");
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArgument(format!("'{value}' is not a YYYY-MM-DD date")))
}
