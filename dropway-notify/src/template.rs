use chrono::{DateTime, Utc};

use dropway_domain::Booking;

const NOT_SPECIFIED: &str = "Not specified";

fn format_date(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(dt) => dt.format("%d %b %Y, %I:%M %p UTC").to_string(),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn format_optional(value: &Option<String>) -> String {
    match value.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(v) => v.to_string(),
        None => NOT_SPECIFIED.to_string(),
    }
}

pub fn email_subject(booking: &Booking) -> String {
    format!("New taxi booking from {}", booking.name)
}

/// Fixed HTML template for the operations email.
pub fn email_html(booking: &Booking) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; color: #222;">
    <h2>New Taxi Booking</h2>
    <table cellpadding="6" cellspacing="0" border="1" style="border-collapse: collapse;">
      <tr><td><b>Name</b></td><td>{name}</td></tr>
      <tr><td><b>Mobile</b></td><td>{mobile}</td></tr>
      <tr><td><b>Pick-up location</b></td><td>{pick_up}</td></tr>
      <tr><td><b>Drop-off location</b></td><td>{drop_off}</td></tr>
      <tr><td><b>Pick-up date &amp; time</b></td><td>{pick_up_time}</td></tr>
      <tr><td><b>Return date &amp; time</b></td><td>{return_time}</td></tr>
      <tr><td><b>Car type</b></td><td>{car_type}</td></tr>
      <tr><td><b>Trip type</b></td><td>{trip_type}</td></tr>
    </table>
    <p style="color: #666; font-size: 12px;">Booking {id}, received {created_at}</p>
  </body>
</html>"#,
        name = booking.name,
        mobile = booking.mobile,
        pick_up = booking.pick_up_location,
        drop_off = booking.drop_off_location,
        pick_up_time = format_date(booking.pick_up_date_and_time),
        return_time = format_date(booking.return_date_and_time),
        car_type = format_optional(&booking.car_type),
        trip_type = booking.trip_type,
        id = booking.id,
        created_at = format_date(Some(booking.created_at)),
    )
}

/// Fixed plaintext template for chat messaging.
pub fn message_text(booking: &Booking) -> String {
    format!(
        "New taxi booking\n\
         Name: {name}\n\
         Mobile: {mobile}\n\
         Pick-up: {pick_up}\n\
         Drop-off: {drop_off}\n\
         Pick-up time: {pick_up_time}\n\
         Return time: {return_time}\n\
         Car type: {car_type}\n\
         Trip type: {trip_type}\n\
         Booking id: {id}",
        name = booking.name,
        mobile = booking.mobile,
        pick_up = booking.pick_up_location,
        drop_off = booking.drop_off_location,
        pick_up_time = format_date(booking.pick_up_date_and_time),
        return_time = format_date(booking.return_date_and_time),
        car_type = format_optional(&booking.car_type),
        trip_type = booking.trip_type,
        id = booking.id,
    )
}
