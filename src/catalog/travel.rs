pub const TRIP_TYPES: &[&str] = &["One Way", "Round Trip", "Multi-City"];
pub const DESTINATION_TYPES: &[&str] = &["Local", "International"];
pub const FLIGHT_CLASSES: &[&str] = &["Economy", "Business Class", "First Class"];

pub const MAX_PASSENGERS: u32 = 9;

/// Where the booked ticket is delivered
pub const TICKET_DELIVERY: &[&str] = &["Available in App (Virtual Ticket)", "Sent to Email"];
