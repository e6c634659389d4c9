use log::Level;

/// formsubmit.co AJAX relay that forwards booking inquiries by mail.
pub fn get_form_endpoint() -> &'static str {
    "https://formsubmit.co/ajax/freddyamador@gmail.com"
}

pub const FORM_SUBJECT: &str = "New Booking Inquiry — CHALYMAN";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while running through `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
