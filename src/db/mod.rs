pub mod dashboard;
pub mod orders;
pub mod qr;
pub mod services;
pub mod users;

pub(crate) fn utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
