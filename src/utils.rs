use std::fs;
use std::path::Path;

use actix_session::Session;
use actix_web::HttpResponse;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

const FLASH_KEY: &str = "flash";

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(provided: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(provided.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash failed to parse: {}", e);
            false
        }
    }
}

/// Stored name for an uploaded document: random prefix plus the sanitized
/// original name, so concurrent submissions never collide or overwrite.
pub fn stored_upload_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let mut safe: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    safe.truncate(100);
    if safe.is_empty() {
        safe.push_str("upload");
    }
    format!("{}_{}", Uuid::new_v4().simple(), safe)
}

/// Copies an upload into place and fsyncs it. The caller inserts the
/// referencing row only after this returns, so a visible row never points at
/// a missing file.
pub fn persist_upload(src: &Path, dest: &Path) -> std::io::Result<()> {
    fs::copy(src, dest)?;
    fs::File::open(dest)?.sync_all()
}

pub fn flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message) {
        log::warn!("Failed to store flash message: {}", e);
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let message = session.get::<String>(FLASH_KEY).ok().flatten();
    session.remove(FLASH_KEY);
    message
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header(("Location", location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn upload_names_never_collide() {
        let a = stored_upload_name("report.pdf");
        let b = stored_upload_name("report.pdf");
        assert_ne!(a, b);
        assert!(a.ends_with("report.pdf"));
    }

    #[test]
    fn upload_names_strip_path_components() {
        let name = stored_upload_name("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(name.ends_with("passwd"));
    }

    #[test]
    fn empty_original_still_gets_a_name() {
        let name = stored_upload_name("");
        assert!(name.ends_with("upload"));
    }
}
