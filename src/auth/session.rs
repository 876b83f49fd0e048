use actix_session::Session;
use uuid::Uuid;

use crate::errors::AppError;

const USER_ID: &str = "user_id";
const FLASH: &str = "flash";

pub fn get_user_id(session: &Session) -> Option<Uuid> {
    session.get::<Uuid>(USER_ID).unwrap_or(None)
}

/// Start an authenticated session. The session id is renewed to avoid fixation.
pub fn sign_in(session: &Session, user_id: Uuid) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID, user_id)
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn sign_out(session: &Session) {
    session.purge();
}

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH, message) {
        log::warn!("Failed to store flash message: {}", e);
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}
