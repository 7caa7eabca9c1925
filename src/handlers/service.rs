//! Service Response Handler
//!
//! Applies results from the background service worker. Saves only report
//! failures; backup and restore results go to the backup dialog.

use crate::logic::errors::error_toast;
use crate::services::ServiceResponse;
use crate::App;

pub fn handle_service_response(app: &mut App, response: ServiceResponse) {
    match response {
        ServiceResponse::AccountsSaved(Ok(())) => {
            tracing::trace!("accounts saved");
        }
        ServiceResponse::AccountsSaved(Err(e)) => {
            tracing::error!("saving accounts failed: {:#}", e);
            app.model.show_toast(error_toast(&e));
        }
        ServiceResponse::SettingsSaved(Ok(())) => {}
        ServiceResponse::SettingsSaved(Err(e)) => {
            tracing::error!("saving backup settings failed: {:#}", e);
            app.model.show_toast(error_toast(&e));
        }
        ServiceResponse::BackupFinished { token, gist_id } => app.handle_backup_finished(token, gist_id),
        ServiceResponse::RestoreFinished(result) => app.handle_restore_finished(result),
    }
}
