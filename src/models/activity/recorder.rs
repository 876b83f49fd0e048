use crate::store::{Owner, RecordStore};
use super::types::NewActivity;

/// Best-effort activity write. A failure is logged and swallowed so the
/// record operation that triggered it still succeeds.
pub async fn record(
    store: &dyn RecordStore,
    owner: &Owner,
    activity_type: &str,
    title: String,
    description: Option<String>,
) {
    let new = NewActivity {
        company: owner.company.clone(),
        activity_type: activity_type.to_string(),
        title,
        description,
        assigned_to: Some(owner.user_id),
    };
    if let Err(e) = store.record_activity(&new).await {
        log::warn!("Failed to record {activity_type} activity: {e}");
    }
}
