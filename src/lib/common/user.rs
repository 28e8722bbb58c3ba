use crate::common::{
    Announcement, NotifyError, UserDevice, ANNOUNCEMENTS_COLLECTION, USERS_COLLECTION,
};
use async_trait::async_trait;
use firestore::FirestoreDb;
use futures::TryStreamExt;
use log::debug;

/// Read side of the document store used by the announcement fan-out.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Every registered device token, in scan order. Users without one are skipped.
    async fn list_device_tokens(&self) -> Result<Vec<String>, NotifyError>;

    async fn get_announcement(&self, id: &str) -> Result<Option<Announcement>, NotifyError>;
}

#[derive(Clone)]
pub struct FirestoreDirectory {
    db: FirestoreDb,
}

impl FirestoreDirectory {
    pub fn new(db: FirestoreDb) -> Self {
        FirestoreDirectory { db }
    }
}

#[async_trait]
impl Directory for FirestoreDirectory {
    async fn list_device_tokens(&self) -> Result<Vec<String>, NotifyError> {
        let users_stream = self
            .db
            .fluent()
            .list()
            .from(USERS_COLLECTION)
            .obj()
            .stream_all_with_errors()
            .await?;

        let users: Vec<UserDevice> = users_stream.try_collect().await?;
        let tokens = collect_tokens(users);
        debug!("found {} device tokens", tokens.len());
        Ok(tokens)
    }

    async fn get_announcement(&self, id: &str) -> Result<Option<Announcement>, NotifyError> {
        let announcement = self
            .db
            .fluent()
            .select()
            .by_id_in(ANNOUNCEMENTS_COLLECTION)
            .obj()
            .one(id)
            .await?;

        Ok(announcement)
    }
}

pub fn collect_tokens<I: IntoIterator<Item = UserDevice>>(users: I) -> Vec<String> {
    users
        .into_iter()
        .filter_map(|u| u.fcm_token)
        .filter(|t| !t.is_empty())
        .collect()
}
