pub const USERS_COLLECTION: &str = "users";
pub const ANNOUNCEMENTS_COLLECTION: &str = "announcements";

pub const FCM_SEND_URL: &str = "https://fcm.googleapis.com/v1/projects";
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

// provider ceiling for a single multicast call
pub const MAX_MULTICAST_TOKENS: usize = 500;

pub const MISSING_FIELDS: &str = "Missing required fields";
