use kernel::id::Id;

pub struct UserMarker;

/// Store-assigned user identifier (UUID v4)
pub type UserId = Id<UserMarker>;
