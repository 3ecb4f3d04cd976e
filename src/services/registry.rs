use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::User;

/// In-memory directory of users known to this process
///
/// Nothing is persisted; a restart starts from an empty registry.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<Uuid, Arc<User>>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: Uuid) -> Option<Arc<User>> {
        self.users.read().get(&user_id).cloned()
    }

    /// Fetch a user, registering them under `user_name` if unknown
    pub fn get_or_create(&self, user_id: Uuid, user_name: &str) -> Arc<User> {
        if let Some(user) = self.get(user_id) {
            return user;
        }
        let mut users = self.users.write();
        Arc::clone(
            users
                .entry(user_id)
                .or_insert_with(|| Arc::new(User::new(user_id, user_name))),
        )
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
