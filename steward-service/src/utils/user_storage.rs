// steward-service/src/utils/user_storage.rs
use crate::models::{Role, ServiceError, User};
use crate::utils::store::DataStore;
use log::error;
use uuid::Uuid;

impl DataStore {
    pub fn save_user(&self, user: &User) -> Result<(), ServiceError> {
        self.write_record(&self.users_dir(), &user.id, user)
    }

    // Email comparison is case-insensitive
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let wanted = email.trim().to_lowercase();
        Ok(self
            .read_all::<User>(&self.users_dir())?
            .into_iter()
            .find(|user| user.email.to_lowercase() == wanted))
    }

    pub fn find_user_by_id(&self, id: &Uuid) -> Result<Option<User>, ServiceError> {
        self.read_record(&self.users_dir(), id)
    }

    pub fn list_users_for_tenant(&self, tenant_id: &Uuid) -> Result<Vec<User>, ServiceError> {
        let mut users: Vec<User> = self
            .read_all::<User>(&self.users_dir())?
            .into_iter()
            .filter(|user| user.tenant_id == *tenant_id)
            .collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
        Ok(users)
    }

    pub fn tenant_has_users(&self, tenant_id: &Uuid) -> Result<bool, ServiceError> {
        Ok(!self.list_users_for_tenant(tenant_id)?.is_empty())
    }

    /// Store a newly registered user.
    ///
    /// Email uniqueness and the role are decided while holding the users lock:
    /// the first user of a tenant becomes its admin, later ones start as staff.
    pub fn register_user(&self, mut user: User) -> Result<User, ServiceError> {
        let _guard = self.users_lock().lock().map_err(|_| {
            error!("❌ Users lock poisoned");
            ServiceError::InternalServerError
        })?;

        if self.find_user_by_email(&user.email)?.is_some() {
            return Err(ServiceError::Conflict("Email already registered".to_string()));
        }

        user.role = if self.tenant_has_users(&user.tenant_id)? {
            Role::Staff
        } else {
            Role::Admin
        };
        self.save_user(&user)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::store::TempStore;
    use chrono::Utc;
    use std::thread;

    fn new_user(tenant_id: Uuid, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            tenant_id,
            email: email.to_string(),
            display_name: None,
            password_hash: String::new(),
            role: Role::Staff,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn first_user_of_tenant_is_admin() {
        let store = TempStore::new("steward-users");
        let tenant_id = Uuid::new_v4();

        let first = store.register_user(new_user(tenant_id, "rector@gracechurch.org")).unwrap();
        let second = store.register_user(new_user(tenant_id, "sexton@gracechurch.org")).unwrap();
        let elsewhere = store.register_user(new_user(Uuid::new_v4(), "vicar@stmarks.org")).unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::Staff);
        assert_eq!(elsewhere.role, Role::Admin);
        assert!(matches!(
            store.register_user(new_user(tenant_id, "RECTOR@gracechurch.org")),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn simultaneous_registrations_yield_one_admin() {
        let store = TempStore::new("steward-users");
        let tenant_id = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = DataStore::clone(&store);
                let email = format!("usher{}@gracechurch.org", n);
                thread::spawn(move || store.register_user(new_user(tenant_id, &email)))
            })
            .collect();
        let users: Vec<User> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();

        assert_eq!(users.iter().filter(|user| user.role == Role::Admin).count(), 1);
        assert_eq!(store.list_users_for_tenant(&tenant_id).unwrap().len(), 8);
    }

    #[test]
    fn simultaneous_registrations_of_one_email_keep_one() {
        let store = TempStore::new("steward-users");
        let tenant_id = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = DataStore::clone(&store);
                thread::spawn(move || store.register_user(new_user(tenant_id, "organist@gracechurch.org")))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|result| result.is_ok())
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(store.list_users_for_tenant(&tenant_id).unwrap().len(), 1);
    }
}
