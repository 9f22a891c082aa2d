//! Member service
//!
//! Adds, renames and removes members of the household group. A member who
//! still appears on any bill cannot be removed, since the balance engine
//! would then reject the whole bill set.

use crate::audit::EntityType;
use crate::error::{BillError, BillResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a member; display names are unique ignoring case
    pub fn add(&self, name: &str, email: Option<&str>) -> BillResult<Member> {
        let name = name.trim();

        if self.storage.members.get_by_name(name)?.is_some() {
            return Err(BillError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            });
        }

        let member = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Member::with_email(name, email),
            None => Member::new(name),
        };
        member
            .validate()
            .map_err(|e| BillError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.display_name.clone()),
            &member,
        )?;

        tracing::info!(member = %member.id, name = %member.display_name, "added member");
        Ok(member)
    }

    pub fn get(&self, id: MemberId) -> BillResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by display name or id
    pub fn find(&self, identifier: &str) -> BillResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }

        if let Ok(id) = identifier.parse::<MemberId>() {
            return self.storage.members.get(id);
        }

        // Short display ids (`mem-1a2b3c4d`) only carry a uuid prefix
        let needle = identifier.trim().to_lowercase();
        if needle.starts_with(MemberId::prefix()) {
            return Ok(self
                .storage
                .members
                .get_all()?
                .into_iter()
                .find(|m| m.id.to_string() == needle));
        }

        Ok(None)
    }

    /// Like [`MemberService::find`] but missing members are an error
    pub fn resolve(&self, identifier: &str) -> BillResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| BillError::member_not_found(identifier.trim()))
    }

    /// All members in join order
    pub fn list(&self) -> BillResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    pub fn rename(&self, id: MemberId, new_name: &str) -> BillResult<Member> {
        let before = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| BillError::member_not_found(id.to_string()))?;

        let new_name = new_name.trim();
        if let Some(other) = self.storage.members.get_by_name(new_name)? {
            if other.id != id {
                return Err(BillError::Duplicate {
                    entity_type: "Member",
                    identifier: new_name.to_string(),
                });
            }
        }

        let mut member = before.clone();
        member.display_name = new_name.to_string();
        member
            .validate()
            .map_err(|e| BillError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_update(
            EntityType::Member,
            member.id.to_string(),
            Some(member.display_name.clone()),
            &before,
            &member,
            None,
        )?;

        Ok(member)
    }

    /// Remove a member who appears on no bill
    pub fn remove(&self, id: MemberId) -> BillResult<Member> {
        let member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| BillError::member_not_found(id.to_string()))?;

        let bill_count = self.storage.bills.get_involving(id)?.len();
        if bill_count > 0 {
            return Err(BillError::MemberInUse {
                member: member.display_name,
                bill_count,
            });
        }

        self.storage.members.delete(id)?;
        self.storage.members.save()?;

        self.storage.log_delete(
            EntityType::Member,
            member.id.to_string(),
            Some(member.display_name.clone()),
            &member,
        )?;

        tracing::info!(member = %member.id, "removed member");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillPaths;
    use crate::models::{Bill, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_member() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let member = service.add(" Beth ", Some("beth@example.com")).unwrap();

        assert_eq!(member.display_name, "Beth");
        assert_eq!(member.email.as_deref(), Some("beth@example.com"));
        assert_eq!(service.list().unwrap(), vec![member]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        service.add("Beth", None).unwrap();

        assert!(matches!(
            service.add("BETH", None),
            Err(BillError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        assert!(service.add("", None).unwrap_err().is_validation());
        assert!(service.add(&"x".repeat(51), None).unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let member = service.add("Ravi", None).unwrap();

        assert_eq!(service.find("ravi").unwrap().unwrap().id, member.id);
        assert_eq!(
            service.find(&member.id.to_full_string()).unwrap().unwrap().id,
            member.id
        );
        assert_eq!(
            service.find(&member.id.to_string()).unwrap().unwrap().id,
            member.id
        );
        assert!(service.find("nobody").unwrap().is_none());
        assert!(service.resolve("nobody").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let member = service.add("Jo", None).unwrap();
        service.add("Kim", None).unwrap();

        let renamed = service.rename(member.id, "Joanna").unwrap();
        assert_eq!(renamed.display_name, "Joanna");
        assert!(service.find("Jo").unwrap().is_none());

        // Changing only the case of your own name is fine
        assert!(service.rename(member.id, "JOANNA").is_ok());
        assert!(matches!(
            service.rename(member.id, "kim"),
            Err(BillError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_remove_unused_member() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let member = service.add("Temp", None).unwrap();

        service.remove(member.id).unwrap();

        assert!(service.list().unwrap().is_empty());
        assert!(service.remove(member.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_member_with_bills_refused() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let a = service.add("A", None).unwrap();
        let b = service.add("B", None).unwrap();
        storage
            .bills
            .upsert(Bill::new("Dinner", Money::from_cents(2000), a.id, vec![b.id]))
            .unwrap();

        match service.remove(b.id) {
            Err(BillError::MemberInUse { member, bill_count }) => {
                assert_eq!(member, "B");
                assert_eq!(bill_count, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(service.list().unwrap().len(), 2);
    }
}
