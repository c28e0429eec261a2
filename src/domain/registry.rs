//! Pending categories and their members
//!
//! A category is created the first time something is added to it and stays
//! pending until it is either merged into an explicitly registered task of
//! the same name or drained by finalization.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CategoryError {
    #[error("Cannot add '{member}' to category '{category}', because a task with the name of the category already exists")]
    NamingConflict { category: String, member: String },
}

/// Category name to member list mapping, plus the names already registered as tasks
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    /// Members per pending category, in first-added order
    members: HashMap<String, Vec<String>>,

    /// Pending category names in creation order
    order: Vec<String>,

    /// Names that have been registered as real tasks
    registered: HashSet<String>,
}

impl CategoryRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `member` to `category`, creating the category if needed
    ///
    /// Returns `Ok(true)` if the member was added, `Ok(false)` if it was
    /// already part of the category.
    pub fn add_member(&mut self, category: &str, member: &str) -> Result<bool, CategoryError> {
        self.check_category(category, member)?;

        match self.members.get_mut(category) {
            Some(members) => {
                if members.iter().any(|m| m == member) {
                    return Ok(false);
                }
                members.push(member.to_string());
            }
            None => {
                self.members
                    .insert(category.to_string(), vec![member.to_string()]);
                self.order.push(category.to_string());
            }
        }

        Ok(true)
    }

    /// Fails if `category` is already registered as a task
    pub fn check_category(&self, category: &str, member: &str) -> Result<(), CategoryError> {
        if self.registered.contains(category) {
            return Err(CategoryError::NamingConflict {
                category: category.to_string(),
                member: member.to_string(),
            });
        }
        Ok(())
    }

    /// Removes a pending category and returns its members
    pub fn take_pending_members(&mut self, category: &str) -> Option<Vec<String>> {
        let members = self.members.remove(category)?;
        self.order.retain(|name| name != category);
        Some(members)
    }

    /// Returns pending category names in creation order
    pub fn pending_categories(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Returns the members of a pending category
    pub fn members(&self, category: &str) -> Option<&[String]> {
        self.members.get(category).map(Vec::as_slice)
    }

    /// Returns true if `name` is a pending category
    pub fn is_pending(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Records `name` as a registered task
    ///
    /// Returns false if it was already recorded.
    pub fn mark_registered(&mut self, name: &str) -> bool {
        self.registered.insert(name.to_string())
    }

    /// Returns true if `name` has been registered as a task
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    /// Removes every pending category, returning them in creation order
    pub fn drain(&mut self) -> Vec<(String, Vec<String>)> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|name| {
                let members = self.members.remove(&name)?;
                Some((name, members))
            })
            .collect()
    }

    /// Returns the number of pending categories
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no categories are pending
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry() {
        let registry = CategoryRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.pending_categories().is_empty());
    }

    #[test]
    fn add_member_is_idempotent() {
        let mut registry = CategoryRegistry::new();

        assert_eq!(registry.add_member("a", "a:b"), Ok(true));
        assert_eq!(registry.add_member("a", "a:b"), Ok(false));
        assert_eq!(registry.members("a").unwrap().len(), 1);
    }

    #[test]
    fn members_keep_insertion_order() {
        let mut registry = CategoryRegistry::new();
        registry.add_member("a", "a:z").unwrap();
        registry.add_member("a", "a:b").unwrap();
        registry.add_member("a", "a:m").unwrap();

        assert_eq!(registry.members("a").unwrap(), ["a:z", "a:b", "a:m"]);
    }

    #[test]
    fn pending_categories_keep_creation_order() {
        let mut registry = CategoryRegistry::new();
        registry.add_member("css", "css:min").unwrap();
        registry.add_member("js", "js:lint").unwrap();
        registry.add_member("css", "css:lint").unwrap();

        assert_eq!(registry.pending_categories(), vec!["css", "js"]);
    }

    #[test]
    fn registered_name_cannot_become_category() {
        let mut registry = CategoryRegistry::new();
        registry.mark_registered("a");

        let result = registry.add_member("a", "a:e");
        assert_eq!(
            result,
            Err(CategoryError::NamingConflict {
                category: "a".to_string(),
                member: "a:e".to_string(),
            })
        );
        assert!(!registry.is_pending("a"));
    }

    #[test]
    fn conflict_message_names_both_sides() {
        let err = CategoryError::NamingConflict {
            category: "a".to_string(),
            member: "a:e".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'a:e'"));
        assert!(message.contains("category 'a'"));
    }

    #[test]
    fn take_pending_members_removes_category() {
        let mut registry = CategoryRegistry::new();
        registry.add_member("a", "a:b").unwrap();
        registry.add_member("x", "x:y").unwrap();

        assert_eq!(
            registry.take_pending_members("a"),
            Some(vec!["a:b".to_string()])
        );
        assert!(!registry.is_pending("a"));
        assert_eq!(registry.pending_categories(), vec!["x"]);
        assert_eq!(registry.take_pending_members("a"), None);
    }

    #[test]
    fn drain_empties_registry_in_order() {
        let mut registry = CategoryRegistry::new();
        registry.add_member("b", "b:1").unwrap();
        registry.add_member("a", "a:1").unwrap();
        registry.add_member("b", "b:2").unwrap();

        let drained = registry.drain();
        assert_eq!(
            drained,
            vec![
                ("b".to_string(), vec!["b:1".to_string(), "b:2".to_string()]),
                ("a".to_string(), vec!["a:1".to_string()]),
            ]
        );
        assert!(registry.is_empty());
        assert!(registry.drain().is_empty());
    }

    #[test]
    fn mark_registered_reports_repeats() {
        let mut registry = CategoryRegistry::new();
        assert!(registry.mark_registered("a"));
        assert!(!registry.mark_registered("a"));
        assert!(registry.is_registered("a"));
        assert!(!registry.is_registered("b"));
    }
}
