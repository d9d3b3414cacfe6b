//! Focus and selection groups.
//!
//! A [`FocusGroup`] is an ordered set of member controls with at most one
//! selected at a time. Groups provide cyclic traversal (`next` wraps from
//! the last member to the first) and exclusive selection, and announce
//! selection changes on a signal.
//!
//! Groups are looked up by name through [`FocusGroups`], so controls built
//! independently can join the same group by agreeing on a key.

use std::collections::HashMap;
use std::fmt;

use keel_core::Signal;
use keel_core::logging::targets;

/// Errors from group operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// No group is registered under this name.
    UnknownGroup(String),
    /// The member ID is not in the group.
    UnknownMember(i32),
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::UnknownGroup(name) => write!(f, "unknown group: {name}"),
            GroupError::UnknownMember(id) => write!(f, "unknown group member: {id}"),
        }
    }
}

impl std::error::Error for GroupError {}

/// Index of the member after `from` in a cyclic order of `count` members.
pub(crate) fn cycle_next(count: usize, from: usize) -> usize {
    if count == 0 { 0 } else { (from + 1) % count }
}

/// Index of the member before `from` in a cyclic order of `count` members.
pub(crate) fn cycle_previous(count: usize, from: usize) -> usize {
    if count == 0 {
        0
    } else {
        (from + count - 1) % count
    }
}

/// An ordered set of members with exclusive selection and cyclic traversal.
pub struct FocusGroup {
    name: String,
    members: Vec<i32>,
    selected: Option<i32>,
    next_auto_id: i32,

    /// Signal emitted with the member ID when the selection changes.
    pub selection_changed: Signal<i32>,
}

impl fmt::Debug for FocusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusGroup")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("selected", &self.selected)
            .field("next_auto_id", &self.next_auto_id)
            .finish_non_exhaustive()
    }
}

impl FocusGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            selected: None,
            next_auto_id: 0,
            selection_changed: Signal::new(),
        }
    }

    /// The group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member IDs in traversal order.
    pub fn members(&self) -> &[i32] {
        &self.members
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The currently selected member, if any.
    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    /// Add a member at the end with an automatically assigned ID.
    pub fn add_member(&mut self) -> i32 {
        // Skip past any explicitly assigned IDs.
        while self.members.contains(&self.next_auto_id) {
            self.next_auto_id += 1;
        }
        let id = self.next_auto_id;
        self.next_auto_id += 1;
        self.members.push(id);
        id
    }

    /// Add a member at the end with a caller-chosen ID.
    ///
    /// Re-adding an existing ID is a no-op.
    pub fn add_member_with_id(&mut self, id: i32) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Remove a member. If it was selected, the group ends up with no
    /// selection. Returns `true` if the member existed.
    pub fn remove_member(&mut self, id: i32) -> bool {
        let Some(index) = self.members.iter().position(|&m| m == id) else {
            return false;
        };
        self.members.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    fn index_of(&self, id: i32) -> Result<usize, GroupError> {
        self.members
            .iter()
            .position(|&m| m == id)
            .ok_or(GroupError::UnknownMember(id))
    }

    /// The member after `from`, wrapping from the last to the first.
    pub fn next(&self, from: i32) -> Result<i32, GroupError> {
        let index = self.index_of(from)?;
        Ok(self.members[cycle_next(self.members.len(), index)])
    }

    /// The member before `from`, wrapping from the first to the last.
    pub fn previous(&self, from: i32) -> Result<i32, GroupError> {
        let index = self.index_of(from)?;
        Ok(self.members[cycle_previous(self.members.len(), index)])
    }

    /// Select a member, deselecting whichever was selected before.
    ///
    /// Selecting the already-selected member changes nothing and emits
    /// nothing.
    pub fn select_exclusive(&mut self, id: i32) -> Result<(), GroupError> {
        self.index_of(id)?;
        if self.selected == Some(id) {
            return Ok(());
        }
        self.selected = Some(id);
        tracing::debug!(target: targets::FOCUS, group = %self.name, member = id, "selection changed");
        self.selection_changed.emit(id);
        Ok(())
    }

    /// Clear the selection. Emits nothing.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

/// Registry of named groups.
#[derive(Default)]
pub struct FocusGroups {
    groups: HashMap<String, FocusGroup>,
}

impl FocusGroups {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the group with this name, creating it if absent.
    pub fn group_mut(&mut self, name: &str) -> &mut FocusGroup {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| FocusGroup::new(name))
    }

    /// Get an existing group.
    pub fn get(&self, name: &str) -> Result<&FocusGroup, GroupError> {
        self.groups
            .get(name)
            .ok_or_else(|| GroupError::UnknownGroup(name.to_string()))
    }

    /// Get an existing group mutably.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut FocusGroup, GroupError> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| GroupError::UnknownGroup(name.to_string()))
    }

    /// Remove a group, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<FocusGroup> {
        self.groups.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn test_auto_ids_are_sequential() {
        let mut group = FocusGroup::new("g");
        assert_eq!(group.add_member(), 0);
        assert_eq!(group.add_member(), 1);
        assert_eq!(group.add_member(), 2);
        assert_eq!(group.members(), &[0, 1, 2]);
    }

    #[test]
    fn test_auto_ids_skip_explicit_ids() {
        let mut group = FocusGroup::new("g");
        group.add_member_with_id(0);
        group.add_member_with_id(1);
        assert_eq!(group.add_member(), 2);
    }

    #[test]
    fn test_cyclic_traversal() {
        let mut group = FocusGroup::new("g");
        let a = group.add_member();
        let b = group.add_member();
        let c = group.add_member();

        assert_eq!(group.next(a), Ok(b));
        assert_eq!(group.next(c), Ok(a));
        assert_eq!(group.previous(a), Ok(c));
        assert_eq!(group.previous(b), Ok(a));
    }

    #[test]
    fn test_single_member_cycles_to_itself() {
        let mut group = FocusGroup::new("g");
        let a = group.add_member();
        assert_eq!(group.next(a), Ok(a));
        assert_eq!(group.previous(a), Ok(a));
    }

    #[test]
    fn test_unknown_member_errors() {
        let group = FocusGroup::new("g");
        assert_eq!(group.next(7), Err(GroupError::UnknownMember(7)));
    }

    #[test]
    fn test_exclusive_selection() {
        let mut group = FocusGroup::new("g");
        let a = group.add_member();
        let b = group.add_member();

        let count = Arc::new(AtomicI32::new(0));
        let last = Arc::new(AtomicI32::new(-1));
        let count_clone = count.clone();
        let last_clone = last.clone();
        group.selection_changed.connect(move |&id| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            last_clone.store(id, Ordering::SeqCst);
        });

        group.select_exclusive(a).unwrap();
        assert_eq!(group.selected(), Some(a));

        // Re-selecting the same member is silent.
        group.select_exclusive(a).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        group.select_exclusive(b).unwrap();
        assert_eq!(group.selected(), Some(b));
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(last.load(Ordering::SeqCst), b);
    }

    #[test]
    fn test_select_unknown_member_fails() {
        let mut group = FocusGroup::new("g");
        assert_eq!(
            group.select_exclusive(3),
            Err(GroupError::UnknownMember(3))
        );
        assert_eq!(group.selected(), None);
    }

    #[test]
    fn test_removing_selected_member_clears_selection() {
        let mut group = FocusGroup::new("g");
        let a = group.add_member();
        let b = group.add_member();
        group.select_exclusive(a).unwrap();

        assert!(group.remove_member(a));
        assert_eq!(group.selected(), None);
        assert_eq!(group.members(), &[b]);
        assert!(!group.remove_member(a));
    }

    #[test]
    fn test_registry_lookup() {
        let mut groups = FocusGroups::new();
        let id = groups.group_mut("options").add_member();
        groups.group_mut("options").select_exclusive(id).unwrap();

        assert_eq!(groups.get("options").unwrap().selected(), Some(id));
        assert_eq!(
            groups.get("missing").unwrap_err(),
            GroupError::UnknownGroup("missing".to_string())
        );
    }
}
