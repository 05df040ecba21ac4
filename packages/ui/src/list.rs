//! # Entity list state
//!
//! Each list page fetches its whole collection once on mount and keeps it in a
//! [`ListState`]. Mutations go to the backend first; only on success does the
//! page apply the matching local patch ([`apply_removal`](ListState::apply_removal)
//! or [`patch`](ListState::patch)), so a failed call never leaves ghost rows.

use api::{ApiError, Entity};

#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    Loading,
    Ready(Vec<T>),
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T: Entity + Clone> ListState<T> {
    /// Store a fetch result. Failures degrade to an empty list and the error
    /// is handed back so the caller can react to a rejected credential.
    pub fn loaded(
        &mut self,
        result: Result<Vec<T>, ApiError>,
        what: &str,
    ) -> Result<(), ApiError> {
        let (items, outcome) = match result {
            Ok(items) => {
                tracing::debug!("Loaded {} {what}", items.len());
                (items, Ok(()))
            }
            Err(e) => {
                tracing::error!("Error fetching {what}: {e}");
                (Vec::new(), Err(e))
            }
        };
        *self = Self::Ready(items);
        outcome
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded and nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Ready(items) if items.is_empty())
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Loading => &[],
            Self::Ready(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items().iter().find(|item| item.id() == id)
    }

    pub fn remove(&mut self, id: &str) {
        if let Self::Ready(items) = self {
            items.retain(|item| item.id() != id);
        }
    }

    /// Settle a delete. The row goes only when the backend agreed; otherwise
    /// the list is left as it was and the message to show comes back.
    pub fn apply_removal(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
        fallback: &str,
    ) -> Result<(), String> {
        match result {
            Ok(()) => {
                self.remove(id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Delete of {id} failed: {e}");
                Err(e.user_message(fallback))
            }
        }
    }

    /// Apply `f` to the row with `id`. Returns whether a row matched.
    pub fn patch(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        let Self::Ready(items) = self else {
            return false;
        };
        match items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// Rows accepted by `keep`, cloned for rendering.
    pub fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.items().iter().filter(|item| keep(item)).cloned().collect()
    }
}

/// A row waiting for the user to confirm a destructive action.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingConfirm<T> {
    pending: Option<T>,
}

impl<T> Default for PendingConfirm<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Clone> PendingConfirm<T> {
    pub fn ask(&mut self, item: T) {
        self.pending = Some(item);
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn is_asking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Hand back the confirmed row. The backend call may be issued only now.
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{AdminUser, Ticket, TicketStatus};

    fn user(id: &str, name: &str) -> AdminUser {
        AdminUser {
            id: id.into(),
            name: name.into(),
            email: format!("{id}@example.com"),
            ..Default::default()
        }
    }

    #[test]
    fn test_loading_until_first_fetch() {
        let mut list = ListState::<AdminUser>::default();
        assert!(list.is_loading());
        assert!(!list.is_empty());

        assert!(list.loaded(Ok(vec![]), "users").is_ok());
        assert!(!list.is_loading());
        assert!(list.is_empty());
    }

    #[test]
    fn test_fetch_failure_degrades_to_empty() {
        let mut list = ListState::<AdminUser>::default();
        let outcome = list.loaded(Err(ApiError::Network("down".into())), "users");
        assert!(list.is_empty());
        assert_eq!(outcome, Err(ApiError::Network("down".into())));
    }

    #[test]
    fn test_remove_after_delete() {
        let mut list = ListState::default();
        let _ = list.loaded(Ok(vec![user("1", "Ann"), user("2", "Bob")]), "users");
        list.remove("1");
        assert!(list.get("1").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_successful_delete_drops_row() {
        let mut list = ListState::default();
        let _ = list.loaded(Ok(vec![user("1", "Ann"), user("2", "Bob")]), "users");
        assert_eq!(list.apply_removal("2", Ok(()), "Failed to delete user"), Ok(()));
        assert!(list.get("2").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_failed_delete_keeps_list_and_reports() {
        let mut list = ListState::default();
        let _ = list.loaded(Ok(vec![user("1", "Ann"), user("2", "Bob")]), "users");
        let before = list.items().to_vec();

        let refused = Err(ApiError::Status {
            status: 403,
            message: "Cannot delete an admin".into(),
        });
        assert_eq!(
            list.apply_removal("2", refused, "Failed to delete user"),
            Err("Cannot delete an admin".to_string())
        );
        assert_eq!(list.items(), before.as_slice());

        let offline = Err(ApiError::Network("offline".into()));
        assert_eq!(
            list.apply_removal("1", offline, "Failed to delete user"),
            Err("Failed to delete user".to_string())
        );
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn test_patch_only_touches_matching_row() {
        let mut list = ListState::default();
        let _ = list.loaded(
            Ok(vec![
                Ticket { id: "a".into(), ..Default::default() },
                Ticket { id: "b".into(), ..Default::default() },
            ]),
            "tickets",
        );
        assert!(list.patch("b", |t| t.status = TicketStatus::Closed));
        assert!(!list.patch("zz", |t| t.status = TicketStatus::Closed));
        assert_eq!(list.get("a").unwrap().status, TicketStatus::Active);
        assert_eq!(list.get("b").unwrap().status, TicketStatus::Closed);
    }

    #[test]
    fn test_filtered_uses_row_predicate() {
        let mut list = ListState::default();
        let _ = list.loaded(Ok(vec![user("1", "Alice"), user("2", "Bob")]), "users");
        let hits = list.filtered(|u| u.matches("ALI"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice");
    }

    #[test]
    fn test_confirm_hands_back_once() {
        let mut confirm = PendingConfirm::default();
        assert!(confirm.confirm().is_none());

        confirm.ask(user("1", "Ann"));
        assert!(confirm.is_asking());
        assert_eq!(confirm.confirm().map(|u| u.id), Some("1".to_string()));
        assert!(confirm.confirm().is_none());

        confirm.ask(user("2", "Bob"));
        confirm.cancel();
        assert!(!confirm.is_asking());
    }
}
