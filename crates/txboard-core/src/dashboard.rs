//! Dashboard service: a session bound to a transaction source

use crate::error::ErrorContext;
use crate::session::{FetchApplied, FetchTicket, Session};
use crate::{
    CoreError, CoreResult, DeleteOutcome, ListView, MonthKey, Notification, Notifier, OwnerId,
};
use tokio::sync::RwLock;
use txboard_store::SourceRef;

/// Shared dashboard for one user session.
///
/// The session lock is never held across a store request; concurrent
/// fetches are reconciled by ticket tokens instead.
pub struct Dashboard {
    source: SourceRef,
    session: RwLock<Session>,
}

impl Dashboard {
    pub fn new(source: SourceRef, session: Session) -> Self {
        Self {
            source,
            session: RwLock::new(session),
        }
    }

    pub async fn owner(&self) -> Option<OwnerId> {
        self.session.read().await.owner().cloned()
    }

    pub async fn month(&self) -> MonthKey {
        self.session.read().await.month().clone()
    }

    pub async fn view(&self) -> Option<ListView> {
        self.session.read().await.view()
    }

    /// Snapshot of the session
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    // ==================== Identity and Fetching ====================

    /// Change the current user and load their transactions
    pub async fn set_owner(&self, owner: Option<OwnerId>) -> CoreResult<()> {
        let ticket = self.session.write().await.set_owner(owner);
        match ticket {
            Some(ticket) => self.run_fetch(ticket).await.map(|_| ()),
            None => Ok(()),
        }
    }

    /// Re-fetch the list for the current user.
    ///
    /// Returns `Ok(false)` when there is no user or a newer fetch won.
    pub async fn refresh(&self) -> CoreResult<bool> {
        let ticket = self.session.write().await.begin_fetch();
        match ticket {
            Some(ticket) => Ok(self.run_fetch(ticket).await? == FetchApplied::Applied),
            None => Ok(false),
        }
    }

    async fn run_fetch(&self, ticket: FetchTicket) -> CoreResult<FetchApplied> {
        log::debug!("Fetching transactions for {} (token {})", ticket.owner, ticket.token);
        let result = self.source.fetch_all(ticket.owner.as_str()).await;
        let applied = self.session.write().await.apply_fetch(&ticket, result);
        if let Ok(FetchApplied::Applied) = applied {
            log::debug!("Fetch {} applied", ticket.token);
        }
        applied
    }

    // ==================== Month and Selection ====================

    pub async fn set_month(&self, month: MonthKey) {
        self.session.write().await.set_month(month);
    }

    /// Move the month by `delta` and return the new month
    pub async fn shift_month(&self, delta: i32) -> MonthKey {
        let mut session = self.session.write().await;
        let month = session.month().shift(delta);
        session.set_month(month.clone());
        month
    }

    /// Toggle a row checkbox. Ids that are neither visible nor selected
    /// are ignored and `false` is returned.
    pub async fn toggle(&self, id: &str) -> bool {
        let mut session = self.session.write().await;
        if !session.selection().contains(id) && !session.visible_ids().contains(&id) {
            log::debug!("Ignoring toggle for hidden id {}", id);
            return false;
        }
        session.toggle(id);
        true
    }

    pub async fn set_all(&self, checked: bool) {
        self.session.write().await.set_all(checked);
    }

    // ==================== Bulk Delete ====================

    /// Delete every selected transaction in one request.
    ///
    /// On failure the selection and rows are left as they were and the
    /// error is reported to `notifier`. On success the selection is cleared,
    /// the list is re-fetched and a success notification is sent.
    pub async fn delete_selected(&self, notifier: &dyn Notifier) -> CoreResult<DeleteOutcome> {
        let (owner, ids) = {
            let session = self.session.read().await;
            let owner = session.owner().cloned().ok_or(CoreError::NoUser)?;
            (owner, session.selected_ids())
        };
        if ids.is_empty() {
            return Err(CoreError::EmptySelection);
        }

        let context = ErrorContext::new("delete_selected").with_owner(Some(owner.as_str()));

        if let Err(source) = self.source.delete_by_ids(&ids).await {
            let error = CoreError::Delete { ids, source };
            notifier.report_error(&error, &context);
            return Err(error);
        }
        log::info!("Deleted {} transactions for {}", ids.len(), owner);

        self.session.write().await.clear_selection();

        let refreshed = match self.refresh().await {
            Ok(applied) => applied,
            Err(error) => {
                let context = ErrorContext::new("refresh_after_delete").with_owner(Some(owner.as_str()));
                notifier.report_error(&error, &context);
                false
            }
        };

        notifier.notify(&Notification::delete_succeeded());

        Ok(DeleteOutcome {
            deleted: ids,
            refreshed,
        })
    }
}
