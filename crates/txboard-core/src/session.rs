//! Session state for one dashboard list
//!
//! The session holds the rows last fetched for the current owner, the
//! selected month and the selection set. It never talks to the store
//! itself: fetches are started with [`Session::begin_fetch`], performed by
//! the caller, and landed with [`Session::apply_fetch`]. Every ticket
//! carries a token, and only the most recent ticket may land, so a slow
//! response for an old owner cannot overwrite newer state.

use crate::filter::filter_by_month;
use crate::{
    CoreError, CoreResult, HeaderState, ListBody, ListView, MonthKey, OwnerId, RowView,
    SelectionSet, ViewLabels, COLUMN_COUNT,
};
use txboard_store::{StoreResult, Transaction};

/// Handle for one in-flight fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub owner: OwnerId,
}

/// What happened to a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Rows replaced
    Applied,
    /// A newer fetch was started; the result was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct Session {
    owner: Option<OwnerId>,
    month: MonthKey,
    rows: Vec<Option<Transaction>>,
    selection: SelectionSet,
    loading: bool,
    fetch_error: Option<String>,
    latest_token: u64,
    labels: ViewLabels,
}

impl Session {
    pub fn new(month: MonthKey) -> Self {
        Self {
            owner: None,
            month,
            rows: Vec::new(),
            selection: SelectionSet::new(),
            loading: false,
            fetch_error: None,
            latest_token: 0,
            labels: ViewLabels::default(),
        }
    }

    pub fn with_labels(mut self, labels: ViewLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    pub fn month(&self) -> &MonthKey {
        &self.month
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    // ==================== Identity and Month ====================

    /// Switch the current user. A new identity drops rows and selection and
    /// starts a fetch; `None` leaves nothing to show.
    pub fn set_owner(&mut self, owner: Option<OwnerId>) -> Option<FetchTicket> {
        if owner == self.owner {
            return None;
        }
        self.owner = owner;
        self.rows.clear();
        self.selection.clear();
        self.fetch_error = None;
        self.loading = false;
        // Invalidate whatever was in flight for the previous owner
        self.latest_token += 1;
        self.begin_fetch()
    }

    /// Change the month. Re-filters the rows already held, no fetch.
    pub fn set_month(&mut self, month: MonthKey) {
        self.month = month;
        self.prune_selection();
    }

    // ==================== Fetching ====================

    /// Start a fetch for the current owner; `None` without an owner
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let owner = self.owner.clone()?;
        self.latest_token += 1;
        self.loading = true;
        Some(FetchTicket {
            token: self.latest_token,
            owner,
        })
    }

    /// Land a fetch result. Results for any ticket but the latest are dropped.
    pub fn apply_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: StoreResult<Vec<Option<Transaction>>>,
    ) -> CoreResult<FetchApplied> {
        if ticket.token != self.latest_token || self.owner.as_ref() != Some(&ticket.owner) {
            log::debug!(
                "Dropping stale fetch {} for {} (latest {})",
                ticket.token,
                ticket.owner,
                self.latest_token
            );
            return Ok(FetchApplied::Stale);
        }

        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.fetch_error = None;
                self.prune_selection();
                Ok(FetchApplied::Applied)
            }
            Err(source) => {
                self.fetch_error = Some(source.to_string());
                Err(CoreError::Fetch { source })
            }
        }
    }

    // ==================== Filtering and Selection ====================

    /// Rows for the selected month, in source order
    pub fn visible(&self) -> Vec<&Transaction> {
        filter_by_month(&self.rows, &self.month)
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible().into_iter().map(|tx| tx.id.as_str()).collect()
    }

    pub fn toggle(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// Header checkbox: checked selects every visible row, unchecked clears
    pub fn set_all(&mut self, checked: bool) {
        if checked {
            let ids: Vec<String> = self.visible_ids().into_iter().map(str::to_string).collect();
            self.selection.select_all(ids);
        } else {
            self.selection.clear();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected ids, ordered, ready for a delete request
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids()
    }

    pub fn header_state(&self) -> HeaderState {
        self.selection.header_state(&self.visible_ids())
    }

    fn prune_selection(&mut self) {
        let visible: Vec<String> = self.visible_ids().into_iter().map(str::to_string).collect();
        let visible: Vec<&str> = visible.iter().map(String::as_str).collect();
        self.selection.retain_visible(&visible);
    }

    // ==================== View ====================

    /// The list as it should be rendered; `None` when there is no user
    pub fn view(&self) -> Option<ListView> {
        let owner = self.owner.as_ref()?;

        let rows: Vec<RowView> = self
            .visible()
            .into_iter()
            .map(|tx| RowView::from_transaction(tx, self.selection.contains(&tx.id), &self.labels))
            .collect();

        let body = if rows.is_empty() {
            ListBody::Empty {
                colspan: COLUMN_COUNT,
                message: self.labels.empty_message.clone(),
            }
        } else {
            ListBody::Rows { rows }
        };

        Some(ListView {
            owner_id: owner.to_string(),
            month: self.month.clone(),
            month_label: self.month.label(),
            loading: self.loading,
            error: self.fetch_error.clone(),
            header: self.header_state(),
            selected_count: self.selection.len(),
            delete_enabled: !self.selection.is_empty(),
            body,
        })
    }
}
