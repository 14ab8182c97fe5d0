//! Result of a mutation followed by an authoritative refresh.
//!
//! Local mutations are provisional: after every successful remote mutation
//! the store re-lists from the server and replaces its cache. The mutation
//! itself already happened remotely when the refresh runs, so a failed
//! refresh does not fail the mutation; it is carried alongside the value
//! instead, for the caller to report.

use solace_core::SolaceError;

#[derive(Debug, Clone, PartialEq)]
pub struct Synced<T> {
    pub value: T,
    pub refresh_error: Option<SolaceError>,
}

impl<T> Synced<T> {
    pub fn new(value: T, refresh: Result<(), SolaceError>) -> Self {
        Self {
            value,
            refresh_error: refresh.err(),
        }
    }

    /// True when the local cache reflects the server after the mutation.
    pub fn is_reconciled(&self) -> bool {
        self.refresh_error.is_none()
    }
}
