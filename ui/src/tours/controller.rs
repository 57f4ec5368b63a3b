//! View state for the tour page, independent of the rendering runtime.
//!
//! The component feeds triggers in (parameter changes, content-changed
//! notifications, fetch completions) and gets back the requests it should
//! send. Rendering only ever looks at [`TourController::tour`].

use crate::core::sequence::{FetchSequencer, Ticket};
use crate::i18n::Locale;
use crate::mesh::{MeshError, Tour};

/// What a tour page is showing: which node, in which language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TourParams {
    pub id: String,
    pub locale: Locale,
}

/// An outbound fetch the component has to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub params: TourParams,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer response was already applied, or the page moved on to other
    /// parameters while this one was in flight.
    Stale,
    /// The fetch failed; the snapshot was kept.
    FailedKept,
    /// The fetch failed and the snapshot belonged to other parameters.
    FailedCleared,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    params: TourParams,
    tour: Tour,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TourController {
    params: Option<TourParams>,
    sequencer: FetchSequencer,
    snapshot: Option<Snapshot>,
}

impl TourController {
    /// The loaded tour, if any.
    pub fn tour(&self) -> Option<&Tour> {
        self.snapshot.as_ref().map(|snapshot| &snapshot.tour)
    }

    /// Point the page at `(id, locale)`. Returns a request on the first call
    /// and whenever either value changes.
    pub fn set_params(&mut self, id: &str, locale: Locale) -> Option<FetchRequest> {
        let next = TourParams {
            id: id.to_string(),
            locale,
        };
        if self.params.as_ref() == Some(&next) {
            return None;
        }
        self.params = Some(next);
        self.request()
    }

    /// A content-changed notification arrived: refetch the current page.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        self.request()
    }

    fn request(&mut self) -> Option<FetchRequest> {
        let params = self.params.clone()?;
        if params.id.trim().is_empty() {
            tracing::warn!(locale = %params.locale, "tour id is empty; not fetching");
            return None;
        }
        Some(FetchRequest {
            ticket: self.sequencer.issue(),
            params,
        })
    }

    pub fn complete(
        &mut self,
        request: FetchRequest,
        result: Result<Tour, MeshError>,
    ) -> Completion {
        let current = self.params.as_ref() == Some(&request.params);

        match result {
            Ok(tour) => {
                if !current || !self.sequencer.try_apply(request.ticket) {
                    tracing::debug!(
                        ticket = request.ticket.value(),
                        id = %request.params.id,
                        "discarding stale tour response"
                    );
                    return Completion::Stale;
                }
                self.snapshot = Some(Snapshot {
                    params: request.params,
                    tour,
                });
                Completion::Applied
            }
            Err(err) => {
                tracing::warn!(
                    ticket = request.ticket.value(),
                    id = %request.params.id,
                    locale = %request.params.locale,
                    "failed to load tour: {err}"
                );
                if !current || !self.sequencer.is_latest(request.ticket) {
                    return Completion::Stale;
                }
                let shows_current = self
                    .snapshot
                    .as_ref()
                    .is_some_and(|snapshot| Some(&snapshot.params) == self.params.as_ref());
                if shows_current {
                    Completion::FailedKept
                } else {
                    self.snapshot = None;
                    Completion::FailedCleared
                }
            }
        }
    }
}
