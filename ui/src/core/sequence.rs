//! Monotonic tickets for outbound fetches.
//!
//! Requests may complete in any order. Each one is stamped with a [`Ticket`]
//! when it is issued; a response is only applied if its ticket is newer than
//! the last one applied, so an older response can never overwrite a newer one.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSequencer {
    issued: u64,
    applied: u64,
}

impl FetchSequencer {
    /// Stamp a new request.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Record `ticket` as applied if it is newer than everything applied so far.
    /// Returns `false` for stale tickets, which must be discarded.
    pub fn try_apply(&mut self, ticket: Ticket) -> bool {
        if ticket.0 <= self.applied || ticket.0 > self.issued {
            return false;
        }
        self.applied = ticket.0;
        true
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}
