//! Single result slot shared by every dispatched request.
//!
//! # Design
//! Each request takes a `Ticket` when it is sent. When its response resolves
//! the rendered text is offered back together with that ticket, and the slot
//! decides by its `SlotPolicy` whether the text replaces what is shown.

use std::fmt;
use std::str::FromStr;

/// Sequence number handed out at send time. Later sends get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the slot treats responses that resolve out of send order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Ignore a response whose ticket is older than the one already shown.
    #[default]
    DropStale,
    /// Every resolution overwrites the slot, whatever its send order.
    LastResolvedWins,
}

impl SlotPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotPolicy::DropStale => "drop-stale",
            SlotPolicy::LastResolvedWins => "last-resolved-wins",
        }
    }
}

impl fmt::Display for SlotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop-stale" => Ok(SlotPolicy::DropStale),
            "last-resolved-wins" => Ok(SlotPolicy::LastResolvedWins),
            other => Err(format!(
                "unknown slot policy `{other}` (expected drop-stale or last-resolved-wins)"
            )),
        }
    }
}

/// Holds the most recent rendered result. Empty until the first response.
#[derive(Debug, Default)]
pub struct ResultSlot {
    policy: SlotPolicy,
    issued: u64,
    applied: Option<Ticket>,
    text: Option<String>,
}

impl ResultSlot {
    pub fn new(policy: SlotPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> SlotPolicy {
        self.policy
    }

    /// Take the next ticket. Call this when the request is sent.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Offer the rendered text of a resolved request.
    ///
    /// Returns whether the slot now shows `text`.
    pub fn offer(&mut self, ticket: Ticket, text: String) -> bool {
        if self.policy == SlotPolicy::DropStale && self.applied.is_some_and(|last| ticket <= last) {
            return false;
        }
        self.applied = Some(ticket);
        self.text = Some(text);
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Ticket of the request currently shown.
    pub fn applied(&self) -> Option<Ticket> {
        self.applied
    }
}
