//! Gate states and outcomes for UI call sites.

/// State of the client-side admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The status endpoint has not answered yet; render nothing.
    Pending,
    /// The decision arrived, or the check failed closed.
    Ready {
        /// Whether the caller may see protected views.
        is_admin: bool,
    },
}

impl GateState {
    /// Returns true once the gate has resolved.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Returns true if the resolved state allows protected views.
    ///
    /// A pending gate allows nothing.
    #[must_use]
    pub fn allows(&self) -> bool {
        matches!(self, Self::Ready { is_admin: true })
    }
}

/// What a call site should do after the gate resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the protected view.
    Allowed,
    /// Show a passive access-denied message.
    Denied,
    /// Navigate to the login surface.
    RedirectToLogin {
        /// Absolute location of the login surface.
        location: String,
    },
}
