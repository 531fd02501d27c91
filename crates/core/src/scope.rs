//! View lifetimes
//!
//! A view (a screen, a modal, a CLI command) owns a [`ViewScope`]. Every
//! request the view issues races a child of the scope's token, so closing
//! the view abandons whatever it still has in flight and no late response
//! is applied to a view that is gone.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope nested in `self`: closed when either is closed.
    pub fn nested(&self) -> Self {
        Self { token: self.token.child_token() }
    }

    /// Token for one request or service; cancelled when the scope closes.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Cancel every pending request of this view.
    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
