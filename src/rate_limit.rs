//! Fixed-window admission control shared by every submission of a client.
//!
//! At most `limit` permits are granted per window. A caller arriving after the limit
//! is reached sleeps out the rest of the window and then *renews* it: the window is
//! re-anchored at the moment that caller wakes up and it holds the first permit of
//! the new window. Windows therefore follow the last caller that had to wait rather
//! than a fixed calendar grid.
//!
//! Only the window bookkeeping is done under the lock. The sleep happens with the
//! lock released, so other callers keep making their own rollover decisions while
//! one of them waits.

use std::num::NonZeroU32;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::error::Error;

/// How a permit was obtained.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Admission {
    /// Granted inside the current window without waiting.
    Immediate,
    /// The limit was reached; the caller slept `waited` and opened a fresh window.
    Renewed { waited: Duration },
}

/// Point-in-time copy of the limiter's window.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowSnapshot {
    pub granted: u32,
    pub started_at: Instant,
}

#[derive(Debug)]
struct Window {
    granted: u32,
    started_at: Instant,
}

impl Window {
    fn reset(&mut self, now: Instant) {
        self.granted = 0;
        self.started_at = now;
    }
}

#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    limit: NonZeroU32,
    state: Mutex<Window>,
}

impl RateLimiter {
    /// Creates a limiter admitting at most `limit` calls per `window`.
    pub fn new(window: Duration, limit: u32) -> Result<Self> {
        let limit = NonZeroU32::new(limit)
            .ok_or_else(|| Error::validation("request limit must be a positive integer"))?;
        if window.is_zero() {
            return Err(Error::validation("rate limit window must be non-zero"));
        }

        Ok(Self {
            window,
            limit,
            state: Mutex::new(Window {
                granted: 0,
                started_at: Instant::now(),
            }),
        })
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.get()
    }

    /// Waits until a permit is available and takes it.
    pub async fn acquire(&self) -> Admission {
        match self.try_grant().await {
            Ok(()) => Admission::Immediate,
            Err(remaining) => {
                tokio::time::sleep(remaining).await;
                self.renew(remaining).await
            }
        }
    }

    /// Like [`RateLimiter::acquire`], but gives up when `cancel` fires.
    ///
    /// A cancelled caller never touched the window: the wait path reads the state and
    /// only writes it again after the sleep completes.
    pub async fn acquire_or_cancel(&self, cancel: &CancellationToken) -> Result<Admission> {
        let remaining = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::cancelled()),
            outcome = self.try_grant() => match outcome {
                Ok(()) => return Ok(Admission::Immediate),
                Err(remaining) => remaining,
            },
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?remaining, "admission wait cancelled");
                Err(Error::cancelled())
            }
            () = tokio::time::sleep(remaining) => Ok(self.renew(remaining).await),
        }
    }

    /// Current window state.
    pub async fn snapshot(&self) -> WindowSnapshot {
        let window = self.state.lock().await;
        WindowSnapshot {
            granted: window.granted,
            started_at: window.started_at,
        }
    }

    /// Grants a permit from the current window, or returns how long is left of it.
    async fn try_grant(&self) -> std::result::Result<(), Duration> {
        let mut window = self.state.lock().await;
        let now = Instant::now();

        let elapsed = now.saturating_duration_since(window.started_at);
        if elapsed >= self.window {
            window.reset(now);
        }

        if window.granted < self.limit.get() {
            window.granted += 1;
            return Ok(());
        }

        let remaining = self.window.saturating_sub(elapsed);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            granted = window.granted,
            limit = self.limit.get(),
            ?remaining,
            "rate limit reached, waiting for the window to end"
        );
        Err(remaining)
    }

    async fn renew(&self, waited: Duration) -> Admission {
        let mut window = self.state.lock().await;
        window.reset(Instant::now());
        window.granted = 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(?waited, "admitted after waiting, window renewed");
        Admission::Renewed { waited }
    }
}
