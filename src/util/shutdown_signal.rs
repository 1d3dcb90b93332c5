use ::std::sync::Arc;
use ::tokio::sync::watch;

///
/// Shared between the accept loop, each connection, and whoever may close the server.
///
/// Closing is two halves. A close is _requested_, and then the accept loop
/// _releases_ the listening socket. [`ShutdownSignal::close`] waits for both,
/// so once it returns new connections are refused.
///
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    requested: Arc<watch::Sender<bool>>,
    released: watch::Receiver<bool>,
}

/// Held by the accept loop, and used to say the listener has been dropped.
///
/// Dropping this without calling `release` also counts as released.
#[derive(Debug)]
pub struct ListenerRelease {
    released: watch::Sender<bool>,
}

impl ShutdownSignal {
    pub fn new() -> (Self, ListenerRelease) {
        let (requested, _) = watch::channel(false);
        let (released_sender, released) = watch::channel(false);

        let signal = Self {
            requested: Arc::new(requested),
            released,
        };
        let release = ListenerRelease {
            released: released_sender,
        };

        (signal, release)
    }

    pub fn request(&self) {
        self.requested.send_replace(true);
    }

    pub fn is_requested(&self) -> bool {
        *self.requested.borrow()
    }

    /// Resolves once a close has been requested.
    pub async fn requested(&self) {
        let mut requested = self.requested.subscribe();
        let _ = requested.wait_for(|is_requested| *is_requested).await;
    }

    pub fn is_released(&self) -> bool {
        *self.released.borrow() || self.released.has_changed().is_err()
    }

    /// Requests a close, and waits for the listener to be dropped.
    ///
    /// This is safe to call any number of times.
    pub async fn close(&self) {
        self.request();

        let mut released = self.released.clone();
        let _ = released.wait_for(|is_released| *is_released).await;
    }
}

impl ListenerRelease {
    pub fn release(self) {
        self.released.send_replace(true);
    }
}

#[cfg(test)]
mod test_close {
    use super::*;

    #[tokio::test]
    async fn it_should_wait_for_the_listener_to_be_released() {
        let (signal, release) = ShutdownSignal::new();

        let accept_loop = signal.clone();
        let handle = ::tokio::spawn(async move {
            accept_loop.requested().await;
            release.release();
        });

        signal.close().await;
        handle.await.unwrap();

        assert!(signal.is_requested());
        assert!(signal.is_released());
    }

    #[tokio::test]
    async fn it_should_return_when_release_is_dropped() {
        let (signal, release) = ShutdownSignal::new();
        drop(release);

        signal.close().await;

        assert!(signal.is_released());
    }

    #[tokio::test]
    async fn it_should_be_safe_to_close_many_times() {
        let (signal, release) = ShutdownSignal::new();
        release.release();

        signal.close().await;
        signal.close().await;

        assert!(signal.is_requested());
    }
}

#[cfg(test)]
mod test_requested {
    use super::*;
    use ::std::time::Duration;
    use ::tokio::time::timeout;

    #[tokio::test]
    async fn it_should_resolve_when_requested_before_waiting() {
        let (signal, _release) = ShutdownSignal::new();
        signal.request();

        let result = timeout(Duration::from_secs(1), signal.requested()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn it_should_not_resolve_without_a_request() {
        let (signal, _release) = ShutdownSignal::new();

        let result = timeout(Duration::from_millis(20), signal.requested()).await;

        assert!(result.is_err());
    }
}
