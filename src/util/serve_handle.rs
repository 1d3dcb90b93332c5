use ::tokio::task::JoinHandle;

use crate::util::ShutdownSignal;

#[derive(Debug)]
pub struct ServeHandle {
    server_handle: Option<JoinHandle<()>>,
    shutdown: ShutdownSignal,
}

impl ServeHandle {
    pub(crate) fn new(server_handle: JoinHandle<()>, shutdown: ShutdownSignal) -> Self {
        Self {
            server_handle: Some(server_handle),
            shutdown,
        }
    }

    /// Stops this handle from closing the server when dropped.
    ///
    /// The server keeps running until its own close policy ends it.
    pub(crate) fn detach(&mut self) {
        self.server_handle = None;
    }
}

impl Drop for ServeHandle {
    fn drop(&mut self) {
        if self.server_handle.take().is_some() {
            self.shutdown.request();
        }
    }
}
