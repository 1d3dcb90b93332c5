mod serve_handle;
pub(crate) use self::serve_handle::*;

mod shutdown_signal;
pub(crate) use self::shutdown_signal::*;

mod spawn_serve;
pub(crate) use self::spawn_serve::*;
