mod content_type;
pub use self::content_type::*;

mod pipeline;
pub use self::pipeline::*;

mod resolved_step;
pub use self::resolved_step::*;

mod server_session;
pub use self::server_session::*;

mod starting_tcp_setup;
pub use self::starting_tcp_setup::*;

mod step_queue;
pub use self::step_queue::*;

mod with_this_mut;
pub use self::with_this_mut::*;
