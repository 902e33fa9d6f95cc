pub mod participants;
pub mod port;
pub mod service;

pub use participants::format_participants;
pub use port::{classify_port, Port};
pub use service::{reconcile_service_name, ReferenceServiceSet, MANUAL_CHECK};
