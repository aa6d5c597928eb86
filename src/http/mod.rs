//! Request building, the transport seam, and the bounded dispatcher.
mod dispatcher;
mod request;
mod transport;


pub use dispatcher::Dispatcher;
pub use request::{RequestDescriptor, RequestTemplate, build_descriptors};
pub use transport::{ReqwestTransport, Transport};
