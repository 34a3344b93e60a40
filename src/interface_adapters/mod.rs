// Interface adapters: wire protocol, serializer tasks and the HTTP surface.

pub mod http;
pub mod net;
pub mod protocol;
pub mod routes;
pub mod state;
