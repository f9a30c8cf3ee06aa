// Adapters layer: the request/response shapes of the systems that call the authorizer.

pub mod gateway;
