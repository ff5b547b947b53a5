//! Endpoint families of the daemon API, each adding methods to
//! [`Client`](crate::Client).

pub mod block;
pub mod config;
pub mod dag;
pub mod files;
pub mod key;
pub mod name;
pub mod node;
pub mod pin;
pub mod routing;
pub mod stats;
pub mod swarm;
