//! Invocation boundary for the file-elf client.
//!
//! Every call the client makes to the outside world goes through the
//! `Invoker` trait as a `Command`. Two bindings implement it:
//! - `HttpInvoker` talks to the local search service
//! - `ChannelInvoker` forwards commands to an in-process `CommandHost`
//!
//! `RoutedInvoker` combines them so search/favorite operations and desktop
//! integrations can be served by different bindings.

mod channel;
mod command;
mod desktop;
mod http;
mod invoker;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use channel::{ChannelInvoker, CommandHost, HostRequest};
pub use command::Command;
pub use desktop::{dir_to_open, DesktopHost};
pub use http::HttpInvoker;
pub use invoker::{Invoker, RoutedInvoker};
