//! Synchronous client for the reqres.in users API.
//!
//! # Overview
//! Three operations: fetch a user by id, fetch a page of users, create a
//! user. `UserService` turns HTTP responses into typed results or `ApiError`
//! values; `ReqResAdapter` fixes the base URL and forwards requests to an
//! injected `HttpTransport`.
//!
//! # Design
//! - Dependencies are always passed in: `UserService::new(adapter)`,
//!   `ReqResAdapter::new(transport, config)`. Nothing is constructed behind
//!   the caller's back.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so the service can be tested with canned responses and no network.
//! - `UreqTransport` (feature `ureq`, on by default) is the stock transport.
//!
//! ```no_run
//! use reqres_users::{ClientConfig, ReqResAdapter, UreqTransport, UserService};
//!
//! let adapter = ReqResAdapter::new(UreqTransport::new(), ClientConfig::from_env());
//! let users = UserService::new(adapter);
//! let user = users.get_user_by_id(2)?;
//! println!("{} {}", user.data.first_name, user.data.last_name);
//! # Ok::<(), reqres_users::ApiError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;
#[cfg(feature = "ureq")]
pub mod ureq_transport;

pub use adapter::ReqResAdapter;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use service::{UserService, FIRST_PAGE};
pub use types::{CreatedUser, NewUser, SingleUser, Support, User, UserPage};
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
