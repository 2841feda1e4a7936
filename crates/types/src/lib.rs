//! Shared domain types for the preview renderer.
//!
//! - **webspace**: webspaces, portals, localizations, environments and urls
//! - **portal_information**: the resolved match of a url to a portal
//! - **attributes**: the per-request attribute bag handed to controllers
//! - **http**: the simulated request, its route defaults and the response
//! - **ids**: newtypes for content identifiers

pub mod attributes;
pub mod http;
pub mod ids;
pub mod portal_information;
pub mod webspace;

pub use attributes::{Parameters, RequestAttributes};
pub use http::{ContentObject, Response, RouteDefaults, SimulatedRequest};
pub use ids::ContentId;
pub use portal_information::{MatchType, PortalInformation};
pub use webspace::{Environment, Localization, Portal, Url, Webspace};
