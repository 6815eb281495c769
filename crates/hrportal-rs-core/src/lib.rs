//! Client-side core of the HR portal.
//!
//! Pages fetch JSON through a [`Transport`], keep it in request-sequenced
//! [`RemoteCollection`]s, derive filtered views with the functions in
//! [`filter`], and report write outcomes through the [`ToastCenter`]. The
//! onboarding assistant lives in [`assistant`]; profile form checks live in
//! [`validation`].

pub mod api;
pub mod assistant;
pub mod collection;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pages;
pub mod presentation;
pub mod toast;
pub mod validation;

pub use api::PortalApi;
pub use assistant::{
    AssistantHost, AssistantService, AssistantSession, AssistantShell, HttpAssistant, Sender,
    ShellState, TranscriptMessage, TurnOutcome,
};
pub use collection::{FetchTicket, Identified, LoadState, RemoteCollection};
pub use error::PortalError;
pub use fetch::{ApiRequest, HttpTransport, Method, RequestBody, Transport};
pub use filter::{
    DocumentFilter, FilterState, NotificationFilter, Page, Selection, Verification, apply_filters,
    paginate,
};
pub use pages::{
    AnnouncementBoard, CareerDashboard, DocumentCenter, NotificationFeed, PageContext,
    UploadOutcome,
};
pub use toast::{Toast, ToastAction, ToastCenter, ToastKind, ToastOptions};
pub use validation::{FieldErrors, FormValidator, ProfileForm, ValidationOutcome, validate};
