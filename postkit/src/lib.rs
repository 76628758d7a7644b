pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod feed;
pub mod profile;
pub mod rest;
pub mod session;
pub mod types;
pub mod validation;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config + errors
pub use client::Postkit;
pub use config::PostkitConfig;
pub use error::{PostkitError, Result};

// REST client
pub use rest::PostkitHttpClient;

// Domain types
pub use types::{Comment, FeedPage, NewPost, Post, PostPatch, User};

// Validation
pub use validation::{
    login_schema, score_password_strength, validate_field, validate_form, FieldSpec,
    PasswordStrength, SchemaError, StrengthLabel, ValidationResult, ValidationSchema,
};

// Feed loading
pub use feed::{FeedLoader, FeedState, LoadOutcome, LoaderOptions, LoaderPhase, PageSource};

// Flows
pub use compose::{post_schema, ComposeOutcome};
pub use profile::Profile;
pub use session::{LoginOutcome, Session};
