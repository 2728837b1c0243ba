//! Fixture Bridge E2E Support
//!
//! Lets end-to-end tests create, look up and clean up backend fixtures
//! through drush without knowing node ids or shell quoting rules.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 FixtureBridge<C: ExecutionChannel>          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FixtureValue ──encode──▶ EncodedArgument                   │
//! │  Subcommand + args ─────▶ CommandInvocation                 │
//! │  CommandInvocation ─────▶ DrushChannel (shell | argv)       │
//! │                               └─▶ RawResult                 │
//! │  RawResult ──normalize──▶ id | path | JSON | error count    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Page helpers: node id/path ──▶ page.goto(url)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration is read once into [`BridgeConfig`] and passed down.

pub mod channel;
pub mod command;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod normalize;
pub mod page;

pub use channel::{DrushChannel, ExecutionChannel, RawResult};
pub use command::{CommandInvocation, Subcommand};
pub use config::{BridgeConfig, ExecMode};
pub use error::{E2eError, E2eResult};
pub use fixtures::FixtureBridge;
pub use normalize::{ErrorLogCheck, NormalizedResult, ResultShape};
pub use page::Page;

pub use fixture_bridge_common::{EncodedArgument, EncodingForm, FixtureValue};
