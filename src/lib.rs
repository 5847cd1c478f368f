//! Taskdesk: task tracking for companies, branches and recurring
//! obligations.
//!
//! The crate has two variants sharing one set of views:
//!
//! - A relational store of companies, branches, categories, subcategories,
//!   users and tasks, with registration, a close-task workflow and strict
//!   label lookups.
//! - An in-memory [`board`] owned by one interactive session, whose cards
//!   can be rearranged freely.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: records, identifiers and rules with no storage concerns
//! - **Ports**: async traits for storage and email
//! - **Adapters**: in-memory and `SQLite` stores, SMTP and recording
//!   notifiers
//!
//! # Modules
//!
//! - [`registry`]: registry records and their registration
//! - [`task`]: task lifecycle
//! - [`lookup`]: selection labels and label resolution
//! - [`views`]: Kanban, calendar, timeline, spreadsheet and chart views
//! - [`board`]: the session task board
//! - [`notification`]: alerts and pending task digests by email
//! - [`storage`]: store adapters shared by registry and tasks
//! - [`config`]: environment configuration

pub mod board;
pub mod config;
pub mod error;
pub mod lookup;
pub mod notification;
pub mod registry;
pub mod storage;
pub mod task;
pub mod views;
