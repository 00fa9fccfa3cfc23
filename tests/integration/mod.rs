//! Integration tests for the phasekit setup and audit flows
//!
//! These tests drive the real command sequences against temporary project
//! directories, with the package manager and generation entry point replaced
//! by small shell scripts.

#![cfg(unix)]

pub mod audit_flow;
pub mod helpers;
pub mod setup_flow;
