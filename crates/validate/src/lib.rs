//! `coursedesk-validate` -- run admin form rule sets from the command line.
//!
//! Library half of the binary so the argument parser, configuration and
//! runner can be exercised from tests.

pub mod cli;
pub mod config;
pub mod report;
pub mod runner;
