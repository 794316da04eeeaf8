//! Resource types managed by this tool
//!
//! Each module implements [`declarative::ResourceType`] for one kind of
//! device configuration.

#![allow(dead_code)]

pub mod aaa_authorization_login_exec_svc;

pub use aaa_authorization_login_exec_svc::AaaAuthorizationLoginExecSvc;
