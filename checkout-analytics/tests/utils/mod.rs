#![allow(dead_code)]

pub mod fixed_identity_provider;
pub mod gated_collector_adapter;
pub mod helpers;
pub mod mock_collector_adapter;
pub mod mock_host;
pub mod mock_log_provider;
