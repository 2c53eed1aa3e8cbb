//! HubSpot adapter for the CRM port.

mod client;
mod dto;

pub use client::HubSpotCrmClient;
