//! Vendor commission engine for multi-vendor marketplaces.
//!
//! This crate calculates the commission a marketplace charges a vendor on an
//! order. Category rates, vendor tier multipliers, performance modifiers and
//! volume discounts combine into a final rate; platform fees, regulatory
//! fees, VAT and infraction penalties are then deducted to give the net
//! commission. Every step is recorded in an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod cache;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
