//! Test suite for ParkEasy
//!
//! This module organizes all tests

pub mod common;
