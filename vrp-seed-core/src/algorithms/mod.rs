//! This module contains generic algorithms used to construct a seed solution.

pub mod clustering;
