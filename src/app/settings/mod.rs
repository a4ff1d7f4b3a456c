// SPDX-License-Identifier: GPL-3.0-only

//! Settings UI module
//!
//! Appearance, camera behaviour and photo output settings shown in the
//! context drawer.

pub mod view;
