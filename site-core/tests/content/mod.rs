// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for content resolution
//!
//! Feature: site-content.feature

mod admin_tests;
mod resolver_tests;
