// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

pub mod config;
pub mod narrate;
pub mod pipeline;
