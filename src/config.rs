// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Routing settings supplied by the editor when a diagram view opens.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

pub const DEFAULT_CANVAS_SIZE: f64 = 2000.0;
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Canvas width in pixels.
    #[serde(default = "default_canvas_size")]
    pub canvas_width: f64,
    /// Canvas height in pixels.
    #[serde(default = "default_canvas_size")]
    pub canvas_height: f64,
    /// Edge length of one routing cell in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
}

fn default_canvas_size() -> f64 {
    DEFAULT_CANVAS_SIZE
}

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl RoutingConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(RoutingError::geometry(format!(
                "cell_size must be a positive finite number (got {})",
                self.cell_size
            )));
        }
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RoutingError::geometry(format!(
                    "{name} must be finite and non-negative (got {value})"
                )));
            }
        }
        Ok(())
    }

    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(RoutingConfig).to_value()
    }
}
