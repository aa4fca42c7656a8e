// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::error::{Result, RoutingError};

/// A point in canvas pixel space (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a class box, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl CanvasRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Err(RoutingError::geometry("node rectangle must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(RoutingError::geometry(format!(
                "node rectangle size must be non-negative (width={width}, height={height})"
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> CanvasPoint {
        CanvasPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn moved_to(&self, x: f64, y: f64) -> Result<Self> {
        Self::new(x, y, self.width, self.height)
    }

    pub fn resized(&self, width: f64, height: f64) -> Result<Self> {
        Self::new(self.x, self.y, width, height)
    }
}
