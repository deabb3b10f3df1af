// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output aspect ratios offered by the editor.

use core::fmt;

use kurbo::{Point, Rect, Size};

/// Width-to-height ratio of the collage canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// Square.
    #[default]
    OneOne,
    /// Portrait, 1:2.
    OneTwo,
    /// Portrait, 1:3.
    OneThree,
    /// Portrait, 2:3.
    TwoThree,
    /// Portrait, 3:5.
    ThreeFive,
    /// Portrait, 5:7.
    FiveSeven,
    /// Landscape, 2:1.
    TwoOne,
    /// Landscape, 3:1.
    ThreeOne,
    /// Landscape, 5:3.
    FiveThree,
    /// Landscape, 7:5.
    SevenFive,
}

impl AspectRatio {
    /// Every ratio, in menu order.
    pub const ALL: [Self; 10] = [
        Self::OneOne,
        Self::OneTwo,
        Self::OneThree,
        Self::TwoThree,
        Self::ThreeFive,
        Self::FiveSeven,
        Self::TwoOne,
        Self::ThreeOne,
        Self::FiveThree,
        Self::SevenFive,
    ];

    /// Width and height terms of the ratio.
    pub const fn terms(self) -> (u8, u8) {
        match self {
            Self::OneOne => (1, 1),
            Self::OneTwo => (1, 2),
            Self::OneThree => (1, 3),
            Self::TwoThree => (2, 3),
            Self::ThreeFive => (3, 5),
            Self::FiveSeven => (5, 7),
            Self::TwoOne => (2, 1),
            Self::ThreeOne => (3, 1),
            Self::FiveThree => (5, 3),
            Self::SevenFive => (7, 5),
        }
    }

    /// Width divided by height.
    pub fn value(self) -> f64 {
        let (w, h) = self.terms();
        f64::from(w) / f64::from(h)
    }

    /// Menu label such as `"2 X 3"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneOne => "1 X 1",
            Self::OneTwo => "1 X 2",
            Self::OneThree => "1 X 3",
            Self::TwoThree => "2 X 3",
            Self::ThreeFive => "3 X 5",
            Self::FiveSeven => "5 X 7",
            Self::TwoOne => "2 X 1",
            Self::ThreeOne => "3 X 1",
            Self::FiveThree => "5 X 3",
            Self::SevenFive => "7 X 5",
        }
    }

    /// Largest rect of this ratio centered in `available`, with its origin at `(0, 0)`.
    pub fn fit(self, available: Size) -> Rect {
        let ratio = self.value();
        let size = if available.width > available.height * ratio {
            Size::new(available.height * ratio, available.height)
        } else {
            Size::new(available.width, available.width / ratio)
        };
        let origin = Point::new(
            (available.width - size.width) / 2.0,
            (available.height - size.height) / 2.0,
        );
        Rect::from_origin_size(origin, size)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
