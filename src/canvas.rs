/**********************************************************************************************
*
*   rebound - drawing surface
*
*   Bodies draw and erase themselves through the `Canvas` trait; nothing drawn is ever
*   read back. Enable the `raylib` feature for a surface backed by raylib's draw handle.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use serde::{Deserialize, Serialize};

use crate::math::Bounds;

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const ORANGE: Color = Color::new(255, 200, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Drawing primitives the simulation issues; all of them are fire-and-forget
pub trait Canvas {
    /// Size of the drawable area, which is also the world boundary
    fn bounds(&self) -> Bounds;
    fn clear(&mut self);
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn erase_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
    fn erase_circle(&mut self, x: f64, y: f64, radius: f64);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color);
}

/// Headless surface that draws nothing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullCanvas {
    pub bounds: Bounds,
}

impl NullCanvas {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl Canvas for NullCanvas {
    fn bounds(&self) -> Bounds { self.bounds }
    fn clear(&mut self) {}
    fn draw_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64, _color: Color) {}
    fn erase_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {}
    fn draw_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Color) {}
    fn erase_circle(&mut self, _x: f64, _y: f64, _radius: f64) {}
    fn draw_line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _color: Color) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Clear,
    Rect { x: f64, y: f64, width: f64, height: f64, color: Color },
    EraseRect { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, color: Color },
    EraseCircle { x: f64, y: f64, radius: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: Color },
}

/// Surface that keeps every call, for inspecting what a frame drew
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingCanvas {
    pub bounds: Bounds,
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, calls: Vec::new() }
    }
}

impl Canvas for RecordingCanvas {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.calls.push(DrawCall::Rect { x, y, width, height, color });
    }

    fn erase_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::EraseRect { x, y, width, height });
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.calls.push(DrawCall::Circle { x, y, radius, color });
    }

    fn erase_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.calls.push(DrawCall::EraseCircle { x, y, radius });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.calls.push(DrawCall::Line { x1, y1, x2, y2, color });
    }
}

#[cfg(feature = "raylib")]
pub use self::raylib_canvas::RaylibCanvas;

#[cfg(feature = "raylib")]
mod raylib_canvas {
    use raylib::prelude::{RaylibDraw, Rectangle, Vector2};

    use super::{Canvas, Color};
    use crate::math::Bounds;

    const LINE_THICKNESS: f32 = 1.5;

    impl From<Color> for raylib::prelude::Color {
        fn from(color: Color) -> Self {
            raylib::prelude::Color::new(color.r, color.g, color.b, 255)
        }
    }

    /// Draws through any raylib draw handle; erasing paints the background colour
    pub struct RaylibCanvas<'a, D: RaylibDraw> {
        pub draw: &'a mut D,
        pub bounds: Bounds,
        pub background: Color,
    }

    impl<'a, D: RaylibDraw> RaylibCanvas<'a, D> {
        pub fn new(draw: &'a mut D, bounds: Bounds, background: Color) -> Self {
            Self { draw, bounds, background }
        }
    }

    impl<D: RaylibDraw> Canvas for RaylibCanvas<'_, D> {
        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn clear(&mut self) {
            self.draw.clear_background(raylib::prelude::Color::from(self.background));
        }

        fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
            let rec = Rectangle::new(x as f32, y as f32, width as f32, height as f32);
            self.draw.draw_rectangle_lines_ex(rec, LINE_THICKNESS, raylib::prelude::Color::from(color));
        }

        fn erase_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            let background = self.background;
            self.draw_rect(x, y, width, height, background);
        }

        fn draw_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
            self.draw.draw_circle_lines(x as i32, y as i32, radius as f32, raylib::prelude::Color::from(color));
        }

        fn erase_circle(&mut self, x: f64, y: f64, radius: f64) {
            let background = self.background;
            self.draw_circle(x, y, radius, background);
        }

        fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
            self.draw.draw_line_ex(
                Vector2::new(x1 as f32, y1 as f32),
                Vector2::new(x2 as f32, y2 as f32),
                LINE_THICKNESS,
                raylib::prelude::Color::from(color),
            );
        }
    }
}
