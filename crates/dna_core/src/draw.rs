//! Backend-neutral draw list.
//!
//! Scenes never touch the GPU. Each frame they append shapes to a `DrawList`
//! in painter's order (later shapes land on top), and the render crate
//! translates the list into egui shapes. Coordinates are logical pixels with
//! the origin at the top-left of the canvas.

use glam::Vec2;

/// Straight (non-premultiplied) RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

/// Where a text shape's `position` sits relative to the laid-out text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Center,
    LeftCenter,
    TopLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Fills the whole canvas.
    Fill(Color),
    Rect {
        rect: Rect,
        color: Color,
        rounding: f32,
    },
    RectOutline {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        position: Vec2,
        anchor: TextAnchor,
        text: String,
        size: f32,
        color: Color,
    },
    /// A texture registered with the renderer under `key`.
    Image { key: String, rect: Rect },
}

#[derive(Debug, Default)]
pub struct DrawList {
    pub canvas_size: Vec2,
    shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new(canvas_size: Vec2) -> Self {
        Self {
            canvas_size,
            shapes: Vec::with_capacity(256),
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect {
            min: Vec2::ZERO,
            size: self.canvas_size,
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn fill(&mut self, color: Color) {
        self.push(Shape::Fill(color));
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.push(Shape::Rect {
            rect,
            color,
            rounding: 0.0,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(Shape::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(Shape::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn text(&mut self, position: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.push(Shape::Text {
            position,
            anchor: TextAnchor::Center,
            text: text.into(),
            size,
            color,
        });
    }

    pub fn image(&mut self, key: impl Into<String>, rect: Rect) {
        self.push(Shape::Image {
            key: key.into(),
            rect,
        });
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
