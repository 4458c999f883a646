//! Labels and buttons drawn into the frame's draw list.

use dna_core::draw::{Color, DrawList, Rect, Shape, TextAnchor};
use dna_core::input::{GameEvent, MouseBtn};
use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum LabelContent {
    Image { key: String, size: Vec2 },
    Text { text: String, size: f32, color: Color },
}

/// A static image or a line of text, positioned by its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub content: LabelContent,
    pub center: Vec2,
}

impl Label {
    pub fn image(key: impl Into<String>, size: Vec2, center: Vec2) -> Self {
        Self {
            content: LabelContent::Image {
                key: key.into(),
                size,
            },
            center,
        }
    }

    pub fn text(text: impl Into<String>, size: f32, color: Color, center: Vec2) -> Self {
        Self {
            content: LabelContent::Text {
                text: text.into(),
                size,
                color,
            },
            center,
        }
    }

    /// Replace the text of a text label. Image labels are left alone.
    pub fn set_text(&mut self, new_text: impl Into<String>) {
        if let LabelContent::Text { text, .. } = &mut self.content {
            *text = new_text.into();
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            LabelContent::Text { text, .. } => Some(text),
            LabelContent::Image { .. } => None,
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        match &self.content {
            LabelContent::Image { key, size } => {
                out.image(key.clone(), Rect::from_center(self.center, *size));
            }
            LabelContent::Text { text, size, color } => {
                out.text(self.center, text.clone(), *size, *color);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub fill: Color,
    pub hover_fill: Color,
    pub pressed_fill: Color,
    pub border: Color,
    pub text: Color,
    pub text_size: f32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgb(235, 235, 235),
            hover_fill: Color::rgb(255, 255, 255),
            pressed_fill: Color::rgb(200, 200, 200),
            border: Color::rgb(40, 40, 40),
            text: Color::rgb(20, 20, 20),
            text_size: 14.0,
        }
    }
}

/// A clickable rectangle that yields `action` when released over itself
/// after a press that also started on it.
#[derive(Debug, Clone)]
pub struct Button<A> {
    rect: Rect,
    text: String,
    action: A,
    hovered: bool,
    pressed: bool,
    pub style: ButtonStyle,
}

impl<A: Copy> Button<A> {
    pub fn new(rect: Rect, text: impl Into<String>, action: A) -> Self {
        Self {
            rect,
            text: text.into(),
            action,
            hovered: false,
            pressed: false,
            style: ButtonStyle::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn handle_event(&mut self, event: &GameEvent) -> Option<A> {
        match event {
            GameEvent::PointerMoved(position) => {
                self.hovered = self.rect.contains(*position);
                None
            }
            GameEvent::PointerPressed {
                button: MouseBtn::Left,
                position,
            } => {
                self.hovered = self.rect.contains(*position);
                self.pressed = self.hovered;
                None
            }
            GameEvent::PointerReleased {
                button: MouseBtn::Left,
                position,
            } => {
                let was_pressed = std::mem::take(&mut self.pressed);
                self.hovered = self.rect.contains(*position);
                (was_pressed && self.hovered).then_some(self.action)
            }
            _ => None,
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        let fill = if self.pressed {
            self.style.pressed_fill
        } else if self.hovered {
            self.style.hover_fill
        } else {
            self.style.fill
        };
        out.push(Shape::Rect {
            rect: self.rect,
            color: fill,
            rounding: 4.0,
        });
        out.push(Shape::RectOutline {
            rect: self.rect,
            color: self.style.border,
            width: 1.0,
        });
        out.push(Shape::Text {
            position: self.rect.center(),
            anchor: TextAnchor::Center,
            text: self.text.clone(),
            size: self.style.text_size,
            color: self.style.text,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Action {
        Load,
    }

    fn press(x: f32, y: f32) -> GameEvent {
        GameEvent::PointerPressed {
            button: MouseBtn::Left,
            position: Vec2::new(x, y),
        }
    }

    fn release(x: f32, y: f32) -> GameEvent {
        GameEvent::PointerReleased {
            button: MouseBtn::Left,
            position: Vec2::new(x, y),
        }
    }

    fn button() -> Button<Action> {
        Button::new(Rect::new(10.0, 10.0, 100.0, 30.0), "Load", Action::Load)
    }

    #[test]
    fn click_inside_yields_action() {
        let mut b = button();
        assert_eq!(b.handle_event(&press(20.0, 20.0)), None);
        assert_eq!(b.handle_event(&release(25.0, 25.0)), Some(Action::Load));
    }

    #[test]
    fn release_outside_cancels() {
        let mut b = button();
        b.handle_event(&press(20.0, 20.0));
        assert_eq!(b.handle_event(&release(300.0, 300.0)), None);
        // The press is consumed; a later release inside does nothing.
        assert_eq!(b.handle_event(&release(20.0, 20.0)), None);
    }

    #[test]
    fn press_outside_then_release_inside_does_nothing() {
        let mut b = button();
        b.handle_event(&press(300.0, 300.0));
        assert_eq!(b.handle_event(&release(20.0, 20.0)), None);
    }

    #[test]
    fn right_button_is_ignored() {
        let mut b = button();
        let right = GameEvent::PointerPressed {
            button: MouseBtn::Right,
            position: Vec2::new(20.0, 20.0),
        };
        b.handle_event(&right);
        assert_eq!(b.handle_event(&release(20.0, 20.0)), None);
    }

    #[test]
    fn hover_follows_pointer() {
        let mut b = button();
        b.handle_event(&GameEvent::PointerMoved(Vec2::new(50.0, 20.0)));
        assert!(b.is_hovered());
        b.handle_event(&GameEvent::PointerMoved(Vec2::new(500.0, 20.0)));
        assert!(!b.is_hovered());
    }

    #[test]
    fn button_draws_body_border_and_caption() {
        let b = button();
        let mut out = DrawList::new(Vec2::new(600.0, 400.0));
        b.draw(&mut out);
        assert_eq!(out.len(), 3);
        assert!(matches!(
            &out.shapes()[2],
            Shape::Text { text, .. } if text == "Load"
        ));
    }

    #[test]
    fn labels_draw_text_or_image() {
        let mut text = Label::text("hello", 16.0, Color::BLACK, Vec2::new(300.0, 200.0));
        text.set_text("bye");
        assert_eq!(text.text_content(), Some("bye"));

        let mut image = Label::image("icon.png", Vec2::new(64.0, 64.0), Vec2::new(300.0, 200.0));
        image.set_text("ignored");
        assert_eq!(image.text_content(), None);

        let mut out = DrawList::new(Vec2::new(600.0, 400.0));
        text.draw(&mut out);
        image.draw(&mut out);
        assert!(matches!(&out.shapes()[0], Shape::Text { text, .. } if text == "bye"));
        assert!(matches!(
            &out.shapes()[1],
            Shape::Image { key, rect } if key == "icon.png" && rect.min == Vec2::new(268.0, 168.0)
        ));
    }
}
