//! Turns a frame's `DrawList` into pixels through egui.
//!
//! Scene shapes go to egui's background layer in list order, so they sit under
//! any egui window (the debug overlay). Submission follows the egui-wgpu
//! split:
//!
//!   1. run egui: paint the draw list, then let the caller add overlay UI
//!   2. upload textures and update buffers (borrows the encoder mutably)
//!   3. render into a pass created with `forget_lifetime()`
//!   4. free textures egui no longer references

use std::collections::{HashMap, HashSet};

use dna_core::draw::{Color, DrawList, Rect, Shape, TextAnchor};
use glam::Vec2;
use winit::window::Window;

use crate::gpu_context::GpuContext;

pub struct Canvas {
    egui_ctx: egui::Context,
    egui_winit_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    textures: HashMap<String, egui::TextureHandle>,
    missing_logged: HashSet<String>,
    pub clear_color: wgpu::Color,
}

impl Canvas {
    pub fn new(gpu: &GpuContext, window: &Window) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            textures: HashMap::new(),
            missing_logged: HashSet::new(),
            clear_color: wgpu::Color::BLACK,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it (for
    /// example a click on the debug overlay).
    pub fn handle_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_winit_state.on_window_event(window, event).consumed
    }

    /// Upload RGBA8 pixels as a texture that `Shape::Image { key }` can use.
    pub fn register_image(&mut self, key: &str, width: u32, height: u32, rgba: &[u8]) {
        let image =
            egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], rgba);
        let handle = self
            .egui_ctx
            .load_texture(key, image, egui::TextureOptions::LINEAR);
        self.textures.insert(key.to_string(), handle);
        self.missing_logged.remove(key);
    }

    pub fn has_image(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Draw one frame. `overlay` runs inside the same egui pass after the draw
    /// list has been painted.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        window: &Window,
        draw_list: &DrawList,
        mut overlay: impl FnMut(&egui::Context),
    ) {
        let Some((output, view)) = gpu.begin_frame() else {
            return;
        };

        let raw_input = self.egui_winit_state.take_egui_input(window);
        let textures = &self.textures;
        let missing_logged = &mut self.missing_logged;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            paint_draw_list(&painter, draw_list, textures, missing_logged);
            overlay(ctx);
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);
        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.size.0, gpu.size.1],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Encoder"),
            });

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let callback_buffers = self.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &primitives,
            &screen_descriptor,
        );

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Canvas Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.clear_color),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut pass, &primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        gpu.queue.submit(
            callback_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();
    }
}

/// Paint every shape of `draw_list` in order. Images whose key was never
/// registered are skipped (logged once per key).
pub fn paint_draw_list(
    painter: &egui::Painter,
    draw_list: &DrawList,
    textures: &HashMap<String, egui::TextureHandle>,
    missing_logged: &mut HashSet<String>,
) {
    let canvas = to_egui_rect(&draw_list.canvas_rect());
    for shape in draw_list.shapes() {
        match shape {
            Shape::Fill(color) => {
                painter.rect_filled(canvas, 0.0, to_color32(*color));
            }
            Shape::Rect {
                rect,
                color,
                rounding,
            } => {
                painter.rect_filled(to_egui_rect(rect), *rounding, to_color32(*color));
            }
            Shape::RectOutline { rect, color, width } => {
                let stroke = egui::Stroke::new(*width, to_color32(*color));
                let r = to_egui_rect(rect);
                let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()];
                for i in 0..corners.len() {
                    painter.line_segment([corners[i], corners[(i + 1) % corners.len()]], stroke);
                }
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_pos2(*center), *radius, to_color32(*color));
            }
            Shape::Line {
                from,
                to,
                width,
                color,
            } => {
                painter.line_segment(
                    [to_pos2(*from), to_pos2(*to)],
                    egui::Stroke::new(*width, to_color32(*color)),
                );
            }
            Shape::Text {
                position,
                anchor,
                text,
                size,
                color,
            } => {
                painter.text(
                    to_pos2(*position),
                    to_align(*anchor),
                    text,
                    egui::FontId::proportional(*size),
                    to_color32(*color),
                );
            }
            Shape::Image { key, rect } => match textures.get(key) {
                Some(handle) => {
                    painter.image(
                        handle.id(),
                        to_egui_rect(rect),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                None => {
                    if missing_logged.insert(key.clone()) {
                        log::warn!("Image '{}' is not registered; skipping", key);
                    }
                }
            },
        }
    }
}

pub fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn to_pos2(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

pub fn to_egui_rect(rect: &Rect) -> egui::Rect {
    egui::Rect::from_min_max(to_pos2(rect.min), to_pos2(rect.max()))
}

pub fn to_align(anchor: TextAnchor) -> egui::Align2 {
    match anchor {
        TextAnchor::Center => egui::Align2::CENTER_CENTER,
        TextAnchor::LeftCenter => egui::Align2::LEFT_CENTER,
        TextAnchor::TopLeft => egui::Align2::LEFT_TOP,
    }
}
