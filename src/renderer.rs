use std::collections::HashMap;

use macroquad::prelude::*;
use water_fill::model::{FluidContainer, FluidPacket};
use water_fill::palette::{self, PaletteColor};

use crate::controls::{Button, HitItem, HitTestRegistry};

const REFERENCE_FONT_SIZE: u16 = 100;
const SPACING: f32 = 10.0;

/// Caches unscaled text extents so labels can be fitted to a rect every frame.
#[derive(Default)]
struct TextSizer {
    unscaled: HashMap<String, (f32, f32)>,
}

impl TextSizer {
    /// Returns (font size, x offset, y offset) that centre `text` in the rect.
    fn fit(&mut self, text: &str, rect: Rect) -> (f32, f32, f32) {
        let (size_x, size_y) = *self.unscaled.entry(text.to_string()).or_insert_with(|| {
            let dimensions = measure_text(text, None, REFERENCE_FONT_SIZE, 1.0);
            (dimensions.width, dimensions.height)
        });
        if size_x <= 0.0 || size_y <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let scale = (rect.w / size_x).min(rect.h / size_y);
        let font_size = REFERENCE_FONT_SIZE as f32 * scale;
        let offset_x = (rect.w - size_x * scale) / 2.0;
        // draw_text positions by baseline
        let offset_y = (rect.h + size_y * scale) / 2.0;
        (font_size, offset_x, offset_y)
    }
}

pub struct Renderer {
    text_sizer: TextSizer,
    hit_test: HitTestRegistry,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Screen split: buttons on top, a status line, the main area, a footer strip.
pub struct Layout {
    pub buttons: Rect,
    pub status: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            text_sizer: TextSizer::default(),
            hit_test: HitTestRegistry::new(),
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    pub fn get_hit_test_registry(&self) -> &HitTestRegistry {
        &self.hit_test
    }

    pub fn autoset_viewport(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.width = screen_width();
        self.height = screen_height();
    }

    /// Starts a frame and returns where each part of the screen goes.
    pub fn begin_frame(&mut self) -> Layout {
        self.autoset_viewport();
        self.hit_test.clear();
        clear_background(BLACK);

        let button_h = self.height * 0.1;
        let status_h = self.height * 0.06;
        let footer_h = self.height * 0.12;
        let content_h = self.height - button_h - status_h - footer_h - 3.0 * SPACING;
        let mut y = self.y;
        let buttons = Rect::new(self.x, y, self.width, button_h);
        y += button_h + SPACING;
        let status = Rect::new(self.x, y, self.width, status_h);
        y += status_h + SPACING;
        let content = Rect::new(self.x, y, self.width, content_h);
        y += content_h + SPACING;
        let footer = Rect::new(self.x, y, self.width, footer_h);
        Layout {
            buttons,
            status,
            content,
            footer,
        }
    }

    pub fn render_text(&mut self, text: &str, rect: Rect, color: Color) {
        let (font_size, x, y) = self.text_sizer.fit(text, rect);
        if font_size > 0.0 {
            draw_text(text, rect.x + x, rect.y + y, font_size, color);
        }
    }

    fn render_packet(&mut self, packet: &FluidPacket<String>, rect: Rect) {
        match packet.get_color() {
            None => {
                draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, GRAY);
            }
            Some(name) => {
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, palette::display_color(name));
                draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
            }
        }
    }

    pub fn render_container(&mut self, container: &FluidContainer<String>, highlighted: bool, rect: Rect) {
        let capacity = container.get_capacity().max(1);
        let packet_height = rect.h / capacity as f32;
        for (i, packet) in container.get_packets().iter().enumerate() {
            let packet_y = rect.y + rect.h - (i as f32 + 1.0) * packet_height;
            self.render_packet(packet, Rect::new(rect.x, packet_y, rect.w, packet_height));
        }
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, DARKGRAY);
        if highlighted {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 4.0, WHITE);
        }
    }

    fn render_container_lineup(
        &mut self,
        containers: &[&FluidContainer<String>],
        highlighted: Option<usize>,
        start_index: usize,
        rect: Rect,
    ) {
        let container_count = containers.len() as f32;
        let total_spacing = SPACING * (container_count - 1.0);
        let container_width = (rect.w - total_spacing) / container_count;
        for (i, container) in containers.iter().enumerate() {
            let container_x = rect.x + i as f32 * (container_width + SPACING);
            self.render_container(
                container,
                Some(start_index + i) == highlighted,
                Rect::new(container_x, rect.y, container_width, rect.h),
            );
        }
    }

    pub fn render_container_grid(
        &mut self,
        containers: &[&FluidContainer<String>],
        highlighted: Option<usize>,
        max_columns: usize,
        rect: Rect,
    ) {
        let container_count = containers.len();
        if container_count == 0 || max_columns == 0 {
            return;
        }
        let rows = container_count.div_ceil(max_columns);
        let total_spacing_y = SPACING * (rows as f32 - 1.0);
        let container_height = (rect.h - total_spacing_y) / rows as f32;

        for (row, row_containers) in containers.chunks(max_columns).enumerate() {
            let container_y = rect.y + row as f32 * (container_height + SPACING);
            self.render_container_lineup(
                row_containers,
                highlighted,
                row * max_columns,
                Rect::new(rect.x, container_y, rect.w, container_height),
            );
        }
    }

    pub fn render_color_swatches(&mut self, swatches: &[PaletteColor], selected: &[bool], rect: Rect) {
        let swatch_count = swatches.len() as f32;
        let spacing = 5.0;
        let total_spacing = spacing * (swatch_count - 1.0);
        let swatch_width = (rect.w - total_spacing) / swatch_count;
        for (i, swatch) in swatches.iter().enumerate() {
            let swatch_x = rect.x + i as f32 * (swatch_width + spacing);
            let swatch_rect = Rect::new(swatch_x, rect.y, swatch_width, rect.h);
            self.hit_test.push(swatch_rect, HitItem::Swatch { index: i });
            draw_rectangle(swatch_rect.x, swatch_rect.y, swatch_rect.w, swatch_rect.h, swatch.color);
            if selected.get(i).copied().unwrap_or(false) {
                draw_rectangle_lines(swatch_rect.x, swatch_rect.y, swatch_rect.w, swatch_rect.h, 4.0, WHITE);
            }
        }
    }

    fn render_button(&mut self, button: &Button, rect: Rect) {
        let color = if button.is_enabled() {
            self.hit_test.push(
                rect,
                HitItem::Button {
                    function: button.get_action(),
                },
            );
            button.get_color()
        } else {
            DARKGRAY
        };
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
        self.render_text(button.get_label(), rect, WHITE);
    }

    pub fn render_button_lineup(&mut self, buttons: &[Button], rect: Rect) {
        let button_count = buttons.len() as f32;
        let total_spacing = SPACING * (button_count - 1.0);
        let button_width = (rect.w - total_spacing) / button_count;
        for (i, button) in buttons.iter().enumerate() {
            let button_x = rect.x + i as f32 * (button_width + SPACING);
            self.render_button(button, Rect::new(button_x, rect.y, button_width, rect.h));
        }
    }

    pub fn render_progress_bar(&mut self, fraction: f32, rect: Rect) {
        let bar_h = (rect.h * 0.2).max(4.0);
        let bar_y = rect.y + (rect.h - bar_h) / 2.0;
        draw_rectangle(rect.x, bar_y, rect.w, bar_h, DARKGRAY);
        draw_rectangle(rect.x, bar_y, rect.w * fraction.clamp(0.0, 1.0), bar_h, SKYBLUE);
    }
}
