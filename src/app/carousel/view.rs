use eframe::egui::{
    self, Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2,
};

use crate::layout::{NODE_CORNER_RADIUS, NODE_HEIGHT, NODE_PADDING};

use super::super::ViewModel;
use super::super::render_utils::draw_background;
use super::EntryKind;
use super::offsets::LEVEL_SPACING;

const NAME_FONT_SIZE: f32 = 20.0;
const MAIN_BORDER_WIDTH: f32 = 8.0;
const CARD_INSET: f32 = 6.0;

fn entry_scale(distance: f32) -> f32 {
    if distance == 0.0 {
        1.0
    } else if distance < 1.0 {
        1.0 - distance * 0.25
    } else if distance < 2.0 {
        0.75 - (distance - 1.0) * 0.15
    } else {
        (0.6 - (distance - 2.0) * 0.08).max(0.35)
    }
}

fn entry_opacity(distance: f32) -> f32 {
    let opacity = if distance <= 0.5 {
        1.0
    } else if distance <= 1.0 {
        0.95 - distance * 0.15
    } else if distance <= 2.0 {
        0.8 - (distance - 1.0) * 0.3
    } else if distance <= 3.0 {
        0.5 - (distance - 2.0) * 0.3
    } else {
        0.2 - (distance - 3.0) * 0.15
    };
    opacity.clamp(0.0, 1.0)
}

impl ViewModel {
    pub(in crate::app) fn draw_carousel(&mut self, ui: &mut Ui) {
        let zoom = self.zoom;
        let debug_mode = self.debug_mode;

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, zoom);

        let Some(session) = self.carousel.as_mut() else {
            return;
        };

        let now_ms = ui.ctx().input(|input| input.time) * 1000.0;

        let scroll_delta = ui.ctx().input(|input| input.raw_scroll_delta.y);
        if response.hovered() && scroll_delta != 0.0 {
            // Wheel-down means deeper; screen deltas have the other sign.
            session.on_wheel(-scroll_delta, now_ms);
        }

        if session.tick(now_ms) {
            ui.ctx().request_repaint();
        }

        let position = session.position();
        let stack_shift = session.stack_offset(zoom);
        let anchor = rect.center();

        // Centered slot paints last so it sits on top of the stack.
        let mut order: Vec<usize> = (0..session.entries().len()).collect();
        order.sort_by(|&a, &b| {
            let dist_a = (session.entries()[a].level as f32 - position).abs();
            let dist_b = (session.entries()[b].level as f32 - position).abs();
            let a_centered = dist_a < 0.5;
            let b_centered = dist_b < 0.5;
            match (a_centered, b_centered) {
                (true, false) => std::cmp::Ordering::Greater,
                (false, true) => std::cmp::Ordering::Less,
                _ => dist_a.total_cmp(&dist_b),
            }
        });

        let fog_cutoff = (session.entries().len() as f32 + 2.0).min(10.0);
        let pointer = response.hover_pos();
        let mut hit: Option<(i32, EntryKind, bool)> = None;

        for &index in &order {
            let entry = &session.entries()[index];
            let distance = (entry.level as f32 - position).abs();
            if distance > fog_cutoff {
                continue;
            }

            let level_offset = session
                .level_offset(entry.level)
                .unwrap_or(entry.level as f32 * (NODE_HEIGHT + LEVEL_SPACING));
            let scale = entry_scale(distance) * zoom;
            let opacity = entry_opacity(distance);
            if opacity <= 0.0 {
                continue;
            }

            let center = pos2(anchor.x, anchor.y + level_offset * zoom + stack_shift);
            let size = vec2(entry.layout.width, entry.layout.height) * scale;
            let slot_rect = Rect::from_center_size(center, size);
            let card_rect = slot_rect.shrink(CARD_INSET * scale);
            let corner = (NODE_CORNER_RADIUS - CARD_INSET) * scale;
            let is_main = distance < 0.5;

            painter.rect_filled(card_rect, corner, entry.color.gamma_multiply(opacity));
            if is_main {
                painter.rect_stroke(
                    card_rect,
                    corner,
                    Stroke::new(MAIN_BORDER_WIDTH * scale, Color32::BLACK),
                    StrokeKind::Middle,
                );
            }

            // Darkened panel until thumbnail decoding lands.
            if entry.has_thumbnail && entry.layout.image_height > 0.0 {
                let image_rect = Rect::from_min_size(
                    pos2(
                        slot_rect.left() + NODE_PADDING * scale,
                        slot_rect.top() + entry.layout.text_area_height * scale,
                    ),
                    vec2(entry.layout.image_width, entry.layout.image_height) * scale,
                );
                painter.rect_filled(
                    image_rect,
                    corner * 0.5,
                    Color32::from_rgb(30, 34, 40).gamma_multiply(opacity),
                );
            }

            let wrap_width = (entry.layout.width - 2.0 * NODE_PADDING) * scale;
            let galley = painter.layout(
                entry.name.clone(),
                FontId::proportional(NAME_FONT_SIZE * scale),
                entry.text_color.gamma_multiply(opacity),
                wrap_width.max(1.0),
            );
            let text_center_y = if entry.has_thumbnail && entry.layout.image_height > 0.0 {
                slot_rect.top() + entry.layout.text_area_height * scale / 2.0
            } else {
                center.y
            };
            let text_pos = pos2(
                center.x - galley.size().x / 2.0,
                text_center_y - galley.size().y / 2.0,
            );
            painter.galley(text_pos, galley, entry.text_color);

            if let Some(pointer) = pointer
                && slot_rect.contains(pointer)
            {
                // Later entries paint on top, so the last hit wins.
                hit = Some((entry.level, entry.kind, is_main));
            }
        }

        if response.clicked() {
            match hit {
                Some((level, kind, false)) if kind.is_reachable() => {
                    if let Some(entry) =
                        session.entries().iter().find(|entry| entry.level == level)
                    {
                        log::debug!("jump to {:?} (level {level})", entry.id);
                    }
                    session.jump_to_level(level, now_ms);
                    ui.ctx().request_repaint();
                }
                Some(_) => {}
                None => {
                    self.carousel = None;
                    return;
                }
            }
        }

        if debug_mode {
            self.draw_carousel_debug(&painter, rect);
        }

        if ui.ctx().input(|input| input.key_pressed(egui::Key::Escape)) {
            self.carousel = None;
        }
    }

    fn draw_carousel_debug(&self, painter: &egui::Painter, rect: Rect) {
        let Some(session) = self.carousel.as_ref() else {
            return;
        };

        let lines = [
            format!("dimension: {}", session.dimension()),
            format!("position:  {:+.3}", session.position()),
            format!("velocity:  {:+.4}", session.velocity()),
            format!("snapping:  {}", session.is_snapping()),
            format!("animating: {}", session.is_animating()),
            format!("entries:   {}", session.entries().len()),
            format!("scale:     {:.2}", session.focus_scale()),
            {
                let layout = session.interpolated_layout();
                format!("focus box: {:.0}x{:.0}", layout.width, layout.height)
            },
        ];

        let mut cursor = rect.left_top() + vec2(8.0, 8.0);
        for line in lines {
            painter.text(
                cursor,
                Align2::LEFT_TOP,
                line,
                FontId::monospace(12.0),
                Color32::from_rgb(150, 200, 150),
            );
            cursor.y += 16.0;
        }
    }
}
