use eframe::egui::{self, RichText, ScrollArea, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::layout::{NodeContent, NodeLayout, node_layout};
use crate::store::NodePrototype;

use super::super::ViewModel;

const PREVIEW_TOOLTIP_SCALE: f32 = 0.5;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn preview_layout(prototype: &NodePrototype) -> NodeLayout {
    node_layout(
        &NodeContent {
            name: &prototype.name,
            has_thumbnail: prototype.has_thumbnail,
            image_aspect_ratio: prototype.image_aspect_ratio.unwrap_or(0.0),
            description: prototype.description.as_deref(),
        },
        true,
    )
}

impl ViewModel {
    pub(in crate::app) fn draw_library(&mut self, ui: &mut Ui) {
        ui.heading("Library");
        ui.add_space(4.0);

        let search_response = ui.add(
            egui::TextEdit::singleline(&mut self.search).hint_text("Search concepts..."),
        );
        if search_response.changed() {
            self.library_rows_visible = Self::INITIAL_LIBRARY_ROWS;
        }
        ui.add_space(4.0);

        let query = self.search.trim().to_owned();
        let rows = self.library_rows(&query);

        let mut open_id = None;
        let mut show_more = false;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for id in rows.iter().take(self.library_rows_visible) {
                    let Some(prototype) = self.store.get(id) else {
                        continue;
                    };
                    let is_selected = self.selected.as_deref() == Some(id.as_str());
                    let label = if is_selected {
                        RichText::new(&prototype.name).strong()
                    } else {
                        RichText::new(&prototype.name)
                    };
                    let response = ui.selectable_label(is_selected, label);
                    if response.clicked() {
                        open_id = Some(id.clone());
                    }
                    if prototype.description.is_some() {
                        response.on_hover_ui(|ui| {
                            let layout = preview_layout(prototype);
                            ui.set_max_width(layout.width * PREVIEW_TOOLTIP_SCALE);
                            ui.strong(&prototype.name);
                            if layout.description_height > 0.0
                                && let Some(description) = &prototype.description
                            {
                                ui.label(description);
                            }
                        });
                    }
                }

                if rows.len() > self.library_rows_visible {
                    let remaining = rows.len() - self.library_rows_visible;
                    if ui.button(format!("Show {remaining} more")).clicked() {
                        show_more = true;
                    }
                }
            });

        if show_more {
            self.library_rows_visible += Self::LIBRARY_PAGE_ROWS;
        }
        if let Some(id) = open_id {
            self.open_carousel(&id);
        }
    }

    fn library_rows(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return self.store.sorted_ids().to_vec();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &String)> = self
            .store
            .sorted_ids()
            .iter()
            .filter_map(|id| {
                let name = self.store.get(id).map(|p| p.name.as_str()).unwrap_or(id);
                fuzzy_match_score(&matcher, name, query).map(|score| (score, id))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().map(|(_, id)| id.clone()).collect()
    }
}
