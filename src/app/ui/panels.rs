use eframe::egui::{self, Align, Context, Layout};

use crate::store::GraphStore;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) const INITIAL_LIBRARY_ROWS: usize = 40;
    pub(in crate::app) const LIBRARY_PAGE_ROWS: usize = 40;

    pub(in crate::app) fn new(store: GraphStore) -> Self {
        let available_dimensions = store.dimension_names();
        let current_dimension = available_dimensions
            .first()
            .cloned()
            .unwrap_or_else(|| "Generalization".to_owned());

        Self {
            store,
            search: String::new(),
            selected: None,
            current_dimension,
            available_dimensions,
            zoom: 1.0,
            debug_mode: false,
            carousel: None,
            library_rows_visible: Self::INITIAL_LIBRARY_ROWS,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        store_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("mindstack");
                    ui.separator();
                    ui.label(format!("store: {store_path}"));
                    ui.label(format!("concepts: {}", self.store.node_count()));
                    ui.label(format!(
                        "dimensions: {}",
                        self.available_dimensions.len()
                    ));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload store"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(session) = &self.carousel {
                            let name = session
                                .focused_entry()
                                .map(|entry| entry.name.clone())
                                .unwrap_or_else(|| session.focused_id().to_owned());
                            ui.label(format!("viewing {} / {}", name, session.dimension()));
                        }
                    });
                });
            });

        egui::SidePanel::left("library")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.draw_controls(ui);
                ui.separator();
                self.draw_library(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading knowledge store...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else if self.carousel.is_some() {
                self.draw_carousel(ui);
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(160.0);
                    ui.heading("Pick a concept from the library");
                    ui.add_space(6.0);
                    ui.label("Scroll the stack to move between abstraction levels.");
                });
            }
        });
    }

    pub(in crate::app) fn open_carousel(&mut self, id: &str) {
        self.selected = Some(id.to_owned());
        self.carousel = Some(super::super::CarouselSession::open(
            &self.store,
            id,
            &self.current_dimension,
        ));
    }
}
