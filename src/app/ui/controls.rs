use eframe::egui::{self, Ui};

use super::super::ViewModel;

const MIN_ZOOM: f32 = 0.3;
const MAX_ZOOM: f32 = 2.5;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Dimension:");
            let mut picked = None;
            egui::ComboBox::from_id_salt("dimension_picker")
                .selected_text(self.current_dimension.clone())
                .show_ui(ui, |ui| {
                    for dimension in &self.available_dimensions {
                        if ui
                            .selectable_label(*dimension == self.current_dimension, dimension)
                            .clicked()
                        {
                            picked = Some(dimension.clone());
                        }
                    }
                });
            if let Some(dimension) = picked
                && dimension != self.current_dimension
            {
                self.current_dimension = dimension.clone();
                if let Some(session) = self.carousel.as_mut() {
                    session.set_dimension(&self.store, &dimension);
                }
            }
        });

        ui.add(
            egui::Slider::new(&mut self.zoom, MIN_ZOOM..=MAX_ZOOM)
                .text("Zoom")
                .logarithmic(true),
        );

        ui.checkbox(&mut self.debug_mode, "Physics overlay");

        if self.carousel.is_some() && ui.button("Close carousel").clicked() {
            self.carousel = None;
        }
    }
}
