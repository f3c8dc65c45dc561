use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::store::{GraphStore, load_store};

mod carousel;
mod render_utils;
mod ui;

use carousel::CarouselSession;

pub struct MindstackApp {
    store_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<GraphStore, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GraphStore, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    store: GraphStore,
    search: String,
    selected: Option<String>,
    current_dimension: String,
    available_dimensions: Vec<String>,
    zoom: f32,
    debug_mode: bool,
    carousel: Option<CarouselSession>,
    library_rows_visible: usize,
}

impl MindstackApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, store_path: String) -> Self {
        let state = Self::start_load(store_path.clone());
        Self {
            store_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(store_path: String) -> Receiver<Result<GraphStore, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_store(&store_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(store_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(store_path),
        }
    }
}

impl eframe::App for MindstackApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(store) => AppState::Ready(Box::new(ViewModel::new(store))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading knowledge store...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load knowledge store");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.store_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.store_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.store_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(store) => AppState::Ready(Box::new(ViewModel::new(store))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
