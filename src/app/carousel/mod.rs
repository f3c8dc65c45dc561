mod chain;
mod color;
mod offsets;
mod physics;
pub(in crate::app) mod view;

use std::collections::BTreeMap;

use crate::layout::{NODE_HEIGHT, NodeLayout};
use crate::store::GraphStore;
use crate::util::lerp;

pub(in crate::app) use chain::EntryKind;

use chain::{ChainEntry, reachable_levels, resolve_chain};
use offsets::{LEVEL_SPACING, compute_offsets};
use physics::{LevelBounds, ScrollEngine};

pub(in crate::app) struct CarouselSession {
    focused_id: String,
    dimension: String,
    entries: Vec<ChainEntry>,
    offsets: BTreeMap<i32, f32>,
    engine: ScrollEngine,
}

impl CarouselSession {
    pub(in crate::app) fn open(store: &GraphStore, focused_id: &str, dimension: &str) -> Self {
        let mut session = Self {
            focused_id: focused_id.to_owned(),
            dimension: dimension.to_owned(),
            entries: Vec::new(),
            offsets: BTreeMap::new(),
            engine: ScrollEngine::new(),
        };
        session.rebuild(store);
        session
    }

    pub(in crate::app) fn set_dimension(&mut self, store: &GraphStore, dimension: &str) {
        if self.dimension == dimension {
            return;
        }
        self.dimension = dimension.to_owned();
        self.engine.reset();
        self.rebuild(store);
    }

    fn rebuild(&mut self, store: &GraphStore) {
        self.entries = resolve_chain(store, &self.focused_id, &self.dimension);
        self.offsets = compute_offsets(&self.entries);
        self.engine
            .set_bounds(LevelBounds::from_reachable_levels(&reachable_levels(
                &self.entries,
            )));
    }

    pub(in crate::app) fn focused_id(&self) -> &str {
        &self.focused_id
    }

    pub(in crate::app) fn dimension(&self) -> &str {
        &self.dimension
    }

    pub(in crate::app) fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub(in crate::app) fn position(&self) -> f32 {
        self.engine.position()
    }

    pub(in crate::app) fn is_snapping(&self) -> bool {
        self.engine.state().is_snapping
    }

    pub(in crate::app) fn velocity(&self) -> f32 {
        self.engine.state().velocity
    }

    pub(in crate::app) fn focus_scale(&self) -> f32 {
        self.engine.focus_scale()
    }

    pub(in crate::app) fn on_wheel(&mut self, delta_y: f32, now_ms: f64) {
        self.engine.on_wheel(delta_y, now_ms);
    }

    pub(in crate::app) fn jump_to_level(&mut self, level: i32, now_ms: f64) {
        self.engine.jump_to_level(level, now_ms);
    }

    pub(in crate::app) fn tick(&mut self, now_ms: f64) -> bool {
        self.engine.tick(now_ms)
    }

    pub(in crate::app) fn is_animating(&self) -> bool {
        self.engine.is_running()
    }

    pub(in crate::app) fn level_offset(&self, level: i32) -> Option<f32> {
        self.offsets.get(&level).copied()
    }

    /// How far the whole stack shifts so the fractional position sits at
    /// the anchor.
    pub(in crate::app) fn stack_offset(&self, zoom: f32) -> f32 {
        let position = self.position();
        let floor_level = position.floor() as i32;
        let ceil_level = position.ceil() as i32;

        let (Some(&floor_offset), Some(&ceil_offset)) = (
            self.offsets.get(&floor_level),
            self.offsets.get(&ceil_level),
        ) else {
            return -position * (NODE_HEIGHT + LEVEL_SPACING) * zoom;
        };

        let factor = position - floor_level as f32;
        -lerp(floor_offset, ceil_offset, factor) * zoom
    }

    pub(in crate::app) fn focused_entry(&self) -> Option<&ChainEntry> {
        let level = self.position().round() as i32;
        self.entries.iter().find(|entry| entry.level == level)
    }

    pub(in crate::app) fn interpolated_layout(&self) -> NodeLayout {
        let position = self.position();
        let floor_level = position.floor() as i32;
        let ceil_level = position.ceil() as i32;

        let at = |level: i32| {
            self.entries
                .iter()
                .find(|entry| entry.level == level)
                .map(|entry| &entry.layout)
        };

        // A missing side borrows the other so the blend stays defined.
        let floor_layout = at(floor_level).or_else(|| at(ceil_level));
        let ceil_layout = at(ceil_level).or_else(|| at(floor_level));

        let (Some(a), Some(b)) = (floor_layout, ceil_layout) else {
            return NodeLayout::fallback();
        };

        let t = position - floor_level as f32;
        NodeLayout {
            width: lerp(a.width, b.width, t),
            height: lerp(a.height, b.height, t),
            text_area_height: lerp(a.text_area_height, b.text_area_height, t),
            image_width: lerp(a.image_width, b.image_width, t),
            image_height: lerp(a.image_height, b.image_height, t),
            inner_width: lerp(a.inner_width, b.inner_width, t),
            inner_height: lerp(a.inner_height, b.inner_height, t),
            description_height: lerp(a.description_height, b.description_height, t),
        }
    }
}
