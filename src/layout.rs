use crate::util::finite_or;

pub const NODE_WIDTH: f32 = 160.0;
pub const NODE_HEIGHT: f32 = 80.0;
pub const EXPANDED_NODE_WIDTH: f32 = 300.0;
pub const NODE_PADDING: f32 = 15.0;
pub const NODE_CORNER_RADIUS: f32 = 40.0;
pub const AVERAGE_CHAR_WIDTH: f32 = 12.0;
pub const LINE_HEIGHT_ESTIMATE: f32 = 24.0;
const TEXT_V_PADDING: f32 = 15.0;

const PREVIEW_NODE_WIDTH: f32 = 600.0;
const PREVIEW_NODE_MIN_HEIGHT: f32 = 600.0;
const PREVIEW_HORIZONTAL_PADDING: f32 = 110.0;
const PREVIEW_MIN_INNER_HEIGHT: f32 = 150.0;
const DESCRIPTION_LINE_HEIGHT: f32 = 24.0;
const DESCRIPTION_MAX_LINES: f32 = 3.0;
const DESCRIPTION_PADDING: f32 = 8.0;

#[derive(Clone, Copy, Debug)]
pub struct NodeContent<'a> {
    pub name: &'a str,
    pub has_thumbnail: bool,
    pub image_aspect_ratio: f32,
    pub description: Option<&'a str>,
}

/// All values are pixels at zoom 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    pub width: f32,
    pub height: f32,
    pub text_area_height: f32,
    pub image_width: f32,
    pub image_height: f32,
    pub inner_width: f32,
    pub inner_height: f32,
    pub description_height: f32,
}

impl NodeLayout {
    pub fn fallback() -> Self {
        Self {
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            text_area_height: NODE_HEIGHT,
            image_width: 0.0,
            image_height: 0.0,
            inner_width: 0.0,
            inner_height: 0.0,
            description_height: 0.0,
        }
    }
}

/// Greedy word wrap under the average-character-width model; words longer
/// than a full line break across lines.
pub fn text_block_height(name: &str, width: f32) -> f32 {
    if width <= 0.0 {
        return LINE_HEIGHT_ESTIMATE;
    }

    let chars_per_line = (width / AVERAGE_CHAR_WIDTH).floor() as usize;
    if name.is_empty() || chars_per_line == 0 {
        return LINE_HEIGHT_ESTIMATE;
    }

    let mut line_count = 1usize;
    let mut current_line_chars = 0usize;

    for word in name.split(' ') {
        let word_length = word.chars().count();

        if word_length > chars_per_line {
            if current_line_chars > 0 {
                line_count += 1;
            }
            line_count += word_length.div_ceil(chars_per_line) - 1;
            current_line_chars = 0;
            continue;
        }

        let space = if current_line_chars > 0 { 1 } else { 0 };
        if current_line_chars > 0 && current_line_chars + space + word_length > chars_per_line {
            line_count += 1;
            current_line_chars = word_length;
        } else {
            current_line_chars += space + word_length;
        }
    }

    line_count as f32 * LINE_HEIGHT_ESTIMATE
}

fn description_block_height(description: Option<&str>, width: f32) -> f32 {
    let Some(text) = description else {
        return 0.0;
    };
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let estimated = text_block_height(text, width) / LINE_HEIGHT_ESTIMATE * DESCRIPTION_LINE_HEIGHT;
    let capped = estimated.min(DESCRIPTION_MAX_LINES * DESCRIPTION_LINE_HEIGHT);
    capped + DESCRIPTION_PADDING
}

pub fn node_layout(content: &NodeContent, is_previewing: bool) -> NodeLayout {
    let name = content.name;
    let text_width = name.chars().count() as f32 * AVERAGE_CHAR_WIDTH;

    let mut layout = if is_previewing {
        let width = PREVIEW_NODE_WIDTH;
        let text_width_target = width - 2.0 * PREVIEW_HORIZONTAL_PADDING;
        let text_area_height =
            NODE_HEIGHT.max(text_block_height(name, text_width_target) + 2.0 * TEXT_V_PADDING);

        let inner_width = width - 2.0 * NODE_PADDING;
        let description_height = description_block_height(content.description, inner_width);

        let available_inner = PREVIEW_NODE_MIN_HEIGHT
            - text_area_height
            - description_height
            - (NODE_PADDING * 2.0);
        let inner_height = PREVIEW_MIN_INNER_HEIGHT.max(available_inner);

        NodeLayout {
            width,
            height: text_area_height + inner_height + description_height + NODE_PADDING,
            text_area_height,
            image_width: 0.0,
            image_height: 0.0,
            inner_width,
            inner_height,
            description_height,
        }
    } else if content.has_thumbnail {
        let width = EXPANDED_NODE_WIDTH;
        let text_width_target = width - 2.0 * NODE_PADDING;
        let text_area_height =
            NODE_HEIGHT.max(text_block_height(name, text_width_target) + 2.0 * TEXT_V_PADDING);

        let image_width = width - 2.0 * NODE_PADDING;
        let image_height = if content.image_aspect_ratio > 0.0 {
            image_width * content.image_aspect_ratio
        } else {
            0.0
        };
        let height = if image_height > 0.0 {
            text_area_height + image_height + NODE_PADDING
        } else {
            text_area_height
        };

        NodeLayout {
            width,
            height,
            text_area_height,
            image_width,
            image_height,
            inner_width: 0.0,
            inner_height: 0.0,
            description_height: 0.0,
        }
    } else {
        let is_single_word = !name.contains(' ');
        let width = NODE_WIDTH.max((text_width + 2.0 * NODE_PADDING).min(EXPANDED_NODE_WIDTH));

        // Single words that fit never wrap.
        let block_height = if is_single_word && width < EXPANDED_NODE_WIDTH {
            LINE_HEIGHT_ESTIMATE
        } else {
            text_block_height(name, width - 2.0 * NODE_PADDING)
        };
        let height = NODE_HEIGHT.max(block_height + 2.0 * TEXT_V_PADDING);

        NodeLayout {
            width,
            height,
            text_area_height: height,
            image_width: 0.0,
            image_height: 0.0,
            inner_width: 0.0,
            inner_height: 0.0,
            description_height: 0.0,
        }
    };

    layout.height = layout.height.max(NODE_HEIGHT);
    layout.width = finite_or(layout.width, NODE_WIDTH);
    layout.height = finite_or(layout.height, NODE_HEIGHT);
    layout.text_area_height = finite_or(layout.text_area_height, NODE_HEIGHT);
    layout.image_width = finite_or(layout.image_width, 0.0);
    layout.image_height = finite_or(layout.image_height, 0.0);
    layout.inner_width = finite_or(layout.inner_width, 0.0);
    layout.inner_height = finite_or(layout.inner_height, 0.0);
    layout.description_height = finite_or(layout.description_height, 0.0);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(name: &str) -> NodeContent<'_> {
        NodeContent {
            name,
            has_thumbnail: false,
            image_aspect_ratio: 1.0,
            description: None,
        }
    }

    #[test]
    fn short_single_word_uses_base_box() {
        let layout = node_layout(&plain("Cat"), false);
        assert_eq!(layout.width, NODE_WIDTH);
        assert_eq!(layout.height, NODE_HEIGHT);
        assert_eq!(layout.text_area_height, layout.height);
    }

    #[test]
    fn long_name_widens_up_to_the_expanded_cap() {
        let layout = node_layout(&plain("A somewhat longer concept name"), false);
        assert!(layout.width > NODE_WIDTH);
        assert!(layout.width <= EXPANDED_NODE_WIDTH);
    }

    #[test]
    fn wrapped_name_grows_node_height() {
        let short = node_layout(&plain("Tool"), false);
        let long = node_layout(
            &plain("An exceptionally verbose multi word concept label that wraps"),
            false,
        );
        assert!(long.height > short.height);
    }

    #[test]
    fn single_word_below_cap_does_not_wrap() {
        let layout = node_layout(&plain("Hammerhead"), false);
        assert_eq!(layout.height, NODE_HEIGHT);
    }

    #[test]
    fn thumbnail_node_reserves_image_area() {
        let content = NodeContent {
            name: "Photo",
            has_thumbnail: true,
            image_aspect_ratio: 0.5,
            description: None,
        };
        let layout = node_layout(&content, false);
        assert_eq!(layout.width, EXPANDED_NODE_WIDTH);
        assert_eq!(layout.image_width, EXPANDED_NODE_WIDTH - 2.0 * NODE_PADDING);
        assert_eq!(layout.image_height, layout.image_width * 0.5);
        assert_eq!(
            layout.height,
            layout.text_area_height + layout.image_height + NODE_PADDING
        );
    }

    #[test]
    fn thumbnail_without_aspect_ratio_collapses_to_text_area() {
        let content = NodeContent {
            name: "Photo",
            has_thumbnail: true,
            image_aspect_ratio: 0.0,
            description: None,
        };
        let layout = node_layout(&content, false);
        assert_eq!(layout.image_height, 0.0);
        assert_eq!(layout.height, layout.text_area_height);
    }

    #[test]
    fn preview_layout_meets_minimums() {
        let content = NodeContent {
            name: "Concept",
            has_thumbnail: false,
            image_aspect_ratio: 1.0,
            description: Some("A description that takes a line or two of space."),
        };
        let layout = node_layout(&content, true);
        assert_eq!(layout.width, PREVIEW_NODE_WIDTH);
        assert!(layout.inner_height >= PREVIEW_MIN_INNER_HEIGHT);
        assert!(layout.description_height > 0.0);
        assert_eq!(
            layout.height,
            layout.text_area_height
                + layout.inner_height
                + layout.description_height
                + NODE_PADDING
        );
    }

    #[test]
    fn preview_without_description_has_no_description_area() {
        let layout = node_layout(&plain("Concept"), true);
        assert_eq!(layout.description_height, 0.0);
    }

    #[test]
    fn text_block_counts_wrapped_lines() {
        // 120px / 12px per char = 10 chars per line.
        assert_eq!(text_block_height("tiny", 120.0), LINE_HEIGHT_ESTIMATE);
        assert_eq!(
            text_block_height("four nine chars", 120.0),
            2.0 * LINE_HEIGHT_ESTIMATE
        );
    }

    #[test]
    fn text_block_breaks_overlong_words() {
        // 25 chars at 10 per line occupy 3 lines.
        assert_eq!(
            text_block_height(&"x".repeat(25), 120.0),
            3.0 * LINE_HEIGHT_ESTIMATE
        );
    }

    #[test]
    fn text_block_handles_degenerate_widths() {
        assert_eq!(text_block_height("name", 0.0), LINE_HEIGHT_ESTIMATE);
        assert_eq!(text_block_height("", 120.0), LINE_HEIGHT_ESTIMATE);
    }
}
