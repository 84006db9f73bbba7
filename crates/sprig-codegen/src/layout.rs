//! Layout-mode resolution for containers.
//!
//! A container either lays its children out in a directional flow (row or
//! column with gap, padding and alignment) or positions every child
//! absolutely. The decision is made once per container per pass:
//!
//! 1. An explicit, non-`NONE` layout mode on the node wins.
//! 2. Otherwise, with layout optimization on, the host's inferred hint is used.
//! 3. Otherwise children are positioned absolutely.

use sprig_core::{
    AutoLayoutProps, AxisSizingMode, CounterAxisAlign, FrameNode, LayoutMode, LayoutWrap,
    NodeBase, PrimaryAxisAlign, SceneNode,
};

/// Flow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    /// Top equals bottom and left equals right.
    pub fn is_symmetric(&self) -> bool {
        self.top == self.bottom && self.left == self.right
    }
}

/// Distribution along the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAxisAlignment {
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Alignment on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    Start,
    Center,
    End,
    Baseline,
}

/// A directional flow arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    pub direction: Direction,
    pub gap: f64,
    pub padding: Padding,
    pub main_axis: MainAxisAlignment,
    pub cross_axis: CrossAxisAlignment,
    pub wrap: bool,
    /// Container hugs its content along the flow direction.
    pub hug_primary: bool,
    /// Container hugs its content across the flow direction.
    pub hug_counter: bool,
}

impl FlowLayout {
    /// `None` when the props declare no layout mode.
    pub fn from_props(props: &AutoLayoutProps) -> Option<Self> {
        let direction = match props.layout_mode {
            LayoutMode::None => return None,
            LayoutMode::Horizontal => Direction::Row,
            LayoutMode::Vertical => Direction::Column,
        };
        Some(Self {
            direction,
            gap: props.item_spacing,
            padding: Padding {
                top: props.padding_top,
                right: props.padding_right,
                bottom: props.padding_bottom,
                left: props.padding_left,
            },
            main_axis: match props.primary_axis_align_items {
                PrimaryAxisAlign::Min => MainAxisAlignment::Start,
                PrimaryAxisAlign::Center => MainAxisAlignment::Center,
                PrimaryAxisAlign::Max => MainAxisAlignment::End,
                PrimaryAxisAlign::SpaceBetween => MainAxisAlignment::SpaceBetween,
            },
            cross_axis: match props.counter_axis_align_items {
                CounterAxisAlign::Min => CrossAxisAlignment::Start,
                CounterAxisAlign::Center => CrossAxisAlignment::Center,
                CounterAxisAlign::Max => CrossAxisAlignment::End,
                CounterAxisAlign::Baseline => CrossAxisAlignment::Baseline,
            },
            wrap: props.layout_wrap == LayoutWrap::Wrap,
            hug_primary: props.primary_axis_sizing_mode == AxisSizingMode::Auto,
            hug_counter: props.counter_axis_sizing_mode == AxisSizingMode::Auto,
        })
    }

    pub fn hugs_width(&self) -> bool {
        match self.direction {
            Direction::Row => self.hug_primary,
            Direction::Column => self.hug_counter,
        }
    }

    pub fn hugs_height(&self) -> bool {
        match self.direction {
            Direction::Row => self.hug_counter,
            Direction::Column => self.hug_primary,
        }
    }
}

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutDecision {
    ExplicitFlow(FlowLayout),
    Absolute,
}

impl LayoutDecision {
    pub fn flow(&self) -> Option<&FlowLayout> {
        match self {
            LayoutDecision::ExplicitFlow(flow) => Some(flow),
            LayoutDecision::Absolute => None,
        }
    }
}

/// Decide how `frame` lays out its children.
pub fn resolve_layout(frame: &FrameNode, optimize_layout: bool) -> LayoutDecision {
    if let Some(flow) = FlowLayout::from_props(&frame.auto_layout) {
        return LayoutDecision::ExplicitFlow(flow);
    }

    if optimize_layout {
        if let Some(flow) = frame
            .inferred_auto_layout
            .as_ref()
            .and_then(FlowLayout::from_props)
        {
            // The hint is trusted as given even when it disagrees with the
            // children's geometric order.
            if !children_follow(&frame.children, flow.direction) {
                tracing::debug!(
                    frame = %frame.base.name,
                    direction = ?flow.direction,
                    "inferred layout disagrees with child order; using it anyway"
                );
            }
            return LayoutDecision::ExplicitFlow(flow);
        }
    }

    LayoutDecision::Absolute
}

fn visible_bases(children: &[SceneNode]) -> Vec<&NodeBase> {
    children
        .iter()
        .filter_map(SceneNode::base)
        .filter(|b| b.visible)
        .collect()
}

/// Children appear in list order along `direction`.
fn children_follow(children: &[SceneNode], direction: Direction) -> bool {
    let bases = visible_bases(children);
    bases.windows(2).all(|pair| match direction {
        Direction::Row => pair[0].x <= pair[1].x,
        Direction::Column => pair[0].y <= pair[1].y,
    })
}

const ALIGN_TOLERANCE: f64 = 1.0;

/// Infer a flow arrangement from the children's bounding boxes.
///
/// Children must not overlap along the chosen axis, must already be listed
/// in geometric order, and must be separated by consistent gaps. Returns
/// `None` when the arrangement is not a clean row or column.
pub fn infer_auto_layout(frame: &FrameNode) -> Option<AutoLayoutProps> {
    let bases = visible_bases(&frame.children);
    if bases.len() < 2 {
        return None;
    }

    let direction = if is_sequential(&bases, Direction::Row) {
        Direction::Row
    } else if is_sequential(&bases, Direction::Column) {
        Direction::Column
    } else {
        return None;
    };

    let gaps: Vec<f64> = bases
        .windows(2)
        .map(|pair| match direction {
            Direction::Row => pair[1].x - (pair[0].x + pair[0].width),
            Direction::Column => pair[1].y - (pair[0].y + pair[0].height),
        })
        .collect();
    let gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if gaps.iter().any(|g| (g - gap).abs() > (gap * 0.2).max(ALIGN_TOLERANCE)) {
        return None;
    }

    let min_x = bases.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
    let min_y = bases.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
    let max_x = bases.iter().map(|b| b.x + b.width).fold(f64::NEG_INFINITY, f64::max);
    let max_y = bases.iter().map(|b| b.y + b.height).fold(f64::NEG_INFINITY, f64::max);

    let counter = match direction {
        Direction::Row => cross_alignment(bases.iter().map(|b| (b.y, b.height))),
        Direction::Column => cross_alignment(bases.iter().map(|b| (b.x, b.width))),
    };

    let mode = match direction {
        Direction::Row => LayoutMode::Horizontal,
        Direction::Column => LayoutMode::Vertical,
    };

    let mut props = AutoLayoutProps::new(mode, gap.max(0.0).round()).with_padding(
        min_y.max(0.0).round(),
        (frame.base.width - max_x).max(0.0).round(),
        (frame.base.height - max_y).max(0.0).round(),
        min_x.max(0.0).round(),
    );
    props.counter_axis_align_items = counter;
    Some(props)
}

fn is_sequential(bases: &[&NodeBase], direction: Direction) -> bool {
    bases.windows(2).all(|pair| match direction {
        Direction::Row => pair[0].x + pair[0].width <= pair[1].x + ALIGN_TOLERANCE,
        Direction::Column => pair[0].y + pair[0].height <= pair[1].y + ALIGN_TOLERANCE,
    })
}

/// Pick the cross-axis alignment whose edges line up, from `(offset, extent)`
/// pairs.
fn cross_alignment(spans: impl Iterator<Item = (f64, f64)> + Clone) -> CounterAxisAlign {
    let spread = |values: Vec<f64>| {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        max - min
    };
    let starts = spread(spans.clone().map(|(o, _)| o).collect());
    let centers = spread(spans.clone().map(|(o, e)| o + e / 2.0).collect());
    let ends = spread(spans.map(|(o, e)| o + e).collect());

    if starts <= ALIGN_TOLERANCE {
        CounterAxisAlign::Min
    } else if centers <= ALIGN_TOLERANCE {
        CounterAxisAlign::Center
    } else if ends <= ALIGN_TOLERANCE {
        CounterAxisAlign::Max
    } else {
        CounterAxisAlign::Min
    }
}

/// Fill in missing inferred-layout hints across a tree, for hosts that do
/// not compute their own. Frames with an explicit layout mode or an
/// existing hint are left untouched.
pub fn annotate_inferred_layouts(nodes: &mut [SceneNode]) {
    for node in nodes {
        if let SceneNode::Frame(frame) = node {
            if frame.auto_layout.layout_mode == LayoutMode::None
                && frame.inferred_auto_layout.is_none()
            {
                frame.inferred_auto_layout = infer_auto_layout(frame);
            }
        }
        if let Some(children) = node.children_mut() {
            annotate_inferred_layouts(children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::{NodeBase, ShapeNode};

    fn rect(name: &str, x: f64, y: f64, w: f64, h: f64) -> SceneNode {
        SceneNode::Rectangle(ShapeNode::new(NodeBase::new(name, x, y, w, h)))
    }

    fn frame(children: Vec<SceneNode>) -> FrameNode {
        FrameNode::new(NodeBase::new("Frame", 0.0, 0.0, 200.0, 100.0)).with_children(children)
    }

    #[test]
    fn test_explicit_layout_wins() {
        let mut f = frame(vec![]).with_auto_layout(
            AutoLayoutProps::new(LayoutMode::Vertical, 12.0).with_padding(1.0, 2.0, 3.0, 4.0),
        );
        f.inferred_auto_layout = Some(AutoLayoutProps::new(LayoutMode::Horizontal, 0.0));

        let LayoutDecision::ExplicitFlow(flow) = resolve_layout(&f, true) else {
            panic!("expected flow");
        };
        assert_eq!(flow.direction, Direction::Column);
        assert_eq!(flow.gap, 12.0);
        assert_eq!(flow.padding.left, 4.0);
        assert_eq!(flow.main_axis, MainAxisAlignment::Start);
    }

    #[test]
    fn test_inferred_hint_requires_optimization() {
        let mut f = frame(vec![]);
        f.inferred_auto_layout = Some(AutoLayoutProps::new(LayoutMode::Horizontal, 8.0));

        assert!(matches!(
            resolve_layout(&f, true),
            LayoutDecision::ExplicitFlow(FlowLayout {
                direction: Direction::Row,
                ..
            })
        ));
        assert_eq!(resolve_layout(&f, false), LayoutDecision::Absolute);
    }

    #[test]
    fn test_no_metadata_is_absolute() {
        let f = frame(vec![rect("a", 0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(resolve_layout(&f, true), LayoutDecision::Absolute);
    }

    #[test]
    fn test_inferred_hint_trusted_when_children_disagree() {
        // Children run top to bottom but the hint says row; the hint wins.
        let mut f = frame(vec![
            rect("a", 0.0, 0.0, 50.0, 10.0),
            rect("b", 0.0, 20.0, 50.0, 10.0),
        ]);
        f.children.reverse();
        f.inferred_auto_layout = Some(AutoLayoutProps::new(LayoutMode::Horizontal, 0.0));

        let decision = resolve_layout(&f, true);
        assert_eq!(decision.flow().map(|f| f.direction), Some(Direction::Row));
    }

    #[test]
    fn test_infer_row() {
        let f = frame(vec![
            rect("a", 10.0, 20.0, 40.0, 40.0),
            rect("b", 58.0, 20.0, 40.0, 40.0),
            rect("c", 106.0, 20.0, 40.0, 40.0),
        ]);
        let props = infer_auto_layout(&f).unwrap();
        assert_eq!(props.layout_mode, LayoutMode::Horizontal);
        assert_eq!(props.item_spacing, 8.0);
        assert_eq!(props.padding_left, 10.0);
        assert_eq!(props.padding_top, 20.0);
        assert_eq!(props.padding_right, 54.0);
        assert_eq!(props.padding_bottom, 40.0);
        assert_eq!(props.counter_axis_align_items, CounterAxisAlign::Min);
    }

    #[test]
    fn test_infer_centered_column() {
        let f = frame(vec![
            rect("a", 50.0, 0.0, 100.0, 20.0),
            rect("b", 75.0, 30.0, 50.0, 20.0),
        ]);
        let props = infer_auto_layout(&f).unwrap();
        assert_eq!(props.layout_mode, LayoutMode::Vertical);
        assert_eq!(props.item_spacing, 10.0);
        assert_eq!(props.counter_axis_align_items, CounterAxisAlign::Center);
    }

    #[test]
    fn test_infer_rejects_overlap_and_uneven_gaps() {
        let overlapping = frame(vec![
            rect("a", 0.0, 0.0, 50.0, 50.0),
            rect("b", 25.0, 25.0, 50.0, 50.0),
        ]);
        assert_eq!(infer_auto_layout(&overlapping), None);

        let uneven = frame(vec![
            rect("a", 0.0, 0.0, 10.0, 10.0),
            rect("b", 12.0, 0.0, 10.0, 10.0),
            rect("c", 60.0, 0.0, 10.0, 10.0),
        ]);
        assert_eq!(infer_auto_layout(&uneven), None);
    }

    #[test]
    fn test_annotate_fills_missing_hints() {
        let inner = frame(vec![
            rect("a", 0.0, 0.0, 10.0, 10.0),
            rect("b", 0.0, 20.0, 10.0, 10.0),
        ]);
        let mut nodes = vec![SceneNode::Frame(frame(vec![SceneNode::Frame(inner)]))];
        annotate_inferred_layouts(&mut nodes);

        let SceneNode::Frame(outer) = &nodes[0] else {
            panic!("expected frame");
        };
        // A single child cannot be inferred.
        assert!(outer.inferred_auto_layout.is_none());
        let SceneNode::Frame(inner) = &outer.children[0] else {
            panic!("expected frame");
        };
        assert_eq!(
            inner.inferred_auto_layout.as_ref().map(|p| p.layout_mode),
            Some(LayoutMode::Vertical)
        );
    }
}
