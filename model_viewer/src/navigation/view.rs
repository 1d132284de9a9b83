//! The six canonical views, their camera/cube attributes, and the face
//! adjacency used by the D-pad.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

/// Polar angle offset that keeps top/bottom views off the exact pole.
const POLE_EPSILON: f32 = 0.01;

/// One of the six camera-facing orientations of the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Front,
    Right,
    Back,
    Left,
    Top,
    Bottom,
}

/// A D-pad direction, interpreted relative to the active view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Static attributes of a view: camera angles in radians, cube pose in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSpec {
    pub azimuth: f32,
    pub polar: f32,
    pub cube_x: f32,
    pub cube_y: f32,
    pub label: &'static str,
}

/// The four neighbors of a view, one per direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    pub up: View,
    pub down: View,
    pub left: View,
    pub right: View,
}

impl Neighbors {
    pub fn toward(&self, direction: Direction) -> View {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn iter(self) -> impl Iterator<Item = (Direction, View)> {
        Direction::ALL.into_iter().map(move |d| (d, self.toward(d)))
    }
}

const FRONT: ViewSpec = ViewSpec {
    azimuth: 0.0,
    polar: FRAC_PI_2,
    cube_x: 0.0,
    cube_y: 0.0,
    label: "Front",
};
const RIGHT: ViewSpec = ViewSpec {
    azimuth: FRAC_PI_2,
    polar: FRAC_PI_2,
    cube_x: 0.0,
    cube_y: -90.0,
    label: "Right",
};
const BACK: ViewSpec = ViewSpec {
    azimuth: PI,
    polar: FRAC_PI_2,
    cube_x: 0.0,
    cube_y: -180.0,
    label: "Back",
};
const LEFT: ViewSpec = ViewSpec {
    azimuth: -FRAC_PI_2,
    polar: FRAC_PI_2,
    cube_x: 0.0,
    cube_y: 90.0,
    label: "Left",
};
const TOP: ViewSpec = ViewSpec {
    azimuth: 0.0,
    polar: POLE_EPSILON,
    cube_x: -90.0,
    cube_y: 0.0,
    label: "Top",
};
const BOTTOM: ViewSpec = ViewSpec {
    azimuth: 0.0,
    polar: PI - POLE_EPSILON,
    cube_x: 90.0,
    cube_y: 0.0,
    label: "Bottom",
};

// Each row reads as seen through the camera of that view: the top and bottom
// views keep azimuth 0, so their screen-up points at back and front.
const ADJACENCY: [(View, Neighbors); 6] = [
    (
        View::Front,
        Neighbors {
            up: View::Top,
            down: View::Bottom,
            left: View::Left,
            right: View::Right,
        },
    ),
    (
        View::Right,
        Neighbors {
            up: View::Top,
            down: View::Bottom,
            left: View::Front,
            right: View::Back,
        },
    ),
    (
        View::Back,
        Neighbors {
            up: View::Top,
            down: View::Bottom,
            left: View::Right,
            right: View::Left,
        },
    ),
    (
        View::Left,
        Neighbors {
            up: View::Top,
            down: View::Bottom,
            left: View::Back,
            right: View::Front,
        },
    ),
    (
        View::Top,
        Neighbors {
            up: View::Back,
            down: View::Front,
            left: View::Left,
            right: View::Right,
        },
    ),
    (
        View::Bottom,
        Neighbors {
            up: View::Front,
            down: View::Back,
            left: View::Left,
            right: View::Right,
        },
    ),
];

impl View {
    pub const ALL: [View; 6] = [
        View::Front,
        View::Right,
        View::Back,
        View::Left,
        View::Top,
        View::Bottom,
    ];

    pub const fn spec(self) -> &'static ViewSpec {
        match self {
            View::Front => &FRONT,
            View::Right => &RIGHT,
            View::Back => &BACK,
            View::Left => &LEFT,
            View::Top => &TOP,
            View::Bottom => &BOTTOM,
        }
    }

    pub const fn neighbors(self) -> Neighbors {
        ADJACENCY[self as usize].1
    }

    /// The face on the other side of the cube.
    pub const fn opposite(self) -> View {
        match self {
            View::Front => View::Back,
            View::Back => View::Front,
            View::Right => View::Left,
            View::Left => View::Right,
            View::Top => View::Bottom,
            View::Bottom => View::Top,
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Stable slot name of the D-pad button bound to this direction.
    pub const fn slot(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EQUATOR: [View; 4] = [View::Front, View::Right, View::Back, View::Left];

    #[test]
    fn adjacency_rows_are_indexed_by_view() {
        for (index, (view, _)) in ADJACENCY.iter().enumerate() {
            assert_eq!(*view as usize, index);
            assert_eq!(View::ALL[index], *view);
        }
    }

    #[test]
    fn every_view_has_four_distinct_cube_neighbors() {
        for view in View::ALL {
            let mut seen: Vec<View> = view.neighbors().iter().map(|(_, n)| n).collect();
            seen.sort_by_key(|v| *v as usize);
            seen.dedup();
            assert_eq!(seen.len(), 4, "{view} has a repeated neighbor");
            assert!(!seen.contains(&view), "{view} neighbors itself");
            assert!(!seen.contains(&view.opposite()), "{view} neighbors its opposite");
        }
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        for view in View::ALL {
            for (_, neighbor) in view.neighbors().iter() {
                let back: Vec<View> = neighbor.neighbors().iter().map(|(_, n)| n).collect();
                assert!(back.contains(&view), "{neighbor} does not lead back to {view}");
            }
        }
    }

    #[test]
    fn lateral_moves_invert_on_the_equator() {
        for view in EQUATOR {
            let n = view.neighbors();
            assert_eq!(n.left.neighbors().right, view);
            assert_eq!(n.right.neighbors().left, view);
        }
    }

    #[test]
    fn vertical_moves_invert_through_front() {
        assert_eq!(View::Front.neighbors().up.neighbors().down, View::Front);
        assert_eq!(View::Front.neighbors().down.neighbors().up, View::Front);
    }

    #[test]
    fn side_views_share_the_equatorial_pitch() {
        for view in EQUATOR {
            assert_eq!(view.spec().polar, FRAC_PI_2);
            assert_eq!(view.spec().cube_x, 0.0);
        }
        assert!(View::Top.spec().polar > 0.0);
        assert!(View::Bottom.spec().polar < PI);
    }

    #[test]
    fn direction_opposites_pair_up() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d.opposite().opposite(), d);
        }
    }
}
