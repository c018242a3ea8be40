//! Color space conversion graph.
//!
//! Nodes are [`ColorSpaceType`] values, edges are the direct transforms of
//! [`crate::transforms`]. Converting between two arbitrary spaces walks the
//! shortest path (fewest edges) between them.
//!
//! # Architecture
//!
//! ```text
//!   HSL   HSV   YCbCr
//!     \    |    /
//!       SRGB ── RGB ── CIEXYZ ──┬── CIELAB* ── CIELCH
//!                               ├── OKLAB ──── OKLCH
//!                               ├── HunterLAB* ─ HunterLCH
//!                               ├── CIE1931Yxy
//!                               ├── CIELuv*
//!                               ├── AdobeRGB
//!                               └── ACESAP1
//! ```
//!
//! Edges marked `*` need a reference white point, which is looked up from
//! the observer/illuminant table.
//!
//! # Usage
//!
//! ```rust
//! use cmap_math::Vec3;
//! use cmap_space::{ColorSpaceGraph, ColorSpaceType, Illuminant, Observer};
//!
//! let graph = ColorSpaceGraph::global();
//! let lch = graph.convert(
//!     Vec3::new(1.0, 0.5, 0.0),
//!     ColorSpaceType::Srgb,
//!     ColorSpaceType::CieLch,
//!     Observer::Cie1931,
//!     Illuminant::D65,
//! )?;
//! # Ok::<(), cmap_space::ColorError>(())
//! ```

use crate::transforms as tf;
use crate::{ColorError, ColorResult, ColorSpaceType, Illuminant, Observer, white_point};
use cmap_math::Vec3;
use std::collections::VecDeque;
use std::sync::LazyLock;
use tracing::{debug, trace};

use ColorSpaceType::*;

/// Transform carried by a graph edge.
///
/// The variant doubles as the parameter requirement flag.
#[derive(Debug, Clone, Copy)]
pub enum EdgeTransform {
    /// Color-constant transform.
    Fixed(fn(Vec3) -> Vec3),
    /// Transform relative to a reference white (XYZ, `Y = 100`).
    WhitePoint(fn(Vec3, Vec3) -> Vec3),
}

impl EdgeTransform {
    /// Returns true if the transform needs a white point.
    #[inline]
    pub fn needs_white_point(&self) -> bool {
        matches!(self, Self::WhitePoint(_))
    }
}

/// A directed edge of the graph.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Source space.
    pub from: ColorSpaceType,
    /// Target space.
    pub to: ColorSpaceType,
    /// Transform from `from` to `to`.
    pub transform: EdgeTransform,
}

/// Directed graph of color spaces and direct transforms.
#[derive(Debug, Clone)]
pub struct ColorSpaceGraph {
    edges: Vec<Edge>,
    /// Outgoing edge indices per node, in registration order.
    adjacency: Vec<Vec<usize>>,
}

static STANDARD_GRAPH: LazyLock<ColorSpaceGraph> = LazyLock::new(ColorSpaceGraph::standard);

impl Default for ColorSpaceGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSpaceGraph {
    /// Creates a graph with every node and no edges.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); ColorSpaceType::COUNT],
        }
    }

    /// Builds the graph of all supported transforms.
    pub fn standard() -> Self {
        use EdgeTransform::{Fixed, WhitePoint};

        let mut g = Self::new();
        g.register_pair(Srgb, Rgb, Fixed(tf::srgb_to_rgb), Fixed(tf::rgb_to_srgb));
        g.register_pair(Rgb, CieXyz, Fixed(tf::rgb_to_xyz), Fixed(tf::xyz_to_rgb));
        g.register_pair(CieXyz, CieLab, WhitePoint(tf::xyz_to_lab), WhitePoint(tf::lab_to_xyz));
        g.register_pair(CieLab, CieLch, Fixed(tf::cartesian_to_polar), Fixed(tf::polar_to_cartesian));
        g.register_pair(CieXyz, OkLab, Fixed(tf::xyz_to_oklab), Fixed(tf::oklab_to_xyz));
        g.register_pair(OkLab, OkLch, Fixed(tf::cartesian_to_polar), Fixed(tf::polar_to_cartesian));
        g.register_pair(
            CieXyz,
            HunterLab,
            WhitePoint(tf::xyz_to_hunter_lab),
            WhitePoint(tf::hunter_lab_to_xyz),
        );
        g.register_pair(HunterLab, HunterLch, Fixed(tf::cartesian_to_polar), Fixed(tf::polar_to_cartesian));
        g.register_pair(Srgb, Hsl, Fixed(tf::srgb_to_hsl), Fixed(tf::hsl_to_srgb));
        g.register_pair(Srgb, Hsv, Fixed(tf::srgb_to_hsv), Fixed(tf::hsv_to_srgb));
        g.register_pair(Srgb, YCbCr, Fixed(tf::srgb_to_ycbcr), Fixed(tf::ycbcr_to_srgb));
        g.register_pair(CieXyz, CieYxy, Fixed(tf::xyz_to_yxy), Fixed(tf::yxy_to_xyz));
        g.register_pair(CieXyz, CieLuv, WhitePoint(tf::xyz_to_luv), WhitePoint(tf::luv_to_xyz));
        g.register_pair(CieXyz, AdobeRgb, Fixed(tf::xyz_to_adobe_rgb), Fixed(tf::adobe_rgb_to_xyz));
        g.register_pair(CieXyz, AcesAp1, Fixed(tf::xyz_to_aces_ap1), Fixed(tf::aces_ap1_to_xyz));
        g
    }

    /// The process-wide standard graph, built on first use.
    pub fn global() -> &'static Self {
        &STANDARD_GRAPH
    }

    /// Registers one directed edge. A later registration for the same
    /// pair replaces the earlier one.
    pub fn register(&mut self, from: ColorSpaceType, to: ColorSpaceType, transform: EdgeTransform) {
        let edge = Edge { from, to, transform };
        let out = &mut self.adjacency[from.index()];
        if let Some(&existing) = out.iter().find(|&&i| self.edges[i].to == to) {
            self.edges[existing] = edge;
        } else {
            out.push(self.edges.len());
            self.edges.push(edge);
        }
    }

    /// Registers a transform and its inverse.
    pub fn register_pair(
        &mut self,
        a: ColorSpaceType,
        b: ColorSpaceType,
        forward: EdgeTransform,
        inverse: EdgeTransform,
    ) {
        self.register(a, b, forward);
        self.register(b, a, inverse);
    }

    /// All registered edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The direct edge between two spaces, if any.
    pub fn edge(&self, from: ColorSpaceType, to: ColorSpaceType) -> Option<&Edge> {
        self.adjacency[from.index()]
            .iter()
            .map(|&i| &self.edges[i])
            .find(|e| e.to == to)
    }

    /// Finds the shortest route (by edge count) between two spaces.
    ///
    /// Routing `from` to itself yields an empty route.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnreachableColorSpace`] if no path exists.
    pub fn route(&self, from: ColorSpaceType, to: ColorSpaceType) -> ColorResult<Route> {
        if from == to {
            return Ok(Route { from, to, edges: Vec::new() });
        }

        // Breadth-first search; parent[n] is the edge that reached n
        let mut parent: Vec<Option<usize>> = vec![None; ColorSpaceType::COUNT];
        let mut visited = vec![false; ColorSpaceType::COUNT];
        let mut queue = VecDeque::from([from]);
        visited[from.index()] = true;

        while let Some(node) = queue.pop_front() {
            if node == to {
                break;
            }
            for &ei in &self.adjacency[node.index()] {
                let next = self.edges[ei].to;
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    parent[next.index()] = Some(ei);
                    queue.push_back(next);
                }
            }
        }

        if !visited[to.index()] {
            return Err(ColorError::UnreachableColorSpace { from, to });
        }

        let mut edges = Vec::new();
        let mut node = to;
        while let Some(ei) = parent[node.index()] {
            let edge = self.edges[ei];
            edges.push(edge);
            node = edge.from;
        }
        edges.reverse();

        trace!(%from, %to, hops = edges.len(), "routed color conversion");
        Ok(Route { from, to, edges })
    }

    /// Builds a reusable conversion between two spaces.
    ///
    /// # Errors
    ///
    /// - [`ColorError::UnreachableColorSpace`] if no path exists
    /// - [`ColorError::MissingColorSpaceParameter`] if the route needs a
    ///   white point and `white` is `None`
    pub fn conversion(
        &self,
        from: ColorSpaceType,
        to: ColorSpaceType,
        white: Option<Vec3>,
    ) -> ColorResult<Conversion> {
        Conversion::new(self.route(from, to)?, white)
    }

    /// Converts one color triple between spaces.
    ///
    /// The white point for parameterized edges comes from the
    /// observer/illuminant table. Converting a space to itself returns the
    /// input unchanged.
    pub fn convert(
        &self,
        value: Vec3,
        from: ColorSpaceType,
        to: ColorSpaceType,
        observer: Observer,
        illuminant: Illuminant,
    ) -> ColorResult<Vec3> {
        if from == to {
            return Ok(value);
        }
        let conversion = self.conversion(from, to, Some(white_point(observer, illuminant)))?;
        Ok(conversion.apply(value))
    }
}

/// Converts a color triple with the standard graph.
///
/// # Example
///
/// ```rust
/// use cmap_math::Vec3;
/// use cmap_space::{ColorSpaceType, Illuminant, Observer, convert};
///
/// let xyz = convert(
///     Vec3::ONE,
///     ColorSpaceType::Srgb,
///     ColorSpaceType::CieXyz,
///     Observer::Cie1931,
///     Illuminant::D65,
/// )?;
/// assert!((xyz.y - 100.0).abs() < 1e-4);
/// # Ok::<(), cmap_space::ColorError>(())
/// ```
pub fn convert(
    value: Vec3,
    from: ColorSpaceType,
    to: ColorSpaceType,
    observer: Observer,
    illuminant: Illuminant,
) -> ColorResult<Vec3> {
    ColorSpaceGraph::global().convert(value, from, to, observer, illuminant)
}

/// An ordered list of edges leading from one space to another.
#[derive(Debug, Clone)]
pub struct Route {
    from: ColorSpaceType,
    to: ColorSpaceType,
    edges: Vec<Edge>,
}

impl Route {
    /// Source space.
    pub fn from(&self) -> ColorSpaceType {
        self.from
    }

    /// Target space.
    pub fn to(&self) -> ColorSpaceType {
        self.to
    }

    /// Edges in application order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true for the identity route.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Visited spaces, both endpoints included.
    pub fn spaces(&self) -> Vec<ColorSpaceType> {
        std::iter::once(self.from).chain(self.edges.iter().map(|e| e.to)).collect()
    }

    /// First edge on the route that needs a white point.
    pub fn white_point_edge(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.transform.needs_white_point())
    }
}

/// A validated route bound to its parameters, ready to apply.
#[derive(Debug, Clone)]
pub struct Conversion {
    route: Route,
    white: Option<Vec3>,
}

impl Conversion {
    /// Binds a route to an optional white point.
    ///
    /// # Errors
    ///
    /// [`ColorError::MissingColorSpaceParameter`] naming the first edge that
    /// needs a white point when none was given.
    pub fn new(route: Route, white: Option<Vec3>) -> ColorResult<Self> {
        if white.is_none() {
            if let Some(edge) = route.white_point_edge() {
                return Err(ColorError::MissingColorSpaceParameter {
                    from: edge.from,
                    to: edge.to,
                });
            }
        }
        debug!(from = %route.from, to = %route.to, hops = route.len(), "built conversion");
        Ok(Self { route, white })
    }

    /// The underlying route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Applies every edge in order.
    pub fn apply(&self, value: Vec3) -> Vec3 {
        // Construction guarantees a white point when any edge needs one
        let white = self.white.unwrap_or(Vec3::ZERO);
        self.route.edges.iter().fold(value, |c, edge| match edge.transform {
            EdgeTransform::Fixed(f) => f(c),
            EdgeTransform::WhitePoint(f) => f(c, white),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_reachable() {
        let g = ColorSpaceGraph::global();
        for from in ColorSpaceType::ALL {
            for to in ColorSpaceType::ALL {
                assert!(g.route(from, to).is_ok(), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_edges_have_inverses() {
        let g = ColorSpaceGraph::standard();
        assert_eq!(g.edges().len(), 30);
        for edge in g.edges() {
            let back = g.edge(edge.to, edge.from).expect("inverse edge");
            assert_eq!(back.transform.needs_white_point(), edge.transform.needs_white_point());
        }
    }

    #[test]
    fn test_shortest_route() {
        let g = ColorSpaceGraph::global();
        let route = g.route(Hsl, AcesAp1).unwrap();
        assert_eq!(route.spaces(), vec![Hsl, Srgb, Rgb, CieXyz, AcesAp1]);

        let route = g.route(CieLch, OkLch).unwrap();
        assert_eq!(route.len(), 4);
        assert!(route.white_point_edge().is_some());
    }

    #[test]
    fn test_identity_route() {
        let route = ColorSpaceGraph::global().route(OkLab, OkLab).unwrap();
        assert!(route.is_empty());
        assert_eq!(route.spaces(), vec![OkLab]);
    }

    #[test]
    fn test_identity_convert_is_exact() {
        let v = Vec3::new(0.123456789, -4.5, 1e9);
        let out = convert(v, HunterLch, HunterLch, Observer::Cie1964, Illuminant::F7).unwrap();
        assert_eq!(out, v);
    }

    #[test]
    fn test_unreachable() {
        let mut g = ColorSpaceGraph::new();
        g.register(Srgb, Rgb, EdgeTransform::Fixed(tf::srgb_to_rgb));
        let err = g.route(Rgb, Srgb).unwrap_err();
        assert_eq!(err, ColorError::UnreachableColorSpace { from: Rgb, to: Srgb });
    }

    #[test]
    fn test_missing_white_point_at_construction() {
        let g = ColorSpaceGraph::global();
        let err = g.conversion(Srgb, CieLab, None).unwrap_err();
        assert_eq!(err, ColorError::MissingColorSpaceParameter { from: CieXyz, to: CieLab });

        // Color-constant routes need nothing
        assert!(g.conversion(Srgb, OkLch, None).is_ok());
    }

    #[test]
    fn test_register_replaces() {
        let mut g = ColorSpaceGraph::new();
        g.register(Srgb, Rgb, EdgeTransform::Fixed(tf::srgb_to_rgb));
        g.register(Srgb, Rgb, EdgeTransform::Fixed(|c| c * 2.0));
        assert_eq!(g.edges().len(), 1);
        let out = g.conversion(Srgb, Rgb, None).unwrap().apply(Vec3::ONE);
        assert_eq!(out, Vec3::splat(2.0));
    }

    #[test]
    fn test_illuminant_changes_lab() {
        let white = Vec3::ONE;
        let d65 = convert(white, Srgb, CieLab, Observer::Cie1931, Illuminant::D65).unwrap();
        let a = convert(white, Srgb, CieLab, Observer::Cie1931, Illuminant::A).unwrap();
        assert!(d65.y.abs() < 0.01 && d65.z.abs() < 0.01, "{d65:?}");
        assert!(a.max_abs_diff(d65) > 1.0, "{a:?}");
    }
}
