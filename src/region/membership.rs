use super::{Region, RegionId, RegionSet};

/// Result of an instrumented membership query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MembershipProbe {
    /// First region containing the point, if any.
    pub region: Option<RegionId>,
    /// Ring edges examined by the ray cast.
    pub edges_evaluated: usize,
}

impl MembershipProbe {
    pub fn inside(&self) -> bool {
        self.region.is_some()
    }
}

/// Bbox-pruned even-odd point membership over a [`RegionSet`].
///
/// Meant for sparse, interactive queries. Classifying a dense raster with it
/// is far too slow; use the rasterizer for that.
#[derive(Clone, Copy)]
pub struct PointMembershipTester<'a> {
    regions: &'a RegionSet,
}

impl<'a> PointMembershipTester<'a> {
    pub fn new(regions: &'a RegionSet) -> Self {
        Self { regions }
    }

    /// Is (lat, lon) inside any region?
    pub fn test_membership(&self, lat: f64, lon: f64) -> bool {
        self.probe(lat, lon).inside()
    }

    /// Id of the first region containing (lat, lon).
    pub fn region_at(&self, lat: f64, lon: f64) -> Option<RegionId> {
        self.probe(lat, lon).region
    }

    /// Membership query that also counts how many edges were evaluated.
    pub fn probe(&self, lat: f64, lon: f64) -> MembershipProbe {
        let mut edges = 0usize;
        for region in self.regions {
            if region_contains(region, lat, lon, &mut edges) {
                return MembershipProbe {
                    region: Some(region.id),
                    edges_evaluated: edges,
                };
            }
        }
        MembershipProbe {
            region: None,
            edges_evaluated: edges,
        }
    }
}

fn region_contains(region: &Region, lat: f64, lon: f64, edges: &mut usize) -> bool {
    if !region.bounding_box.contains(lat, lon) {
        return false;
    }

    if !region.is_multi_part() {
        return region
            .exteriors()
            .next()
            .is_some_and(|ring| ring_contains(ring, lat, lon, edges));
    }

    region
        .exteriors()
        .zip(&region.sub_bounding_boxes)
        .any(|(ring, bounds)| bounds.contains(lat, lon) && ring_contains(ring, lat, lon, edges))
}

/// Even-odd ray cast along the query latitude over a ring of (lon, lat)
/// vertices. Points exactly on an edge or vertex fall where the parity
/// rule puts them.
pub fn ring_contains(ring: &[(f64, f64)], lat: f64, lon: f64, edges: &mut usize) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (lon1, lat1) = ring[i];
        let (lon2, lat2) = ring[j];
        *edges += 1;

        if (lat1 > lat) != (lat2 > lat) && lon < (lon2 - lon1) * (lat - lat1) / (lat2 - lat1) + lon1 {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{rect_ring, BoundaryFeature, Polygon, RegionPrefilter};

    fn square_set() -> RegionSet {
        RegionPrefilter::default().build([BoundaryFeature::from_ring(rect_ring(10.0, 10.0, 20.0, 20.0))])
    }

    #[test]
    fn test_square_inside_and_outside() {
        let set = square_set();
        let tester = PointMembershipTester::new(&set);
        assert!(tester.test_membership(15.0, 15.0));
        assert!(!tester.test_membership(25.0, 25.0));
        assert_eq!(tester.region_at(15.0, 15.0), Some(1));
    }

    #[test]
    fn test_outside_bbox_evaluates_no_edges() {
        let set = square_set();
        let tester = PointMembershipTester::new(&set);
        for (lat, lon) in [(25.0, 25.0), (15.0, 9.99), (20.01, 15.0), (-80.0, 170.0)] {
            let probe = tester.probe(lat, lon);
            assert!(!probe.inside());
            assert_eq!(probe.edges_evaluated, 0, "({lat}, {lon})");
        }
    }

    #[test]
    fn test_inside_bbox_evaluates_edges() {
        let set = square_set();
        let probe = PointMembershipTester::new(&set).probe(15.0, 15.0);
        assert_eq!(probe.edges_evaluated, 5);
    }

    #[test]
    fn test_boundary_point_is_deterministic() {
        let set = square_set();
        let tester = PointMembershipTester::new(&set);
        let first = tester.test_membership(10.0, 15.0);
        for _ in 0..100 {
            assert_eq!(tester.test_membership(10.0, 15.0), first);
        }
        let corner = tester.test_membership(20.0, 20.0);
        for _ in 0..100 {
            assert_eq!(tester.test_membership(20.0, 20.0), corner);
        }
    }

    #[test]
    fn test_sub_bbox_prunes_other_parts() {
        let feature = BoundaryFeature::new(
            None,
            vec![
                Polygon::from_exterior(rect_ring(0.0, 0.0, 2.0, 2.0)),
                Polygon::from_exterior(rect_ring(10.0, 10.0, 12.0, 12.0)),
            ],
        );
        let set = RegionPrefilter::default().build([feature]);
        let tester = PointMembershipTester::new(&set);

        let probe = tester.probe(11.0, 11.0);
        assert!(probe.inside());
        // Only the second part's ring is walked.
        assert_eq!(probe.edges_evaluated, 5);

        // Inside the aggregate box, outside both parts.
        let gap = tester.probe(5.0, 5.0);
        assert!(!gap.inside());
        assert_eq!(gap.edges_evaluated, 0);
    }

    #[test]
    fn test_concave_ring() {
        // U shape opening north.
        let ring = vec![
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 30.0),
            (20.0, 30.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 30.0),
            (0.0, 30.0),
        ];
        let set = RegionPrefilter::default().build([BoundaryFeature::from_ring(ring)]);
        let tester = PointMembershipTester::new(&set);
        assert!(tester.test_membership(20.0, 5.0));
        assert!(tester.test_membership(20.0, 25.0));
        assert!(!tester.test_membership(20.0, 15.0));
        assert!(tester.test_membership(5.0, 15.0));
    }

    #[test]
    fn test_holes_are_ignored() {
        let feature = BoundaryFeature::new(
            None,
            vec![Polygon::new(vec![
                rect_ring(0.0, 0.0, 10.0, 10.0),
                rect_ring(4.0, 4.0, 6.0, 6.0),
            ])],
        );
        let set = RegionPrefilter::default().build([feature]);
        assert!(PointMembershipTester::new(&set).test_membership(5.0, 5.0));
    }

    #[test]
    fn test_degenerate_ring_never_matches() {
        let mut edges = 0;
        assert!(!ring_contains(&[(1.0, 1.0), (3.0, 3.0)], 2.0, 1.5, &mut edges));
        assert!(!ring_contains(&[(1.0, 1.0)], 1.0, 1.0, &mut edges));
        assert!(!ring_contains(&[], 1.0, 1.0, &mut edges));
    }

    #[test]
    fn test_later_region_found_when_first_misses() {
        let set = RegionPrefilter::default().build([
            BoundaryFeature::from_ring(rect_ring(0.0, 0.0, 5.0, 5.0)),
            BoundaryFeature::from_ring(rect_ring(40.0, 40.0, 45.0, 45.0)),
        ]);
        assert_eq!(PointMembershipTester::new(&set).region_at(42.0, 42.0), Some(2));
    }
}
