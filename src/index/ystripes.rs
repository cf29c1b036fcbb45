use crate::Segment;
use log::debug;
use std::f64::consts::PI;

/// Horizontal-stripe index over a closed ring's segments.
///
/// The ring's y extent is split into equal stripes; each stripe lists the
/// indices of every segment whose y span overlaps it (a segment may appear in
/// several stripes).  A point query touches exactly one stripe, so crossing
/// parity is accumulated over that stripe's list alone.
///
/// Stripe count scales with the ring's Polsby-Popper compactness score so
/// convoluted rings get finer stripes.  Stored as one exactly-sized buffer of
/// segment indices plus a per-stripe offset table.
#[derive(Debug, Clone)]
pub struct YStripes {
    y_min: f64,
    y_max: f64,
    nstripes: usize,
    starts: Vec<usize>,
    entries: Vec<usize>,
}

const MIN_STRIPES: usize = 32;
const MAX_STRIPES: usize = 8192;

impl YStripes {
    /// Build over `segments(i)` for i in 0..nsegs.  `area` is the ring's
    /// unsigned shoelace area; the perimeter is measured here.
    pub(crate) fn build<F>(nsegs: usize, y_min: f64, y_max: f64, area: f64, segment_at: F) -> Self
    where
        F: Fn(usize) -> Segment,
    {
        let mut perimeter = 0.;
        for i in 0..nsegs {
            let seg = segment_at(i);
            perimeter += (seg.end - seg.start).dot(seg.end - seg.start).sqrt();
        }
        let score = if perimeter > 0. {
            (4. * PI * area) / (perimeter * perimeter)
        } else {
            0.
        };
        let nstripes = ((nsegs as f64 * score) as usize)
            .max(MIN_STRIPES)
            .min(MAX_STRIPES);
        debug!(
            "ystripes: {} stripes for {} segments (score {:.3})",
            nstripes, nsegs, score
        );

        let span = y_max - y_min;
        let stripe_of = |y: f64| -> usize {
            if span <= 0. {
                return 0;
            }
            let s = ((y - y_min) / span * nstripes as f64) as isize;
            s.max(0).min(nstripes as isize - 1) as usize
        };

        // Pass 1: count memberships per stripe.
        let mut counts = vec![0usize; nstripes];
        for i in 0..nsegs {
            let rect = segment_at(i).rect();
            for stripe in stripe_of(rect.y_min)..=stripe_of(rect.y_max) {
                counts[stripe] += 1;
            }
        }

        // Pass 2: lay the lists out back-to-back in a single buffer.
        let mut starts = Vec::with_capacity(nstripes + 1);
        let mut total = 0;
        for &c in &counts {
            starts.push(total);
            total += c;
        }
        starts.push(total);

        let mut cursors = starts[..nstripes].to_vec();
        let mut entries = vec![0usize; total];
        for i in 0..nsegs {
            let rect = segment_at(i).rect();
            for stripe in stripe_of(rect.y_min)..=stripe_of(rect.y_max) {
                entries[cursors[stripe]] = i;
                cursors[stripe] += 1;
            }
        }

        YStripes {
            y_min,
            y_max,
            nstripes,
            starts,
            entries,
        }
    }

    pub fn num_stripes(&self) -> usize {
        self.nstripes
    }

    /// The stripe containing the given y; clamped at the extent bounds.
    pub fn stripe_of(&self, y: f64) -> usize {
        let span = self.y_max - self.y_min;
        if span <= 0. {
            return 0;
        }
        let s = ((y - self.y_min) / span * self.nstripes as f64) as isize;
        s.max(0).min(self.nstripes as isize - 1) as usize
    }

    /// Segment indices listed in one stripe.
    pub fn stripe(&self, stripe: usize) -> &[usize] {
        &self.entries[self.starts[stripe]..self.starts[stripe + 1]]
    }

    /// The inclusive stripe range overlapping [low, high].
    pub fn stripe_range(&self, low: f64, high: f64) -> (usize, usize) {
        (self.stripe_of(low), self.stripe_of(high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    fn square_segment(i: usize) -> Segment {
        let pts = [
            Coordinate::new(0., 0.),
            Coordinate::new(10., 0.),
            Coordinate::new(10., 10.),
            Coordinate::new(0., 10.),
            Coordinate::new(0., 0.),
        ];
        Segment::new(pts[i], pts[i + 1])
    }

    #[test]
    fn test_build_square() {
        let stripes = YStripes::build(4, 0., 10., 100., square_segment);
        assert!(stripes.num_stripes() >= MIN_STRIPES);
        // The two vertical sides span every stripe; the horizontal sides
        // appear only at the extremes.
        for s in 0..stripes.num_stripes() {
            let list = stripes.stripe(s);
            assert!(list.contains(&1), "stripe {} missing right side", s);
            assert!(list.contains(&3), "stripe {} missing left side", s);
        }
        assert!(stripes.stripe(0).contains(&0));
        assert!(!stripes.stripe(stripes.num_stripes() / 2).contains(&0));
        assert!(stripes
            .stripe(stripes.num_stripes() - 1)
            .contains(&2));
    }

    #[test]
    fn test_stripe_of_clamps() {
        let stripes = YStripes::build(4, 0., 10., 100., square_segment);
        assert_eq!(stripes.stripe_of(-5.), 0);
        assert_eq!(stripes.stripe_of(15.), stripes.num_stripes() - 1);
        assert_eq!(stripes.stripe_of(10.), stripes.num_stripes() - 1);
    }

    #[test]
    fn test_membership_covers_span() {
        // Every segment must be listed in every stripe its y-span touches.
        let stripes = YStripes::build(4, 0., 10., 100., square_segment);
        let (lo, hi) = stripes.stripe_range(0., 10.);
        assert_eq!(lo, 0);
        assert_eq!(hi, stripes.num_stripes() - 1);
        for s in lo..=hi {
            for &i in stripes.stripe(s) {
                let rect = square_segment(i).rect();
                assert!(stripes.stripe_of(rect.y_min) <= s);
                assert!(s <= stripes.stripe_of(rect.y_max));
            }
        }
    }
}
