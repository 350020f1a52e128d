use log::trace;
use roadside_geo::{Crs, GeoError, Srid};

use crate::path::{Path, PathError, segment_length};

/// Cumulative distances within this many path units of a cut are treated
/// as landing on the vertex itself, so no near-zero segment is produced.
pub const VERTEX_EPSILON: f64 = 1e-9;

/// The outcome of cutting a [`Path`] at a distance along it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cut {
    /// The distance did not fall strictly inside the path, so no further
    /// segmentation is possible. Holds the original path, unmodified.
    Whole(Path),
    /// The path up to the cut, and the path from the cut onwards.
    /// The vertex at the cut belongs to both.
    Split { prefix: Path, suffix: Path },
}

impl Cut {
    pub fn is_split(&self) -> bool {
        matches!(self, Cut::Split { .. })
    }

    pub fn prefix(&self) -> Option<&Path> {
        match self {
            Cut::Split { prefix, .. } => Some(prefix),
            Cut::Whole(_) => None,
        }
    }

    pub fn suffix(&self) -> Option<&Path> {
        match self {
            Cut::Split { suffix, .. } => Some(suffix),
            Cut::Whole(_) => None,
        }
    }
}

impl Path {
    /// Splits the path `distance` units from its first vertex.
    ///
    /// Returns `None` when the distance is not strictly within the path,
    /// see [`Path::cut`].
    pub fn split_at(&self, distance: f64) -> Option<(Path, Path)> {
        let length = self.length();
        if !distance.is_finite()
            || distance <= VERTEX_EPSILON
            || distance >= length - VERTEX_EPSILON
        {
            return None;
        }

        let mut travelled = 0.0;
        for (index, pair) in self.coords.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            let segment = segment_length(start, end);
            let reached = travelled + segment;
            let vertex = index + 1;

            // Lands on a vertex, which is then shared by both halves.
            if (reached - distance).abs() <= VERTEX_EPSILON {
                trace!("cut at vertex {vertex} of {}", self.coords.len());

                return Some((
                    Path::from_unchecked(self.srid, self.coords[..=vertex].to_vec()),
                    Path::from_unchecked(self.srid, self.coords[vertex..].to_vec()),
                ));
            }

            // Straddles the segment, so a vertex is interpolated.
            if reached > distance {
                let ratio = (distance - travelled) / segment;
                let cut = start + (end - start) * ratio;
                trace!("cut on segment {index} at ratio {ratio}");

                let mut prefix = Vec::with_capacity(vertex + 1);
                prefix.extend_from_slice(&self.coords[..vertex]);
                prefix.push(cut);

                let mut suffix = Vec::with_capacity(self.coords.len() - vertex + 1);
                suffix.push(cut);
                suffix.extend_from_slice(&self.coords[vertex..]);

                return Some((
                    Path::from_unchecked(self.srid, prefix),
                    Path::from_unchecked(self.srid, suffix),
                ));
            }

            travelled = reached;
        }

        None
    }

    /// Cuts the path `distance` units from its first vertex.
    ///
    /// A distance at or before the start, or at or beyond the end, cannot
    /// cut the path, and yields [`Cut::Whole`] holding the path unmodified.
    /// Otherwise the two halves are returned, such that their lengths sum
    /// to the length of the original path.
    ///
    /// ```rust
    /// use roadside::{Cut, Path};
    /// use roadside_geo::Srid;
    /// use geo::coord;
    ///
    /// let path = Path::new(Srid(32611), vec![
    ///     coord! { x: 0.0, y: 0.0 },
    ///     coord! { x: 10.0, y: 0.0 },
    /// ]).unwrap();
    ///
    /// let Cut::Split { prefix, suffix } = path.cut(4.0) else {
    ///     panic!("4m lies within the path");
    /// };
    /// assert_eq!(prefix.last(), coord! { x: 4.0, y: 0.0 });
    /// assert_eq!(suffix.first(), coord! { x: 4.0, y: 0.0 });
    /// ```
    pub fn cut(self, distance: f64) -> Cut {
        match self.split_at(distance) {
            Some((prefix, suffix)) => Cut::Split { prefix, suffix },
            None => Cut::Whole(self),
        }
    }
}

/// Cuts a path measured through a metric reference system.
///
/// The path is projected into `projected`, cut `distance` meters from its
/// start, and both halves returned in the reference system of the input.
pub fn cut_geographic(path: Path, projected: Srid, distance: f64) -> Result<Cut, PathError> {
    if !Crs::resolve(projected)?.is_metric() {
        return Err(GeoError::InvalidReferenceSystem(projected).into());
    }

    let source = path.srid();
    let metric = path.reproject(projected)?;

    match metric.split_at(distance) {
        Some((prefix, suffix)) => Ok(Cut::Split {
            prefix: prefix.reproject(source)?,
            suffix: suffix.reproject(source)?,
        }),
        None => Ok(Cut::Whole(path)),
    }
}
