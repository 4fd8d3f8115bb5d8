use crate::geometry::{Direction, Point};

/// Drops interior points that do not mark a turn.
///
/// An interior point survives only when both adjacent legs are axis-aligned
/// and point in different directions. The first and last points are always
/// kept; paths of two points or fewer are returned unchanged.
pub fn simplify_path(path: &[Point]) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Vec::new();
    };
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut result = vec![first];
    result.extend(path.windows(3).filter_map(|window| {
        let [prev, curr, next] = [window[0], window[1], window[2]];
        match (Direction::between(prev, curr), Direction::between(curr, next)) {
            (Some(incoming), Some(outgoing)) if incoming != outgoing => Some(curr),
            _ => None,
        }
    }));
    result.push(last);
    result
}
