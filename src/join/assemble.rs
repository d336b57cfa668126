//! Resolving a key's matching geometry records into one polygon entity.

use crate::ir::{GeometryRecord, JoinKey, PolygonEntity, Ring};

use super::decode::{decode, first_part};
use super::{DuplicateRings, JoinOptions};

/// Which of the three matching cases a key fell into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// Exactly one record with a single part.
    Single,
    /// Exactly one record with several parts; one ring per part.
    MultiPart,
    /// Several records share the key; one ring per record.
    Duplicate,
}

impl MatchKind {
    /// Classifies a match list, or `None` when it is empty.
    pub fn of(matches: &[&GeometryRecord]) -> Option<Self> {
        match matches {
            [] => None,
            [only] if only.num_parts() > 1 => Some(MatchKind::MultiPart),
            [_] => Some(MatchKind::Single),
            _ => Some(MatchKind::Duplicate),
        }
    }
}

/// Builds the polygon for `key` from its matches with default options.
///
/// - no matches: `None`
/// - one match: every part of it, decoded
/// - several matches: the first part of each, one ring per record
pub fn assemble(key: &JoinKey, matches: &[&GeometryRecord]) -> Option<PolygonEntity> {
    assemble_with_options(key, matches, &JoinOptions::default())
}

/// Builds the polygon for `key` from its matches.
///
/// With [`DuplicateRings::FirstPartOnly`] a duplicated key takes only the
/// first part of each record, even when a record has several. That is the
/// established ring-count convention; [`DuplicateRings::AllParts`] decodes
/// every part instead.
///
/// When `opts.keep_empty_rings` is false and every ring turns out empty,
/// the key is treated as unmatched and `None` is returned.
pub fn assemble_with_options(
    key: &JoinKey,
    matches: &[&GeometryRecord],
    opts: &JoinOptions,
) -> Option<PolygonEntity> {
    let rings: Vec<Ring> = match MatchKind::of(matches)? {
        MatchKind::Single | MatchKind::MultiPart => decode(matches[0]),
        MatchKind::Duplicate => match opts.duplicate_rings {
            DuplicateRings::FirstPartOnly => matches.iter().map(|r| first_part(r)).collect(),
            DuplicateRings::AllParts => matches.iter().flat_map(|r| decode(r)).collect(),
        },
    };

    let rings: Vec<Ring> = if opts.keep_empty_rings {
        rings
    } else {
        rings.into_iter().filter(|ring| !ring.is_empty()).collect()
    };
    if rings.is_empty() {
        return None;
    }

    Some(PolygonEntity {
        key: key.clone(),
        rings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Point;

    fn stream(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn zero_matches_is_absent() {
        assert!(assemble(&JoinKey::Int(1), &[]).is_none());
        assert_eq!(MatchKind::of(&[]), None);
    }

    #[test]
    fn one_single_part_match_is_one_ring() {
        let record = GeometryRecord::new(1i64, stream(4));
        let polygon = assemble(&JoinKey::Int(1), &[&record]).unwrap();

        assert_eq!(polygon.key, JoinKey::Int(1));
        assert_eq!(polygon.rings.len(), 1);
        assert_eq!(polygon.rings[0].len(), 4);
        assert_eq!(MatchKind::of(&[&record]), Some(MatchKind::Single));
    }

    #[test]
    fn one_multi_part_match_is_fully_decoded() {
        let record = GeometryRecord::new(1i64, stream(9)).with_parts(vec![0, 4, 6]);
        let polygon = assemble(&JoinKey::Int(1), &[&record]).unwrap();

        let lens: Vec<_> = polygon.rings.iter().map(Ring::len).collect();
        assert_eq!(lens, vec![4, 2, 3]);
        assert_eq!(MatchKind::of(&[&record]), Some(MatchKind::MultiPart));
    }

    #[test]
    fn duplicate_key_is_one_ring_per_record() {
        let a = GeometryRecord::new(1i64, stream(4));
        let b = GeometryRecord::new(1i64, stream(5));
        let polygon = assemble(&JoinKey::Int(1), &[&a, &b]).unwrap();

        assert_eq!(polygon.rings.len(), 2);
        assert_eq!(polygon.rings[0].len(), 4);
        assert_eq!(polygon.rings[1].len(), 5);
    }

    #[test]
    fn duplicate_key_takes_first_part_only_by_default() {
        let a = GeometryRecord::new(1i64, stream(8)).with_parts(vec![0, 3]);
        let b = GeometryRecord::new(1i64, stream(4));
        let polygon = assemble(&JoinKey::Int(1), &[&a, &b]).unwrap();

        assert_eq!(polygon.rings.len(), 2);
        assert_eq!(polygon.rings[0].len(), 3);
        assert_eq!(polygon.rings[1].len(), 4);
    }

    #[test]
    fn duplicate_key_all_parts_when_requested() {
        let a = GeometryRecord::new(1i64, stream(8)).with_parts(vec![0, 3]);
        let b = GeometryRecord::new(1i64, stream(4));
        let opts = JoinOptions {
            duplicate_rings: DuplicateRings::AllParts,
            ..Default::default()
        };
        let polygon = assemble_with_options(&JoinKey::Int(1), &[&a, &b], &opts).unwrap();

        let lens: Vec<_> = polygon.rings.iter().map(Ring::len).collect();
        assert_eq!(lens, vec![3, 5, 4]);
    }

    #[test]
    fn empty_rings_dropped_when_requested() {
        let record = GeometryRecord::new(1i64, stream(4)).with_parts(vec![0, 4]);
        let kept = assemble(&JoinKey::Int(1), &[&record]).unwrap();
        assert_eq!(kept.rings.len(), 2);

        let opts = JoinOptions {
            keep_empty_rings: false,
            ..Default::default()
        };
        let dropped = assemble_with_options(&JoinKey::Int(1), &[&record], &opts).unwrap();
        assert_eq!(dropped.rings.len(), 1);
    }

    #[test]
    fn all_rings_empty_is_absent_when_dropping_empty_rings() {
        let a = GeometryRecord::new(1i64, Vec::new());
        let b = GeometryRecord::new(1i64, Vec::new());
        let opts = JoinOptions {
            keep_empty_rings: false,
            ..Default::default()
        };

        assert!(assemble_with_options(&JoinKey::Int(1), &[&a], &opts).is_none());
        assert!(assemble_with_options(&JoinKey::Int(1), &[&a, &b], &opts).is_none());

        // Kept by default: one empty ring per record
        let kept = assemble(&JoinKey::Int(1), &[&a]).unwrap();
        assert_eq!(kept.rings.len(), 1);
        assert!(kept.rings[0].is_empty());
    }
}
