//! Null and mask bitmap helpers over roaring bitmaps.
//!
//! Bitmaps are optional and shared: `None` means "no row set", and a
//! bitmap taken unchanged from an input is reused through its `Arc`.

use std::sync::Arc;

use roaring::RoaringBitmap;

/// Shared, immutable row bitmap.
pub type SharedBitmap = Arc<RoaringBitmap>;

/// Builds a bitmap from row indices.
#[must_use]
pub fn from_rows<I: IntoIterator<Item = u32>>(rows: I) -> RoaringBitmap {
    rows.into_iter().collect()
}

/// Returns true when `row` is set in an optional bitmap.
#[must_use]
pub fn contains(bitmap: Option<&SharedBitmap>, row: usize) -> bool {
    bitmap.is_some_and(|b| b.contains(row as u32))
}

/// Returns the largest row that is not below `len`, if any.
#[must_use]
pub fn out_of_bounds(bitmap: &RoaringBitmap, len: usize) -> Option<u32> {
    bitmap.max().filter(|&max| max as usize >= len)
}

/// Unions two optional bitmaps.
///
/// When only one side has a bitmap the result shares it; when both do the
/// result is a fresh union; when neither does the result is `None`.
#[must_use]
pub fn union(left: Option<&SharedBitmap>, right: Option<&SharedBitmap>) -> Option<SharedBitmap> {
    match (left, right) {
        (None, None) => None,
        (Some(one), None) | (None, Some(one)) => Some(Arc::clone(one)),
        (Some(l), Some(r)) if Arc::ptr_eq(l, r) => Some(Arc::clone(l)),
        (Some(l), Some(r)) => Some(Arc::new(l.as_ref() | r.as_ref())),
    }
}

/// Unions any number of optional bitmaps.
#[must_use]
pub fn union_all<'a, I>(bitmaps: I) -> Option<SharedBitmap>
where
    I: IntoIterator<Item = Option<&'a SharedBitmap>>,
{
    bitmaps
        .into_iter()
        .fold(None, |acc, next| union(acc.as_ref(), next))
}

/// Intersects any number of optional bitmaps.
///
/// A missing bitmap is the empty set, so any `None` operand makes the
/// result `None`.
#[must_use]
pub fn intersect_all<'a, I>(bitmaps: I) -> Option<SharedBitmap>
where
    I: IntoIterator<Item = Option<&'a SharedBitmap>>,
{
    let mut acc: Option<SharedBitmap> = None;
    for bitmap in bitmaps {
        let bitmap = bitmap?;
        acc = Some(match acc {
            None => Arc::clone(bitmap),
            Some(prev) if Arc::ptr_eq(&prev, bitmap) => prev,
            Some(prev) => Arc::new(prev.as_ref() & bitmap.as_ref()),
        });
    }
    acc.filter(|b| !b.is_empty())
}

/// Expands the bitmap of a length-1 constant operand to `len` rows.
///
/// A set row 0 marks every row; otherwise no row is marked.
#[must_use]
pub fn broadcast(bitmap: Option<&SharedBitmap>, len: usize) -> Option<SharedBitmap> {
    if !contains(bitmap, 0) {
        return None;
    }
    let mut full = RoaringBitmap::new();
    full.insert_range(0..len as u32);
    Some(Arc::new(full))
}
