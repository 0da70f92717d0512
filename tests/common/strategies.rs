//! Proptest strategies for paging windows and data sets

use proptest::prelude::*;

/// (total rows, first result, page size) with the offset allowed to run past the end
pub fn window_strategy() -> impl Strategy<Value = (i64, u64, u64)> {
    (0i64..60).prop_flat_map(|total| (Just(total), 0u64..(total as u64 + 20), 1u64..25))
}

/// Child rows per parent; 1 means no fan-out
pub fn fan_out_strategy() -> impl Strategy<Value = i64> {
    1i64..6
}
